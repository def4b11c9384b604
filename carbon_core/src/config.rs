//! # Calculator Configuration
//!
//! One value object carrying everything a calculation run is parameterized
//! by: the selected database per material family, the country unit
//! convention, and the project's reinforcement rates.
//!
//! Every field has a sensible default, and the struct deserializes with
//! `#[serde(default)]`, so a config file can specify any subset:
//!
//! ```json
//! { "timber_database": "ATHENA 2021", "country": "USA" }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::config::CalculatorConfig;
//!
//! let config = CalculatorConfig::default();
//! assert_eq!(config.timber_database.name(), "Binderholz, 2019");
//! assert_eq!(config.steel_database.name(), "Type 350 MPa");
//! assert_eq!(config.concrete_database.name(), "GUL Low Air");
//! assert_eq!(config.country.code(), "CAN");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculation::strength::Country;
use crate::factors::{ConcreteDatabase, SteelDatabase, TimberDatabase};
use crate::reinforcement::ReinforcementRates;

/// Configuration for one calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Timber database to resolve wood materials against
    pub timber_database: TimberDatabase,
    /// Steel database for metal materials and rebar
    pub steel_database: SteelDatabase,
    /// Concrete mix database
    pub concrete_database: ConcreteDatabase,
    /// Country the model originates from (strength unit convention)
    pub country: Country,
    /// Reinforcement rates per concrete element type
    pub reinforcement_rates: ReinforcementRates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.timber_database, TimberDatabase::Binderholz2019);
        assert_eq!(config.steel_database, SteelDatabase::Type350MPa);
        assert_eq!(config.concrete_database, ConcreteDatabase::GulLowAir);
        assert_eq!(config.country, Country::Canada);
        assert_eq!(config.reinforcement_rates.rate("Column"), 450.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str("{\"timber_database\": \"ATHENA 2021\"}").unwrap();
        assert_eq!(config.timber_database, TimberDatabase::Athena2021);
        // Everything unspecified keeps its default
        assert_eq!(config.concrete_database, ConcreteDatabase::GulLowAir);
        assert_eq!(config.country, Country::Canada);
    }

    #[test]
    fn test_roundtrip_uses_display_names() {
        let config = CalculatorConfig {
            timber_database: TimberDatabase::NordicStructures2018,
            country: Country::UnitedStates,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"Nordic Structures, 2018\""));
        assert!(json.contains("\"USA\""));

        let parsed: CalculatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_database_name_fails_to_parse() {
        let result = serde_json::from_str::<CalculatorConfig>(
            "{\"timber_database\": \"Bogus DB\"}",
        );
        assert!(result.is_err());
    }
}
