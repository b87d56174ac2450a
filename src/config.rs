use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tabulation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulationOptions {
    /// Number of seats to fill. Negative values are rejected.
    pub seats: i64,
    /// Skip repeated names on a ballot instead of rejecting the ballot.
    pub allow_duplicate_rankings: bool,
}

impl Default for TabulationOptions {
    fn default() -> Self {
        Self {
            seats: 1,
            allow_duplicate_rankings: false,
        }
    }
}

impl TabulationOptions {
    pub fn with_seats(seats: i64) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabulationError;

    #[test]
    fn missing_fields_use_defaults() {
        let options = TabulationOptions::from_json_str(r#"{"seats": 3}"#).unwrap();
        assert_eq!(options.seats, 3);
        assert!(!options.allow_duplicate_rankings);

        let options = TabulationOptions::from_json_str("{}").unwrap();
        assert_eq!(options, TabulationOptions::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = TabulationOptions::from_json_str(r#"{"seats": "two"}"#).unwrap_err();
        assert!(matches!(err, TabulationError::Config(_)));
    }
}
