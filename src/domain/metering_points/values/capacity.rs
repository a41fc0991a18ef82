//! Capacity and power limit values.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// Installed capacity in kW. Carried by production metering points in a
/// net settlement group other than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity(Decimal);

impl Capacity {
    pub fn create(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::CapacityFormat {
            value: value.to_string(),
        };
        let decimal = Decimal::from_str(value).map_err(|_| invalid())?;
        if decimal.is_sign_negative() {
            return Err(invalid());
        }
        Ok(Self(decimal))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contracted connection power limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerLimit {
    /// Limit in kWh.
    pub kwh: Option<i32>,
    /// Fuse size in ampere.
    pub ampere: Option<i32>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_decimal_values() {
        assert!(Capacity::create("1300").is_ok());
        assert!(Capacity::create("0.9").is_ok());
        assert!(Capacity::create("123.456").is_ok());
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(Capacity::create("-1").is_err());
        assert!(Capacity::create("1,3").is_err());
        assert!(Capacity::create("abc").is_err());
        assert_eq!(Capacity::create("abc").unwrap_err().code(), "D56");
    }
}
