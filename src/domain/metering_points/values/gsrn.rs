//! GSRN number value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// Market-wide metering point identifier: 18 digits carrying a GS1 mod-10
/// check digit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GsrnNumber(String);

impl GsrnNumber {
    /// Accepts the value iff it is 18 ASCII digits with a valid check digit.
    /// Invalid input is an expected condition and never panics.
    pub fn create(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::GsrnNumberFormat {
            value: value.to_string(),
        };
        if value.len() != 18 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let digits: Vec<u32> = value.bytes().map(|b| u32::from(b - b'0')).collect();
        if check_digit(&digits[..17]) != digits[17] {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GsrnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GS1 mod-10: weight 3 on the rightmost payload digit, alternating 3/1.
fn check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .rev()
        .zip([3u32, 1].into_iter().cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();
    (10 - sum % 10) % 10
}

// ── Tests ──────────────────────────────────────────────────────
