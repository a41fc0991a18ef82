//! Scheduled meter reading date (month + day, no year).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// The yearly date (MMDD) on which the meter is scheduled to be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMeterReadingDate(String);

impl ScheduledMeterReadingDate {
    pub fn create(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::ScheduledMeterReadingDateFormat {
            value: value.to_string(),
        };
        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let month: u32 = value[..2].parse().map_err(|_| invalid())?;
        let day: u32 = value[2..].parse().map_err(|_| invalid())?;
        let days_in_month = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(invalid()),
        };
        if day == 0 || day > days_in_month {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduledMeterReadingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Tests ──────────────────────────────────────────────────────
