//! Effective date value object.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// The market time zone whose civil midnight anchors all effective dates.
pub const MARKET_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;

/// The UTC instant at which a requested change takes legal effect.
///
/// Only instants that fall on local midnight in the market time zone are
/// valid: `23:00:00Z` during winter (UTC+1) and `22:00:00Z` during summer
/// (UTC+2). Anything else for the given calendar date is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectiveDate(DateTime<Utc>);

impl EffectiveDate {
    /// Parses an RFC 3339 timestamp and verifies the midnight boundary.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::EffectiveDateFormat {
            value: value.to_string(),
        };
        let instant = DateTime::parse_from_rfc3339(value)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        if instant.with_timezone(&MARKET_TIMEZONE).time() != NaiveTime::MIN {
            return Err(invalid());
        }
        Ok(Self(instant))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ── Tests ──────────────────────────────────────────────────────
