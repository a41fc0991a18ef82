//! Effective date window policy.

use chrono::{DateTime, Duration, Utc};

use crate::domain::metering_points::values::EffectiveDate;
use crate::domain::validation::{BusinessRulesValidationResult, ValidationError};

/// Accepts effective dates within `[now - max_days_in_past, now +
/// max_days_in_future]`. One parametrized policy serves every use case; the
/// window per use case comes from configuration.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveDatePolicy {
    max_days_in_past: i64,
    max_days_in_future: i64,
}

impl EffectiveDatePolicy {
    pub fn new(max_days_in_past: i64, max_days_in_future: i64) -> Self {
        Self {
            max_days_in_past,
            max_days_in_future,
        }
    }

    pub fn check(
        &self,
        now: DateTime<Utc>,
        effective_date: &EffectiveDate,
    ) -> BusinessRulesValidationResult {
        let candidate = effective_date.instant();
        let earliest = now - Duration::days(self.max_days_in_past);
        let latest = now + Duration::days(self.max_days_in_future);
        if candidate < earliest || candidate > latest {
            BusinessRulesValidationResult::from_errors(vec![
                ValidationError::EffectiveDateOutsideWindow {
                    effective_date: effective_date.to_string(),
                },
            ])
        } else {
            BusinessRulesValidationResult::valid()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> EffectiveDate {
        EffectiveDate::parse(value).unwrap()
    }

    #[test]
    fn window_with_two_days_back_one_forward() {
        let policy = EffectiveDatePolicy::new(2, 1);
        // "Now" is midnight (market time) on 2023-06-15.
        let now = date("2023-06-14T22:00:00Z").instant();

        // 3 days in the past: rejected.
        assert!(!policy.check(now, &date("2023-06-11T22:00:00Z")).success());
        // 2 days and 1 day in the past: accepted.
        assert!(policy.check(now, &date("2023-06-12T22:00:00Z")).success());
        assert!(policy.check(now, &date("2023-06-13T22:00:00Z")).success());
        // Today: accepted.
        assert!(policy.check(now, &date("2023-06-14T22:00:00Z")).success());
        // 1 day forward: accepted; 2 days forward: rejected.
        assert!(policy.check(now, &date("2023-06-15T22:00:00Z")).success());
        assert!(!policy.check(now, &date("2023-06-16T22:00:00Z")).success());
    }

    #[test]
    fn violation_carries_code_e17() {
        let policy = EffectiveDatePolicy::new(0, 0);
        let now = date("2023-06-14T22:00:00Z").instant();
        let result = policy.check(now, &date("2023-06-20T22:00:00Z"));
        assert_eq!(result.errors()[0].code(), "E17");
    }
}
