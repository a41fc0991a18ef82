//! Reading periodicity alignment between child and parent.

use crate::domain::metering_points::values::{MeteringPointType, ReadingOccurrence};
use crate::domain::validation::{BusinessRulesValidationResult, ValidationError};

/// For exchange-reactive-energy points with a parent, the child's (possibly
/// updated) reading occurrence must match the parent's. Silently satisfied
/// when there is no parent or for any other type.
pub struct ReadingPeriodicityOfChildMustMatchParent;

impl ReadingPeriodicityOfChildMustMatchParent {
    pub fn check(
        child_type: MeteringPointType,
        child_occurrence: ReadingOccurrence,
        parent_occurrence: Option<ReadingOccurrence>,
    ) -> BusinessRulesValidationResult {
        if child_type != MeteringPointType::ExchangeReactiveEnergy {
            return BusinessRulesValidationResult::valid();
        }
        match parent_occurrence {
            Some(parent) if parent != child_occurrence => {
                BusinessRulesValidationResult::from_errors(vec![
                    ValidationError::ReadingPeriodicityMismatch {
                        child: child_occurrence.to_string(),
                        parent: parent.to_string(),
                    },
                ])
            }
            _ => BusinessRulesValidationResult::valid(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_rejected_for_exchange_reactive_energy() {
        let result = ReadingPeriodicityOfChildMustMatchParent::check(
            MeteringPointType::ExchangeReactiveEnergy,
            ReadingOccurrence::Hourly,
            Some(ReadingOccurrence::Monthly),
        );
        assert!(!result.success());
        assert_eq!(result.errors()[0].code(), "D53");
    }

    #[test]
    fn matching_occurrence_is_accepted() {
        let result = ReadingPeriodicityOfChildMustMatchParent::check(
            MeteringPointType::ExchangeReactiveEnergy,
            ReadingOccurrence::Hourly,
            Some(ReadingOccurrence::Hourly),
        );
        assert!(result.success());
    }

    #[test]
    fn no_parent_is_silently_satisfied() {
        let result = ReadingPeriodicityOfChildMustMatchParent::check(
            MeteringPointType::ExchangeReactiveEnergy,
            ReadingOccurrence::Hourly,
            None,
        );
        assert!(result.success());
    }

    #[test]
    fn other_types_are_not_subject_to_the_policy() {
        let result = ReadingPeriodicityOfChildMustMatchParent::check(
            MeteringPointType::Consumption,
            ReadingOccurrence::Hourly,
            Some(ReadingOccurrence::Monthly),
        );
        assert!(result.success());
    }
}
