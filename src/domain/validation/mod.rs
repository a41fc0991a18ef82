//! Business-rule validation framework.
//!
//! Every precondition in the domain is expressed as a small [`BusinessRule`]
//! struct. Rules are evaluated eagerly, never short-circuited, and their
//! violations are collected into a [`BusinessRulesValidationResult`] so a
//! caller sees the complete list of problems in a single pass.

pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

/// One violated precondition: a regulatory error code plus a human-readable
/// message. One variant per rule family, each carrying the offending values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "details")]
pub enum ValidationError {
    GsrnNumberFormat { value: String },
    MeteringPointNotFound { gsrn: String },
    DuplicateGsrnNumber { gsrn: String },
    UnknownMeteringPointType { value: String },
    Unauthorized { reason: String },
    EffectiveDateFormat { value: String },
    EffectiveDateOutsideWindow { effective_date: String },
    StreetNameRequired,
    StreetCodeFormat { value: String },
    PostCodeFormat { value: String },
    CityRequired,
    MeterIdRequired,
    MeterIdNotAllowed { method: String },
    SettlementMethodRequired,
    CapacityRequired,
    CapacityFormat { value: String },
    AssetTypeRequired,
    ExchangeGridAreasRequired,
    ScheduledMeterReadingDateFormat { value: String },
    ScheduledMeterReadingDateCannotBeChanged,
    MeteringPointMustBeNew { state: String },
    MeteringPointMustBeConnected { state: String },
    MeteringPointMustBeDisconnected { state: String },
    MeteringPointIsClosedDown { state: String },
    MustHaveEnergySupplier { gsrn: String },
    ParentNotFound { gsrn: String },
    ParentGridAreaMismatch {
        child_grid_area: String,
        parent_grid_area: String,
    },
    ParentTypeNotCouplable { parent_type: String },
    ReadingPeriodicityMismatch { child: String, parent: String },
}

impl ValidationError {
    /// The market-standard reason code reported to the EDI layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GsrnNumberFormat { .. } | Self::MeteringPointNotFound { .. } => "E10",
            Self::DuplicateGsrnNumber { .. } => "D14",
            Self::UnknownMeteringPointType { .. } => "D18",
            Self::Unauthorized { .. } => "E16",
            Self::EffectiveDateFormat { .. } | Self::EffectiveDateOutsideWindow { .. } => "E17",
            Self::StreetNameRequired
            | Self::StreetCodeFormat { .. }
            | Self::PostCodeFormat { .. }
            | Self::CityRequired => "E86",
            Self::MeterIdRequired | Self::MeterIdNotAllowed { .. } => "E87",
            Self::SettlementMethodRequired => "D15",
            Self::CapacityRequired | Self::CapacityFormat { .. } => "D56",
            Self::AssetTypeRequired => "D59",
            Self::ExchangeGridAreasRequired => "D46",
            Self::ScheduledMeterReadingDateFormat { .. }
            | Self::ScheduledMeterReadingDateCannotBeChanged => "D62",
            Self::MeteringPointMustBeNew { .. }
            | Self::MeteringPointMustBeConnected { .. }
            | Self::MeteringPointMustBeDisconnected { .. }
            | Self::MeteringPointIsClosedDown { .. } => "D16",
            Self::MustHaveEnergySupplier { .. } => "D36",
            Self::ParentNotFound { .. }
            | Self::ParentGridAreaMismatch { .. }
            | Self::ParentTypeNotCouplable { .. } => "D37",
            Self::ReadingPeriodicityMismatch { .. } => "D53",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GsrnNumberFormat { value } => {
                write!(f, "GSRN number {value} is not an 18-digit number with a valid check digit")
            }
            Self::MeteringPointNotFound { gsrn } => {
                write!(f, "Metering point {gsrn} does not exist")
            }
            Self::DuplicateGsrnNumber { gsrn } => {
                write!(f, "A metering point with GSRN {gsrn} already exists")
            }
            Self::UnknownMeteringPointType { value } => {
                write!(f, "{value} is not a known metering point type")
            }
            Self::Unauthorized { reason } => write!(f, "Not authorized: {reason}"),
            Self::EffectiveDateFormat { value } => {
                write!(f, "Effective date {value} is not local midnight in the market time zone")
            }
            Self::EffectiveDateOutsideWindow { effective_date } => {
                write!(f, "Effective date {effective_date} is outside the allowed time period")
            }
            Self::StreetNameRequired => write!(f, "Street name is required"),
            Self::StreetCodeFormat { value } => {
                write!(f, "Street code {value} must be a 4-digit code between 0001 and 9999")
            }
            Self::PostCodeFormat { value } => {
                write!(f, "Post code {value} must be a 4-digit code")
            }
            Self::CityRequired => write!(f, "City is required"),
            Self::MeterIdRequired => {
                write!(f, "A meter id is required when the metering method is physical")
            }
            Self::MeterIdNotAllowed { method } => {
                write!(f, "A meter id is not allowed when the metering method is {method}")
            }
            Self::SettlementMethodRequired => write!(f, "Settlement method is required"),
            Self::CapacityRequired => {
                write!(f, "Capacity is required when the net settlement group is not zero")
            }
            Self::CapacityFormat { value } => {
                write!(f, "Capacity {value} is not a valid decimal value")
            }
            Self::AssetTypeRequired => {
                write!(f, "Asset type is required when the net settlement group is not zero")
            }
            Self::ExchangeGridAreasRequired => {
                write!(f, "Exchange metering points require both a from-grid and a to-grid area")
            }
            Self::ScheduledMeterReadingDateFormat { value } => {
                write!(f, "Scheduled meter reading date {value} is not a valid month and day")
            }
            Self::ScheduledMeterReadingDateCannotBeChanged => {
                write!(f, "The scheduled meter reading date cannot be changed once assigned")
            }
            Self::MeteringPointMustBeNew { state } => {
                write!(f, "Metering point must be new to be connected, current state is {state}")
            }
            Self::MeteringPointMustBeConnected { state } => {
                write!(f, "Metering point must be connected, current state is {state}")
            }
            Self::MeteringPointMustBeDisconnected { state } => {
                write!(f, "Metering point must be disconnected, current state is {state}")
            }
            Self::MeteringPointIsClosedDown { state } => {
                write!(f, "Metering point is {state} and allows no further transitions")
            }
            Self::MustHaveEnergySupplier { gsrn } => {
                write!(f, "Metering point {gsrn} must have an energy supplier with start of supply on or before the effective date")
            }
            Self::ParentNotFound { gsrn } => {
                write!(f, "Parent metering point {gsrn} does not exist")
            }
            Self::ParentGridAreaMismatch {
                child_grid_area,
                parent_grid_area,
            } => {
                write!(f, "Child grid area {child_grid_area} does not match parent grid area {parent_grid_area}")
            }
            Self::ParentTypeNotCouplable { parent_type } => {
                write!(f, "A metering point of type {parent_type} cannot act as a parent")
            }
            Self::ReadingPeriodicityMismatch { child, parent } => {
                write!(f, "Reading occurrence {child} of the child must match the parent's {parent}")
            }
        }
    }
}

/// One atomic precondition check. Implementations evaluate eagerly at
/// construction; `validation_error` is meaningful only when `is_broken`.
pub trait BusinessRule {
    fn is_broken(&self) -> bool;
    fn validation_error(&self) -> ValidationError;
}

/// Aggregation of a rule set into success/failure plus the full, ordered
/// list of violations. Rules are never short-circuited.
#[derive(Debug, Clone, Default)]
pub struct BusinessRulesValidationResult {
    errors: Vec<ValidationError>,
}

impl BusinessRulesValidationResult {
    /// A result with no violations.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Evaluates every rule in declaration order and collects the violations.
    pub fn from_rules(rules: &[&dyn BusinessRule]) -> Self {
        let errors = rules
            .iter()
            .filter(|rule| rule.is_broken())
            .map(|rule| rule.validation_error())
            .collect();
        Self { errors }
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Concatenates two results, preserving order.
    pub fn combine(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBroken(ValidationError);

    impl BusinessRule for AlwaysBroken {
        fn is_broken(&self) -> bool {
            true
        }

        fn validation_error(&self) -> ValidationError {
            self.0.clone()
        }
    }

    struct NeverBroken;

    impl BusinessRule for NeverBroken {
        fn is_broken(&self) -> bool {
            false
        }

        fn validation_error(&self) -> ValidationError {
            ValidationError::CityRequired
        }
    }

    #[test]
    fn empty_rule_set_is_success() {
        let result = BusinessRulesValidationResult::from_rules(&[]);
        assert!(result.success());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn all_broken_rules_are_reported_not_just_the_first() {
        let first = AlwaysBroken(ValidationError::StreetNameRequired);
        let second = AlwaysBroken(ValidationError::CityRequired);
        let result = BusinessRulesValidationResult::from_rules(&[&first, &NeverBroken, &second]);
        assert!(!result.success());
        assert_eq!(
            result.errors(),
            &[ValidationError::StreetNameRequired, ValidationError::CityRequired]
        );
    }

    #[test]
    fn errors_keep_declaration_order() {
        let first = AlwaysBroken(ValidationError::CityRequired);
        let second = AlwaysBroken(ValidationError::StreetNameRequired);
        let result = BusinessRulesValidationResult::from_rules(&[&first, &second]);
        assert_eq!(result.errors()[0], ValidationError::CityRequired);
        assert_eq!(result.errors()[1], ValidationError::StreetNameRequired);
    }

    #[test]
    fn combine_concatenates() {
        let left = BusinessRulesValidationResult::from_errors(vec![ValidationError::CityRequired]);
        let right =
            BusinessRulesValidationResult::from_errors(vec![ValidationError::StreetNameRequired]);
        let combined = left.combine(right);
        assert_eq!(combined.errors().len(), 2);
        assert_eq!(combined.errors()[0], ValidationError::CityRequired);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ValidationError::StreetNameRequired.code(), "E86");
        assert_eq!(
            ValidationError::MeteringPointMustBeConnected { state: "new".into() }.code(),
            "D16"
        );
        assert_eq!(
            ValidationError::MustHaveEnergySupplier { gsrn: "x".into() }.code(),
            "D36"
        );
    }
}
