//! Rule set for the special group (child points such as exchange reactive
//! energy or VE production). Only the general rules apply; periodicity
//! alignment with the parent is a policy, not master data validation.

use super::general_rules;
use crate::domain::metering_points::master_data::MasterData;
use crate::domain::validation::BusinessRulesValidationResult;

pub(super) fn validate(
    merged: &MasterData,
    _previous: Option<&MasterData>,
) -> BusinessRulesValidationResult {
    general_rules(merged)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metering_points::test_support::sample_master_data;
    use crate::domain::validation::ValidationError;

    #[test]
    fn general_rules_still_apply() {
        let mut data = sample_master_data();
        data.address.street_name = None;
        let result = validate(&data, None);
        assert!(result.errors().contains(&ValidationError::StreetNameRequired));
    }
}
