//! Exchange rule set: both connected grid areas must be named.

use super::general_rules;
use crate::domain::metering_points::master_data::MasterData;
use crate::domain::validation::rules::ExchangeGridAreasRequiredRule;
use crate::domain::validation::BusinessRulesValidationResult;

pub(super) fn validate(
    merged: &MasterData,
    _previous: Option<&MasterData>,
) -> BusinessRulesValidationResult {
    let grid_areas = ExchangeGridAreasRequiredRule::new(merged);
    general_rules(merged).combine(BusinessRulesValidationResult::from_rules(&[&grid_areas]))
}

// ── Tests ──────────────────────────────────────────────────────
