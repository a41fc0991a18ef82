//! Production rule set: capacity and asset type are mandatory when the
//! point participates in net settlement.

use super::general_rules;
use crate::domain::metering_points::master_data::MasterData;
use crate::domain::validation::rules::{AssetTypeRequiredRule, CapacityRequiredRule};
use crate::domain::validation::BusinessRulesValidationResult;

pub(super) fn validate(
    merged: &MasterData,
    _previous: Option<&MasterData>,
) -> BusinessRulesValidationResult {
    let capacity = CapacityRequiredRule::new(merged);
    let asset_type = AssetTypeRequiredRule::new(merged);
    general_rules(merged)
        .combine(BusinessRulesValidationResult::from_rules(&[&capacity, &asset_type]))
}

// ── Tests ──────────────────────────────────────────────────────
