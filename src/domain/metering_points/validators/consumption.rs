//! Consumption rule set: general rules, settlement method, and the
//! immutability of an assigned scheduled meter reading date.

use super::general_rules;
use crate::domain::metering_points::master_data::MasterData;
use crate::domain::validation::rules::{
    ScheduledMeterReadingDateUnchangedRule, SettlementMethodRequiredRule,
};
use crate::domain::validation::BusinessRulesValidationResult;

pub(super) fn validate(
    merged: &MasterData,
    previous: Option<&MasterData>,
) -> BusinessRulesValidationResult {
    let settlement_method = SettlementMethodRequiredRule::new(merged);
    let mut result = general_rules(merged)
        .combine(BusinessRulesValidationResult::from_rules(&[&settlement_method]));
    if let Some(previous) = previous {
        let reading_date = ScheduledMeterReadingDateUnchangedRule::new(previous, merged);
        result = result.combine(BusinessRulesValidationResult::from_rules(&[&reading_date]));
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────
