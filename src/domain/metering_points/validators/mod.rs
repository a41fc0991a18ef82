//! Per-type master data validation strategy.
//!
//! Each metering point group composes the shared general rule list with its
//! own additions. Dispatch is a plain match on the group, not inheritance.

mod consumption;
mod exchange;
mod production;
mod special;

use super::master_data::MasterData;
use super::values::MeteringPointGroup;
use crate::domain::validation::rules::{
    CityRequiredRule, MeterIdConsistentWithMethodRule, PostCodeFormatRule, StreetCodeFormatRule,
    StreetNameRequiredRule,
};
use crate::domain::validation::BusinessRulesValidationResult;

/// Runs the rule set for the given group against the merged master data.
/// `previous` is the pre-merge master data for update checks, `None` at
/// creation.
pub fn validate(
    group: MeteringPointGroup,
    merged: &MasterData,
    previous: Option<&MasterData>,
) -> BusinessRulesValidationResult {
    match group {
        MeteringPointGroup::Consumption => consumption::validate(merged, previous),
        MeteringPointGroup::Production => production::validate(merged, previous),
        MeteringPointGroup::Exchange => exchange::validate(merged, previous),
        MeteringPointGroup::Special => special::validate(merged, previous),
    }
}

/// Rules every metering point type shares.
fn general_rules(data: &MasterData) -> BusinessRulesValidationResult {
    let street_name = StreetNameRequiredRule::new(&data.address);
    let street_code = StreetCodeFormatRule::new(&data.address);
    let post_code = PostCodeFormatRule::new(&data.address);
    let city = CityRequiredRule::new(&data.address);
    let meter = MeterIdConsistentWithMethodRule::new(data);
    BusinessRulesValidationResult::from_rules(&[
        &street_name,
        &street_code,
        &post_code,
        &city,
        &meter,
    ])
}
