//! Master data rule families (meter, capacity, settlement, grid areas).

use crate::domain::metering_points::master_data::MasterData;
use crate::domain::metering_points::values::MeteringMethod;
use crate::domain::validation::{BusinessRule, ValidationError};

/// Physical metering requires a meter id; virtual and calculated metering
/// forbid one. A single rule covers both directions.
pub struct MeterIdConsistentWithMethodRule {
    method: MeteringMethod,
    has_meter: bool,
}

impl MeterIdConsistentWithMethodRule {
    pub fn new(data: &MasterData) -> Self {
        Self {
            method: data.metering.method,
            has_meter: data
                .metering
                .meter_id
                .as_deref()
                .map_or(false, |id| !id.trim().is_empty()),
        }
    }
}

impl BusinessRule for MeterIdConsistentWithMethodRule {
    fn is_broken(&self) -> bool {
        match self.method {
            MeteringMethod::Physical => !self.has_meter,
            MeteringMethod::Virtual | MeteringMethod::Calculated => self.has_meter,
        }
    }

    fn validation_error(&self) -> ValidationError {
        match self.method {
            MeteringMethod::Physical => ValidationError::MeterIdRequired,
            method => ValidationError::MeterIdNotAllowed {
                method: method.to_string(),
            },
        }
    }
}

pub struct SettlementMethodRequiredRule {
    broken: bool,
}

impl SettlementMethodRequiredRule {
    pub fn new(data: &MasterData) -> Self {
        Self {
            broken: data.settlement_method.is_none(),
        }
    }
}

impl BusinessRule for SettlementMethodRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::SettlementMethodRequired
    }
}

/// Production points in a net settlement group other than zero must state
/// their installed capacity.
pub struct CapacityRequiredRule {
    broken: bool,
}

impl CapacityRequiredRule {
    pub fn new(data: &MasterData) -> Self {
        Self {
            broken: !data.net_settlement_group.is_zero() && data.capacity.is_none(),
        }
    }
}

impl BusinessRule for CapacityRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::CapacityRequired
    }
}

/// Production points in a net settlement group other than zero must state
/// their generation technology.
pub struct AssetTypeRequiredRule {
    broken: bool,
}

impl AssetTypeRequiredRule {
    pub fn new(data: &MasterData) -> Self {
        Self {
            broken: !data.net_settlement_group.is_zero() && data.asset_type.is_none(),
        }
    }
}

impl BusinessRule for AssetTypeRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::AssetTypeRequired
    }
}

/// Exchange points connect two grid areas and must name both.
pub struct ExchangeGridAreasRequiredRule {
    broken: bool,
}

impl ExchangeGridAreasRequiredRule {
    pub fn new(data: &MasterData) -> Self {
        Self {
            broken: data.from_grid_area.is_none() || data.to_grid_area.is_none(),
        }
    }
}

impl BusinessRule for ExchangeGridAreasRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::ExchangeGridAreasRequired
    }
}

/// Once a scheduled meter reading date has been assigned it cannot change.
pub struct ScheduledMeterReadingDateUnchangedRule {
    broken: bool,
}

impl ScheduledMeterReadingDateUnchangedRule {
    pub fn new(previous: &MasterData, merged: &MasterData) -> Self {
        let broken = match (&previous.scheduled_meter_reading_date, &merged.scheduled_meter_reading_date) {
            (Some(old), Some(new)) => old != new,
            (Some(_), None) => true,
            (None, _) => false,
        };
        Self { broken }
    }
}

impl BusinessRule for ScheduledMeterReadingDateUnchangedRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::ScheduledMeterReadingDateCannotBeChanged
    }
}

// ── Tests ──────────────────────────────────────────────────────
