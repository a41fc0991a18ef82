//! Business rule inventory, one small struct per precondition.

mod address;
mod coupling;
mod master_data;
mod state;

pub use address::{CityRequiredRule, PostCodeFormatRule, StreetCodeFormatRule, StreetNameRequiredRule};
pub use coupling::{ParentGridAreaMatchesRule, ParentNotClosedDownRule, ParentTypeCouplableRule};
pub use master_data::{
    AssetTypeRequiredRule, CapacityRequiredRule, ExchangeGridAreasRequiredRule,
    MeterIdConsistentWithMethodRule, ScheduledMeterReadingDateUnchangedRule,
    SettlementMethodRequiredRule,
};
pub use state::{
    MeteringPointMustBeConnectedRule, MeteringPointMustBeDisconnectedRule,
    MeteringPointMustBeNewRule, MustHaveEnergySupplierRule, NotClosedDownRule,
};
