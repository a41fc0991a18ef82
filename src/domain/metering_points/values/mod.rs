//! Value objects for the metering point aggregate.

mod address;
mod capacity;
mod classifications;
mod effective_date;
mod grid_area;
mod gsrn;
mod scheduled_meter_reading_date;

pub use address::Address;
pub use capacity::{Capacity, PowerLimit};
pub use classifications::{
    AssetType, ConnectionType, DisconnectionType, MeteringMethod, MeteringPointGroup,
    MeteringPointType, NetSettlementGroup, ProductType, ReadingOccurrence, SettlementMethod,
    UnitType,
};
pub use effective_date::{EffectiveDate, MARKET_TIMEZONE};
pub use grid_area::GridAreaLinkId;
pub use gsrn::GsrnNumber;
pub use scheduled_meter_reading_date::ScheduledMeterReadingDate;
