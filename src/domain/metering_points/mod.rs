//! The metering point aggregate family.

pub mod child;
pub mod master_data;
mod model;
mod repository;
pub mod validators;
pub mod values;

pub use child::ChildMeteringPoint;
pub use master_data::{MasterData, MasterDataUpdater, MeteringConfiguration};
pub use model::{
    ConnectionDetails, EnergySupplier, MeteringPoint, MeteringPointDetails, MeteringPointId,
    ParentLink, PhysicalState,
};
pub use repository::MeteringPointRepository;
