//! Core business entities, rules, policies and ports.

pub mod events;
pub mod metering_points;
pub mod policies;
pub mod validation;

pub use events::MeteringPointEvent;
pub use metering_points::{
    ChildMeteringPoint, ConnectionDetails, EnergySupplier, MasterData, MasterDataUpdater,
    MeteringPoint, MeteringPointDetails, MeteringPointId, MeteringPointRepository, PhysicalState,
};
pub use validation::{BusinessRule, BusinessRulesValidationResult, ValidationError};
