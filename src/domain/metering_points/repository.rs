//! Metering point repository interface.

use async_trait::async_trait;

use super::model::{MeteringPoint, MeteringPointId};
use super::values::GsrnNumber;
use crate::shared::DomainResult;

/// Storage port for the aggregate. Commit/transaction handling is the
/// caller's responsibility; the core only reads and writes whole aggregates.
#[async_trait]
pub trait MeteringPointRepository: Send + Sync {
    async fn get_by_gsrn(&self, gsrn: &GsrnNumber) -> DomainResult<Option<MeteringPoint>>;
    async fn get_by_id(&self, id: MeteringPointId) -> DomainResult<Option<MeteringPoint>>;
    async fn add(&self, metering_point: MeteringPoint) -> DomainResult<()>;
    async fn update(&self, metering_point: MeteringPoint) -> DomainResult<()>;
}
