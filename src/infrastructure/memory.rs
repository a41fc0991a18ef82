//! In-memory repository used by the demo binary and the test suites.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::metering_points::values::GsrnNumber;
use crate::domain::metering_points::{MeteringPoint, MeteringPointId, MeteringPointRepository};
use crate::shared::DomainResult;

/// Thread-safe map keyed by GSRN. Lookups by id scan the map; the store is
/// small enough that a secondary index is not worth carrying.
pub struct InMemoryMeteringPointRepository {
    points: DashMap<String, MeteringPoint>,
}

impl InMemoryMeteringPointRepository {
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for InMemoryMeteringPointRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeteringPointRepository for InMemoryMeteringPointRepository {
    async fn get_by_gsrn(&self, gsrn: &GsrnNumber) -> DomainResult<Option<MeteringPoint>> {
        Ok(self.points.get(gsrn.as_str()).map(|entry| entry.clone()))
    }

    async fn get_by_id(&self, id: MeteringPointId) -> DomainResult<Option<MeteringPoint>> {
        Ok(self
            .points
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| entry.clone()))
    }

    async fn add(&self, metering_point: MeteringPoint) -> DomainResult<()> {
        self.points
            .insert(metering_point.gsrn().to_string(), metering_point);
        Ok(())
    }

    async fn update(&self, metering_point: MeteringPoint) -> DomainResult<()> {
        self.points
            .insert(metering_point.gsrn().to_string(), metering_point);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
