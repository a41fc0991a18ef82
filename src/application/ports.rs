//! Ports supplied by the hosting layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::metering_points::values::GsrnNumber;
use crate::domain::validation::BusinessRulesValidationResult;
use crate::shared::DomainResult;

/// Time source. Policies never read the system clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Checks whether the requesting market actor may operate on the metering
/// point. The outcome has the same shape as any other rule check so callers
/// can treat it uniformly.
#[async_trait]
pub trait AuthorizationChecker: Send + Sync {
    async fn authorize(&self, gsrn: &GsrnNumber) -> DomainResult<BusinessRulesValidationResult>;
}
