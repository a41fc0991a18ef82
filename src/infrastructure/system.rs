//! Ambient adapters with no configuration of their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::{AuthorizationChecker, Clock};
use crate::domain::metering_points::values::GsrnNumber;
use crate::domain::validation::BusinessRulesValidationResult;
use crate::shared::DomainResult;

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Authorization stand-in that grants every request. The real grid-access
/// provider lives in the EDI gateway, outside this service.
pub struct AllowAll;

#[async_trait]
impl AuthorizationChecker for AllowAll {
    async fn authorize(&self, _gsrn: &GsrnNumber) -> DomainResult<BusinessRulesValidationResult> {
        Ok(BusinessRulesValidationResult::valid())
    }
}
