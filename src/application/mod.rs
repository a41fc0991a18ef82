//! Use-case orchestrators. One handler per business process, each running
//! the same fixed pipeline: fetch, authorize, policies, aggregate guard,
//! then commit or return the union of all collected errors.

mod close_down;
mod connect;
mod couple;
mod create;
mod disconnect_reconnect;
mod ports;
mod result;
mod update_master_data;

pub use close_down::{CloseDownHandler, CloseDownRequest};
pub use connect::{ConnectMeteringPointHandler, ConnectMeteringPointRequest};
pub use couple::{
    CoupleChildHandler, CoupleChildRequest, DecoupleChildHandler, DecoupleChildRequest,
};
pub use create::{CreateMeteringPointHandler, CreateMeteringPointRequest};
pub use disconnect_reconnect::{
    ConnectionStateChange, DisconnectReconnectHandler, DisconnectReconnectRequest,
};
pub use ports::{AuthorizationChecker, Clock};
pub use result::BusinessProcessResult;
pub use update_master_data::{UpdateMasterDataHandler, UpdateMasterDataRequest};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::ports::{AuthorizationChecker, Clock};
    use crate::domain::metering_points::values::GsrnNumber;
    use crate::domain::validation::{BusinessRulesValidationResult, ValidationError};
    use crate::shared::DomainResult;

    /// Clock pinned to a known instant for policy-window tests.
    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Authorization stub that denies everything.
    pub struct DenyAll;

    #[async_trait]
    impl AuthorizationChecker for DenyAll {
        async fn authorize(
            &self,
            _gsrn: &GsrnNumber,
        ) -> DomainResult<BusinessRulesValidationResult> {
            Ok(BusinessRulesValidationResult::from_errors(vec![
                ValidationError::Unauthorized {
                    reason: "denied by test".to_string(),
                },
            ]))
        }
    }

    pub fn fixed_clock(rfc3339: &str) -> Arc<FixedClock> {
        Arc::new(FixedClock(
            DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc),
        ))
    }
}
