//! Disconnect/reconnect process. One orchestrator serves both directions of
//! the Connected ↔ Disconnected transition.

use std::sync::Arc;

use tracing::info;

use super::ports::{AuthorizationChecker, Clock};
use super::result::BusinessProcessResult;
use crate::domain::metering_points::values::{EffectiveDate, GsrnNumber};
use crate::domain::metering_points::{ConnectionDetails, MeteringPointRepository};
use crate::domain::policies::EffectiveDatePolicy;
use crate::domain::validation::ValidationError;
use crate::shared::DomainResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStateChange {
    Disconnect,
    Reconnect,
}

impl ConnectionStateChange {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnect => "disconnect",
            Self::Reconnect => "reconnect",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisconnectReconnectRequest {
    pub transaction_id: String,
    pub gsrn: String,
    pub effective_date: String,
    pub change: ConnectionStateChange,
}

pub struct DisconnectReconnectHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
    clock: Arc<dyn Clock>,
    effective_date_policy: EffectiveDatePolicy,
}

impl DisconnectReconnectHandler {
    pub fn new(
        repository: Arc<dyn MeteringPointRepository>,
        authorization: Arc<dyn AuthorizationChecker>,
        clock: Arc<dyn Clock>,
        effective_date_policy: EffectiveDatePolicy,
    ) -> Self {
        Self {
            repository,
            authorization,
            clock,
            effective_date_policy,
        }
    }

    pub async fn handle(
        &self,
        request: DisconnectReconnectRequest,
    ) -> DomainResult<BusinessProcessResult> {
        let gsrn = match GsrnNumber::create(&request.gsrn) {
            Ok(gsrn) => gsrn,
            Err(error) => {
                return Ok(BusinessProcessResult::failure(request.transaction_id, vec![error]))
            }
        };

        let Some(mut point) = self.repository.get_by_gsrn(&gsrn).await? else {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                vec![ValidationError::MeteringPointNotFound {
                    gsrn: gsrn.to_string(),
                }],
            ));
        };

        let authorization = self.authorization.authorize(&gsrn).await?;
        if !authorization.success() {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                authorization.into_errors(),
            ));
        }

        let mut errors = Vec::new();
        match EffectiveDate::parse(&request.effective_date) {
            Err(error) => errors.push(error),
            Ok(effective_date) => {
                errors.extend(
                    self.effective_date_policy
                        .check(self.clock.now(), &effective_date)
                        .into_errors(),
                );
                let details = ConnectionDetails { effective_date };
                let guard = match request.change {
                    ConnectionStateChange::Disconnect => point.disconnect_acceptable(),
                    ConnectionStateChange::Reconnect => point.reconnect_acceptable(),
                };
                errors.extend(guard.into_errors());

                if errors.is_empty() {
                    match request.change {
                        ConnectionStateChange::Disconnect => point.disconnect(&details)?,
                        ConnectionStateChange::Reconnect => point.reconnect(&details)?,
                    }
                    self.repository.update(point).await?;
                    info!(
                        gsrn = %gsrn,
                        change = request.change.as_str(),
                        transaction_id = %request.transaction_id,
                        "Connection state changed"
                    );
                    return Ok(BusinessProcessResult::ok(request.transaction_id));
                }
            }
        }

        info!(
            gsrn = %gsrn,
            change = request.change.as_str(),
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Connection state change rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::fixed_clock;
    use crate::domain::metering_points::test_support::sample_metering_point;
    use crate::domain::metering_points::PhysicalState;
    use crate::infrastructure::{AllowAll, InMemoryMeteringPointRepository};

    async fn connected_repository() -> Arc<InMemoryMeteringPointRepository> {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        let mut point = sample_metering_point();
        point.assign_energy_supplier(
            "5790000000001",
            EffectiveDate::parse("2023-05-31T22:00:00Z").unwrap().instant(),
        );
        let details = ConnectionDetails {
            effective_date: EffectiveDate::parse("2023-06-30T22:00:00Z").unwrap(),
        };
        point.connect(&details).unwrap();
        repository.add(point).await.unwrap();
        repository
    }

    fn handler(repository: Arc<InMemoryMeteringPointRepository>) -> DisconnectReconnectHandler {
        DisconnectReconnectHandler::new(
            repository,
            Arc::new(AllowAll),
            fixed_clock("2023-06-30T22:00:00Z"),
            EffectiveDatePolicy::new(2, 1),
        )
    }

    fn request(change: ConnectionStateChange) -> DisconnectReconnectRequest {
        DisconnectReconnectRequest {
            transaction_id: "tx-state".to_string(),
            gsrn: "571234567891234605".to_string(),
            effective_date: "2023-06-30T22:00:00Z".to_string(),
            change,
        }
    }

    #[tokio::test]
    async fn disconnect_then_double_disconnect() {
        let repository = connected_repository().await;
        let handler = handler(repository.clone());

        let result = handler
            .handle(request(ConnectionStateChange::Disconnect))
            .await
            .unwrap();
        assert!(result.success);

        // Second disconnect: rejected, state unchanged, no duplicate event.
        let result = handler
            .handle(request(ConnectionStateChange::Disconnect))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(matches!(
            result.validation_errors[0],
            ValidationError::MeteringPointMustBeConnected { .. }
        ));

        let gsrn = GsrnNumber::create("571234567891234605").unwrap();
        let point = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert_eq!(point.physical_state(), PhysicalState::Disconnected);
        let disconnected = point
            .events()
            .iter()
            .filter(|e| e.event_type() == "metering_point_disconnected")
            .count();
        assert_eq!(disconnected, 1);
    }

    #[tokio::test]
    async fn reconnect_only_from_disconnected() {
        let repository = connected_repository().await;
        let handler = handler(repository.clone());

        // Still connected: reconnect is rejected.
        let result = handler
            .handle(request(ConnectionStateChange::Reconnect))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(matches!(
            result.validation_errors[0],
            ValidationError::MeteringPointMustBeDisconnected { .. }
        ));

        handler
            .handle(request(ConnectionStateChange::Disconnect))
            .await
            .unwrap();
        let result = handler
            .handle(request(ConnectionStateChange::Reconnect))
            .await
            .unwrap();
        assert!(result.success);

        let gsrn = GsrnNumber::create("571234567891234605").unwrap();
        let point = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert_eq!(point.physical_state(), PhysicalState::Connected);
    }
}
