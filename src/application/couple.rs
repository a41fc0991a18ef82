//! Parent/child coupling processes.

use std::sync::Arc;

use tracing::info;

use super::ports::AuthorizationChecker;
use super::result::BusinessProcessResult;
use crate::domain::metering_points::values::GsrnNumber;
use crate::domain::metering_points::{ChildMeteringPoint, MeteringPointRepository};
use crate::domain::policies::ReadingPeriodicityOfChildMustMatchParent;
use crate::domain::validation::ValidationError;
use crate::shared::DomainResult;

#[derive(Debug, Clone)]
pub struct CoupleChildRequest {
    pub transaction_id: String,
    pub child_gsrn: String,
    pub parent_gsrn: String,
}

pub struct CoupleChildHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
}

impl CoupleChildHandler {
    pub fn new(
        repository: Arc<dyn MeteringPointRepository>,
        authorization: Arc<dyn AuthorizationChecker>,
    ) -> Self {
        Self {
            repository,
            authorization,
        }
    }

    pub async fn handle(&self, request: CoupleChildRequest) -> DomainResult<BusinessProcessResult> {
        let mut parse_errors = Vec::new();
        let child_gsrn = GsrnNumber::create(&request.child_gsrn)
            .map_err(|e| parse_errors.push(e))
            .ok();
        let parent_gsrn = GsrnNumber::create(&request.parent_gsrn)
            .map_err(|e| parse_errors.push(e))
            .ok();
        let (Some(child_gsrn), Some(parent_gsrn)) = (child_gsrn, parent_gsrn) else {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                parse_errors,
            ));
        };

        let Some(mut child) = self.repository.get_by_gsrn(&child_gsrn).await? else {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                vec![ValidationError::MeteringPointNotFound {
                    gsrn: child_gsrn.to_string(),
                }],
            ));
        };

        let authorization = self.authorization.authorize(&child_gsrn).await?;
        if !authorization.success() {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                authorization.into_errors(),
            ));
        }

        let mut errors = Vec::new();
        match self.repository.get_by_gsrn(&parent_gsrn).await? {
            None => errors.push(ValidationError::ParentNotFound {
                gsrn: parent_gsrn.to_string(),
            }),
            Some(parent) => {
                errors.extend(
                    ReadingPeriodicityOfChildMustMatchParent::check(
                        child.metering_point_type(),
                        child.master_data().reading_occurrence,
                        Some(parent.master_data().reading_occurrence),
                    )
                    .into_errors(),
                );
                let mut coupling = ChildMeteringPoint::new(&mut child);
                errors.extend(coupling.couple_acceptable(&parent).into_errors());

                if errors.is_empty() {
                    coupling.couple(&parent)?;
                    self.repository.update(child).await?;
                    info!(
                        child = %child_gsrn,
                        parent = %parent_gsrn,
                        transaction_id = %request.transaction_id,
                        "Child coupled to parent"
                    );
                    return Ok(BusinessProcessResult::ok(request.transaction_id));
                }
            }
        }

        info!(
            child = %child_gsrn,
            parent = %parent_gsrn,
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Coupling rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }
}

#[derive(Debug, Clone)]
pub struct DecoupleChildRequest {
    pub transaction_id: String,
    pub child_gsrn: String,
}

pub struct DecoupleChildHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
}

impl DecoupleChildHandler {
    pub fn new(
        repository: Arc<dyn MeteringPointRepository>,
        authorization: Arc<dyn AuthorizationChecker>,
    ) -> Self {
        Self {
            repository,
            authorization,
        }
    }

    /// No business rule blocks decoupling today; the only failure modes are
    /// a malformed or unknown GSRN and missing authorization.
    pub async fn handle(
        &self,
        request: DecoupleChildRequest,
    ) -> DomainResult<BusinessProcessResult> {
        let gsrn = match GsrnNumber::create(&request.child_gsrn) {
            Ok(gsrn) => gsrn,
            Err(error) => {
                return Ok(BusinessProcessResult::failure(request.transaction_id, vec![error]))
            }
        };

        let Some(mut child) = self.repository.get_by_gsrn(&gsrn).await? else {
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

        ChildMeteringPoint::new(&mut child).decouple();
        self.repository.update(child).await?;
        info!(
            child = %gsrn,
            transaction_id = %request.transaction_id,
            "Child decoupled from parent"
        );
        Ok(BusinessProcessResult::ok(request.transaction_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metering_points::test_support::{
        sample_child_point, sample_metering_point, sample_point_in_grid,
    };
    use crate::domain::metering_points::values::GridAreaLinkId;
    use crate::infrastructure::{AllowAll, InMemoryMeteringPointRepository};

    const CHILD_GSRN: &str = "571315123456789016";
    const PARENT_GSRN: &str = "571234567891234605";

    fn couple_request(parent: &str) -> CoupleChildRequest {
        CoupleChildRequest {
            transaction_id: "tx-couple".to_string(),
            child_gsrn: CHILD_GSRN.to_string(),
            parent_gsrn: parent.to_string(),
        }
    }

    #[tokio::test]
    async fn couples_child_in_same_grid_area() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_metering_point()).await.unwrap();
        repository.add(sample_child_point()).await.unwrap();
        let handler = CoupleChildHandler::new(repository.clone(), Arc::new(AllowAll));

        let result = handler.handle(couple_request(PARENT_GSRN)).await.unwrap();
        assert!(result.success, "{:?}", result.validation_errors);

        let gsrn = GsrnNumber::create(CHILD_GSRN).unwrap();
        let child = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert_eq!(child.parent().unwrap().gsrn.as_str(), PARENT_GSRN);
        assert!(child
            .events()
            .iter()
            .any(|e| e.event_type() == "coupled_to_parent"));
    }

    #[tokio::test]
    async fn grid_area_mismatch_and_periodicity_accumulate() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        // Parent in a different grid area than the child.
        repository
            .add(sample_point_in_grid(GridAreaLinkId::new("990")))
            .await
            .unwrap();
        repository.add(sample_child_point()).await.unwrap();
        let handler = CoupleChildHandler::new(repository, Arc::new(AllowAll));

        let result = handler.handle(couple_request(PARENT_GSRN)).await.unwrap();
        assert!(!result.success);
        assert!(result
            .validation_errors
            .iter()
            .any(|e| matches!(e, ValidationError::ParentGridAreaMismatch { .. })));
    }

    #[tokio::test]
    async fn missing_parent_reports_parent_not_found() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_child_point()).await.unwrap();
        let handler = CoupleChildHandler::new(repository, Arc::new(AllowAll));

        let result = handler.handle(couple_request(PARENT_GSRN)).await.unwrap();
        assert!(!result.success);
        assert!(matches!(
            result.validation_errors[0],
            ValidationError::ParentNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn both_malformed_gsrns_are_reported_together() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        let handler = CoupleChildHandler::new(repository, Arc::new(AllowAll));

        let result = handler
            .handle(CoupleChildRequest {
                transaction_id: "tx-couple".to_string(),
                child_gsrn: "123".to_string(),
                parent_gsrn: "abc".to_string(),
            })
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.validation_errors.len(), 2);
    }

    #[tokio::test]
    async fn decouple_is_unconditional_and_idempotent() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_metering_point()).await.unwrap();
        repository.add(sample_child_point()).await.unwrap();
        let couple = CoupleChildHandler::new(repository.clone(), Arc::new(AllowAll));
        couple.handle(couple_request(PARENT_GSRN)).await.unwrap();

        let handler = DecoupleChildHandler::new(repository.clone(), Arc::new(AllowAll));
        let request = DecoupleChildRequest {
            transaction_id: "tx-decouple".to_string(),
            child_gsrn: CHILD_GSRN.to_string(),
        };
        let result = handler.handle(request.clone()).await.unwrap();
        assert!(result.success);

        let gsrn = GsrnNumber::create(CHILD_GSRN).unwrap();
        let child = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert!(child.parent().is_none());

        // Decoupling an uncoupled child is still a success.
        let result = handler.handle(request).await.unwrap();
        assert!(result.success);
    }
}
