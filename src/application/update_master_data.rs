//! Master data update process.

use std::sync::Arc;

use tracing::info;

use super::ports::{AuthorizationChecker, Clock};
use super::result::BusinessProcessResult;
use crate::domain::metering_points::master_data::MasterDataUpdater;
use crate::domain::metering_points::values::{EffectiveDate, GsrnNumber};
use crate::domain::metering_points::{MeteringPoint, MeteringPointRepository};
use crate::domain::policies::{EffectiveDatePolicy, ReadingPeriodicityOfChildMustMatchParent};
use crate::domain::validation::ValidationError;
use crate::shared::DomainResult;

#[derive(Debug, Clone)]
pub struct UpdateMasterDataRequest {
    pub transaction_id: String,
    pub gsrn: String,
    pub effective_date: String,
    pub updater: MasterDataUpdater,
}

pub struct UpdateMasterDataHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
    clock: Arc<dyn Clock>,
    effective_date_policy: EffectiveDatePolicy,
}

impl UpdateMasterDataHandler {
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
        request: UpdateMasterDataRequest,
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
                errors.extend(self.periodicity_check(&point, &request.updater).await?);
                errors.extend(point.can_update_master_data(&request.updater).into_errors());

                if errors.is_empty() {
                    point.update_master_data(&request.updater, effective_date);
                    self.repository.update(point).await?;
                    info!(
                        gsrn = %gsrn,
                        transaction_id = %request.transaction_id,
                        "Master data updated"
                    );
                    return Ok(BusinessProcessResult::ok(request.transaction_id));
                }
            }
        }

        info!(
            gsrn = %gsrn,
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Master data update rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }

    /// Coupled exchange-reactive-energy points may not drift away from their
    /// parent's reading occurrence through an update.
    async fn periodicity_check(
        &self,
        point: &MeteringPoint,
        updater: &MasterDataUpdater,
    ) -> DomainResult<Vec<ValidationError>> {
        let Some(parent_link) = point.parent() else {
            return Ok(Vec::new());
        };
        let parent_occurrence = self
            .repository
            .get_by_id(parent_link.id)
            .await?
            .map(|parent| parent.master_data().reading_occurrence);
        let merged_occurrence = updater
            .reading_occurrence
            .unwrap_or(point.master_data().reading_occurrence);
        Ok(ReadingPeriodicityOfChildMustMatchParent::check(
            point.metering_point_type(),
            merged_occurrence,
            parent_occurrence,
        )
        .into_errors())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::fixed_clock;
    use crate::domain::metering_points::test_support::{
        sample_child_point, sample_metering_point,
    };
    use crate::domain::metering_points::values::{Address, ReadingOccurrence};
    use crate::domain::metering_points::ChildMeteringPoint;
    use crate::infrastructure::{AllowAll, InMemoryMeteringPointRepository};

    fn handler(repository: Arc<InMemoryMeteringPointRepository>) -> UpdateMasterDataHandler {
        UpdateMasterDataHandler::new(
            repository,
            Arc::new(AllowAll),
            fixed_clock("2023-06-30T22:00:00Z"),
            EffectiveDatePolicy::new(5, 1),
        )
    }

    fn request(gsrn: &str, updater: MasterDataUpdater) -> UpdateMasterDataRequest {
        UpdateMasterDataRequest {
            transaction_id: "tx-update".to_string(),
            gsrn: gsrn.to_string(),
            effective_date: "2023-06-30T22:00:00Z".to_string(),
            updater,
        }
    }

    #[tokio::test]
    async fn updates_address_and_records_only_changed_fields() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_metering_point()).await.unwrap();
        let handler = handler(repository.clone());

        let updater = MasterDataUpdater {
            address: Some(Address {
                street_name: Some("Skovvej".to_string()),
                street_code: Some("0405".to_string()),
                post_code: Some("8000".to_string()),
                city: Some("Aarhus".to_string()),
                ..Address::default()
            }),
            ..MasterDataUpdater::default()
        };
        let result = handler
            .handle(request("571234567891234605", updater))
            .await
            .unwrap();
        assert!(result.success, "{:?}", result.validation_errors);

        let gsrn = GsrnNumber::create("571234567891234605").unwrap();
        let point = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert_eq!(
            point.master_data().address.city.as_deref(),
            Some("Aarhus")
        );
    }

    #[tokio::test]
    async fn empty_updater_is_accepted_and_changes_nothing() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_metering_point()).await.unwrap();
        let handler = handler(repository.clone());

        let before = {
            let gsrn = GsrnNumber::create("571234567891234605").unwrap();
            repository
                .get_by_gsrn(&gsrn)
                .await
                .unwrap()
                .unwrap()
                .master_data()
                .clone()
        };
        let result = handler
            .handle(request("571234567891234605", MasterDataUpdater::default()))
            .await
            .unwrap();
        assert!(result.success);

        let gsrn = GsrnNumber::create("571234567891234605").unwrap();
        let point = repository.get_by_gsrn(&gsrn).await.unwrap().unwrap();
        assert_eq!(point.master_data(), &before);
    }

    #[tokio::test]
    async fn invalid_merged_master_data_is_rejected() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        repository.add(sample_metering_point()).await.unwrap();
        let handler = handler(repository.clone());

        // Blanking the city leaves the merged master data invalid.
        let updater = MasterDataUpdater {
            address: Some(Address {
                street_name: Some("Skovvej".to_string()),
                post_code: Some("8000".to_string()),
                city: None,
                ..Address::default()
            }),
            ..MasterDataUpdater::default()
        };
        let result = handler
            .handle(request("571234567891234605", updater))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result
            .validation_errors
            .iter()
            .any(|e| matches!(e, ValidationError::CityRequired)));
    }

    #[tokio::test]
    async fn coupled_child_cannot_change_reading_occurrence_away_from_parent() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        let parent = sample_metering_point();
        let mut child = sample_child_point();
        ChildMeteringPoint::new(&mut child).couple(&parent).unwrap();
        let child_gsrn = child.gsrn().to_string();
        repository.add(parent).await.unwrap();
        repository.add(child).await.unwrap();
        let handler = handler(repository.clone());

        let updater = MasterDataUpdater {
            reading_occurrence: Some(ReadingOccurrence::Monthly),
            ..MasterDataUpdater::default()
        };
        let result = handler.handle(request(&child_gsrn, updater)).await.unwrap();
        assert!(!result.success);
        assert!(result
            .validation_errors
            .iter()
            .any(|e| matches!(e, ValidationError::ReadingPeriodicityMismatch { .. })));
    }

    #[tokio::test]
    async fn unknown_point_reports_not_found() {
        let repository = Arc::new(InMemoryMeteringPointRepository::new());
        let handler = handler(repository);

        let result = handler
            .handle(request("571234567891234605", MasterDataUpdater::default()))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.validation_errors[0].code(), "E10");
    }
}
