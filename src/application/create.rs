//! Create process.

use std::sync::Arc;

use tracing::info;

use super::ports::{AuthorizationChecker, Clock};
use super::result::BusinessProcessResult;
use crate::domain::metering_points::values::{
    EffectiveDate, GridAreaLinkId, GsrnNumber, MeteringPointType,
};
use crate::domain::metering_points::{
    MasterData, MeteringPoint, MeteringPointDetails, MeteringPointRepository,
};
use crate::domain::policies::EffectiveDatePolicy;
use crate::domain::validation::ValidationError;
use crate::shared::DomainResult;

#[derive(Debug, Clone)]
pub struct CreateMeteringPointRequest {
    pub transaction_id: String,
    pub gsrn: String,
    pub metering_point_type: String,
    pub grid_area: String,
    pub effective_date: String,
    pub master_data: MasterData,
}

pub struct CreateMeteringPointHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
    clock: Arc<dyn Clock>,
    effective_date_policy: EffectiveDatePolicy,
}

impl CreateMeteringPointHandler {
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
        request: CreateMeteringPointRequest,
    ) -> DomainResult<BusinessProcessResult> {
        let gsrn = match GsrnNumber::create(&request.gsrn) {
            Ok(gsrn) => gsrn,
            Err(error) => {
                return Ok(BusinessProcessResult::failure(request.transaction_id, vec![error]))
            }
        };

        // A GSRN identifies exactly one metering point, ever.
        if self.repository.get_by_gsrn(&gsrn).await?.is_some() {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                vec![ValidationError::DuplicateGsrnNumber {
                    gsrn: gsrn.to_string(),
                }],
            ));
        }

        let authorization = self.authorization.authorize(&gsrn).await?;
        if !authorization.success() {
            return Ok(BusinessProcessResult::failure(
                request.transaction_id,
                authorization.into_errors(),
            ));
        }

        let mut errors = Vec::new();

        let metering_point_type = match MeteringPointType::parse(&request.metering_point_type) {
            Ok(t) => Some(t),
            Err(error) => {
                errors.push(error);
                None
            }
        };
        let effective_date = match EffectiveDate::parse(&request.effective_date) {
            Ok(date) => {
                errors.extend(
                    self.effective_date_policy
                        .check(self.clock.now(), &date)
                        .into_errors(),
                );
                Some(date)
            }
            Err(error) => {
                errors.push(error);
                None
            }
        };

        if let (Some(metering_point_type), Some(effective_date)) =
            (metering_point_type, effective_date)
        {
            let details = MeteringPointDetails {
                gsrn: gsrn.clone(),
                metering_point_type,
                grid_area: GridAreaLinkId::new(request.grid_area.clone()),
                effective_date,
                master_data: request.master_data.clone(),
            };
            errors.extend(MeteringPoint::can_create(&details).into_errors());

            if errors.is_empty() {
                let point = MeteringPoint::create(details)?;
                self.repository.add(point).await?;
                info!(
                    gsrn = %gsrn,
                    metering_point_type = %metering_point_type,
                    transaction_id = %request.transaction_id,
                    "Metering point created"
                );
                return Ok(BusinessProcessResult::ok(request.transaction_id));
            }
        }

        info!(
            gsrn = %gsrn,
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Create rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }
}

// ── Tests ──────────────────────────────────────────────────────
