//! Close down process. Closing down is terminal; the point can never leave
//! the state again.

use std::sync::Arc;

use tracing::info;

use super::ports::{AuthorizationChecker, Clock};
use super::result::BusinessProcessResult;
use crate::domain::metering_points::values::{EffectiveDate, GsrnNumber};
use crate::domain::metering_points::{ConnectionDetails, MeteringPointRepository};
use crate::domain::policies::EffectiveDatePolicy;
use crate::domain::validation::ValidationError;
use crate::shared::DomainResult;

#[derive(Debug, Clone)]
pub struct CloseDownRequest {
    pub transaction_id: String,
    pub gsrn: String,
    pub effective_date: String,
}

pub struct CloseDownHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
    clock: Arc<dyn Clock>,
    effective_date_policy: EffectiveDatePolicy,
}

impl CloseDownHandler {
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

    pub async fn handle(&self, request: CloseDownRequest) -> DomainResult<BusinessProcessResult> {
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
                errors.extend(point.close_down_acceptable().into_errors());

                if errors.is_empty() {
                    point.close_down(&ConnectionDetails { effective_date })?;
                    self.repository.update(point).await?;
                    info!(
                        gsrn = %gsrn,
                        transaction_id = %request.transaction_id,
                        "Metering point closed down"
                    );
                    return Ok(BusinessProcessResult::ok(request.transaction_id));
                }
            }
        }

        info!(
            gsrn = %gsrn,
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Close down rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }
}

// ── Tests ──────────────────────────────────────────────────────
