//! Connect process.

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
pub struct ConnectMeteringPointRequest {
    pub transaction_id: String,
    pub gsrn: String,
    pub effective_date: String,
}

pub struct ConnectMeteringPointHandler {
    repository: Arc<dyn MeteringPointRepository>,
    authorization: Arc<dyn AuthorizationChecker>,
    clock: Arc<dyn Clock>,
    effective_date_policy: EffectiveDatePolicy,
}

impl ConnectMeteringPointHandler {
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
        request: ConnectMeteringPointRequest,
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
                errors.extend(point.connect_acceptable(&details).into_errors());

                if errors.is_empty() {
                    point.connect(&details)?;
                    self.repository.update(point).await?;
                    info!(
                        gsrn = %gsrn,
                        transaction_id = %request.transaction_id,
                        "Metering point connected"
                    );
                    return Ok(BusinessProcessResult::ok(request.transaction_id));
                }
            }
        }

        info!(
            gsrn = %gsrn,
            transaction_id = %request.transaction_id,
            error_count = errors.len(),
            "Connect rejected"
        );
        Ok(BusinessProcessResult::failure(request.transaction_id, errors))
    }
}

// ── Tests ──────────────────────────────────────────────────────
