//! Physical state guards (code D16) and the energy supplier rule (D36).

use crate::domain::metering_points::values::{EffectiveDate, GsrnNumber};
use crate::domain::metering_points::{EnergySupplier, PhysicalState};
use crate::domain::validation::{BusinessRule, ValidationError};

pub struct MeteringPointMustBeNewRule {
    state: PhysicalState,
}

impl MeteringPointMustBeNewRule {
    pub fn new(state: PhysicalState) -> Self {
        Self { state }
    }
}

impl BusinessRule for MeteringPointMustBeNewRule {
    fn is_broken(&self) -> bool {
        self.state != PhysicalState::New
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MeteringPointMustBeNew {
            state: self.state.to_string(),
        }
    }
}

pub struct MeteringPointMustBeConnectedRule {
    state: PhysicalState,
}

impl MeteringPointMustBeConnectedRule {
    pub fn new(state: PhysicalState) -> Self {
        Self { state }
    }
}

impl BusinessRule for MeteringPointMustBeConnectedRule {
    fn is_broken(&self) -> bool {
        self.state != PhysicalState::Connected
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MeteringPointMustBeConnected {
            state: self.state.to_string(),
        }
    }
}

pub struct MeteringPointMustBeDisconnectedRule {
    state: PhysicalState,
}

impl MeteringPointMustBeDisconnectedRule {
    pub fn new(state: PhysicalState) -> Self {
        Self { state }
    }
}

impl BusinessRule for MeteringPointMustBeDisconnectedRule {
    fn is_broken(&self) -> bool {
        self.state != PhysicalState::Disconnected
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MeteringPointMustBeDisconnected {
            state: self.state.to_string(),
        }
    }
}

/// ClosedDown is terminal: no transition may leave it.
pub struct NotClosedDownRule {
    state: PhysicalState,
}

impl NotClosedDownRule {
    pub fn new(state: PhysicalState) -> Self {
        Self { state }
    }
}

impl BusinessRule for NotClosedDownRule {
    fn is_broken(&self) -> bool {
        self.state == PhysicalState::ClosedDown
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MeteringPointIsClosedDown {
            state: self.state.to_string(),
        }
    }
}

/// Connecting requires an energy supplier whose start of supply is on or
/// before the requested effective date.
pub struct MustHaveEnergySupplierRule {
    gsrn: GsrnNumber,
    satisfied: bool,
}

impl MustHaveEnergySupplierRule {
    pub fn new(
        gsrn: &GsrnNumber,
        suppliers: &[EnergySupplier],
        effective_date: &EffectiveDate,
    ) -> Self {
        let satisfied = suppliers
            .iter()
            .any(|supplier| supplier.start_of_supply <= effective_date.instant());
        Self {
            gsrn: gsrn.clone(),
            satisfied,
        }
    }
}

impl BusinessRule for MustHaveEnergySupplierRule {
    fn is_broken(&self) -> bool {
        !self.satisfied
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MustHaveEnergySupplier {
            gsrn: self.gsrn.to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
