//! Parent/child coupling.

use super::model::{MeteringPoint, ParentLink};
use crate::domain::events::{CoupledToParentEvent, DecoupledFromParentEvent, MeteringPointEvent};
use crate::domain::validation::rules::{
    ParentGridAreaMatchesRule, ParentNotClosedDownRule, ParentTypeCouplableRule,
};
use crate::domain::validation::BusinessRulesValidationResult;
use crate::shared::{DomainError, DomainResult};

/// Wraps a metering point in its role as a child and owns the coupling rule
/// set.
pub struct ChildMeteringPoint<'a> {
    child: &'a mut MeteringPoint,
}

impl<'a> ChildMeteringPoint<'a> {
    pub fn new(child: &'a mut MeteringPoint) -> Self {
        Self { child }
    }

    /// Broken when the pair fails grid-area or type compatibility, or the
    /// parent is closed down.
    pub fn couple_acceptable(&self, parent: &MeteringPoint) -> BusinessRulesValidationResult {
        let parent_type = ParentTypeCouplableRule::new(parent.metering_point_type());
        let grid_area = ParentGridAreaMatchesRule::new(self.child.grid_area(), parent.grid_area());
        let parent_state = ParentNotClosedDownRule::new(parent.physical_state());
        BusinessRulesValidationResult::from_rules(&[&parent_type, &grid_area, &parent_state])
    }

    /// Sets the parent link. Callers must check `couple_acceptable` first.
    pub fn couple(&mut self, parent: &MeteringPoint) -> DomainResult<()> {
        let check = self.couple_acceptable(parent);
        if !check.success() {
            return Err(DomainError::CouplingRulesViolated {
                child_gsrn: self.child.gsrn().to_string(),
                details: check
                    .errors()
                    .iter()
                    .map(|e| e.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        self.child.set_parent(Some(ParentLink {
            id: parent.id(),
            gsrn: parent.gsrn().clone(),
        }));
        self.child
            .record(MeteringPointEvent::CoupledToParent(CoupledToParentEvent {
                gsrn: self.child.gsrn().to_string(),
                parent_gsrn: parent.gsrn().to_string(),
            }));
        Ok(())
    }

    /// Clears the parent link unconditionally; no rule blocks decoupling. A
    /// no-op when there is no link.
    pub fn decouple(&mut self) {
        if let Some(link) = self.child.parent().cloned() {
            self.child.set_parent(None);
            self.child.record(MeteringPointEvent::DecoupledFromParent(
                DecoupledFromParentEvent {
                    gsrn: self.child.gsrn().to_string(),
                    parent_gsrn: link.gsrn.to_string(),
                },
            ));
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
