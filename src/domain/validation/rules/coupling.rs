//! Parent/child coupling rule family (code D37).

use crate::domain::metering_points::values::{GridAreaLinkId, MeteringPointType};
use crate::domain::metering_points::PhysicalState;
use crate::domain::validation::{BusinessRule, ValidationError};

pub struct ParentGridAreaMatchesRule {
    child: GridAreaLinkId,
    parent: GridAreaLinkId,
}

impl ParentGridAreaMatchesRule {
    pub fn new(child: &GridAreaLinkId, parent: &GridAreaLinkId) -> Self {
        Self {
            child: child.clone(),
            parent: parent.clone(),
        }
    }
}

impl BusinessRule for ParentGridAreaMatchesRule {
    fn is_broken(&self) -> bool {
        self.child != self.parent
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::ParentGridAreaMismatch {
            child_grid_area: self.child.to_string(),
            parent_grid_area: self.parent.to_string(),
        }
    }
}

pub struct ParentTypeCouplableRule {
    parent_type: MeteringPointType,
}

impl ParentTypeCouplableRule {
    pub fn new(parent_type: MeteringPointType) -> Self {
        Self { parent_type }
    }
}

impl BusinessRule for ParentTypeCouplableRule {
    fn is_broken(&self) -> bool {
        !self.parent_type.can_act_as_parent()
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::ParentTypeNotCouplable {
            parent_type: self.parent_type.to_string(),
        }
    }
}

pub struct ParentNotClosedDownRule {
    state: PhysicalState,
}

impl ParentNotClosedDownRule {
    pub fn new(state: PhysicalState) -> Self {
        Self { state }
    }
}

impl BusinessRule for ParentNotClosedDownRule {
    fn is_broken(&self) -> bool {
        self.state == PhysicalState::ClosedDown
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::MeteringPointIsClosedDown {
            state: self.state.to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_areas_must_match() {
        let child = GridAreaLinkId::new("870");
        let same = GridAreaLinkId::new("870");
        let other = GridAreaLinkId::new("871");
        assert!(!ParentGridAreaMatchesRule::new(&child, &same).is_broken());
        assert!(ParentGridAreaMatchesRule::new(&child, &other).is_broken());
    }

    #[test]
    fn special_types_are_not_couplable_parents() {
        assert!(!ParentTypeCouplableRule::new(MeteringPointType::Exchange).is_broken());
        assert!(!ParentTypeCouplableRule::new(MeteringPointType::Consumption).is_broken());
        assert!(ParentTypeCouplableRule::new(MeteringPointType::VeProduction).is_broken());
    }
}
