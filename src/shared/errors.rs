//! Cross-layer error types.
//!
//! `DomainError` covers programmer/contract faults and infrastructure
//! failures only. Expected business-rule violations never travel this way;
//! they are `ValidationError` values inside a `BusinessRulesValidationResult`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A state-machine mutator was invoked without its `*_acceptable` guard
    /// passing first. This is a bug in the calling orchestrator.
    #[error("{operation} is not allowed for metering point {gsrn} in state {state}")]
    InvalidStateTransition {
        operation: &'static str,
        gsrn: String,
        state: String,
    },

    /// `create` was called with details that fail the creation rule set.
    /// Callers must check `can_create` first.
    #[error("Creation rules violated for metering point {gsrn}: {details}")]
    CreationRulesViolated { gsrn: String, details: String },

    /// `couple` was called on a child/parent pair that fails the coupling
    /// rule set. Callers must check `couple_acceptable` first.
    #[error("Coupling rules violated for metering point {child_gsrn}: {details}")]
    CouplingRulesViolated { child_gsrn: String, details: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
