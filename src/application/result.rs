//! Transaction-scoped process outcome.

use serde::Serialize;

use crate::domain::validation::ValidationError;

/// The outcome returned to the request-handling layer. A failed result maps
/// to a market "reject" document carrying each error's regulatory code; a
/// successful one maps to an "accept" document.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessProcessResult {
    pub transaction_id: String,
    pub success: bool,
    pub validation_errors: Vec<ValidationError>,
}

impl BusinessProcessResult {
    pub fn ok(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            success: true,
            validation_errors: Vec::new(),
        }
    }

    pub fn failure(transaction_id: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            success: false,
            validation_errors: errors,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_errors() {
        let result = BusinessProcessResult::ok("tx-1");
        assert!(result.success);
        assert!(result.validation_errors.is_empty());
    }

    #[test]
    fn failure_keeps_all_errors_in_order() {
        let result = BusinessProcessResult::failure(
            "tx-2",
            vec![
                ValidationError::StreetNameRequired,
                ValidationError::CityRequired,
            ],
        );
        assert!(!result.success);
        assert_eq!(result.validation_errors.len(), 2);
        assert_eq!(result.validation_errors[0], ValidationError::StreetNameRequired);
    }
}
