//! Address rule family (code E86).

use crate::domain::metering_points::values::Address;
use crate::domain::validation::{BusinessRule, ValidationError};

pub struct StreetNameRequiredRule {
    broken: bool,
}

impl StreetNameRequiredRule {
    pub fn new(address: &Address) -> Self {
        let broken = address
            .street_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty());
        Self { broken }
    }
}

impl BusinessRule for StreetNameRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::StreetNameRequired
    }
}

/// Street codes are 4-digit values between 0001 and 9999. Only checked when
/// a code is present; presence is a per-type concern.
pub struct StreetCodeFormatRule {
    value: String,
    broken: bool,
}

impl StreetCodeFormatRule {
    pub fn new(address: &Address) -> Self {
        match address.street_code.as_deref() {
            None => Self {
                value: String::new(),
                broken: false,
            },
            Some(code) => {
                let numeric =
                    code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit());
                let in_range = numeric && code.parse::<u32>().map_or(false, |n| (1..=9999).contains(&n));
                Self {
                    value: code.to_string(),
                    broken: !in_range,
                }
            }
        }
    }
}

impl BusinessRule for StreetCodeFormatRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::StreetCodeFormat {
            value: self.value.clone(),
        }
    }
}

/// Post codes are 4 digits. Checked when present.
pub struct PostCodeFormatRule {
    value: String,
    broken: bool,
}

impl PostCodeFormatRule {
    pub fn new(address: &Address) -> Self {
        match address.post_code.as_deref() {
            None => Self {
                value: String::new(),
                broken: false,
            },
            Some(code) => Self {
                value: code.to_string(),
                broken: !(code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())),
            },
        }
    }
}

impl BusinessRule for PostCodeFormatRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::PostCodeFormat {
            value: self.value.clone(),
        }
    }
}

pub struct CityRequiredRule {
    broken: bool,
}

impl CityRequiredRule {
    pub fn new(address: &Address) -> Self {
        let broken = address
            .city
            .as_deref()
            .map_or(true, |city| city.trim().is_empty());
        Self { broken }
    }
}

impl BusinessRule for CityRequiredRule {
    fn is_broken(&self) -> bool {
        self.broken
    }

    fn validation_error(&self) -> ValidationError {
        ValidationError::CityRequired
    }
}

// ── Tests ──────────────────────────────────────────────────────
