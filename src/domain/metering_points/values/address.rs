//! Installation address.

use serde::{Deserialize, Serialize};

/// Structural address of the installation. All fields are optional at the
/// value level; which ones are mandatory is decided by the per-type
/// master data rule sets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street_name: Option<String>,
    pub street_code: Option<String>,
    pub building_number: Option<String>,
    pub post_code: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub municipality_code: Option<String>,
    pub geo_info_reference: Option<String>,
}
