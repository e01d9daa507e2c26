//! DTOs used in delivery type administration.

use serde::Serialize;

use crate::domain::delivery_type::DeliveryType;

/// Data required to render the delivery types page.
#[derive(Debug, Serialize)]
pub struct DeliveryTypesPageData {
    pub delivery_types: Vec<DeliveryType>,
    /// Hides the "extra" checkbox once the hub has its catch-all type.
    pub has_extra_type: bool,
}
