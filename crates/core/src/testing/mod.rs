//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external collaborator
//! traits, so the intake pipeline can be exercised without the order API
//! or real artwork files.
//!
//! # Example
//!
//! ```rust,ignore
//! use labelbridge_core::testing::{fixtures, MockArtworkSource, MockGeometryExtractor};
//!
//! let source = MockArtworkSource::new();
//! let geometry = MockGeometryExtractor::with_trim_mm(80.0, 50.0);
//!
//! // Build an OrderProcessor and feed it fixtures::order_item()...
//! ```

mod mock_artwork_source;
mod mock_geometry;

pub use mock_artwork_source::{MockArtworkSource, RecordedFetch, MOCK_ARTWORK};
pub use mock_geometry::MockGeometryExtractor;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::json;

    use crate::order::OrderItem;

    /// `orderItemNumber` of [`order_json`].
    pub const ORDER_REFERENCE: &str = "6001139891-1";

    /// Last segment of the self link of [`order_json`].
    pub const ORDER_ID: &str = "998877";

    /// A two-design order as the order API sends it.
    ///
    /// 50 x 80 mm, wound `outer_270` (so records come out 80 x 50), 1000
    /// copies split 600/400 over the designs, total price 500.
    pub fn order_json() -> serde_json::Value {
        json!({
            "orderItemNumber": ORDER_REFERENCE,
            "purchasePrice": "500.00",
            "pickupDate": "2024-05-02T10:00:00+02:00",
            "name": "Roll labels",
            "designs": [
                { "id": "d1", "copies": 600, "href": "https://api.example.com/designs/d1" },
                { "id": "d2", "copies": 400, "href": "https://api.example.com/designs/d2" }
            ],
            "shipments": [{
                "method": "standard",
                "addressId": 4411,
                "deliveryDate": "2024-05-06",
                "address": {
                    "firstName": "Anna",
                    "lastName": "de Vries",
                    "companyName": "Bakkerij de Vries",
                    "telephone": "+31 20 1234567",
                    "email": "anna@example.com",
                    "fullstreet": "Kerkstraat 1",
                    "country": "NL",
                    "postcode": "1017 GB",
                    "city": "Amsterdam"
                }
            }],
            "options": {
                "width": 50,
                "height": 80,
                "output_direction": "outer_270",
                "shape": "rectangle_sticker__2mm_rounded_corners",
                "material": "pp_white",
                "type_glue": "permanent",
                "copies": 1000,
                "copies_per_roll": 500,
                "roll_diameter": "76"
            },
            "pantoneColors": ["Pantone 185 C"],
            "descriptions": { "full": "Rollenstickers op maat, glanzend" },
            "_links": {
                "self": { "href": format!("https://api.example.com/orders/{}", ORDER_ID) },
                "jobsheet": { "href": "https://api.example.com/orders/998877/jobsheet" }
            }
        })
    }

    /// [`order_json`] parsed.
    pub fn order_item() -> OrderItem {
        order_item_with(|_| {})
    }

    /// [`order_json`] with `patch` applied before parsing.
    pub fn order_item_with(patch: impl FnOnce(&mut serde_json::Value)) -> OrderItem {
        let mut value = order_json();
        patch(&mut value);
        serde_json::from_value(value).expect("fixture order must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;

    #[test]
    fn test_fixture_order() {
        let order = fixtures::order_item();
        assert_eq!(order.reference(), fixtures::ORDER_REFERENCE);
        assert_eq!(order.order_id(), Some(fixtures::ORDER_ID));
        assert_eq!(order.designs.len(), 2);
        assert!(order.jobsheet_href().is_some());
    }
}
