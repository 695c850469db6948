//! Records in the production system's schema.

use serde::{Deserialize, Serialize};

use crate::order::Address;

use super::colors::PremiumWhite;
use super::shape::Shape;
use super::text::sanitize_text;
use super::winding::Winding;

/// Title the production system expects on every contact.
pub const CONTACT_TITLE: &str = "Mr./Mevr.";

/// Contact person attached to a record, built from the first shipment's address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    pub last_name: String,
    pub first_name: String,
    pub initials: String,
    pub title: String,
    pub phone_number: String,
    pub fax_number: String,
    #[serde(rename = "GSMNumber")]
    pub gsm_number: String,
    pub email: String,
    pub function: String,
}

impl Contact {
    pub fn from_address(address: &Address) -> Self {
        Self {
            last_name: sanitize_text(&address.last_name),
            first_name: sanitize_text(&address.first_name),
            initials: String::new(),
            title: CONTACT_TITLE.to_string(),
            phone_number: address.telephone.clone(),
            fax_number: String::new(),
            gsm_number: String::new(),
            email: address.email.clone(),
            function: String::new(),
        }
    }
}

/// One staged order line, one per design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedOrderRecord {
    pub description: String,
    pub reference_at_customer: String,
    pub line_comment1: String,
    /// Due date, `YYYY-MM-DD`.
    pub delivery: String,
    #[serde(rename = "Shipment_method")]
    pub shipment_method: String,
    pub order_quantity: u64,
    #[serde(rename = "Quantity_per_roll")]
    pub quantity_per_roll: String,
    pub core: String,
    /// Price per 1000 pieces over the whole order.
    pub unit_price: f64,
    pub supplier_id: String,
    pub name: String,
    pub street: String,
    pub country: String,
    pub postal_code: String,
    pub city: String,
    pub contacts: Vec<Contact>,
    pub width: f64,
    pub height: f64,
    pub shape: Shape,
    pub radius: u32,
    pub winding: Winding,
    #[serde(rename = "Premium_White")]
    pub premium_white: PremiumWhite,
    pub substrate: String,
    pub adhesive: String,
}
