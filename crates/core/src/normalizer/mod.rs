//! Order normalization.
//!
//! Turns one inbound [`OrderItem`] into one [`NormalizedOrderRecord`] per
//! design. All lookups are pure; unknown winding and shape tokens are
//! logged and replaced by their defaults, while missing physical options
//! abort the whole order so no partial output is ever staged.
//!
//! # Example
//!
//! ```ignore
//! use labelbridge_core::normalizer::Normalizer;
//!
//! let records = Normalizer::default().normalize(&order)?;
//! for record in &records {
//!     println!("{} x {} winding {}", record.width, record.height, record.winding);
//! }
//! ```

mod colors;
mod error;
mod pricing;
mod record;
mod shape;
mod text;
mod winding;

pub use colors::{has_white, PremiumWhite};
pub use error::NormalizeError;
pub(crate) use pricing::round2;
pub use pricing::{parse_price, price_per_1000};
pub use record::{Contact, NormalizedOrderRecord, CONTACT_TITLE};
pub use shape::{resolve_radius, resolve_shape, Shape, DEFAULT_SHAPE_TOKEN};
pub use text::{sanitize_text, truncate_chars};
pub use winding::{
    apply_winding, resolve_winding, resolve_winding_or, RollFace, Winding, WindingError,
    DEFAULT_OUTPUT_DIRECTION, DEFAULT_WINDING,
};

use tracing::debug;

use crate::config::NormalizerConfig;
use crate::order::{NumberOrText, OrderItem};

const DESCRIPTION_MAX_CHARS: usize = 30;
const LINE_COMMENT_MAX_CHARS: usize = 10;
const DUE_DATE_CHARS: usize = 10;

/// Normalizer settings resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerSettings {
    /// Supplier tag written on every record.
    pub supplier_id: String,
    /// Winding used when the output direction token is unknown.
    pub fallback_winding: Winding,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            supplier_id: "Print.com".to_string(),
            fallback_winding: DEFAULT_WINDING,
        }
    }
}

impl TryFrom<&NormalizerConfig> for NormalizerSettings {
    type Error = WindingError;

    fn try_from(config: &NormalizerConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            supplier_id: config.supplier_id.clone(),
            fallback_winding: Winding::try_from(config.fallback_winding)?,
        })
    }
}

/// Maps order items onto production records.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    settings: NormalizerSettings,
}

impl Normalizer {
    pub fn new(settings: NormalizerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NormalizerSettings {
        &self.settings
    }

    /// Produces one record per design, in design order.
    ///
    /// Every record shares the order-wide fields. `OrderQuantity` is the
    /// design's own copy count while `UnitPrice` is computed from the order's
    /// total price and total copies.
    pub fn normalize(&self, order: &OrderItem) -> Result<Vec<NormalizedOrderRecord>, NormalizeError> {
        check_reference(order.reference())?;
        if order.designs.is_empty() {
            return Err(NormalizeError::NoDesigns);
        }

        let shipment = order
            .first_shipment()
            .ok_or_else(|| NormalizeError::missing("shipments"))?;
        let address = shipment
            .address
            .as_ref()
            .ok_or_else(|| NormalizeError::missing("shipments.address"))?;
        let contact = Contact::from_address(address);

        let options = &order.options;
        let direction = options
            .output_direction
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIRECTION);
        let shape_token = options.shape.as_deref().unwrap_or(DEFAULT_SHAPE_TOKEN);

        let winding = resolve_winding_or(direction, self.settings.fallback_winding);
        let width = required_f64(options.width.as_ref(), "options.width")?;
        let height = required_f64(options.height.as_ref(), "options.height")?;
        let (width, height) = apply_winding(width, height, winding.code())?;

        let substrate = options
            .material
            .clone()
            .ok_or_else(|| NormalizeError::missing("options.material"))?;
        let adhesive = options
            .type_glue
            .clone()
            .ok_or_else(|| NormalizeError::missing("options.type_glue"))?;

        let total_price = parse_price(&order.purchase_price)?;
        let total_copies = required_u64(options.copies.as_ref(), "options.copies")?;
        let unit_price = price_per_1000(total_price, total_copies);

        let description = sanitize_text(&truncate_chars(
            order.descriptions.full.as_deref().unwrap_or_default(),
            DESCRIPTION_MAX_CHARS,
        ));
        let due_date = order
            .pickup_date
            .as_deref()
            .map(|d| truncate_chars(d, DUE_DATE_CHARS))
            .unwrap_or_default();

        debug!(
            order = %order.reference(),
            winding = %winding,
            width,
            height,
            unit_price,
            "Resolved order-wide fields"
        );

        order
            .designs
            .iter()
            .map(|design| -> Result<NormalizedOrderRecord, NormalizeError> {
                let quantity = design
                    .copies
                    .as_u64()
                    .ok_or_else(|| NormalizeError::invalid("designs.copies", &design.copies))?;

                Ok(NormalizedOrderRecord {
                    description: description.clone(),
                    reference_at_customer: order.order_item_number.clone(),
                    line_comment1: truncate_chars(&order.order_item_number, LINE_COMMENT_MAX_CHARS),
                    delivery: due_date.clone(),
                    shipment_method: shipment.method.clone(),
                    order_quantity: quantity,
                    quantity_per_roll: text_or_empty(options.copies_per_roll.as_ref()),
                    core: text_or_empty(options.roll_diameter.as_ref()),
                    unit_price,
                    supplier_id: self.settings.supplier_id.clone(),
                    name: order.name.clone().unwrap_or_default(),
                    street: sanitize_text(&address.fullstreet),
                    country: sanitize_text(&address.country),
                    postal_code: sanitize_text(&address.postcode),
                    city: sanitize_text(&address.city),
                    contacts: vec![contact.clone()],
                    width,
                    height,
                    shape: resolve_shape(shape_token),
                    radius: resolve_radius(shape_token),
                    winding,
                    premium_white: has_white(&order.pantone_colors),
                    substrate: substrate.clone(),
                    adhesive: adhesive.clone(),
                })
            })
            .collect()
    }
}

/// Normalizes with default settings.
pub fn normalize_order(order: &OrderItem) -> Result<Vec<NormalizedOrderRecord>, NormalizeError> {
    Normalizer::default().normalize(order)
}

/// The reference names staging folders and archives, so it must be a
/// single plain path segment.
fn check_reference(reference: &str) -> Result<(), NormalizeError> {
    let unsafe_segment = reference.trim().is_empty()
        || reference.contains(['/', '\\', '\0'])
        || reference.contains("..");
    if unsafe_segment {
        return Err(NormalizeError::invalid("orderItemNumber", reference.escape_debug()));
    }
    Ok(())
}

fn required_f64(value: Option<&NumberOrText>, field: &'static str) -> Result<f64, NormalizeError> {
    let value = value.ok_or_else(|| NormalizeError::missing(field))?;
    value
        .as_f64()
        .ok_or_else(|| NormalizeError::invalid(field, value))
}

fn required_u64(value: Option<&NumberOrText>, field: &'static str) -> Result<u64, NormalizeError> {
    let value = value.ok_or_else(|| NormalizeError::missing(field))?;
    value
        .as_u64()
        .ok_or_else(|| NormalizeError::invalid(field, value))
}

fn text_or_empty(value: Option<&NumberOrText>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
