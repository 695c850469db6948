use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value the order API sends either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Whole, non-negative quantity. Fractional values are rejected.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_f64)),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_f64))
            }
        }
    }
}

fn whole_f64(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

impl fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for NumberOrText {
    fn from(v: u64) -> Self {
        Self::Number(v.into())
    }
}

impl From<&str> for NumberOrText {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One inbound order item as delivered by the order API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_item_number: String,
    pub purchase_price: NumberOrText,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designs: Vec<Design>,
    #[serde(default)]
    pub shipments: Vec<Shipment>,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub pantone_colors: Vec<String>,
    #[serde(default)]
    pub descriptions: Descriptions,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl OrderItem {
    /// Reference the downstream system knows this order by.
    pub fn reference(&self) -> &str {
        &self.order_item_number
    }

    /// Order id taken from the last segment of `_links.self.href`.
    pub fn order_id(&self) -> Option<&str> {
        self.links
            .self_link
            .as_ref()
            .and_then(|l| l.href.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    pub fn jobsheet_href(&self) -> Option<&str> {
        self.links
            .jobsheet
            .as_ref()
            .map(|l| l.href.as_str())
            .filter(|href| !href.is_empty())
    }

    pub fn first_shipment(&self) -> Option<&Shipment> {
        self.shipments.first()
    }
}

/// A single artwork unit within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub id: Option<NumberOrText>,
    pub copies: NumberOrText,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub method: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub address_id: Option<NumberOrText>,
    #[serde(default)]
    pub delivery_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub telephone: String,
    pub email: String,
    pub fullstreet: String,
    pub country: String,
    pub postcode: String,
    pub city: String,
}

/// Physical print options. Keys the normalizer does not read are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub width: Option<NumberOrText>,
    pub height: Option<NumberOrText>,
    pub output_direction: Option<String>,
    pub shape: Option<String>,
    pub material: Option<String>,
    pub type_glue: Option<String>,
    pub copies: Option<NumberOrText>,
    pub copies_per_roll: Option<NumberOrText>,
    pub roll_diameter: Option<NumberOrText>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Descriptions {
    pub full: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub jobsheet: Option<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}
