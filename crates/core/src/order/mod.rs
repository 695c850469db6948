//! Inbound order model as received from the order API.

mod types;

pub use types::*;
