use crate::order::NumberOrText;

use super::NormalizeError;

/// Price per 1000 pieces, rounded to cents. Zero quantity yields zero.
pub fn price_per_1000(price: f64, quantity: u64) -> f64 {
    if quantity == 0 {
        return 0.0;
    }
    round2(price / quantity as f64 * 1000.0)
}

/// Rounds half away from zero to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reads the order's purchase price, which may arrive as a number or a decimal string.
pub fn parse_price(value: &NumberOrText) -> Result<f64, NormalizeError> {
    value
        .as_f64()
        .ok_or_else(|| NormalizeError::invalid("purchasePrice", value))
}
