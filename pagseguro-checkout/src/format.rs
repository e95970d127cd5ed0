//! Wire formatting for amounts and counts.
//!
//! The checkout document carries every number as text: amounts with exactly two
//! fractional digits and a period separator, counts as plain integers. Output
//! never depends on the host locale.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CheckoutError, Result};

/// Formats a monetary amount with exactly two decimal places.
///
/// Values with more precision are rounded half away from zero.
///
/// # Examples
///
/// ```
/// use pagseguro_checkout::format::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(10)), "10.00");
/// assert_eq!(format_amount(Decimal::new(12345, 1)), "1234.50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut value = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    // rescale cannot widen values above 10^26 to two digits, so pad the text
    let text = value.to_string();
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{whole}.{fraction:0<2}"),
        None => format!("{text}.00"),
    }
}

/// Formats a floating-point amount with exactly two decimal places.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidAmount`] for NaN and infinities.
///
/// # Examples
///
/// ```
/// use pagseguro_checkout::format::format_float_amount;
///
/// assert_eq!(format_float_amount(10.0)?, "10.00");
/// assert!(format_float_amount(f64::NAN).is_err());
/// # Ok::<(), pagseguro_checkout::CheckoutError>(())
/// ```
pub fn format_float_amount(amount: f64) -> Result<String> {
    if !amount.is_finite() {
        return Err(CheckoutError::InvalidAmount(format!("amount must be finite, got {amount}")));
    }
    // -0.0 and tiny negatives would otherwise print as "-0.00"
    let formatted = format!("{amount:.2}");
    if formatted == "-0.00" { Ok("0.00".to_owned()) } else { Ok(formatted) }
}

/// Formats an item count, weight or similar integer field.
#[must_use]
pub fn format_count(count: u64) -> String {
    count.to_string()
}
