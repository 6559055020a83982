//! Tolerant numeric parsing used wherever stored text feeds arithmetic.
//!
//! Field values are kept exactly as typed. When a value has to be summed, blank
//! text, malformed text, and non-finite results all count as zero. Nothing in
//! aggregation rejects a record because of a bad amount.

/// Parses a stored field value into an amount, yielding `0.0` when the text is
/// empty or not a finite number.
pub fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Rounds to two decimal places for display totals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
