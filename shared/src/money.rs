//! Money calculation utilities
//!
//! All monetary amounts in the system are integers in minor currency units
//! (cents). Sums and line totals stay in the integer domain; only the
//! percentage computations (tax, service charge) go through `Decimal`, and
//! their results are rounded half-away-from-zero back to minor units.

use rust_decimal::prelude::*;

/// Rounding strategy for percentage amounts: half-away-from-zero
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Line-level view of an order item, as the money helpers need it.
///
/// Implemented by the storage-layer order item; keeps these functions free
/// of any database types.
pub trait LineAmount {
    /// Stored line total in minor units (`unit_price * quantity`)
    fn price(&self) -> i64;
    /// Whether this line has been settled
    fn is_paid(&self) -> bool;
}

/// Format minor units for display: divide by 100, always two decimals.
///
/// `1234` → `"12.34"`, `-5` → `"-0.05"`.
pub fn format_amount(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
}

/// Convert f64 rate to Decimal. Non-finite values become zero.
#[inline]
fn rate_decimal(rate_percent: f64) -> Decimal {
    Decimal::from_f64(rate_percent).unwrap_or_default()
}

/// Tax amount in minor units: `round(subtotal * rate / 100)`.
pub fn compute_tax(subtotal_minor: i64, rate_percent: f64) -> i64 {
    (Decimal::from(subtotal_minor) * rate_decimal(rate_percent) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, ROUNDING)
        .to_i64()
        .unwrap_or_default()
}

/// Service charge amount in minor units. Same contract as [`compute_tax`],
/// kept separate for the distinct semantic role.
pub fn compute_service_charge(subtotal_minor: i64, rate_percent: f64) -> i64 {
    compute_tax(subtotal_minor, rate_percent)
}

/// Order total: sum of stored line totals, paid or not.
///
/// Always computed from the snapshotted `price` fields, never from live
/// menu prices.
pub fn order_total<T: LineAmount>(items: &[T]) -> i64 {
    items.iter().map(LineAmount::price).sum()
}

/// Settled portion of an order: sum of line totals with `is_paid = true`.
pub fn paid_total<T: LineAmount>(items: &[T]) -> i64 {
    items
        .iter()
        .filter(|i| i.is_paid())
        .map(LineAmount::price)
        .sum()
}
