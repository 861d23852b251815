//! Common utility functions for tax calculations.
//!
//! Rounding, comparison and rupee formatting shared by the engine, the
//! comparison summary and the suggestion builder.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3.554)), dec!(3.55));
/// assert_eq!(round_half_up(dec!(3.555)), dec!(3.56));
/// assert_eq!(round_half_up(dec!(-3.555)), dec!(-3.56)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Formats an amount as whole rupees with Indian digit grouping.
///
/// The last three digits form one group and every group above it has two
/// digits, so twelve lakh reads `12,00,000`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_rupees;
///
/// assert_eq!(format_rupees(dec!(23920)), "23,920");
/// assert_eq!(format_rupees(dec!(1234567.6)), "12,34,568");
/// ```
pub fn format_rupees(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().trunc().to_string();
    let sign = if whole.is_sign_negative() && !whole.is_zero() { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{sign}{},{tail}", groups.join(","))
}
