//! Progressive slab walk.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{TaxSlab, TaxSlabDetail};

/// Tax on `taxable_income` across `slabs`, with each non-empty slab's share.
///
/// Slabs are walked in order; each takes at most its width from the
/// remaining income and the unbounded slab takes whatever is left.
pub fn slab_tax(
    taxable_income: Decimal,
    slabs: &[TaxSlab],
) -> (Decimal, Vec<TaxSlabDetail>) {
    let mut remaining = taxable_income.max(Decimal::ZERO);
    let mut total = Decimal::ZERO;
    let mut details = Vec::new();

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }

        let amount = match slab.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = amount * slab.rate / dec!(100);

        total += tax;
        remaining -= amount;
        details.push(TaxSlabDetail {
            min_amount: slab.min,
            max_amount: slab.max,
            rate: slab.rate,
            tax_amount: tax,
        });
    }

    (total, details)
}
