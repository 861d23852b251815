use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One contiguous income range taxed at `rate` percent.
///
/// `max` is `None` for the unbounded top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    /// Width of a bounded slab; `None` for the unbounded top slab.
    pub fn width(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}
