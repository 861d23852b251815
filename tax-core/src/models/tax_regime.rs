use std::fmt;

use serde::{Deserialize, Serialize};

/// Income-tax computation mode.
///
/// The old regime allows itemised deductions at higher slab rates; the new
/// regime uses lower rates with only the standard deduction and professional
/// tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    Old,
    New,
}

impl TaxRegime {
    pub const ALL: [TaxRegime; 2] = [TaxRegime::Old, TaxRegime::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Case-insensitive parse of `"old"` / `"new"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
