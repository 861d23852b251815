use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A concrete action that would lower the taxpayer's liability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSavingSuggestion {
    pub category: String,
    pub description: String,
    pub potential_savings: Decimal,
    pub implementation_difficulty: Difficulty,
    /// 1 is the highest priority, 5 the lowest.
    pub priority: u8,
    pub details: String,
}

/// Deductions the taxpayer has already claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentDeductions {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub section_80ccd1b: Decimal,
}

impl From<&super::FinancialData> for CurrentDeductions {
    fn from(data: &super::FinancialData) -> Self {
        Self {
            section_80c: data.section_80c(),
            section_80d: data.section_80d(),
            section_80ccd1b: data.section_80ccd1b(),
        }
    }
}
