use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentYearError {
    #[error("assessment year '{0}' is not in the form YYYY-YY")]
    Malformed(String),

    #[error("assessment year '{0}' does not span consecutive years")]
    NotConsecutive(String),
}

/// Indian assessment year, written `2024-25`.
///
/// Only the starting year is stored; the suffix is always the following
/// year's last two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssessmentYear(u16);

impl AssessmentYear {
    pub const AY_2023_24: AssessmentYear = AssessmentYear(2023);
    pub const AY_2024_25: AssessmentYear = AssessmentYear(2024);

    /// Parses `20YY-YY`. The second part must be the year after the first.
    pub fn parse(s: &str) -> Result<Self, AssessmentYearError> {
        let malformed = || AssessmentYearError::Malformed(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(malformed)?;

        if start.len() != 4
            || end.len() != 2
            || !start.starts_with("20")
            || !start.bytes().chain(end.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let start: u16 = start.parse().map_err(|_| malformed())?;
        let end: u16 = end.parse().map_err(|_| malformed())?;

        if (start + 1) % 100 != end {
            return Err(AssessmentYearError::NotConsecutive(s.to_string()));
        }

        Ok(Self(start))
    }

    pub fn start_year(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for AssessmentYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, (self.0 + 1) % 100)
    }
}

impl FromStr for AssessmentYear {
    type Err = AssessmentYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssessmentYear {
    type Error = AssessmentYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssessmentYear> for String {
    fn from(value: AssessmentYear) -> Self {
        value.to_string()
    }
}
