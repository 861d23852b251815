//! Tax slab schedules keyed by assessment year and regime.
//!
//! A schedule is valid when it starts at zero, every bounded slab ends where
//! the next one begins, and exactly one unbounded slab closes it. Invalid
//! schedules are rejected when inserted so the engine never sees them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{AssessmentYear, TaxRegime, TaxSlab};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabTableError {
    #[error("no slabs given for {regime} regime in {year}")]
    Empty { year: AssessmentYear, regime: TaxRegime },

    #[error("first slab for {regime} regime in {year} starts at {found}, expected 0")]
    DoesNotStartAtZero {
        year: AssessmentYear,
        regime: TaxRegime,
        found: Decimal,
    },

    #[error(
        "slab {index} for {regime} regime in {year} starts at {found}, expected {expected}"
    )]
    NotContiguous {
        year: AssessmentYear,
        regime: TaxRegime,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("slab {index} for {regime} regime in {year} has max {max} not above min {min}")]
    EmptyRange {
        year: AssessmentYear,
        regime: TaxRegime,
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("slab {index} for {regime} regime in {year} is unbounded but not last")]
    UnboundedNotLast {
        year: AssessmentYear,
        regime: TaxRegime,
        index: usize,
    },

    #[error("{regime} regime in {year} has no unbounded top slab")]
    MissingUnboundedTop { year: AssessmentYear, regime: TaxRegime },

    #[error("slab {index} for {regime} regime in {year} has rate {rate}, expected 0 to 100")]
    InvalidRate {
        year: AssessmentYear,
        regime: TaxRegime,
        index: usize,
        rate: Decimal,
    },
}

/// Checks one regime's schedule.
pub fn validate_slabs(
    year: AssessmentYear,
    regime: TaxRegime,
    slabs: &[TaxSlab],
) -> Result<(), SlabTableError> {
    let first = slabs.first().ok_or(SlabTableError::Empty { year, regime })?;
    if first.min != Decimal::ZERO {
        return Err(SlabTableError::DoesNotStartAtZero {
            year,
            regime,
            found: first.min,
        });
    }

    let mut expected_min = Decimal::ZERO;
    for (index, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO || slab.rate > dec!(100) {
            return Err(SlabTableError::InvalidRate {
                year,
                regime,
                index,
                rate: slab.rate,
            });
        }
        if slab.min != expected_min {
            return Err(SlabTableError::NotContiguous {
                year,
                regime,
                index,
                expected: expected_min,
                found: slab.min,
            });
        }
        match slab.max {
            Some(max) if max <= slab.min => {
                return Err(SlabTableError::EmptyRange {
                    year,
                    regime,
                    index,
                    min: slab.min,
                    max,
                });
            }
            Some(max) => expected_min = max,
            None if index + 1 != slabs.len() => {
                return Err(SlabTableError::UnboundedNotLast {
                    year,
                    regime,
                    index,
                });
            }
            None => {}
        }
    }

    if slabs.last().is_some_and(|s| !s.is_unbounded()) {
        return Err(SlabTableError::MissingUnboundedTop { year, regime });
    }

    Ok(())
}

/// Validated slab schedules for every known (year, regime) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlabTable {
    schedules: BTreeMap<(AssessmentYear, TaxRegime), Vec<TaxSlab>>,
}

impl SlabTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules for assessment years 2023-24 and 2024-25.
    pub fn builtin() -> Self {
        let old = vec![
            TaxSlab::new(dec!(0), Some(dec!(250000)), dec!(0)),
            TaxSlab::new(dec!(250000), Some(dec!(500000)), dec!(5)),
            TaxSlab::new(dec!(500000), Some(dec!(1000000)), dec!(20)),
            TaxSlab::new(dec!(1000000), None, dec!(30)),
        ];
        let new = vec![
            TaxSlab::new(dec!(0), Some(dec!(300000)), dec!(0)),
            TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(5)),
            TaxSlab::new(dec!(600000), Some(dec!(900000)), dec!(10)),
            TaxSlab::new(dec!(900000), Some(dec!(1200000)), dec!(15)),
            TaxSlab::new(dec!(1200000), Some(dec!(1500000)), dec!(20)),
            TaxSlab::new(dec!(1500000), None, dec!(30)),
        ];

        let mut schedules = BTreeMap::new();
        for year in [AssessmentYear::AY_2023_24, AssessmentYear::AY_2024_25] {
            schedules.insert((year, TaxRegime::Old), old.clone());
            schedules.insert((year, TaxRegime::New), new.clone());
        }
        Self { schedules }
    }

    /// Validate and insert a schedule, replacing any existing one.
    pub fn insert(
        &mut self,
        year: AssessmentYear,
        regime: TaxRegime,
        slabs: Vec<TaxSlab>,
    ) -> Result<(), SlabTableError> {
        validate_slabs(year, regime, &slabs)?;
        self.schedules.insert((year, regime), slabs);
        Ok(())
    }

    pub fn slabs(
        &self,
        year: AssessmentYear,
        regime: TaxRegime,
    ) -> Option<&[TaxSlab]> {
        self.schedules.get(&(year, regime)).map(Vec::as_slice)
    }

    /// True when at least one regime has a schedule for `year`.
    pub fn contains_year(
        &self,
        year: AssessmentYear,
    ) -> bool {
        self.schedules.keys().any(|(y, _)| *y == year)
    }

    /// Distinct assessment years, ascending.
    pub fn years(&self) -> Vec<AssessmentYear> {
        let mut years: Vec<_> = self.schedules.keys().map(|(y, _)| *y).collect();
        years.dedup();
        years
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }
}
