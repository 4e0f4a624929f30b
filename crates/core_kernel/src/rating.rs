//! Rating values with precise decimal arithmetic
//!
//! Inspection ratings live on a fixed 1-5 scale. The bound is enforced at
//! construction so every `Rating` in the system is already valid, and
//! rust_decimal keeps averages exact across repeated recomputation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Lowest rating on the scale
pub const MIN_RATING: Decimal = dec!(1);
/// Highest rating on the scale
pub const MAX_RATING: Decimal = dec!(5);

/// Errors that can occur when constructing ratings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating {0} is outside the 1-5 scale")]
    OutOfRange(Decimal),
}

/// A rating on the 1-5 scale
///
/// The inner value is guaranteed to satisfy `1 <= value <= 5`. Fractional
/// ratings are allowed (the overall score of a scorecard is a mean).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Creates a rating, rejecting values outside [1, 5]
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < MIN_RATING || value > MAX_RATING {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value.round_dp(2)))
    }

    /// Creates a rating from an integer score on the scale
    pub fn from_score(score: u8) -> Result<Self, RatingError> {
        Self::new(Decimal::from(score))
    }

    /// Returns the rating value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the integer band this rating falls into (1..=5)
    ///
    /// Fractional ratings round half-up to the nearest band.
    pub fn band(&self) -> u8 {
        let rounded = self
            .0
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        rounded.to_u8().unwrap_or(1).clamp(1, 5)
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Decimal {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Mean of a set of ratings
///
/// The average over zero ratings is defined as 0, not an error: dashboards
/// must render for actors with no review history yet.
pub fn average_rating(ratings: &[Rating]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = ratings.iter().map(|r| r.0).sum();
    (sum / Decimal::from(ratings.len())).round_dp(2)
}

/// Distribution of ratings keyed by integer band
///
/// Backed by a BTreeMap so serialization order is stable; regenerating a
/// distribution from unchanged inputs yields byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram(BTreeMap<u8, u32>);

impl RatingHistogram {
    /// Creates an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one rating into its band
    pub fn record(&mut self, rating: Rating) {
        *self.0.entry(rating.band()).or_insert(0) += 1;
    }

    /// Returns the count for a band, zero if unobserved
    pub fn count(&self, band: u8) -> u32 {
        self.0.get(&band).copied().unwrap_or(0)
    }

    /// Total number of recorded ratings
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Returns true if no ratings have been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (band, count) pairs in band order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().map(|(band, count)| (*band, *count))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rating_accepts_exactly_the_scale(cents in 100i64..=500i64) {
            let value = Decimal::new(cents, 2);
            prop_assert!(Rating::new(value).is_ok());
        }

        #[test]
        fn rating_rejects_outside_the_scale(cents in 501i64..100_000i64) {
            let value = Decimal::new(cents, 2);
            prop_assert!(Rating::new(value).is_err());
        }

        #[test]
        fn histogram_total_matches_records(scores in proptest::collection::vec(1u8..=5u8, 0..50)) {
            let mut hist = RatingHistogram::new();
            for score in &scores {
                hist.record(Rating::from_score(*score).unwrap());
            }
            prop_assert_eq!(hist.total() as usize, scores.len());
        }

        #[test]
        fn average_stays_on_the_scale(scores in proptest::collection::vec(1u8..=5u8, 1..50)) {
            let ratings: Vec<Rating> = scores
                .iter()
                .map(|s| Rating::from_score(*s).unwrap())
                .collect();
            let avg = average_rating(&ratings);
            prop_assert!(avg >= MIN_RATING && avg <= MAX_RATING);
        }
    }
}
