//! Rating domain entity
//!
//! A vote on a recipe. One per source IP per recipe, immutable once stored.

use chrono::{DateTime, Utc};

use crate::error::DomainError;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 5;

/// Longest textual form of an IP address (IPv6 with embedded IPv4)
pub const MAX_SOURCE_IP_LEN: usize = 45;

/// A score within `MIN_SCORE..=MAX_SCORE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(i32);

impl Score {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(
                "rate",
                format!(
                    "Rate must be between {} and {}, got {}",
                    MIN_SCORE, MAX_SCORE, value
                ),
            ))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A stored vote
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub score: Score,
    pub source_ip: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to record a vote
#[derive(Debug, Clone)]
pub struct NewRating {
    pub score: Score,
    pub source_ip: String,
}

/// Derived vote statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub votes: usize,
    /// Mean score rounded to one decimal (half away from zero), 0 without votes
    pub average: f64,
}

impl RatingSummary {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Score>,
    {
        let (votes, sum) = scores
            .into_iter()
            .fold((0i64, 0i64), |(n, sum), s| (n + 1, sum + i64::from(s.value())));

        if votes == 0 {
            return Self {
                votes: 0,
                average: 0.0,
            };
        }

        // Scores are never negative, so adding half the divisor before the integer
        // division rounds halves up, which is away from zero.
        let tenths = (sum * 20 + votes) / (votes * 2);

        Self {
            votes: votes as usize,
            average: tenths as f64 / 10.0,
        }
    }
}
