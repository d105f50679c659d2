//! # Catalog Records
//!
//! Entity and envelope types returned by catalog queries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ESRB-style age rating stored on every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRating {
    /// Everyone
    E,
    /// Everyone 10+
    E10Plus,
    /// Teen
    T,
    /// Mature 17+
    M,
    /// Adults Only 18+
    AO,
}

impl AgeRating {
    /// Ratings admitted by the adult-only filter
    pub const ADULT: [AgeRating; 2] = [AgeRating::M, AgeRating::AO];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRating::E => "E",
            AgeRating::E10Plus => "E10Plus",
            AgeRating::T => "T",
            AgeRating::M => "M",
            AgeRating::AO => "AO",
        }
    }

    pub fn is_adult(&self) -> bool {
        Self::ADULT.contains(self)
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(AgeRating::E),
            "E10Plus" => Ok(AgeRating::E10Plus),
            "T" => Ok(AgeRating::T),
            "M" => Ok(AgeRating::M),
            "AO" => Ok(AgeRating::AO),
            other => Err(format!("unknown age rating '{}'", other)),
        }
    }
}

/// A single game row as stored in the `game` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    /// Cover image URL
    pub image: String,
    pub price: f64,
    pub rating: f64,
    pub age_rating: AgeRating,
    pub release_date: DateTime<Utc>,
    pub developer: String,
    pub publisher: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// One page of matching games plus the total match count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedResult {
    /// Number of rows matching the filter, independent of pagination
    pub total: i64,
    pub items: Vec<GameRecord>,
}

impl PagedResult {
    pub fn new(items: Vec<GameRecord>, total: i64) -> Self {
        Self { total, items }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
