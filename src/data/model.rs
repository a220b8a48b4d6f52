use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::tier::RatingTier;

// ---------------------------------------------------------------------------
// Record – one cleaned row of the source table
// ---------------------------------------------------------------------------

/// A single movie after cleaning and type coercion.
///
/// Every field is present: rows that fail coercion never become records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub title: String,
    pub genre: String,
    pub year: i32,
    /// IMDB rating in `[0, 10]`.
    pub rating: f64,
    /// Gross revenue, never negative.
    pub revenue: f64,
    pub votes: u64,
}

impl Record {
    /// Rating tier this record falls into.
    pub fn tier(&self) -> RatingTier {
        RatingTier::classify(self.rating)
    }
}

// ---------------------------------------------------------------------------
// YearRange – inclusive [min, max]
// ---------------------------------------------------------------------------

/// An inclusive range of release years with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Grow the range so it also covers `year`.
    fn include(self, year: i32) -> Self {
        YearRange {
            min: self.min.min(year),
            max: self.max.max(year),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable set of valid records with pre-computed indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All valid records in source order.
    records: Vec<Record>,
    /// Sorted distinct genre values.
    genres: BTreeSet<String>,
    /// Observed year bounds; `None` when no row survived cleaning.
    year_bounds: Option<YearRange>,
    /// Rows dropped during cleaning.
    dropped_rows: usize,
}

impl Dataset {
    /// Build column indices from the cleaned records.
    pub fn from_records(records: Vec<Record>, dropped_rows: usize) -> Self {
        let genres = records.iter().map(|r| r.genre.clone()).collect();
        let year_bounds = records.iter().fold(None, |acc: Option<YearRange>, r| {
            Some(match acc {
                Some(range) => range.include(r.year),
                None => YearRange::new(r.year, r.year),
            })
        });
        Dataset {
            records,
            genres,
            year_bounds,
            dropped_rows,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted list of distinct genres, for populating a choice list.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    pub fn year_bounds(&self) -> Option<YearRange> {
        self.year_bounds
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(title: &str, genre: &str, year: i32, rating: f64, revenue: f64) -> Record {
    Record {
        title: title.to_string(),
        genre: genre.to_string(),
        year,
        rating,
        revenue,
        votes: 1_000,
    }
}
