//! Aggregates over a [`FilteredView`]. Everything here is a pure function of
//! the view and is recomputed whenever the view changes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::filter::FilteredView;
use super::model::Record;
use super::tier::RatingTier;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Headline numbers for a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    /// `None` for an empty view ("no data"), never NaN.
    pub average_rating: Option<f64>,
    pub total_revenue: f64,
    pub genre_diversity: usize,
}

pub fn summarize(view: &FilteredView<'_>) -> Summary {
    let mut count = 0usize;
    let mut rating_sum = 0.0;
    let mut total_revenue = 0.0;
    let mut genres: BTreeSet<&str> = BTreeSet::new();

    for r in view.records() {
        count += 1;
        rating_sum += r.rating;
        total_revenue += r.revenue;
        genres.insert(&r.genre);
    }

    Summary {
        count,
        average_rating: (count > 0).then(|| rating_sum / count as f64),
        total_revenue,
        genre_diversity: genres.len(),
    }
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// The `n` highest-grossing records, descending. Ties keep view order.
pub fn top_by_revenue(view: &FilteredView<'_>, n: usize) -> Vec<Record> {
    let mut records: Vec<&Record> = view.records().collect();
    // `sort_by` is stable, so equal revenues stay in view order.
    records.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    records.into_iter().take(n).cloned().collect()
}

/// Count of records per exact genre value, most frequent first
/// (ties alphabetical).
pub fn genre_frequency(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    rank(view.records().map(|r| r.genre.as_str()))
}

/// Like [`genre_frequency`] but splits compound cells such as
/// `"Crime, Drama"` or `"Crime|Drama"` and counts each tag.
pub fn genre_tag_frequency(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    rank(view.records().flat_map(|r| genre_tags(&r.genre)))
}

/// Individual tags of a genre cell.
pub fn genre_tags(genre: &str) -> impl Iterator<Item = &str> {
    genre
        .split([',', '|'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn rank<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> =
        counts.into_iter().map(|(g, n)| (g.to_string(), n)).collect();
    // BTreeMap already yields names in order; the stable sort keeps it.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

// ---------------------------------------------------------------------------
// Rating tiers
// ---------------------------------------------------------------------------

/// Records of one tier, best rated first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierGroup {
    pub tier: RatingTier,
    pub records: Vec<Record>,
}

/// Partition the view into all five tiers (empty tiers included), each
/// sorted by rating descending with ties in view order.
pub fn tier_groups(view: &FilteredView<'_>) -> Vec<TierGroup> {
    let mut groups: Vec<TierGroup> = RatingTier::ALL
        .iter()
        .map(|&tier| TierGroup {
            tier,
            records: Vec::new(),
        })
        .collect();

    for r in view.records() {
        groups[r.tier() as usize].records.push(r.clone());
    }
    for g in &mut groups {
        g.records.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    }
    groups
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Numeric record fields taking part in the correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericField {
    Rating,
    Revenue,
    Votes,
    Year,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Rating,
        NumericField::Revenue,
        NumericField::Votes,
        NumericField::Year,
    ];

    pub fn value(self, r: &Record) -> f64 {
        match self {
            NumericField::Rating => r.rating,
            NumericField::Revenue => r.revenue,
            NumericField::Votes => r.votes as f64,
            NumericField::Year => f64::from(r.year),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Rating => "rating",
            NumericField::Revenue => "revenue",
            NumericField::Votes => "votes",
            NumericField::Year => "year",
        }
    }
}

/// Symmetric Pearson matrix over [`NumericField::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: [NumericField; 4],
    /// `values[i][j]` correlates `fields[i]` with `fields[j]`; NaN where
    /// undefined. `fields` is always [`NumericField::ALL`].
    pub values: [[f64; 4]; 4],
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericField, b: NumericField) -> f64 {
        self.values[a as usize][b as usize]
    }
}

/// Pairwise Pearson correlation. `None` for an empty view.
pub fn correlation_matrix(view: &FilteredView<'_>) -> Option<CorrelationMatrix> {
    if view.is_empty() {
        return None;
    }
    let columns: Vec<Vec<f64>> = NumericField::ALL
        .iter()
        .map(|&f| view.records().map(|r| f.value(r)).collect())
        .collect();

    let mut values = [[f64::NAN; 4]; 4];
    for i in 0..4 {
        values[i][i] = 1.0;
        for j in (i + 1)..4 {
            let c = pearson(&columns[i], &columns[j]);
            values[i][j] = c;
            values[j][i] = c;
        }
    }
    Some(CorrelationMatrix {
        fields: NumericField::ALL,
        values,
    })
}

/// Pearson product-moment correlation; NaN with fewer than two samples or
/// zero variance on either side.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// ViewReport – everything presentation needs for one view
// ---------------------------------------------------------------------------

/// Plain structured output for one filter pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub summary: Summary,
    pub tiers: Vec<TierGroup>,
    pub top_by_revenue: Vec<Record>,
    pub top_genres: Vec<(String, usize)>,
    pub correlation: Option<CorrelationMatrix>,
}

impl ViewReport {
    /// Compute every aggregate for `view`. `split_genre_tags` selects
    /// [`genre_tag_frequency`] over [`genre_frequency`] for the ranking.
    pub fn build(
        view: &FilteredView<'_>,
        top_n: usize,
        top_genres: usize,
        split_genre_tags: bool,
    ) -> Self {
        let mut genres = if split_genre_tags {
            genre_tag_frequency(view)
        } else {
            genre_frequency(view)
        };
        genres.truncate(top_genres);

        ViewReport {
            summary: summarize(view),
            tiers: tier_groups(view),
            top_by_revenue: top_by_revenue(view, top_n),
            top_genres: genres,
            correlation: correlation_matrix(view),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}
