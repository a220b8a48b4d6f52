use serde::Serialize;

use super::model::{Dataset, Record, YearRange};

// ---------------------------------------------------------------------------
// Filter criteria: genre, year range, title search
// ---------------------------------------------------------------------------

/// Genre selection: everything, or one exact genre value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn matches(&self, genre: &str) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(g) => g == genre,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => "All",
            GenreFilter::Only(g) => g,
        }
    }
}

/// The user's current selection. Built per interaction, applied, then
/// replaced by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub genre: GenreFilter,
    /// `None` means no year constraint (only for datasets without years).
    pub years: Option<YearRange>,
    /// Case-insensitive substring; empty means "match every title".
    pub title_query: String,
}

impl FilterCriteria {
    /// Criteria that select the whole dataset: all genres, full year bounds.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FilterCriteria {
            genre: GenreFilter::All,
            years: dataset.year_bounds(),
            title_query: String::new(),
        }
    }

    /// Combined predicate; all three conditions must hold.
    fn matcher(&self) -> impl Fn(&Record) -> bool + '_ {
        let title = TitleMatcher::new(&self.title_query);
        move |r: &Record| {
            self.genre.matches(&r.genre)
                && self.years.map_or(true, |y| y.contains(r.year))
                && title.matches(&r.title)
        }
    }
}

/// Lower-cased query, prepared once per filter pass.
struct TitleMatcher {
    needle: Option<String>,
}

impl TitleMatcher {
    /// Only the empty string means "no constraint"; whitespace is part of
    /// the query.
    fn new(query: &str) -> Self {
        TitleMatcher {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches(&self, title: &str) -> bool {
        match &self.needle {
            None => true,
            Some(n) => title.to_lowercase().contains(n.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – an order-preserving subset of a dataset
// ---------------------------------------------------------------------------

/// Indices of records passing a filter, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every record.
    #[cfg(test)]
    pub fn all(dataset: &'a Dataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Records of the view in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Evaluate `criteria` against every record in one pass.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView {
        dataset,
        indices: filtered_indices(dataset, criteria),
    }
}

/// Return indices of records that pass the combined predicate.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let keep = criteria.matcher();
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| keep(*r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> Dataset {
        Dataset::from_records(
            vec![
                record("The Godfather", "Drama", 1972, 9.2, 134.0),
                record("Die Hard", "Action", 1988, 8.2, 83.0),
                record("The Dark Knight", "Action", 2008, 9.0, 534.0),
                record("Godzilla", "Action", 2014, 6.4, 200.0),
                record("Amélie", "Comedy", 2001, 8.3, 33.0),
            ],
            0,
        )
    }

    fn titles(view: &FilteredView<'_>) -> Vec<String> {
        view.records().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn default_criteria_select_everything_in_order() {
        let ds = sample();
        let view = apply(&ds, &FilterCriteria::for_dataset(&ds));
        assert_eq!(view.indices(), FilteredView::all(&ds).indices());
        assert_eq!(view.records().cloned().collect::<Vec<_>>(), ds.records());
    }

    #[test]
    fn genre_is_an_exact_match() {
        let ds = sample();
        let mut c = FilterCriteria::for_dataset(&ds);
        c.genre = GenreFilter::Only("Action".into());
        assert_eq!(titles(&apply(&ds, &c)), ["Die Hard", "The Dark Knight", "Godzilla"]);

        c.genre = GenreFilter::Only("Act".into());
        assert!(apply(&ds, &c).is_empty());
    }

    #[test]
    fn year_range_is_inclusive() {
        let ds = sample();
        let mut c = FilterCriteria::for_dataset(&ds);
        c.years = Some(YearRange::new(1988, 2008));
        assert_eq!(titles(&apply(&ds, &c)), ["Die Hard", "The Dark Knight", "Amélie"]);
    }

    #[test]
    fn title_query_is_case_insensitive_substring() {
        let ds = sample();
        let mut c = FilterCriteria::for_dataset(&ds);
        c.title_query = "GODF".into();
        assert_eq!(titles(&apply(&ds, &c)), ["The Godfather"]);

        c.title_query = String::new();
        assert_eq!(apply(&ds, &c).len(), ds.len());

        c.title_query = "AMÉLIE".into();
        assert_eq!(titles(&apply(&ds, &c)), ["Amélie"]);
    }

    #[test]
    fn title_query_whitespace_is_significant() {
        let ds = Dataset::from_records(
            vec![
                record("Darkman", "Action", 1990, 6.4, 48.0),
                record("The Dark Knight", "Action", 2008, 9.0, 534.0),
            ],
            0,
        );
        let mut c = FilterCriteria::for_dataset(&ds);
        c.title_query = "dark ".into();
        assert_eq!(titles(&apply(&ds, &c)), ["The Dark Knight"]);

        c.title_query = " ".into();
        assert_eq!(titles(&apply(&ds, &c)), ["The Dark Knight"]);

        c.title_query = "  ".into();
        assert!(apply(&ds, &c).is_empty());
    }

    #[test]
    fn view_outlives_its_criteria() {
        let ds = sample();
        let view = {
            let criteria = FilterCriteria {
                genre: GenreFilter::Only("Drama".into()),
                ..FilterCriteria::for_dataset(&ds)
            };
            apply(&ds, &criteria)
        };
        assert_eq!(view.len(), view.indices().len());
        assert!(view.records().all(|r| r.genre == "Drama"));
    }

    #[test]
    fn predicates_combine_with_and() {
        let ds = sample();
        let c = FilterCriteria {
            genre: GenreFilter::Only("Action".into()),
            years: Some(YearRange::new(2000, 2020)),
            title_query: "god".into(),
        };
        assert_eq!(titles(&apply(&ds, &c)), ["Godzilla"]);
        for r in ds.records() {
            let in_view = apply(&ds, &c).records().any(|v| v == r);
            assert_eq!(in_view, c.matcher()(r));
        }
    }

    #[test]
    fn narrowing_never_reorders_survivors() {
        let ds = sample();
        let wide = apply(&ds, &FilterCriteria::for_dataset(&ds));
        let mut c = FilterCriteria::for_dataset(&ds);
        c.years = Some(YearRange::new(1980, 2010));
        let narrow = apply(&ds, &c);
        let wide_pos: Vec<usize> = narrow
            .indices()
            .iter()
            .map(|i| wide.indices().iter().position(|w| w == i).unwrap())
            .collect();
        assert!(wide_pos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn no_match_is_an_empty_view_not_an_error() {
        let ds = sample();
        let mut c = FilterCriteria::for_dataset(&ds);
        c.title_query = "zzz".into();
        let view = apply(&ds, &c);
        assert!(view.is_empty());
        assert_eq!(view.records().count(), 0);
    }
}
