use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::cache::DatasetCache;
use crate::data::filter::{self, FilterCriteria, GenreFilter};
use crate::data::model::{Dataset, YearRange};
use crate::data::stats::ViewReport;

// ---------------------------------------------------------------------------
// View settings
// ---------------------------------------------------------------------------

/// User-adjustable knobs for the derived outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Length of the top-by-revenue table.
    pub top_n: usize,
    /// Bars in the genre chart.
    pub top_genres: usize,
    /// Count individual tags of compound genre cells.
    pub split_genre_tags: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            top_genres: 10,
            split_genre_tags: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded datasets, keyed by source file.
    pub cache: DatasetCache,

    /// Path of the active source file.
    pub source: Option<PathBuf>,

    /// Active dataset (None until a file loads).
    pub dataset: Option<Arc<Dataset>>,

    /// Current filter selection.
    pub criteria: Option<FilterCriteria>,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates for the current view (cached).
    pub report: Option<ViewReport>,

    pub settings: ViewSettings,

    /// Genre → colour for charts.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` through the cache and make it the active dataset.
    /// Errors are reported through `status_message`.
    pub fn open(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                log::info!(
                    "Showing {} movies across {} genres from {}",
                    dataset.len(),
                    dataset.genre_count(),
                    path.display()
                );
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load movie data: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Forget every cached dataset. The active one stays on screen.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        log::info!("Dataset cache cleared");
    }

    /// Drop the cached copy of the active file and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.open(&path);
        }
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.criteria = Some(FilterCriteria::for_dataset(&dataset));
        self.color_map = Some(ColorMap::new(dataset.genres()));
        self.status_message = if dataset.is_empty() {
            Some("No valid movie rows in this file.".to_string())
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// Recompute `visible_indices` and the report after a filter change.
    pub fn refilter(&mut self) {
        let (Some(ds), Some(criteria)) = (&self.dataset, &self.criteria) else {
            self.visible_indices.clear();
            self.report = None;
            return;
        };
        let view = filter::apply(ds, criteria);
        log::debug!("{} of {} movies match the filters", view.len(), ds.len());
        self.report = Some(ViewReport::build(
            &view,
            self.settings.top_n,
            self.settings.top_genres,
            self.settings.split_genre_tags,
        ));
        self.visible_indices = view.indices().to_vec();
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        if let Some(c) = &mut self.criteria {
            c.genre = genre;
        }
        self.refilter();
    }

    pub fn set_years(&mut self, from: i32, to: i32) {
        if let Some(c) = &mut self.criteria {
            c.years = Some(YearRange::new(from, to));
        }
        self.refilter();
    }

    pub fn set_title_query(&mut self, query: String) {
        if let Some(c) = &mut self.criteria {
            c.title_query = query;
        }
        self.refilter();
    }

    /// Back to "everything selected".
    pub fn reset_filters(&mut self) {
        self.criteria = self.dataset.as_deref().map(FilterCriteria::for_dataset);
        self.refilter();
    }

    /// Write the current report as pretty JSON.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let report = self.report.as_ref().context("no dataset loaded")?;
        let json = serde_json::to_string_pretty(report).context("serializing report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Exported view report to {}", path.display());
        Ok(())
    }
}
