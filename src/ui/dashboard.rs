use eframe::egui::{RichText, ScrollArea, Ui};

use crate::data::model::Record;
use crate::state::AppState;
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Metrics, filtered table, charts and rankings for the current view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(report)) = (&state.dataset, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a movie table to start  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Displaying {} movies", report.summary.count));
            tables::metrics_row(ui, &report.summary);
            ui.separator();

            if report.is_empty() {
                ui.add_space(12.0);
                ui.label(
                    RichText::new("No movies match the current filters.")
                        .italics()
                        .size(16.0),
                );
                return;
            }

            let visible: Vec<&Record> = state
                .visible_indices
                .iter()
                .map(|&i| &dataset.records()[i])
                .collect();
            section(ui, &format!("Filtered movies ({} records)", visible.len()));
            tables::record_table(ui, "filtered_table", &visible, 300.0);

            section(ui, &format!("Top {} genres by movie count", report.top_genres.len()));
            plot::genre_chart(ui, state);

            section(ui, "Rating vs revenue");
            plot::rating_revenue_scatter(ui, state);

            section(ui, "Correlation");
            match &report.correlation {
                Some(matrix) => plot::correlation_heatmap(ui, matrix),
                None => {
                    ui.label("Not enough data to compute correlations.");
                }
            }

            section(ui, "Rating tiers");
            tables::tier_sections(ui, &report.tiers);

            section(
                ui,
                &format!("Top {} movies by revenue", report.top_by_revenue.len()),
            );
            let top: Vec<&Record> = report.top_by_revenue.iter().collect();
            tables::record_table(ui, "top_revenue_table", &top, 260.0);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(10.0);
    ui.separator();
    ui.label(RichText::new(title).heading());
    ui.add_space(4.0);
}
