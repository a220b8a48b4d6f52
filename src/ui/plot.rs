use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color;
use crate::data::stats::CorrelationMatrix;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top genres bar chart
// ---------------------------------------------------------------------------

/// Horizontal-axis bar chart of the genre ranking in the current report.
pub fn genre_chart(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };
    if report.top_genres.is_empty() {
        ui.label("No genres to rank.");
        return;
    }

    let names: Vec<String> = report.top_genres.iter().map(|(g, _)| g.clone()).collect();
    let bars: Vec<Bar> = report
        .top_genres
        .iter()
        .enumerate()
        .map(|(i, (genre, count))| {
            let fill = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(genre))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *count as f64)
                .name(genre)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    Plot::new("genre_chart")
        .height(260.0)
        .y_axis_label("Movies")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("movies per genre"));
        });
}

// ---------------------------------------------------------------------------
// Rating vs revenue scatter
// ---------------------------------------------------------------------------

/// One point per visible movie, coloured by genre.
pub fn rating_revenue_scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    // genre → points, so the legend gets one entry per genre
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &state.visible_indices {
        let r = &dataset.records()[idx];
        series
            .entry(r.genre.as_str())
            .or_default()
            .push([r.rating, r.revenue]);
    }

    Plot::new("rating_revenue")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label("IMDB rating")
        .y_axis_label("Gross revenue")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (genre, points) in series {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(genre))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(genre)
                        .color(color)
                        .radius(3.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Grid of coloured cells, one per field pair.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    egui::Grid::new("correlation_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for f in matrix.fields {
                ui.strong(f.label());
            }
            ui.end_row();

            for row_field in matrix.fields {
                ui.strong(row_field.label());
                for col_field in matrix.fields {
                    let value = matrix.get(row_field, col_field);
                    let text = if value.is_nan() {
                        "n/a".to_string()
                    } else {
                        format!("{value:+.2}")
                    };
                    ui.label(
                        RichText::new(format!(" {text} "))
                            .monospace()
                            .color(Color32::BLACK)
                            .background_color(color::diverging(value)),
                    );
                }
                ui.end_row();
            }
        });
}
