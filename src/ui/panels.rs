use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::GenreFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Movies");
    ui.separator();

    let (Some(dataset), Some(criteria)) = (state.dataset.clone(), state.criteria.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre ----
            ui.strong("Genre");
            let mut genre = criteria.genre.clone();
            egui::ComboBox::from_id_salt("genre_filter")
                .selected_text(genre.label())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut genre, GenreFilter::All, "All");
                    for g in dataset.genres() {
                        ui.selectable_value(&mut genre, GenreFilter::Only(g.to_string()), g);
                    }
                });
            if genre != criteria.genre {
                state.set_genre(genre);
            }
            ui.add_space(8.0);

            // ---- Year range ----
            ui.strong("Year range");
            if let (Some(bounds), Some(years)) = (dataset.year_bounds(), criteria.years) {
                let range = bounds.min()..=bounds.max();
                let (mut from, mut to) = (years.min(), years.max());
                let from_changed = ui
                    .add(egui::Slider::new(&mut from, range.clone()).text("from"))
                    .changed();
                let to_changed = ui.add(egui::Slider::new(&mut to, range).text("to")).changed();
                if from_changed || to_changed {
                    // Dragging one handle past the other pushes it along.
                    if from_changed && from > to {
                        to = from;
                    } else if to_changed && to < from {
                        from = to;
                    }
                    state.set_years(from, to);
                }
            } else {
                ui.label("No release years available.");
            }
            ui.add_space(8.0);

            // ---- Title search ----
            ui.strong("Search by title");
            let mut query = criteria.title_query.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("e.g., Godfather")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                state.set_title_query(query);
            }
            ui.add_space(8.0);

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.separator();

            // ---- View settings ----
            egui::CollapsingHeader::new(RichText::new("Display").strong())
                .id_salt("display_settings")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    let mut settings = state.settings.clone();
                    ui.add(egui::Slider::new(&mut settings.top_n, 1..=50).text("top movies"));
                    ui.add(egui::Slider::new(&mut settings.top_genres, 1..=30).text("top genres"));
                    ui.checkbox(&mut settings.split_genre_tags, "Split compound genres");
                    if settings != state.settings {
                        state.settings = settings;
                        state.refilter();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.cache.is_empty(), egui::Button::new("Clear cache"))
                .clicked()
            {
                state.clear_cache();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.report.is_some(), egui::Button::new("Export report…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} movies loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
            if ds.dropped_rows() > 0 {
                ui.label(
                    RichText::new(format!("({} invalid rows skipped)", ds.dropped_rows()))
                        .weak(),
                );
            }
        }

        if state.cache.loads() > 0 {
            ui.label(
                RichText::new(format!(
                    "cache: {} file(s), {} read(s)",
                    state.cache.len(),
                    state.cache.loads()
                ))
                .weak(),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export view report")
        .add_filter("JSON", &["json"])
        .set_file_name("movie_report.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_report(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
