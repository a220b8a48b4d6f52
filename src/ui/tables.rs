use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::data::stats::{Summary, TierGroup};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

pub fn metrics_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total movies", summary.count.to_string());
        metric(
            &mut cols[1],
            "Avg rating",
            summary
                .average_rating
                .map(|r| format!("{r:.2}"))
                .unwrap_or_else(|| "N/A".to_string()),
        );
        metric(
            &mut cols[2],
            "Total gross",
            if summary.count == 0 {
                "N/A".to_string()
            } else {
                format!("${}", thousands(summary.total_revenue))
            },
        );
        metric(&mut cols[3], "Genres", summary.genre_diversity.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).heading().strong());
    });
}

/// Format a non-negative amount with comma separators, no decimals.
pub fn thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.max(0.0));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Record tables
// ---------------------------------------------------------------------------

/// Scrollable table of records: title, genre, year, rating, gross.
pub fn record_table(ui: &mut Ui, id: &str, records: &[&Record], max_height: f32) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(160.0).clip(true))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto().at_least(110.0))
            .max_scroll_height(max_height)
            .header(20.0, |mut header| {
                for name in ["Title", "Genre", "Year", "Rating", "Gross"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let r = records[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.title);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.genre);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", r.rating));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("${}", thousands(r.revenue)));
                    });
                });
            });
    });
}

/// One collapsible section per rating tier.
pub fn tier_sections(ui: &mut Ui, tiers: &[TierGroup]) {
    for group in tiers {
        let header = format!("{}  ({})", group.tier, group.records.len());
        egui::CollapsingHeader::new(RichText::new(header).strong())
            .id_salt(group.tier.label())
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                if group.records.is_empty() {
                    ui.label("No movies in this tier.");
                    return;
                }
                let rows: Vec<&Record> = group.records.iter().collect();
                record_table(ui, group.tier.label(), &rows, 220.0);
            });
    }
}
