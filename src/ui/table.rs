use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;
use crate::reserve::SummaryRow;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Dataset grid
// ---------------------------------------------------------------------------

/// Render a loaded table, limited to the first `limit` rows.
pub fn data_grid(ui: &mut Ui, id: &str, table: &Table, limit: Option<usize>) {
    let rows = table.head(limit);
    let caption = if rows.len() < table.len() {
        format!(
            "{}: showing first {} of {} rows, {} columns",
            table.name,
            rows.len(),
            table.len(),
            table.columns.len()
        )
    } else {
        format!("{}: {} rows, {} columns", table.name, table.len(), table.columns.len())
    };
    ui.label(RichText::new(caption).weak());

    if table.columns.is_empty() {
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal()
            .id_salt("hscroll")
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(MAX_TABLE_HEIGHT)
                    .cell_layout(Layout::left_to_right(Align::Center))
                    .column(Column::auto().at_least(40.0))
                    .columns(Column::auto().at_least(70.0).clip(true), table.columns.len())
                    .header(ROW_HEIGHT + 2.0, |mut header| {
                        header.col(|ui: &mut Ui| {
                            ui.strong("#");
                        });
                        for name in &table.columns {
                            header.col(|ui: &mut Ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                            let cells = &rows[row.index()];
                            let index = row.index();
                            row.col(|ui: &mut Ui| {
                                ui.label(RichText::new(index.to_string()).weak());
                            });
                            for cell in cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    });
            });
    });
}

// ---------------------------------------------------------------------------
// Parameter / value summary
// ---------------------------------------------------------------------------

/// Two-column static table of reserve figures.
pub fn summary_table(ui: &mut Ui, id: &str, rows: &[SummaryRow]) {
    ui.push_id(id, |ui: &mut Ui| {
        egui::Grid::new("summary")
            .striped(true)
            .num_columns(2)
            .spacing([32.0, 6.0])
            .show(ui, |ui: &mut Ui| {
                ui.strong("Parameter");
                ui.strong("Nilai");
                ui.end_row();
                for row in rows {
                    ui.label(row.parameter);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                        ui.monospace(&row.display);
                    });
                    ui.end_row();
                }
            });
    });
}
