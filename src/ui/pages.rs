use std::collections::HashMap;

use eframe::egui::{Color32, RichText, Ui};

use crate::data::model::DatasetKind;
use crate::nav::Page;
use crate::pages::{DatasetPage, MapLayer, MapPage, PageView};
use crate::reserve::{comparison, Scenario};
use crate::state::{MapDim, TabState};
use crate::ui::orbit::OrbitCamera;
use crate::ui::plot::{grouped_bar_chart, scatter_2d, scatter_3d, section_gap};
use crate::ui::table::{data_grid, summary_table};

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Draw the active page, or the diagnostic that replaced it.
pub fn render(
    ui: &mut Ui,
    page: Page,
    view: Option<&PageView>,
    error: Option<&str>,
    tabs: &mut TabState,
    cameras: &mut HashMap<String, OrbitCamera>,
) {
    match (view, error) {
        (Some(PageView::Dataset(data)), _) => dataset_page(ui, data, tabs),
        (Some(PageView::Map(data)), _) => map_page(ui, data, tabs, cameras),
        (Some(PageView::Reserve), _) => reserve_page(ui, tabs),
        (None, error) => failed_page(ui, page, error.unwrap_or("page was not loaded")),
    }
}

fn failed_page(ui: &mut Ui, page: Page, error: &str) {
    ui.heading(page.title());
    ui.add_space(8.0);
    ui.label(RichText::new(format!("Error: {error}")).color(Color32::RED));
    ui.add_space(4.0);
    ui.label("Check the data folder (File → Open data folder…) and reload.");
}

/// A row of mutually exclusive tab buttons.
fn tab_strip<T: Copy + PartialEq>(ui: &mut Ui, current: &mut T, options: &[(T, &str)]) {
    ui.horizontal(|ui: &mut Ui| {
        for (value, label) in options {
            ui.selectable_value(current, *value, *label);
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Page 1: datasets
// ---------------------------------------------------------------------------

fn dataset_page(ui: &mut Ui, page: &DatasetPage, tabs: &mut TabState) {
    let note = match page.preview_rows {
        Some(n) => format!("(Preview {n} baris)"),
        None => "(semua baris)".to_string(),
    };
    ui.heading(format!("{} {note}", Page::Dataset.title()));
    ui.add_space(6.0);

    ui.heading("1. DATASET AWAL");
    let raw_tabs: Vec<(DatasetKind, &str)> =
        page.raw.iter().map(|(kind, _)| (*kind, kind.label())).collect();
    tab_strip(ui, &mut tabs.raw_table, &raw_tabs);
    if let Some((kind, table)) = page.raw.iter().find(|(kind, _)| *kind == tabs.raw_table) {
        ui.label(kind.label());
        data_grid(ui, kind.file_name(), table, page.preview_rows);
    }
    section_gap(ui);

    ui.heading("2. DATASET SETELAH PREPROCESSING");
    data_grid(
        ui,
        DatasetKind::Preprocessed.file_name(),
        &page.preprocessed,
        page.preview_rows,
    );
    section_gap(ui);

    ui.heading("3. DATASET HASIL KRIGING");
    tab_strip(ui, &mut tabs.kriging_table, &scenario_tabs());
    let wanted = match tabs.kriging_table {
        Scenario::Before => DatasetKind::KrigingBefore,
        Scenario::After => DatasetKind::KrigingAfter,
    };
    if let Some((kind, table)) = page.kriging.iter().find(|(kind, _)| *kind == wanted) {
        data_grid(ui, kind.file_name(), table, page.preview_rows);
    }
}

fn scenario_tabs() -> [(Scenario, &'static str); 2] {
    Scenario::ALL.map(|s| (s, s.label()))
}

// ---------------------------------------------------------------------------
// Page 2: maps
// ---------------------------------------------------------------------------

fn map_page(
    ui: &mut Ui,
    page: &MapPage,
    tabs: &mut TabState,
    cameras: &mut HashMap<String, OrbitCamera>,
) {
    ui.heading(Page::MapView.title());
    if let Some(cap) = page.sample_cap {
        ui.label(RichText::new(format!("Each map shows at most {cap} randomly sampled points.")).weak());
    }
    ui.add_space(6.0);

    ui.heading("1. PETA DATASET SETELAH PREPROCESSING");
    let dims = MapDim::ALL.map(|d| (d, d.label()));
    tab_strip(ui, &mut tabs.preprocessed_map, &dims);
    map_layer(ui, "pre", &page.preprocessed, tabs.preprocessed_map, cameras);
    section_gap(ui);

    ui.heading("2. PETA KRIGING");
    tab_strip(ui, &mut tabs.kriging_map, &scenario_tabs());
    match tabs.kriging_map {
        Scenario::Before => {
            tab_strip(ui, &mut tabs.before_map, &dims);
            map_layer(ui, "before", &page.before, tabs.before_map, cameras);
        }
        Scenario::After => {
            tab_strip(ui, &mut tabs.after_map, &dims);
            map_layer(ui, "after", &page.after, tabs.after_map, cameras);
        }
    }
}

fn map_layer(
    ui: &mut Ui,
    id: &str,
    layer: &MapLayer,
    dim: MapDim,
    cameras: &mut HashMap<String, OrbitCamera>,
) {
    let (points, title) = match dim {
        MapDim::Flat => (&layer.plot_2d, &layer.title_2d),
        MapDim::Solid => (&layer.plot_3d, &layer.title_3d),
    };
    if points.len() < layer.total {
        ui.label(RichText::new(format!("{} of {} points", points.len(), layer.total)).weak());
    }

    match dim {
        MapDim::Flat => {
            let plot_id = format!("{id}_2d");
            scatter_2d(ui, &plot_id, title, layer.columns, points, &layer.scale);
        }
        MapDim::Solid => {
            let plot_id = format!("{id}_3d");
            let camera = cameras.entry(plot_id.clone()).or_default();
            scatter_3d(ui, &plot_id, title, layer.columns, points, &layer.scale, camera);
        }
    }
}

// ---------------------------------------------------------------------------
// Page 3: reserve estimate
// ---------------------------------------------------------------------------

fn reserve_page(ui: &mut Ui, tabs: &mut TabState) {
    ui.heading(Page::ReserveEstimate.title());
    ui.add_space(6.0);

    ui.heading("TABEL RINGKASAN VOLUME, TONASE, DAN KADAR RATA-RATA AU");
    tab_strip(ui, &mut tabs.reserve_table, &scenario_tabs());
    let scenario = tabs.reserve_table;
    summary_table(
        ui,
        scenario.label(),
        &scenario.estimate().summary_rows(),
    );
    section_gap(ui);

    ui.heading("📈 PERBANDINGAN SEBELUM DAN SESUDAH OPTIMASI");
    grouped_bar_chart(
        ui,
        "reserve_comparison",
        "Perbandingan Estimasi Cadangan",
        &comparison(),
    );
}
