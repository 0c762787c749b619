use eframe::egui::{self, Color32, RichText, Ui};

use crate::nav::Page;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – navigation menu
// ---------------------------------------------------------------------------

/// Render the sidebar and report which button, if any, was pressed.
pub fn side_panel(ui: &mut Ui, active: Page) -> Option<Page> {
    ui.add_space(8.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("MENU").strong());
    });
    ui.separator();
    ui.add_space(4.0);

    let mut pressed = None;
    for page in Page::ALL {
        let button = egui::Button::new(RichText::new(page.button_label()).strong())
            .selected(page == active);
        if ui
            .add_sized([ui.available_width(), 36.0], button)
            .clicked()
        {
            pressed = Some(page);
        }
        ui.add_space(2.0);
    }
    pressed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "data: {}  ({}, {} cached)",
            state.store.data_dir().display(),
            state.store.mode().label(),
            state.store.cached_len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open kriging data folder")
        .set_directory(state.store.data_dir())
        .pick_folder();

    if let Some(path) = folder {
        state.set_data_dir(path);
    }
}
