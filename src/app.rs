use eframe::egui::{self, ScrollArea};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KrigingDashboardApp {
    pub state: AppState,
}

impl KrigingDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for KrigingDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        let pressed = egui::SidePanel::left("menu_panel")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| panels::side_panel(ui, self.state.active_page))
            .inner;
        if pressed.is_some() {
            self.state.start_cycle(pressed);
        }

        // ---- Central panel: active page ----
        let state = &mut self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    pages::render(
                        ui,
                        state.active_page,
                        state.view.as_ref(),
                        state.page_error.as_deref(),
                        &mut state.tabs,
                        &mut state.cameras,
                    );
                });
        });
    }
}
