use std::collections::HashMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DashboardConfig;
use crate::data::model::DatasetKind;
use crate::data::store::DataStore;
use crate::nav::{self, Page};
use crate::pages::{build_page, PageView};
use crate::reserve::Scenario;
use crate::ui::orbit::OrbitCamera;

// ---------------------------------------------------------------------------
// Tab selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapDim {
    #[default]
    Flat,
    Solid,
}

impl MapDim {
    pub const ALL: [MapDim; 2] = [MapDim::Flat, MapDim::Solid];

    pub fn label(self) -> &'static str {
        match self {
            MapDim::Flat => "Peta 2D",
            MapDim::Solid => "Peta 3D",
        }
    }
}

/// Which tab is open in every tab strip. Survives navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub raw_table: DatasetKind,
    pub kriging_table: Scenario,
    pub preprocessed_map: MapDim,
    pub kriging_map: Scenario,
    pub before_map: MapDim,
    pub after_map: MapDim,
    pub reserve_table: Scenario,
}

impl Default for TabState {
    fn default() -> Self {
        Self {
            raw_table: DatasetKind::Collar,
            kriging_table: Scenario::Before,
            preprocessed_map: MapDim::Flat,
            kriging_map: Scenario::Before,
            before_map: MapDim::Flat,
            after_map: MapDim::Flat,
            reserve_table: Scenario::Before,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// A render cycle starts at launch and at every sidebar press: the active
/// page is resolved and its data loaded. Repaints in between reuse both.
pub struct AppState {
    pub config: DashboardConfig,
    pub store: DataStore,
    rng: StdRng,

    /// Page chosen by the last render cycle.
    pub active_page: Page,

    /// Loaded content of the active page; `None` when loading failed.
    pub view: Option<PageView>,

    /// Diagnostic for a page that could not be built.
    pub page_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub tabs: TabState,

    /// Orbit of each 3D plot, keyed by plot id.
    pub cameras: HashMap<String, OrbitCamera>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = Self {
            store: DataStore::new(config.data_dir.clone(), config.load_mode),
            config,
            rng,
            active_page: Page::default(),
            view: None,
            page_error: None,
            status_message: None,
            tabs: TabState::default(),
            cameras: HashMap::new(),
        };
        state.start_cycle(None);
        state
    }

    /// Run one navigation cycle: resolve the page and load what it shows.
    pub fn start_cycle(&mut self, pressed: Option<Page>) {
        let page = nav::resolve(pressed);
        log::info!("Navigating to {page}");
        self.active_page = page;

        match build_page(page, &mut self.store, &self.config, &mut self.rng) {
            Ok(view) => {
                self.view = Some(view);
                self.page_error = None;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to render {page}: {e}");
                self.view = None;
                self.page_error = Some(e.to_string());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop cached tables and rebuild the current page from disk.
    pub fn reload(&mut self) {
        self.store.clear();
        self.start_cycle(Some(self.active_page));
    }

    /// Switch to another data folder and rebuild the current page.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        log::info!("Data folder set to {}", dir.display());
        self.store.set_data_dir(dir.clone());
        self.config.data_dir = dir;
        self.start_cycle(Some(self.active_page));
    }
}
