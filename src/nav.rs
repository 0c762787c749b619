use std::fmt;

// ---------------------------------------------------------------------------
// Pages and sidebar routing
// ---------------------------------------------------------------------------

/// The three pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dataset,
    MapView,
    ReserveEstimate,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 3] = [Page::Dataset, Page::MapView, Page::ReserveEstimate];

    pub fn button_label(self) -> &'static str {
        match self {
            Page::Dataset => "DATASET",
            Page::MapView => "PETA KRIGING",
            Page::ReserveEstimate => "ESTIMASI CADANGAN",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dataset => "📊 DATASET",
            Page::MapView => "🗺 PETA HASIL KRIGING",
            Page::ReserveEstimate => "⛏ ESTIMASI CADANGAN EMAS",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_label())
    }
}

/// Active page for one render cycle: the pressed button's page, or the
/// dataset page when nothing was pressed.
pub fn resolve(pressed: Option<Page>) -> Page {
    pressed.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_press_defaults_to_dataset() {
        assert_eq!(resolve(None), Page::Dataset);
    }

    #[test]
    fn test_press_selects_target_page() {
        for page in Page::ALL {
            assert_eq!(resolve(Some(page)), page);
        }
    }

    #[test]
    fn test_sidebar_labels() {
        let labels: Vec<&str> = Page::ALL.iter().map(|p| p.button_label()).collect();
        assert_eq!(labels, ["DATASET", "PETA KRIGING", "ESTIMASI CADANGAN"]);
    }
}
