//! Page models: the data each page needs for one render cycle.
//!
//! Building a page is the only place files are read. Drawing code in `ui`
//! works from these structures and never touches the store.

use std::sync::Arc;

use rand::Rng;

use crate::color::GradeScale;
use crate::config::DashboardConfig;
use crate::data::error::Result;
use crate::data::model::{DatasetGroup, DatasetKind, Table};
use crate::data::points::{GradePoints, PointColumns};
use crate::data::sample::subsample_indices;
use crate::data::store::{DataStore, SheetSource};
use crate::nav::Page;

// ---------------------------------------------------------------------------
// Dataset page
// ---------------------------------------------------------------------------

pub struct DatasetPage {
    /// Collar, sample and survey, in tab order.
    pub raw: Vec<(DatasetKind, Arc<Table>)>,
    pub preprocessed: Arc<Table>,
    /// Kriging before and after optimisation, in tab order.
    pub kriging: Vec<(DatasetKind, Arc<Table>)>,
    /// Row limit per grid; `None` shows everything.
    pub preview_rows: Option<usize>,
}

// ---------------------------------------------------------------------------
// Map page
// ---------------------------------------------------------------------------

/// One dataset prepared for a 2D and a 3D scatter.
pub struct MapLayer {
    pub title_2d: String,
    pub title_3d: String,
    pub columns: PointColumns,
    /// Usable points before sampling.
    pub total: usize,
    /// The two plots are sampled independently of each other.
    pub plot_2d: GradePoints,
    pub plot_3d: GradePoints,
    /// Colour range over all usable points, shared by both plots.
    pub scale: GradeScale,
}

impl MapLayer {
    pub fn build<R: Rng + ?Sized>(
        table: &Table,
        columns: PointColumns,
        title_2d: String,
        title_3d: String,
        cap: Option<usize>,
        rng: &mut R,
    ) -> Result<Self> {
        let points = GradePoints::from_table(table, columns)?;
        if points.is_empty() {
            log::warn!("{} has no plottable rows", table.name);
        }
        let (min, max) = points.grade_range().unwrap_or((0.0, 1.0));

        let plot_2d = points.select(&subsample_indices(points.len(), cap, rng));
        let plot_3d = points.select(&subsample_indices(points.len(), cap, rng));

        Ok(MapLayer {
            title_2d,
            title_3d,
            columns,
            total: points.len(),
            plot_2d,
            plot_3d,
            scale: GradeScale::new(min, max),
        })
    }
}

pub struct MapPage {
    pub preprocessed: MapLayer,
    pub before: MapLayer,
    pub after: MapLayer,
    pub sample_cap: Option<usize>,
}

// ---------------------------------------------------------------------------
// Page dispatch
// ---------------------------------------------------------------------------

pub enum PageView {
    Dataset(DatasetPage),
    Map(MapPage),
    /// Constants only, nothing to load.
    Reserve,
}

/// Load everything `page` shows.
pub fn build_page<S: SheetSource, R: Rng + ?Sized>(
    page: Page,
    store: &mut DataStore<S>,
    config: &DashboardConfig,
    rng: &mut R,
) -> Result<PageView> {
    match page {
        Page::Dataset => build_dataset_page(store, config).map(PageView::Dataset),
        Page::MapView => build_map_page(store, config, rng).map(PageView::Map),
        Page::ReserveEstimate => Ok(PageView::Reserve),
    }
}

/// Every dataset of `group`, in declaration order.
fn load_group<S: SheetSource>(
    store: &mut DataStore<S>,
    group: DatasetGroup,
) -> Result<Vec<(DatasetKind, Arc<Table>)>> {
    DatasetKind::ALL
        .into_iter()
        .filter(|kind| kind.group() == group)
        .map(|kind| -> Result<_> { Ok((kind, store.load(kind)?)) })
        .collect()
}

/// Files load in page order, so the first missing one is the one reported.
fn build_dataset_page<S: SheetSource>(
    store: &mut DataStore<S>,
    config: &DashboardConfig,
) -> Result<DatasetPage> {
    let raw = load_group(store, DatasetGroup::RawInput)?;
    let preprocessed = store.load(DatasetKind::Preprocessed)?;
    let kriging = load_group(store, DatasetGroup::Kriging)?;

    Ok(DatasetPage {
        raw,
        preprocessed,
        kriging,
        preview_rows: config.preview_rows,
    })
}

fn build_map_page<S: SheetSource, R: Rng + ?Sized>(
    store: &mut DataStore<S>,
    config: &DashboardConfig,
    rng: &mut R,
) -> Result<MapPage> {
    let cap = config.map_sample_cap;

    let pre = store.load(DatasetKind::Preprocessed)?;
    let grade = PointColumns::PREPROCESSED.grade;
    let preprocessed = MapLayer::build(
        &pre,
        PointColumns::PREPROCESSED,
        format!("Peta 2D {grade}"),
        format!("Peta 3D {grade}"),
        cap,
        rng,
    )?;

    let mut kriging_layer = |kind: DatasetKind| -> Result<MapLayer> {
        let table = store.load(kind)?;
        MapLayer::build(
            &table,
            PointColumns::KRIGING,
            format!("Peta 2D {}", kind.label()),
            format!("Peta 3D {}", kind.label()),
            cap,
            rng,
        )
    };
    let before = kriging_layer(DatasetKind::KrigingBefore)?;
    let after = kriging_layer(DatasetKind::KrigingAfter)?;

    Ok(MapPage {
        preprocessed,
        before,
        after,
        sample_cap: cap,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::error::DataError;
    use crate::data::fixtures::{header_only_xlsx, write_data_dir};
    use crate::data::store::LoadMode;

    fn setup(grade_rows: usize) -> (tempfile::TempDir, DashboardConfig) {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_data_dir(tmp.path(), grade_rows);
        let config = DashboardConfig {
            data_dir: tmp.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        (tmp, config)
    }

    #[test]
    fn test_dataset_page_loads_all_six() {
        let (_tmp, config) = setup(20);
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let view = build_page(Page::Dataset, &mut store, &config, &mut rng).unwrap();
        let PageView::Dataset(page) = view else {
            panic!("expected dataset page");
        };
        let raw: Vec<DatasetKind> = page.raw.iter().map(|(k, _)| *k).collect();
        assert_eq!(raw, [DatasetKind::Collar, DatasetKind::Sample, DatasetKind::Survey]);
        assert_eq!(page.raw[1].1.len(), 12);
        assert_eq!(page.preprocessed.len(), 20);
        assert_eq!(page.kriging.len(), 2);
        assert_eq!(page.preview_rows, Some(1000));
        assert_eq!(store.cached_len(), 6);
    }

    #[test]
    fn test_map_page_caps_each_plot() {
        let (_tmp, config) = setup(5200);
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let PageView::Map(page) = build_page(Page::MapView, &mut store, &config, &mut rng).unwrap()
        else {
            panic!("expected map page");
        };
        for layer in [&page.preprocessed, &page.before, &page.after] {
            assert_eq!(layer.total, 5200);
            assert_eq!(layer.plot_2d.len(), 5000);
            assert_eq!(layer.plot_3d.len(), 5000);
        }
        assert_eq!(page.preprocessed.title_2d, "Peta 2D Au_composite");
        assert_eq!(page.after.title_3d, "Peta 3D Sesudah Optimasi");
        assert_eq!(page.before.scale.min, 0.0);
    }

    #[test]
    fn test_map_page_small_or_uncapped_is_full() {
        let (_tmp, mut config) = setup(40);
        let mut store = DataStore::new(&config.data_dir, LoadMode::Fresh);
        let mut rng = StdRng::seed_from_u64(3);

        let PageView::Map(page) = build_page(Page::MapView, &mut store, &config, &mut rng).unwrap()
        else {
            panic!("expected map page");
        };
        assert_eq!(page.before.plot_2d.len(), 40);
        assert_eq!(page.before.plot_2d.x[0], 500_000.0);

        config.map_sample_cap = None;
        let PageView::Map(page) = build_page(Page::MapView, &mut store, &config, &mut rng).unwrap()
        else {
            panic!("expected map page");
        };
        assert_eq!(page.sample_cap, None);
        assert_eq!(page.after.plot_3d.len(), 40);
    }

    #[test]
    fn test_reserve_page_needs_no_files() {
        let config = DashboardConfig {
            data_dir: "no-such-dir".into(),
            ..DashboardConfig::default()
        };
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let view = build_page(Page::ReserveEstimate, &mut store, &config, &mut rng).unwrap();
        assert!(matches!(view, PageView::Reserve));
    }

    #[test]
    fn test_dataset_page_reports_first_missing_in_page_order() {
        let (tmp, config) = setup(10);
        std::fs::remove_file(DatasetKind::Preprocessed.path_in(tmp.path())).unwrap();
        std::fs::remove_file(DatasetKind::KrigingBefore.path_in(tmp.path())).unwrap();
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let err = build_page(Page::Dataset, &mut store, &config, &mut rng)
            .err()
            .expect("page should fail");
        match err {
            DataError::FileAccess { path, .. } => {
                assert_eq!(path, DatasetKind::Preprocessed.path_in(tmp.path()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_kriging_file_gives_empty_layer() {
        let (tmp, config) = setup(10);
        std::fs::write(
            DatasetKind::KrigingAfter.path_in(tmp.path()),
            header_only_xlsx(&["X", "Y", "Z", "Au"]),
        )
        .unwrap();
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let PageView::Map(page) = build_page(Page::MapView, &mut store, &config, &mut rng).unwrap()
        else {
            panic!("expected map page");
        };
        assert_eq!(page.after.total, 0);
        assert!(page.after.plot_2d.is_empty());
        assert!(page.after.plot_3d.is_empty());
        assert_eq!((page.after.scale.min, page.after.scale.max), (0.0, 1.0));
        assert_eq!(page.before.total, 10);
    }

    #[test]
    fn test_missing_file_aborts_page() {
        let (tmp, config) = setup(10);
        std::fs::remove_file(DatasetKind::KrigingAfter.path_in(tmp.path())).unwrap();
        let mut store = DataStore::new(&config.data_dir, LoadMode::Cached);
        let mut rng = StdRng::seed_from_u64(3);

        let err = build_page(Page::MapView, &mut store, &config, &mut rng)
            .err()
            .expect("page should fail");
        assert!(matches!(err, DataError::FileAccess { .. }));
    }
}
