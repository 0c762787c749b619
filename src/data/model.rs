use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the types a spreadsheet reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one loaded spreadsheet
// ---------------------------------------------------------------------------

/// A read-only tabular dataset: header names plus rows in file order.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Dataset name used in diagnostics.
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows, or the whole table when `n` is `None`.
    pub fn head(&self, n: Option<usize>) -> &[Vec<CellValue>] {
        match n {
            Some(n) => &self.rows[..n.min(self.rows.len())],
            None => &self.rows,
        }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DataError::lookup(&self.name, column))
    }

    /// All values of a column as numbers; non-numeric cells become `None`.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| row[idx].as_f64()).collect())
    }

    /// Fail with a lookup error naming the first absent column.
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        for col in required {
            self.column_index(col)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DatasetKind – the six fixed input files
// ---------------------------------------------------------------------------

/// Which section of the dataset page a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetGroup {
    RawInput,
    Preprocessed,
    Kriging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Collar,
    Sample,
    Survey,
    Preprocessed,
    KrigingBefore,
    KrigingAfter,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Collar,
        DatasetKind::Sample,
        DatasetKind::Survey,
        DatasetKind::Preprocessed,
        DatasetKind::KrigingBefore,
        DatasetKind::KrigingAfter,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::Collar => "collar_common.xlsx",
            DatasetKind::Sample => "sample_common.xlsx",
            DatasetKind::Survey => "survey_common.xlsx",
            DatasetKind::Preprocessed => "fix_data.xlsx",
            DatasetKind::KrigingBefore => "data_kriging.xlsx",
            DatasetKind::KrigingAfter => "data_kriging_optimasi.xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Collar => "Dataset Collar",
            DatasetKind::Sample => "Dataset Sample",
            DatasetKind::Survey => "Dataset Survey",
            DatasetKind::Preprocessed => "Dataset Setelah Preprocessing",
            DatasetKind::KrigingBefore => "Sebelum Optimasi",
            DatasetKind::KrigingAfter => "Sesudah Optimasi",
        }
    }

    pub fn group(self) -> DatasetGroup {
        match self {
            DatasetKind::Collar | DatasetKind::Sample | DatasetKind::Survey => {
                DatasetGroup::RawInput
            }
            DatasetKind::Preprocessed => DatasetGroup::Preprocessed,
            DatasetKind::KrigingBefore | DatasetKind::KrigingAfter => DatasetGroup::Kriging,
        }
    }

    /// Columns checked right after loading. Raw drillhole files carry no
    /// declared schema and are displayed verbatim.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Preprocessed => &["X_sample", "Y_sample", "Z_sample", "Au_composite"],
            DatasetKind::KrigingBefore | DatasetKind::KrigingAfter => &["X", "Y", "Z", "Au"],
            _ => &[],
        }
    }

    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}
