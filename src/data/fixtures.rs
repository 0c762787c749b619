//! Spreadsheet fixtures shared by the tests.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use super::model::DatasetKind;

/// An in-memory xlsx with a four-column X/Y/Z/grade header and `n` data rows
/// laid out on a diagonal.
pub fn grade_xlsx(columns: [&str; 4], n: usize) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for i in 0..n {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, 500_000.0 + i as f64).unwrap();
        sheet.write_number(row, 1, 9_000_000.0 - i as f64).unwrap();
        sheet.write_number(row, 2, -(i as f64) * 2.5).unwrap();
        sheet.write_number(row, 3, 0.01 * i as f64).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// Kriging layout: `X`, `Y`, `Z`, `Au`.
pub fn kriging_xlsx(n: usize) -> Vec<u8> {
    grade_xlsx(["X", "Y", "Z", "Au"], n)
}

/// An in-memory xlsx with the given header and no data rows.
pub fn header_only_xlsx(columns: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// Write all six dashboard files into `dir`; `grade_rows` rows in each of
/// the preprocessed and kriging files.
pub fn write_data_dir(dir: &Path, grade_rows: usize) {
    for kind in DatasetKind::ALL {
        let bytes = match kind {
            DatasetKind::Collar => grade_xlsx(["HOLEID", "EAST", "NORTH", "RL"], 4),
            DatasetKind::Sample => grade_xlsx(["FROM", "TO", "LENGTH", "AU"], 12),
            DatasetKind::Survey => grade_xlsx(["DEPTH", "AZIMUTH", "DIP", "HOLEID"], 8),
            DatasetKind::Preprocessed => {
                grade_xlsx(["X_sample", "Y_sample", "Z_sample", "Au_composite"], grade_rows)
            }
            DatasetKind::KrigingBefore | DatasetKind::KrigingAfter => kriging_xlsx(grade_rows),
        };
        std::fs::write(kind.path_in(dir), bytes).unwrap();
    }
}
