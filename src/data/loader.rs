use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};

use super::error::{DataError, Result};
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse the raw bytes of a tabular file into a [`Table`].  Dispatch by
/// extension of `path`, which is otherwise only used for naming.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv` – header row followed by records
pub fn parse_table(path: &Path, bytes: Vec<u8>) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => parse_workbook(path, bytes),
        "csv" => parse_csv(path, &bytes),
        other => Err(DataError::format(
            path,
            format!("unsupported file extension: .{other}"),
        )),
    }
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn parse_workbook(path: &Path, bytes: Vec<u8>) -> Result<Table> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| DataError::format(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::format(path, "workbook has no worksheets"))?
        .map_err(|e| DataError::format(path, e))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DataError::format(path, "first worksheet is empty"))?;

    let columns = dedupe_headers(
        header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => header_name(i, ""),
                other => header_name(i, &other.to_string()),
            })
            .collect(),
    );

    let width = columns.len();
    let body: Vec<Vec<CellValue>> = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(cell_value).collect();
            cells.resize(width, CellValue::Null);
            cells
        })
        .filter(|cells| cells.iter().any(|c| *c != CellValue::Null))
        .collect();

    Ok(Table::new(table_name(path), columns, body))
}

fn header_name(index: usize, raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        format!("Unnamed: {index}")
    } else {
        name.to_string()
    }
}

/// Repeated names get a `.1`, `.2`, ... suffix so every column stays
/// addressable by name. A suffix already taken by a later header is skipped.
fn dedupe_headers(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut n = 1;
        let mut candidate = format!("{name}.{n}");
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => CellValue::Text(dt.to_string()),
            None => CellValue::Text(cell.to_string()),
        },
        // Durations and cell errors keep the reader's own rendering.
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn parse_csv(path: &Path, bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let columns = dedupe_headers(
        reader
            .headers()
            .map_err(|e| DataError::format(path, e))?
            .iter()
            .enumerate()
            .map(|(i, h)| header_name(i, h))
            .collect(),
    );

    if columns.is_empty() {
        return Err(DataError::format(path, "missing header row"));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DataError::format(path, format!("row {row_no}: {e}")))?;
        if record.len() > columns.len() {
            return Err(DataError::format(
                path,
                format!(
                    "row {row_no}: {} fields but the header has {}",
                    record.len(),
                    columns.len()
                ),
            ));
        }
        let mut cells: Vec<CellValue> = record.iter().map(guess_cell_type).collect();
        cells.resize(columns.len(), CellValue::Null);
        rows.push(cells);
    }

    Ok(Table::new(table_name(path), columns, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    match s {
        "true" | "TRUE" | "True" => CellValue::Bool(true),
        "false" | "FALSE" | "False" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::kriging_xlsx;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    #[test]
    fn test_xlsx_rows_and_header_in_file_order() {
        let table = parse_table(Path::new("data/data_kriging.xlsx"), kriging_xlsx(25)).unwrap();
        assert_eq!(table.name, "data_kriging.xlsx");
        assert_eq!(table.columns, ["X", "Y", "Z", "Au"]);
        assert_eq!(table.len(), 25);
        assert_eq!(table.rows[0][0], CellValue::Float(500_000.0));
        assert_eq!(table.rows[24][0], CellValue::Float(500_024.0));
        assert_eq!(table.rows[3][3].as_f64(), Some(0.01 * 3.0));
    }

    #[test]
    fn test_xlsx_mixed_cells_and_blank_header() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "HOLEID").unwrap();
        sheet.write_string(0, 2, "DEPTH").unwrap();
        sheet.write_string(1, 0, "DH-001").unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        sheet.write_number(1, 2, 120.5).unwrap();
        sheet.write_string(2, 0, "DH-002").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_table(Path::new("collar_common.xlsx"), bytes).unwrap();
        assert_eq!(table.columns, ["HOLEID", "Unnamed: 1", "DEPTH"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::Text("DH-001".into()),
                CellValue::Bool(true),
                CellValue::Float(120.5)
            ]
        );
        assert_eq!(table.rows[1][1], CellValue::Null);
        assert_eq!(table.rows[1][2], CellValue::Null);
    }

    #[test]
    fn test_text_with_xlsx_extension_is_format_error() {
        let err = parse_table(
            Path::new("fix_data.xlsx"),
            b"X_sample,Y_sample\n1,2\n".to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Format { .. }), "got {err}");
    }

    #[test]
    fn test_unknown_extension_is_format_error() {
        let err = parse_table(Path::new("notes.txt"), b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, DataError::Format { .. }));
    }

    #[test]
    fn test_csv_types_are_inferred() {
        let csv = "HOLEID,FROM,AU,FLAG\nDH-1,0,0.35,true\nDH-2,1.5,,false\n";
        let table = parse_table(Path::new("sample_common.csv"), csv.as_bytes().to_vec()).unwrap();
        assert_eq!(table.columns, ["HOLEID", "FROM", "AU", "FLAG"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1], CellValue::Integer(0));
        assert_eq!(table.rows[1][1], CellValue::Float(1.5));
        assert_eq!(table.rows[1][2], CellValue::Null);
        assert_eq!(table.rows[1][3], CellValue::Bool(false));
    }

    #[test]
    fn test_xlsx_dates_display_as_timestamps() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "HOLEID").unwrap();
        sheet.write_string(0, 1, "DATE_DRILLED").unwrap();
        sheet.write_string(1, 0, "DH-001").unwrap();
        let date = ExcelDateTime::from_ymd(2023, 7, 15).unwrap();
        let fmt = Format::new().set_num_format("yyyy-mm-dd");
        sheet.write_datetime_with_format(1, 1, &date, &fmt).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_table(Path::new("collar_common.xlsx"), bytes).unwrap();
        assert_eq!(table.rows[0][1], CellValue::Text("2023-07-15 00:00:00".into()));
        assert_eq!(table.rows[0][1].to_string(), "2023-07-15 00:00:00");
    }

    #[test]
    fn test_duplicate_headers_get_numbered() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["HOLEID", "AU", "AU", "AU"].iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
            sheet.write_number(1, col as u16, col as f64).unwrap();
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_table(Path::new("sample_common.xlsx"), bytes).unwrap();
        assert_eq!(table.columns, ["HOLEID", "AU", "AU.1", "AU.2"]);
        assert_eq!(table.numeric_column("AU.1").unwrap(), [Some(2.0)]);
    }

    #[test]
    fn test_duplicate_csv_header_skips_taken_suffix() {
        let csv = "AU,AU,AU.1\n1,2,3\n";
        let table = parse_table(Path::new("sample_common.csv"), csv.as_bytes().to_vec()).unwrap();
        assert_eq!(table.columns, ["AU", "AU.2", "AU.1"]);
        assert_eq!(table.rows[0][1], CellValue::Integer(2));
    }

    #[test]
    fn test_csv_record_wider_than_header_is_format_error() {
        let err = parse_table(Path::new("survey_common.csv"), b"X,Y\n1,2,3\n".to_vec())
            .unwrap_err();
        match err {
            DataError::Format { reason, .. } => assert!(reason.contains("3 fields"), "{reason}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_short_record_is_padded() {
        let table =
            parse_table(Path::new("survey_common.csv"), b"X,Y,Z\n1,2\n".to_vec()).unwrap();
        assert_eq!(table.rows[0][2], CellValue::Null);
    }
}
