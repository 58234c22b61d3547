use std::fs;
use std::io::Write;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{BridgeError, Result};
use crate::models::{FileMetadata, StudentRecord};

use super::binding::{Access, FileBinding};

/// Name of the sheet written on save.
pub const SHEET_NAME: &str = "Students";
/// Header row, in column order.
pub const HEADERS: [&str; 4] = ["firstName", "lastName", "phone", "email"];

/// Read the first sheet of the bound file into roster records.
///
/// The first non-blank row is the header; columns are matched to fields by
/// header name so their order in the file does not matter. Missing cells
/// become empty strings. A row with nothing in any of the four roster columns
/// is skipped, even if other columns hold data, so that `load(save(records))`
/// returns what was saved.
pub fn load(binding: &FileBinding) -> Result<Vec<StudentRecord>> {
    let name = binding.name();
    let mut workbook =
        open_workbook_auto(binding.path()).map_err(|err| BridgeError::load(name, err))?;
    let Some(first_sheet) = workbook.sheet_names().first().cloned() else {
        return Err(BridgeError::load(name, "workbook has no sheets"));
    };
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|err| BridgeError::load(name, err))?;

    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|cell| !cell_text(cell).trim().is_empty()));

    let Some(header) = rows.next() else {
        debug!(sheet = %first_sheet, "sheet is empty");
        return Ok(Vec::new());
    };

    let columns = header_columns(header);
    if columns.iter().all(Option::is_none) {
        return Err(BridgeError::load(
            name,
            format!("sheet '{first_sheet}' has no {} columns", HEADERS.join("/")),
        ));
    }

    let records: Vec<StudentRecord> = rows
        .map(|row| {
            let field = |slot: usize| {
                columns[slot]
                    .and_then(|col| row.get(col))
                    .map(cell_text)
                    .unwrap_or_default()
            };
            StudentRecord {
                first_name: field(0),
                last_name: field(1),
                phone: field(2),
                email: field(3),
            }
        })
        .filter(|record| !is_blank(record))
        .collect();

    info!(count = records.len(), file = %name, "loaded roster");
    Ok(records)
}

/// Overwrite the bound file with `records`, refresh the binding's cached
/// metadata, and return a copy of it for the session store.
///
/// The workbook is written to a sibling temp file and renamed over the
/// original, so a failed save leaves the previous contents in place.
pub fn save(binding: &mut FileBinding, records: &[StudentRecord]) -> Result<FileMetadata> {
    let name = binding.name().to_owned();
    if binding.query_access() != Access::Granted {
        return Err(BridgeError::PermissionDenied { name });
    }

    let buffer = encode(records).map_err(|err| BridgeError::save(&name, err))?;

    let dir = binding
        .path()
        .parent()
        .ok_or_else(|| BridgeError::save(&name, "file has no parent directory"))?;
    let mut staged = NamedTempFile::new_in(dir).map_err(|err| BridgeError::from_write(&name, err))?;
    staged
        .write_all(&buffer)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|err| BridgeError::from_write(&name, err))?;

    let permissions = fs::metadata(binding.path())
        .map_err(|err| BridgeError::from_write(&name, err))?
        .permissions();
    fs::set_permissions(staged.path(), permissions)
        .map_err(|err| BridgeError::from_write(&name, err))?;
    staged
        .persist(binding.path())
        .map_err(|err| BridgeError::from_write(&name, err.error))?;

    let metadata = binding.refresh()?.clone();
    info!(count = records.len(), file = %name, "saved roster");
    Ok(metadata)
}

fn encode(records: &[StudentRecord]) -> std::result::Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        let values = [
            &record.first_name,
            &record.last_name,
            &record.phone,
            &record.email,
        ];
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row, col as u16, value.as_str())?;
        }
    }

    workbook.save_to_buffer()
}

fn is_blank(record: &StudentRecord) -> bool {
    [
        &record.first_name,
        &record.last_name,
        &record.phone,
        &record.email,
    ]
    .iter()
    .all(|value| value.trim().is_empty())
}

/// Position of each `HEADERS` entry within the header row, if present.
fn header_columns(header: &[Data]) -> [Option<usize>; 4] {
    let mut columns = [None; 4];
    for (col, cell) in header.iter().enumerate() {
        let text = cell_text(cell);
        if let Some(slot) = HEADERS.iter().position(|h| *h == text.trim()) {
            columns[slot].get_or_insert(col);
        }
    }
    columns
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        // Phone numbers typed into a spreadsheet usually arrive as floats.
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_sheet(path: &Path, sheet: &str, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    fn students() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("Ada", "Lovelace", "5551234567", "ada@example.com"),
            StudentRecord::new("Grace", "Hopper", "(555) 765-4321", "grace@navy.mil"),
        ]
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.xlsx");
        fs::write(&path, b"").unwrap();
        let mut binding = FileBinding::open(&path).unwrap();
        let before = binding.metadata().clone();

        let metadata = save(&mut binding, &students()).unwrap();
        assert_eq!(metadata.name, "roster.xlsx");
        assert_eq!(metadata.id, before.id);
        assert_eq!(&metadata, binding.metadata());
        assert_eq!(load(&binding).unwrap(), students());
    }

    #[test]
    fn saved_sheet_is_named_students_with_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.xlsx");
        fs::write(&path, b"").unwrap();
        let mut binding = FileBinding::open(&path).unwrap();
        save(&mut binding, &students()).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let header: Vec<String> = range.rows().next().unwrap().iter().map(cell_text).collect();
        assert_eq!(header, HEADERS);
    }

    #[test]
    fn load_matches_columns_by_header_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shuffled.xlsx");
        write_sheet(
            &path,
            "Sheet1",
            &[
                &["email", "phone", "lastName", "firstName", "notes"],
                &["ada@example.com", "5551234567", "Lovelace", "Ada", "first"],
                &["", "", "", "", ""],
                &["grace@navy.mil", "", "Hopper", "Grace", ""],
            ],
        );
        let binding = FileBinding::open(&path).unwrap();

        let loaded = load(&binding).unwrap();
        assert_eq!(
            loaded,
            vec![
                StudentRecord::new("Ada", "Lovelace", "5551234567", "ada@example.com"),
                StudentRecord::new("Grace", "Hopper", "", "grace@navy.mil"),
            ]
        );
    }

    #[test]
    fn rows_with_only_unmapped_cells_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.xlsx");
        write_sheet(
            &path,
            "Sheet1",
            &[
                &["firstName", "lastName", "phone", "email", "notes"],
                &["Ada", "Lovelace", "5551234567", "ada@example.com", ""],
                &["", "", "", "", "moved away"],
                &["  ", "", "", "", ""],
            ],
        );
        let mut binding = FileBinding::open(&path).unwrap();

        let loaded = load(&binding).unwrap();
        assert_eq!(
            loaded,
            vec![StudentRecord::new("Ada", "Lovelace", "5551234567", "ada@example.com")]
        );

        save(&mut binding, &loaded).unwrap();
        assert_eq!(load(&binding).unwrap(), loaded);
    }

    #[test]
    fn empty_sheet_loads_as_empty_roster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_sheet(&path, "Students", &[]);
        let binding = FileBinding::open(&path).unwrap();
        assert!(load(&binding).unwrap().is_empty());
    }

    #[test]
    fn unrelated_header_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.xlsx");
        write_sheet(&path, "Sheet1", &[&["sku", "qty"], &["A-1", "3"]]);
        let binding = FileBinding::open(&path).unwrap();
        assert!(matches!(load(&binding), Err(BridgeError::Load { .. })));
    }

    #[test]
    fn garbage_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"not a zip archive").unwrap();
        let binding = FileBinding::open(&path).unwrap();
        assert!(matches!(load(&binding), Err(BridgeError::Load { .. })));
    }

    #[test]
    fn save_refuses_read_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.xlsx");
        write_sheet(&path, "Students", &[&HEADERS]);
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();
        let mut binding = FileBinding::open(&path).unwrap();

        let err = save(&mut binding, &students()).unwrap_err();
        assert!(err.is_permission_error());
        assert!(load(&binding).unwrap().is_empty());
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(5551234567.0)), "5551234567");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
