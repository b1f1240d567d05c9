use crate::core::normalize::cell_text;
use crate::domain::model::{Cell, SheetTable};
use crate::domain::ports::WorkbookReader;
use crate::utils::error::{ConvertError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const DEFAULT_SHEET_NAME: &str = "Tutti i dati";

/// `.xlsx` and legacy `.xls` reader backed by calamine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookReader for CalamineReader {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<SheetTable> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ConvertError::SheetReadError {
            sheet: sheet.to_string(),
            message: e.to_string(),
        })?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.iter().any(|name| name == sheet) {
            return Err(ConvertError::SheetReadError {
                sheet: sheet.to_string(),
                message: format!("sheet not found (available: {})", sheet_names.join(", ")),
            });
        }

        let range = workbook.worksheet_range(sheet)?;
        tracing::debug!(
            "Sheet '{}' of {} spans {:?}",
            sheet,
            path.display(),
            range.get_size()
        );

        let rows = range
            .rows()
            .map(|row| row.iter().map(to_cell).collect())
            .collect();
        Ok(build_table(rows))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(value) => Cell::Int(*value),
        Data::Float(value) => Cell::Float(*value),
        Data::String(value) => Cell::Text(value.clone()),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => Cell::Text(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Float(value.as_f64()),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => Cell::Text(value.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Turns raw sheet rows into a table, using the first row as header.
///
/// Blank headers become `Unnamed: <idx>` and repeated ones get `.1`, `.2`
/// suffixes so every column keeps a unique key. Fully empty rows are
/// dropped and short rows are padded.
pub fn build_table(mut rows: Vec<Vec<Cell>>) -> SheetTable {
    if rows.is_empty() {
        return SheetTable::default();
    }
    let header = rows.remove(0);

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            cell_text(cell)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Unnamed: {}", idx))
        })
        .collect();

    // A suffix must not collide with a header already present in the sheet.
    let headers: HashSet<&str> = names.iter().map(String::as_str).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let mut unique = name.clone();
        if used.contains(&unique) {
            let count = counts.entry(name.as_str()).or_insert(0);
            loop {
                *count += 1;
                unique = format!("{}.{}", name, count);
                if !used.contains(&unique) && !headers.contains(unique.as_str()) {
                    break;
                }
            }
        }
        used.insert(unique.clone());
        columns.push(unique);
    }

    let width = columns.len();
    let rows = rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| *cell != Cell::Empty))
        .map(|mut row| {
            row.resize(width, Cell::Empty);
            row
        })
        .collect();

    SheetTable { columns, rows }
}
