use crate::domain::model::{Cell, Player, SheetTable};
use serde_json::{Number, Value};

/// Columns every FCM "Tutti i dati" export must carry.
pub const REQUIRED_COLUMNS: [&str; 34] = [
    "Nome", "Sq", "R", "COD", "FMld", "T", "P", "Aff%", "MVC", "MVF", "MVT", "MVDSt", "MVDlt",
    "MVAnd", "MVRnd", "FMC", "FMF", "FMT", "FMDSt", "FMDlt", "FMAnd", "FMRnd", "GF", "GFR", "GS",
    "GSR", "AG", "AS", "RP", "RS", "A", "E", "TIn", "ID",
];

pub const STRING_COLUMNS: [&str; 5] = ["Nome", "Sq", "R", "COD", "ID"];

pub const FLOAT_COLUMNS: [&str; 16] = [
    "FMld", "Aff%", "MVC", "MVF", "MVT", "MVDSt", "MVDlt", "MVAnd", "MVRnd", "FMC", "FMF", "FMT",
    "FMDSt", "FMDlt", "FMAnd", "FMRnd",
];

pub const INT_COLUMNS: [&str; 13] = [
    "T", "P", "GF", "GFR", "GS", "GSR", "AG", "AS", "RP", "RS", "A", "E", "TIn",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
    Integer,
    Passthrough,
}

pub fn column_kind(name: &str) -> ColumnKind {
    if STRING_COLUMNS.contains(&name) {
        ColumnKind::Text
    } else if FLOAT_COLUMNS.contains(&name) {
        ColumnKind::Float
    } else if INT_COLUMNS.contains(&name) {
        ColumnKind::Integer
    } else {
        ColumnKind::Passthrough
    }
}

/// Required columns absent from `columns`, in required order.
pub fn missing_columns(columns: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c == *required))
        .map(|required| required.to_string())
        .collect()
}

/// Textual form of a cell; `None` only for empty cells.
///
/// Whole floats print without a fraction so numeric IDs read back as `"123"`.
pub fn cell_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(value) => Some(value.clone()),
        Cell::Int(value) => Some(value.to_string()),
        Cell::Float(value) => Some(format_float(*value)),
        Cell::Bool(value) => Some(value.to_string()),
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15
}

fn format_float(value: f64) -> String {
    if is_whole(value) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn float_number(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

// Halves go to the even hundredth, so 6.125 becomes 6.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Cell as-is, for RAW mode and columns outside the FCM set.
///
/// Workbooks store every number as a float; whole ones are written as integers.
pub fn raw_value(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Bool(value) => Value::Bool(*value),
        Cell::Int(value) => Value::from(*value),
        Cell::Float(value) if is_whole(*value) => Value::from(*value as i64),
        Cell::Float(value) => float_number(*value),
        Cell::Text(value) => Value::String(value.clone()),
    }
}

fn text_value(cell: &Cell) -> Value {
    Value::String(
        cell_text(cell)
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
    )
}

// FCM writes decimals with a comma, percentages with '%' and missing
// values as a dash. Dashes are stripped wherever they appear.
fn float_value(cell: &Cell) -> Value {
    let Some(text) = cell_text(cell) else {
        return Value::Null;
    };
    let cleaned = text
        .trim()
        .replace('%', "")
        .replace(',', ".")
        .replace(['–', '-'], "");

    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => float_number(round2(value)),
        _ => Value::Null,
    }
}

fn int_value(cell: &Cell) -> Value {
    let coerced = match cell {
        Cell::Int(value) => Some(*value),
        Cell::Float(value) if value.is_finite() => Some(value.trunc() as i64),
        Cell::Bool(value) => Some(i64::from(*value)),
        Cell::Text(value) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .map(|parsed| parsed.trunc() as i64),
        Cell::Float(_) | Cell::Empty => None,
    };
    Value::from(coerced.unwrap_or(0))
}

pub fn normalize_cell(kind: ColumnKind, cell: &Cell) -> Value {
    match kind {
        ColumnKind::Text => text_value(cell),
        ColumnKind::Float => float_value(cell),
        ColumnKind::Integer => int_value(cell),
        ColumnKind::Passthrough => raw_value(cell),
    }
}

/// Builds one JSON object per sheet row, keyed in column order.
pub fn to_players(table: &SheetTable, raw_mode: bool) -> Vec<Player> {
    let kinds: Vec<ColumnKind> = table
        .columns
        .iter()
        .map(|name| {
            if raw_mode {
                ColumnKind::Passthrough
            } else {
                column_kind(name)
            }
        })
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(&kinds)
                .zip(row)
                .map(|((name, kind), cell)| (name.clone(), normalize_cell(*kind, cell)))
                .collect()
        })
        .collect()
}
