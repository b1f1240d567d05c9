#![allow(dead_code)]

use fcm_excel2json::core::normalize::REQUIRED_COLUMNS;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

#[derive(Debug, Clone)]
pub enum FixtureCell {
    Text(String),
    Number(f64),
    Empty,
}

pub fn text(value: &str) -> FixtureCell {
    FixtureCell::Text(value.to_string())
}

pub fn number(value: f64) -> FixtureCell {
    FixtureCell::Number(value)
}

fn column_letter(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn sheet_xml(rows: &[Vec<FixtureCell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letter(c), r + 1);
            match cell {
                FixtureCell::Text(value) => xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    escape(value)
                )),
                FixtureCell::Number(value) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value))
                }
                FixtureCell::Empty => {}
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Writes a minimal single-sheet `.xlsx` workbook.
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[Vec<FixtureCell>]) {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;
    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape(sheet_name)
    );
    let workbook_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", content_types.to_string()),
        ("_rels/.rels", root_rels.to_string()),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in parts {
        zip.start_file::<_, ()>(
            name,
            FileOptions::default().compression_method(CompressionMethod::Stored),
        )
        .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Header with every required column plus one extra column at the end.
pub fn fcm_header() -> Vec<FixtureCell> {
    let mut header: Vec<FixtureCell> = REQUIRED_COLUMNS.iter().map(|c| text(c)).collect();
    header.push(text("Note"));
    header
}

/// One player row matching `fcm_header`.
pub fn fcm_player(name: &str, team: &str, fmld: &str, presences: f64) -> Vec<FixtureCell> {
    fcm_header()
        .iter()
        .map(|column| match column {
            FixtureCell::Text(column) => match column.as_str() {
                "Nome" => text(&format!(" {} ", name)),
                "Sq" => text(team),
                "R" => text("A"),
                "COD" => number(2764.0),
                "ID" => number(1001.0),
                "FMld" => text(fmld),
                "Aff%" => text("85%"),
                "MVC" => text("-"),
                "P" => number(presences),
                "GF" => text("12"),
                "Note" => text("titolare"),
                "TIn" => FixtureCell::Empty,
                _ => number(1.0),
            },
            _ => FixtureCell::Empty,
        })
        .collect()
}

pub fn write_fcm_workbook(path: &Path, players: &[(&str, &str, &str, f64)]) {
    let mut rows = vec![fcm_header()];
    for (name, team, fmld, presences) in players {
        rows.push(fcm_player(name, team, fmld, *presences));
    }
    write_workbook(path, "Tutti i dati", &rows);
}
