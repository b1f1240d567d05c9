use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season {
    /// Display form, e.g. `2021/2022`.
    pub label: String,
    /// File and URL safe form, e.g. `2021_2022`.
    pub key: String,
}

/// A workbook selected for conversion, with the season taken from its name.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub season: Season,
}

impl SourceFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Raw workbook cell, independent of the reader backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

pub type Player = serde_json::Map<String, serde_json::Value>;

/// Contents of `<season_key>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDocument {
    pub schema_version: u32,
    pub season_label: String,
    pub season_key: String,
    pub generated_at: String,
    pub columns: Vec<String>,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonEntry {
    pub label: String,
    pub key: String,
    pub file: String,
    pub n_players: usize,
    pub last_updated: String,
}

/// Contents of `seasons.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonManifest {
    pub schema_version: u32,
    pub seasons: Vec<SeasonEntry>,
}

/// Where `seasons.json` was written and how many seasons it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedManifest {
    pub path: String,
    pub seasons: usize,
}

/// Per-run values shared by every file of a conversion.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub generated_at: String,
}

impl RunContext {
    pub fn now() -> Self {
        Self {
            generated_at: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub files_selected: usize,
    pub generated: Vec<SeasonEntry>,
    pub skipped: Vec<SkippedFile>,
    pub manifest_path: Option<String>,
}

impl RunReport {
    /// Files were selected but none produced JSON.
    pub fn produced_nothing(&self) -> bool {
        self.files_selected > 0 && self.generated.is_empty()
    }
}
