use crate::utils::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const WORKBOOK_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;\n,]+").expect("separator pattern is valid"));

/// Splits a user supplied file list.
///
/// Windows file pickers join with `;`; commas and newlines are accepted too.
/// Surrounding double quotes are stripped from each entry.
pub fn parse_file_list(text: &str) -> Vec<PathBuf> {
    LIST_SEPARATOR
        .split(text)
        .map(|part| part.trim().trim_matches('"').trim())
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Lists regular files in `dir` whose name looks like `*.xls*`.
pub fn scan_input_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase().starts_with("xls"))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    tracing::debug!("Found {} candidate workbooks in {}", files.len(), dir.display());
    Ok(sort_by_file_name(files))
}

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Keeps existing `.xls`/`.xlsx` files, ordered by lower-cased file name.
pub fn filter_workbooks(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let kept = paths
        .into_iter()
        .filter(|path| {
            let keep = path.is_file() && is_workbook(path);
            if !keep {
                tracing::debug!("Ignoring {}", path.display());
            }
            keep
        })
        .collect();
    sort_by_file_name(kept)
}

fn sort_by_file_name(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    paths
}
