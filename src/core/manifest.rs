use crate::domain::model::{SeasonEntry, SeasonManifest, SCHEMA_VERSION};
use std::collections::BTreeMap;

pub const MANIFEST_FILE_NAME: &str = "seasons.json";

/// One entry per season key, the last occurrence winning, sorted by key.
pub fn build_manifest(entries: impl IntoIterator<Item = SeasonEntry>) -> SeasonManifest {
    let by_key: BTreeMap<String, SeasonEntry> = entries
        .into_iter()
        .map(|entry| (entry.key.clone(), entry))
        .collect();

    SeasonManifest {
        schema_version: SCHEMA_VERSION,
        seasons: by_key.into_values().collect(),
    }
}

/// Folds this run's entries over a previously written manifest.
pub fn merge_manifest(existing: SeasonManifest, entries: Vec<SeasonEntry>) -> SeasonManifest {
    build_manifest(existing.seasons.into_iter().chain(entries))
}
