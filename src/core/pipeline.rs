use crate::core::manifest::{build_manifest, merge_manifest, MANIFEST_FILE_NAME};
use crate::core::normalize::{missing_columns, to_players};
use crate::core::workbook::CalamineReader;
use crate::core::{
    ConfigProvider, Pipeline, PublishedManifest, RunContext, SeasonDocument, SeasonEntry,
    SheetTable, SourceFile, Storage, WorkbookReader,
};
use crate::domain::model::{SeasonManifest, SCHEMA_VERSION};
use crate::utils::error::{ConvertError, Result};

/// Workbook → season JSON pipeline.
pub struct ConversionPipeline<S: Storage, C: ConfigProvider, R: WorkbookReader = CalamineReader> {
    storage: S,
    config: C,
    reader: R,
}

impl<S: Storage, C: ConfigProvider> ConversionPipeline<S, C, CalamineReader> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_reader(storage, config, CalamineReader::new())
    }
}

impl<S: Storage, C: ConfigProvider, R: WorkbookReader> ConversionPipeline<S, C, R> {
    pub fn with_reader(storage: S, config: C, reader: R) -> Self {
        Self {
            storage,
            config,
            reader,
        }
    }

    async fn read_existing_manifest(&self) -> Option<SeasonManifest> {
        if !self.storage.exists(MANIFEST_FILE_NAME) {
            return None;
        }

        let parsed = match self.storage.read_file(MANIFEST_FILE_NAME).await {
            Ok(bytes) => serde_json::from_slice::<SeasonManifest>(&bytes).map_err(ConvertError::from),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!("Ignoring unreadable {}: {}", MANIFEST_FILE_NAME, e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: WorkbookReader> Pipeline for ConversionPipeline<S, C, R> {
    async fn extract(&self, source: &SourceFile) -> Result<SheetTable> {
        tracing::debug!(
            "Reading sheet '{}' from {}",
            self.config.sheet_name(),
            source.path.display()
        );
        self.reader.read_sheet(&source.path, self.config.sheet_name())
    }

    async fn transform(
        &self,
        source: &SourceFile,
        table: SheetTable,
        ctx: &RunContext,
    ) -> Result<SeasonDocument> {
        let missing = missing_columns(&table.columns);
        if !missing.is_empty() {
            return Err(ConvertError::MissingColumnsError { columns: missing });
        }

        let raw_mode = self.config.raw_mode();
        tracing::debug!(
            "Converting {} rows x {} columns (raw: {})",
            table.rows.len(),
            table.columns.len(),
            raw_mode
        );
        let players = to_players(&table, raw_mode);

        Ok(SeasonDocument {
            schema_version: SCHEMA_VERSION,
            season_label: source.season.label.clone(),
            season_key: source.season.key.clone(),
            generated_at: ctx.generated_at.clone(),
            columns: table.columns,
            players,
        })
    }

    async fn load(&self, document: SeasonDocument) -> Result<SeasonEntry> {
        let file = format!("{}.json", document.season_key);
        let json = serde_json::to_vec_pretty(&document)?;

        tracing::debug!("Writing {} ({} bytes)", file, json.len());
        self.storage.write_file(&file, &json).await?;

        Ok(SeasonEntry {
            label: document.season_label,
            key: document.season_key,
            file,
            n_players: document.players.len(),
            last_updated: document.generated_at,
        })
    }

    async fn publish_manifest(&self, entries: Vec<SeasonEntry>) -> Result<PublishedManifest> {
        let existing = if self.config.merge_manifest() {
            self.read_existing_manifest().await
        } else {
            None
        };
        let manifest = match existing {
            Some(existing) => merge_manifest(existing, entries),
            None => build_manifest(entries),
        };

        let json = serde_json::to_vec_pretty(&manifest)?;
        self.storage.write_file(MANIFEST_FILE_NAME, &json).await?;

        Ok(PublishedManifest {
            path: self
                .config
                .output_dir()
                .join(MANIFEST_FILE_NAME)
                .display()
                .to_string(),
            seasons: manifest.seasons.len(),
        })
    }
}
