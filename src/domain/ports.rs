use crate::domain::model::{
    PublishedManifest, RunContext, SeasonDocument, SeasonEntry, SheetTable, SourceFile,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn output_dir(&self) -> &Path;
    fn sheet_name(&self) -> &str;
    fn raw_mode(&self) -> bool;
    fn merge_manifest(&self) -> bool;
}

/// Reads one named sheet out of a workbook file.
pub trait WorkbookReader: Send + Sync {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<SheetTable>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, source: &SourceFile) -> Result<SheetTable>;
    async fn transform(
        &self,
        source: &SourceFile,
        table: SheetTable,
        ctx: &RunContext,
    ) -> Result<SeasonDocument>;
    async fn load(&self, document: SeasonDocument) -> Result<SeasonEntry>;
    async fn publish_manifest(&self, entries: Vec<SeasonEntry>) -> Result<PublishedManifest>;
}
