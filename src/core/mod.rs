pub mod etl;
pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod season;
pub mod selection;
pub mod workbook;

pub use crate::domain::model::{
    PublishedManifest, RunContext, SeasonDocument, SeasonEntry, SheetTable, SourceFile,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, WorkbookReader};
pub use crate::utils::error::Result;
