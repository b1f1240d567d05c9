use crate::core::season::extract_season;
use crate::core::selection::filter_workbooks;
use crate::core::{Pipeline, RunContext, SeasonEntry, SourceFile};
use crate::domain::model::{RunReport, SkippedFile};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use crate::utils::run_log::RunLog;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    log: RunLog,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P, log: RunLog) -> Self {
        Self::new_with_monitoring(pipeline, log, false)
    }

    pub fn new_with_monitoring(pipeline: P, log: RunLog, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            log,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Converts every valid workbook in `files` and publishes the manifest.
    ///
    /// A failing file is logged and skipped; only a failure to write the
    /// manifest is returned as an error.
    pub async fn run(&self, files: Vec<PathBuf>) -> Result<RunReport> {
        let ctx = RunContext::now();
        let files = filter_workbooks(files);
        let mut report = RunReport {
            files_selected: files.len(),
            ..RunReport::default()
        };

        if files.is_empty() {
            self.log.info("No valid .xls/.xlsx file selected.");
            return Ok(report);
        }

        self.monitor.log_stats("Start");
        let total = files.len();
        let mut seen_seasons = HashSet::new();

        for (idx, path) in files.iter().enumerate() {
            let name = display_name(path);
            self.log.line(format!("[{}/{}] Reading {}", idx + 1, total, name));

            let season = match extract_season(&file_stem(path)) {
                Ok(season) => season,
                Err(e) => {
                    self.log.warn(format!("  {} -> file skipped", e));
                    report.skipped.push(SkippedFile {
                        file: name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !seen_seasons.insert(season.key.clone()) {
                self.log.warn(format!(
                    "  Duplicate season '{}' (overwritten by this file)",
                    season.key
                ));
            }

            let source = SourceFile {
                path: path.clone(),
                season,
            };
            match self.convert(&source, &ctx).await {
                Ok(entry) => {
                    self.log.ok(format!(
                        "  Generated {} ({} rows)",
                        entry.file, entry.n_players
                    ));
                    report.generated.push(entry);
                }
                Err(e) => {
                    self.log.error(format!("  {} -> file skipped", e));
                    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                    report.skipped.push(SkippedFile {
                        file: name,
                        reason: e.to_string(),
                    });
                }
            }
            self.monitor.log_stats(&format!("File {}/{}", idx + 1, total));
        }

        if report.generated.is_empty() {
            self.log.info("No JSON generated (no valid file).");
        } else {
            match self.pipeline.publish_manifest(report.generated.clone()).await {
                Ok(published) => {
                    self.log.ok(format!(
                        "Updated seasons.json ({} seasons)",
                        published.seasons
                    ));
                    report.manifest_path = Some(published.path);
                }
                Err(e) => {
                    self.log.error(format!("Writing seasons.json: {}", e));
                    return Err(e);
                }
            }
        }

        self.monitor.log_final_stats();
        Ok(report)
    }

    async fn convert(&self, source: &SourceFile, ctx: &RunContext) -> Result<SeasonEntry> {
        let table = self.pipeline.extract(source).await?;
        tracing::debug!("Extracted {} rows from {}", table.rows.len(), source.file_name());

        let document = self.pipeline.transform(source, table, ctx).await?;
        self.pipeline.load(document).await
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
