use clap::Parser;
use fcm_excel2json::utils::{logger, open_dir, validation::Validate};
use fcm_excel2json::{
    CliConfig, ConfigLayer, ConversionConfig, ConversionPipeline, ConvertError, EtlEngine,
    LocalStorage, LogFormat, RunLog, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting FCM_Excel_2_JSON");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let files = match config.collect_files() {
        Ok(files) => files,
        Err(e) => fail(&e),
    };

    let storage = LocalStorage::new(config.output_dir.clone());
    if let Err(e) = storage.ensure_base_dir() {
        fail(&e);
    }

    let log = RunLog::new(storage.base_path());
    let output_dir = storage.base_path().to_path_buf();
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = ConversionPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, log, monitor_enabled);

    let report = match engine.run(files).await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    println!(
        "✅ {} of {} workbook(s) converted, {} skipped",
        report.generated.len(),
        report.files_selected,
        report.skipped.len()
    );
    for skipped in &report.skipped {
        println!("   ⚠ {}: {}", skipped.file, skipped.reason);
    }
    if let Some(manifest) = &report.manifest_path {
        println!("📁 Manifest saved to: {}", manifest);
    }

    if cli.open {
        if let Err(e) = open_dir::open_in_file_manager(&output_dir) {
            tracing::warn!("Cannot open output directory: {}", e);
        }
    }

    if report.produced_nothing() {
        eprintln!("❌ No JSON generated: every selected workbook was skipped");
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> fcm_excel2json::Result<ConversionConfig> {
    let file_layer = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            file.to_layer()
        }
        None => ConfigLayer::default(),
    };

    let config = cli.to_layer().over(file_layer).resolve()?;
    config.validate()?;
    Ok(config)
}

fn fail(e: &ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
