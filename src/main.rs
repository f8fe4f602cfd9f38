use clap::Parser;
use pattern_catalog::utils::error::ErrorSeverity;
use pattern_catalog::utils::{logger, validation::Validate};
use pattern_catalog::{
    write_transcripts, CatalogConfig, CatalogError, CatalogRunner, CliConfig, Console,
    DemoRegistry, OutputFormat, StdoutConsole,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    let logger_ready = match config.format {
        OutputFormat::Json => logger::init_json_logger(config.verbose),
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
    };

    tracing::info!("Starting pattern-catalog CLI (logger ready: {})", logger_ready);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), CatalogError> {
    config.validate()?;

    // 載入 TOML 設定 (可選)
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📄 Loading settings from {}", path.display());
            let file_config = CatalogConfig::from_file(path)?;
            file_config.validate()?;
            file_config
        }
        None => CatalogConfig::default(),
    };

    let registry = DemoRegistry::new(&file_config.demo_settings()?);
    let console = StdoutConsole::new();

    if config.list {
        list_patterns(&registry, config.format, &console)?;
        return Ok(());
    }

    // 命令列參數優先於設定檔
    let patterns = if config.patterns.is_empty() {
        file_config.patterns().to_vec()
    } else {
        config.patterns.clone()
    };
    let category = match config.category()? {
        Some(category) => Some(category),
        None => file_config.category()?,
    };

    let runner = CatalogRunner::new(registry);
    let summary = runner.run(&patterns, category).await?;

    match config.format {
        OutputFormat::Text => write_transcripts(&summary, &console),
        OutputFormat::Json => console.write_line(&serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn list_patterns(
    registry: &DemoRegistry,
    format: OutputFormat,
    console: &dyn Console,
) -> Result<(), CatalogError> {
    match format {
        OutputFormat::Json => {
            console.write_line(&serde_json::to_string_pretty(&registry.infos())?);
        }
        OutputFormat::Text => {
            for info in registry.infos() {
                console.write_line(&format!(
                    "{:<24} {:<11} {}",
                    info.name,
                    info.category.to_string(),
                    info.summary
                ));
            }
        }
    }
    Ok(())
}
