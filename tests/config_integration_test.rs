use anyhow::Result;
use pattern_catalog::utils::validation::Validate;
use pattern_catalog::{CatalogConfig, CatalogRunner, DemoRegistry};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

async fn run_with_config(content: &str) -> Result<pattern_catalog::RunSummary> {
    let file = write_config(content)?;
    let config = CatalogConfig::from_file(file.path())?;
    config.validate()?;

    let runner = CatalogRunner::new(DemoRegistry::new(&config.demo_settings()?));
    let summary = runner
        .run(config.patterns(), config.category()?)
        .await?;
    Ok(summary)
}

#[tokio::test]
async fn test_blacklist_from_config_rejects_request() -> Result<()> {
    let summary = run_with_config(
        r#"
[catalog]
patterns = ["chain-of-responsibility"]

[chain]
blacklisted_ips = ["107.77.194.36"]
"#,
    )
    .await?;

    let transcript = summary
        .transcript("chain-of-responsibility")
        .expect("chain transcript");
    assert!(transcript.lines.iter().any(|l| l == "Blacklisted IP Address"));
    assert!(!transcript
        .lines
        .iter()
        .any(|l| l == "Request valid, we can now process the order"));
    Ok(())
}

#[tokio::test]
async fn test_network_and_channels_from_config() -> Result<()> {
    let summary = run_with_config(
        r#"
[catalog]
patterns = ["iterator", "decorator"]

[iterator]
network = "linkedin"

[decorator]
channels = ["sms"]
"#,
    )
    .await?;

    let iterator = summary.transcript("iterator").expect("iterator transcript");
    assert!(iterator.lines.iter().any(|l| l == "Network: linkedin"));

    let decorator = summary.transcript("decorator").expect("decorator transcript");
    assert_eq!(decorator.lines[0], "im sending SMS message");
    assert!(!decorator.lines.iter().any(|l| l.contains("Slack")));
    Ok(())
}

#[tokio::test]
async fn test_category_from_config() -> Result<()> {
    let summary = run_with_config(
        r#"
[catalog]
category = "creational"

[factory]
platform = "linux"
"#,
    )
    .await?;

    assert_eq!(summary.transcripts.len(), 4);
    let factory = summary
        .transcript("factory-method")
        .expect("factory-method transcript");
    assert!(factory
        .lines
        .iter()
        .any(|l| l == "App: Rendering dialog for linux."));
    Ok(())
}

#[test]
fn test_invalid_ip_in_file_is_rejected() -> Result<()> {
    let file = write_config("[chain]\nblacklisted_ips = [\"not-an-ip\"]\n")?;
    let config = CatalogConfig::from_file(file.path())?;
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = CatalogConfig::from_file("/definitely/not/here/catalog.toml");
    assert!(matches!(
        result,
        Err(pattern_catalog::CatalogError::IoError(_))
    ));
}
