use crate::domain::model::PatternCategory;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pattern-catalog")]
#[command(about = "Runs classic object-oriented design pattern demos")]
pub struct CliConfig {
    /// Patterns to run, e.g. `builder` or `chain-of-responsibility`. Runs all when empty.
    pub patterns: Vec<String>,

    #[arg(long, help = "Only run creational, structural or behavioral demos")]
    pub category: Option<String>,

    #[arg(long, help = "List available patterns and exit")]
    pub list: bool,

    #[arg(long, help = "TOML file with demo settings")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn category(&self) -> Result<Option<PatternCategory>> {
        self.category.as_deref().map(str::parse).transpose()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            validate_non_empty_string("patterns", pattern)?;
        }
        self.category()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::parse_from(["pattern-catalog"]);
        assert!(config.patterns.is_empty());
        assert!(!config.list);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_patterns_and_flags() {
        let config = CliConfig::parse_from([
            "pattern-catalog",
            "builder",
            "proxy",
            "--category",
            "structural",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(config.patterns, vec!["builder", "proxy"]);
        assert_eq!(config.category().unwrap(), Some(PatternCategory::Structural));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_category_fails_validation() {
        let config = CliConfig::parse_from(["pattern-catalog", "--category", "functional"]);
        assert!(config.validate().is_err());
    }
}
