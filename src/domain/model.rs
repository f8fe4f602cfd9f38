use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Creational,
    Structural,
    Behavioral,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Creational,
        PatternCategory::Structural,
        PatternCategory::Behavioral,
    ];
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternCategory::Creational => "creational",
            PatternCategory::Structural => "structural",
            PatternCategory::Behavioral => "behavioral",
        };
        f.write_str(label)
    }
}

impl FromStr for PatternCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creational" => Ok(PatternCategory::Creational),
            "structural" => Ok(PatternCategory::Structural),
            "behavioral" | "behavioural" => Ok(PatternCategory::Behavioral),
            other => Err(CatalogError::InvalidConfigValueError {
                field: "category".to_string(),
                value: other.to_string(),
                reason: "Expected creational, structural or behavioral".to_string(),
            }),
        }
    }
}

/// Static description of one demo, shown by `--list`.
///
/// `complexity` and `popularity` are scores out of 3.
#[derive(Debug, Clone, Serialize)]
pub struct DemoInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub category: PatternCategory,
    pub summary: &'static str,
    pub complexity: u8,
    pub popularity: u8,
}

/// Lines one demo wrote to its console.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub demo: String,
    pub category: PatternCategory,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub transcripts: Vec<Transcript>,
}

impl RunSummary {
    pub fn demo_names(&self) -> Vec<&str> {
        self.transcripts.iter().map(|t| t.demo.as_str()).collect()
    }

    pub fn transcript(&self, demo: &str) -> Option<&Transcript> {
        self.transcripts.iter().find(|t| t.demo == demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_display() {
        for category in PatternCategory::ALL {
            let parsed: PatternCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!(
            "Behavioural".parse::<PatternCategory>().unwrap(),
            PatternCategory::Behavioral
        );
        assert!("functional".parse::<PatternCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&PatternCategory::Structural).unwrap();
        assert_eq!(json, "\"structural\"");
    }
}
