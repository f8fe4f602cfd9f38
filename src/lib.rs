pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod patterns;
pub mod utils;

pub use adapters::{BufferConsole, StdoutConsole};
#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};
pub use config::CatalogConfig;
pub use core::{write_transcripts, CatalogRunner, DemoRegistry};
pub use domain::model::{DemoInfo, PatternCategory, RunSummary, Transcript};
pub use domain::ports::{Console, Demo};
pub use patterns::DemoSettings;
pub use utils::error::{CatalogError, Result};
