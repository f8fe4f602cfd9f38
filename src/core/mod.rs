pub mod registry;
pub mod runner;

pub use registry::DemoRegistry;
pub use runner::{write_transcripts, CatalogRunner};
