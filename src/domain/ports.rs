use crate::domain::model::DemoInfo;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Output sink for demo text. Demos never print directly.
pub trait Console: Send + Sync {
    fn write_line(&self, line: &str);

    fn blank_line(&self) {
        self.write_line("");
    }
}

#[async_trait]
pub trait Demo: Send + Sync {
    fn info(&self) -> DemoInfo;

    async fn run(&self, console: Arc<dyn Console>) -> Result<()>;
}
