use crate::adapters::BufferConsole;
use crate::core::registry::DemoRegistry;
use crate::domain::model::{PatternCategory, RunSummary, Transcript};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Runs selected demos one after another and collects their transcripts.
pub struct CatalogRunner {
    registry: DemoRegistry,
}

impl CatalogRunner {
    pub fn new(registry: DemoRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DemoRegistry {
        &self.registry
    }

    pub async fn run(
        &self,
        names: &[String],
        category: Option<PatternCategory>,
    ) -> Result<RunSummary> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let demos = self.registry.select(names, category)?;
        tracing::info!("🚀 Running {} pattern demo(s)", demos.len());

        let mut transcripts = Vec::with_capacity(demos.len());
        for demo in demos {
            transcripts.push(self.run_demo(demo).await?);
        }

        let elapsed_ms = clock.elapsed().as_millis() as u64;
        tracing::info!(
            "✅ Finished {} demo(s) in {} ms",
            transcripts.len(),
            elapsed_ms
        );

        Ok(RunSummary {
            started_at,
            elapsed_ms,
            transcripts,
        })
    }

    /// Runs a single demo against an in-memory console.
    pub async fn run_demo(&self, demo: &dyn Demo) -> Result<Transcript> {
        let info = demo.info();
        tracing::debug!("▶️ {} ({})", info.title, info.category);

        let buffer = Arc::new(BufferConsole::new());
        let console: Arc<dyn Console> = buffer.clone();

        if let Err(e) = demo.run(console).await {
            tracing::error!("❌ Demo {} failed: {}", info.name, e);
            return Err(e);
        }

        let lines = buffer.take_lines();
        tracing::debug!("📝 {} produced {} line(s)", info.name, lines.len());

        Ok(Transcript {
            demo: info.name.to_string(),
            category: info.category,
            lines,
        })
    }
}

impl Default for CatalogRunner {
    fn default() -> Self {
        Self::new(DemoRegistry::default())
    }
}

/// Writes transcripts with a heading per demo.
pub fn write_transcripts(summary: &RunSummary, console: &dyn Console) {
    for (index, transcript) in summary.transcripts.iter().enumerate() {
        if index > 0 {
            console.blank_line();
        }
        console.write_line(&format!(
            "=== {} ({}) ===",
            transcript.demo, transcript.category
        ));
        for line in &transcript.lines {
            console.write_line(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DemoInfo;
    use crate::utils::error::CatalogError;
    use async_trait::async_trait;

    struct FailingDemo;

    #[async_trait]
    impl Demo for FailingDemo {
        fn info(&self) -> DemoInfo {
            DemoInfo {
                name: "failing",
                title: "Failing",
                category: PatternCategory::Behavioral,
                summary: "Always fails",
                complexity: 0,
                popularity: 0,
            }
        }

        async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
            console.write_line("about to fail");
            Err(CatalogError::DemoError {
                demo: "failing".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_collects_transcripts_in_order() {
        let runner = CatalogRunner::default();
        let names = vec!["adapter".to_string(), "mediator".to_string()];

        let summary = runner.run(&names, None).await.unwrap();
        assert_eq!(summary.demo_names(), vec!["adapter", "mediator"]);
        assert!(!summary.transcript("adapter").unwrap().lines.is_empty());
    }

    #[tokio::test]
    async fn test_run_by_category() {
        let runner = CatalogRunner::default();
        let summary = runner
            .run(&[], Some(PatternCategory::Creational))
            .await
            .unwrap();
        assert_eq!(
            summary.demo_names(),
            vec!["abstract-factory", "builder", "factory-method", "prototype"]
        );
    }

    #[tokio::test]
    async fn test_failing_demo_propagates_error() {
        let registry = DemoRegistry::with_demos(vec![Box::new(FailingDemo)]);
        let runner = CatalogRunner::new(registry);

        let result = runner.run(&[], None).await;
        assert!(matches!(result, Err(CatalogError::DemoError { .. })));
    }

    #[test]
    fn test_write_transcripts_adds_headings() {
        let summary = RunSummary {
            started_at: Utc::now(),
            elapsed_ms: 0,
            transcripts: vec![
                Transcript {
                    demo: "builder".to_string(),
                    category: PatternCategory::Creational,
                    lines: vec!["a".to_string()],
                },
                Transcript {
                    demo: "adapter".to_string(),
                    category: PatternCategory::Structural,
                    lines: vec!["b".to_string()],
                },
            ],
        };
        let console = BufferConsole::new();
        write_transcripts(&summary, &console);
        assert_eq!(
            console.lines(),
            vec![
                "=== builder (creational) ===",
                "a",
                "",
                "=== adapter (structural) ===",
                "b",
            ]
        );
    }
}
