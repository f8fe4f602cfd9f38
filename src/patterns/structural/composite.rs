//! Composite: single instructions and instruction sets share one interface,
//! so a runner can execute trees of them without telling them apart.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Instruction: Send + Sync {
    fn name(&self) -> &str;

    /// Returns `false` when the instruction failed.
    fn execute(&self, console: &dyn Console) -> bool;
}

pub struct LogInstruction {
    name: String,
    log: String,
}

impl LogInstruction {
    pub fn new(name: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: log.into(),
        }
    }
}

impl Instruction for LogInstruction {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, console: &dyn Console) -> bool {
        console.write_line(&format!("{}: {}", self.name, self.log));
        true
    }
}

pub struct CompositeInstructionSet {
    name: String,
    children: Vec<Box<dyn Instruction>>,
}

impl CompositeInstructionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Box<dyn Instruction>) {
        self.children.push(child);
    }

    /// Removes every direct child with the given name and returns how many
    /// were dropped.
    pub fn remove_child(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|child| child.name() != name);
        before - self.children.len()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Instruction for CompositeInstructionSet {
    fn name(&self) -> &str {
        &self.name
    }

    /// Stops at the first failing child.
    fn execute(&self, console: &dyn Console) -> bool {
        for child in &self.children {
            if !child.execute(console) {
                tracing::debug!("Instruction '{}' failed inside '{}'", child.name(), self.name);
                return false;
            }
        }
        true
    }
}

pub struct TaskRunner {
    tasks: Vec<Box<dyn Instruction>>,
}

impl TaskRunner {
    pub fn new(tasks: Vec<Box<dyn Instruction>>) -> Self {
        Self { tasks }
    }

    /// Runs every task, even after a failure. Returns the number that succeeded.
    pub fn run_tasks(&self, console: &dyn Console) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.execute(console))
            .count()
    }
}

pub fn client_code(console: &dyn Console) -> usize {
    let start_up = LogInstruction::new("Starting", "Task runner booting up...");

    let mut composite = CompositeInstructionSet::new("Composite");
    composite.add_child(Box::new(LogInstruction::new("Composite 1", "The first sub task")));
    composite.add_child(Box::new(LogInstruction::new("Composite 1", "The second sub task")));

    let mut nested = CompositeInstructionSet::new("Composite2");
    nested.add_child(Box::new(LogInstruction::new("Composite 2", "The first sub task")));
    nested.add_child(Box::new(LogInstruction::new("Composite 2", "The second sub task")));
    composite.add_child(Box::new(nested));

    let runner = TaskRunner::new(vec![Box::new(start_up), Box::new(composite)]);
    runner.run_tasks(console)
}

pub struct CompositeDemo;

#[async_trait]
impl Demo for CompositeDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "composite",
            title: "Composite",
            category: PatternCategory::Structural,
            summary: "Composes objects into trees and works with them as individual objects",
            complexity: 2,
            popularity: 2,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let succeeded = client_code(console.as_ref());
        tracing::debug!("{} top-level tasks succeeded", succeeded);
        Ok(())
    }
}
