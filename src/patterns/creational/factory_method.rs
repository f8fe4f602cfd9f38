//! Factory Method: the creator's logic works on products made by a method
//! that implementors override.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub trait Product {
    fn operation(&self) -> String;
}

pub trait Creator {
    fn create_product(&self) -> Box<dyn Product>;

    /// Business logic that only knows the product through its trait.
    fn some_operation(&self) -> String {
        let product = self.create_product();
        format!(
            "Creator: The same creator's code has just worked with {}",
            product.operation()
        )
    }
}

pub struct ConcreteProduct1;

impl Product for ConcreteProduct1 {
    fn operation(&self) -> String {
        "{Result of the ConcreteProduct1}".to_string()
    }
}

pub struct ConcreteProduct2;

impl Product for ConcreteProduct2 {
    fn operation(&self) -> String {
        "{Result of the ConcreteProduct2}".to_string()
    }
}

pub struct ConcreteCreator1;

impl Creator for ConcreteCreator1 {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(ConcreteProduct1)
    }
}

pub struct ConcreteCreator2;

impl Creator for ConcreteCreator2 {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(ConcreteProduct2)
    }
}

pub fn client_code(creator: &dyn Creator, console: &dyn Console) {
    console.write_line("Client: I'm not aware of the creator's class, but it still works.");
    console.write_line(&creator.some_operation());
}

// Cross-platform buttons

pub trait Button {
    fn render(&self) -> String;
    fn on_click(&self) -> String;
}

pub struct WindowsButton;

impl Button for WindowsButton {
    fn render(&self) -> String {
        "rendering windows button".to_string()
    }

    fn on_click(&self) -> String {
        "on click windows button".to_string()
    }
}

pub struct LinuxButton;

impl Button for LinuxButton {
    fn render(&self) -> String {
        "rendering linux button".to_string()
    }

    fn on_click(&self) -> String {
        "on click linux button".to_string()
    }
}

pub struct MacButton;

impl Button for MacButton {
    fn render(&self) -> String {
        "rendering mac button".to_string()
    }

    fn on_click(&self) -> String {
        "on click mac button".to_string()
    }
}

pub trait ButtonCreator {
    fn create_button(&self) -> Box<dyn Button>;
}

pub struct WindowsButtonCreator;

impl ButtonCreator for WindowsButtonCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }
}

pub struct LinuxButtonCreator;

impl ButtonCreator for LinuxButtonCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(LinuxButton)
    }
}

pub struct MacButtonCreator;

impl ButtonCreator for MacButtonCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacButton)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Windows,
    Linux,
    Mac,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::Mac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Mac => "mac",
        }
    }
}

/// The application picks its creator from configuration.
pub fn creator_for_platform(platform: Platform) -> Box<dyn ButtonCreator> {
    match platform {
        Platform::Windows => Box::new(WindowsButtonCreator),
        Platform::Linux => Box::new(LinuxButtonCreator),
        Platform::Mac => Box::new(MacButtonCreator),
    }
}

pub fn render_dialog(creator: &dyn ButtonCreator, console: &dyn Console) {
    let button = creator.create_button();
    console.write_line(&button.render());
    console.write_line(&button.on_click());
}

pub struct FactoryMethodDemo {
    platform: Platform,
}

impl FactoryMethodDemo {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl Demo for FactoryMethodDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "factory-method",
            title: "Factory Method",
            category: PatternCategory::Creational,
            summary: "Creates product objects without specifying their concrete classes",
            complexity: 1,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let console = console.as_ref();

        console.write_line("App: Launched with the ConcreteCreator1.");
        client_code(&ConcreteCreator1, console);
        console.blank_line();

        console.write_line("App: Launched with the ConcreteCreator2.");
        client_code(&ConcreteCreator2, console);
        console.blank_line();

        tracing::debug!("Rendering dialog for platform {}", self.platform.as_str());
        console.write_line(&format!("App: Rendering dialog for {}.", self.platform.as_str()));
        render_dialog(creator_for_platform(self.platform).as_ref(), console);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_some_operation_uses_overridden_factory() {
        assert_eq!(
            ConcreteCreator1.some_operation(),
            "Creator: The same creator's code has just worked with {Result of the ConcreteProduct1}"
        );
        assert!(ConcreteCreator2
            .some_operation()
            .ends_with("{Result of the ConcreteProduct2}"));
    }

    #[test]
    fn test_creator_for_each_platform() {
        for platform in Platform::ALL {
            let button = creator_for_platform(platform).create_button();
            assert_eq!(button.render(), format!("rendering {} button", platform.as_str()));
            assert_eq!(button.on_click(), format!("on click {} button", platform.as_str()));
        }
    }

    #[tokio::test]
    async fn test_demo_renders_configured_platform() {
        let console = Arc::new(BufferConsole::new());
        FactoryMethodDemo::new(Platform::Mac)
            .run(console.clone())
            .await
            .unwrap();

        assert!(console.contains("rendering mac button"));
        assert!(!console.contains("rendering linux button"));
    }
}
