//! Adapter: make an incompatible interface usable by existing client code.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The interface the client code already understands.
pub trait Target {
    fn request(&self) -> String;
}

pub struct DefaultTarget;

impl Target for DefaultTarget {
    fn request(&self) -> String {
        "Target: The default target's behavior.".to_string()
    }
}

/// Useful behavior behind an interface the client cannot use.
pub struct Adaptee;

impl Adaptee {
    pub fn specific_request(&self) -> String {
        ".eetpadA eht fo roivaheb laicepS".to_string()
    }
}

pub struct Adapter {
    adaptee: Adaptee,
}

impl Adapter {
    pub fn new(adaptee: Adaptee) -> Self {
        Self { adaptee }
    }
}

impl Target for Adapter {
    fn request(&self) -> String {
        let translated: String = self.adaptee.specific_request().chars().rev().collect();
        format!("Adapter: (TRANSLATED) {}", translated)
    }
}

pub fn client_code(target: &dyn Target, console: &dyn Console) {
    console.write_line(&target.request());
}

// XML core, JSON library

pub trait XmlDisplay {
    fn display_xml(&self, xml_content: &str) -> String;
}

/// External package that only deals with XML.
pub struct CoreClass;

impl XmlDisplay for CoreClass {
    fn display_xml(&self, xml_content: &str) -> String {
        format!("CoreClass: I Work only with XML: {}", xml_content)
    }
}

/// In-house library that only deals with JSON.
pub struct AnalyticsLibrary;

impl AnalyticsLibrary {
    pub fn display_json(&self, json_content: &str) -> String {
        format!("AnalyticsLibrary: I display only JSON : {}", json_content)
    }
}

pub struct XmlToJsonAdapter {
    library: AnalyticsLibrary,
}

impl XmlToJsonAdapter {
    pub fn new(library: AnalyticsLibrary) -> Self {
        Self { library }
    }

    /// Only the first `xml` marker is rewritten.
    pub fn convert(xml_content: &str) -> String {
        xml_content.replacen("xml", "json", 1)
    }
}

impl XmlDisplay for XmlToJsonAdapter {
    fn display_xml(&self, xml_content: &str) -> String {
        self.library.display_json(&Self::convert(xml_content))
    }
}

pub fn xml_client_code(core: &dyn XmlDisplay, console: &dyn Console) {
    console.write_line(&core.display_xml("test xml content"));
}

pub struct AdapterDemo;

#[async_trait]
impl Demo for AdapterDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "adapter",
            title: "Adapter",
            category: PatternCategory::Structural,
            summary: "Lets objects with incompatible interfaces collaborate",
            complexity: 1,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let console = console.as_ref();

        console.write_line("Client: I can work just fine with the Target objects:");
        client_code(&DefaultTarget, console);
        console.blank_line();

        let adaptee = Adaptee;
        console.write_line(
            "Client: The Adaptee class has a weird interface. See, I don't understand it:",
        );
        console.write_line(&format!("Adaptee: {}", adaptee.specific_request()));
        console.blank_line();

        console.write_line("Client: But I can work with it via the Adapter:");
        client_code(&Adapter::new(adaptee), console);
        console.blank_line();

        xml_client_code(&CoreClass, console);
        xml_client_code(&XmlToJsonAdapter::new(AnalyticsLibrary), console);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_adapter_translates_adaptee() {
        assert_eq!(
            Adapter::new(Adaptee).request(),
            "Adapter: (TRANSLATED) Special behavior of the Adaptee."
        );
    }

    #[test]
    fn test_xml_adapter_rewrites_first_marker_only() {
        assert_eq!(XmlToJsonAdapter::convert("xml and xml"), "json and xml");

        let console = BufferConsole::new();
        xml_client_code(&XmlToJsonAdapter::new(AnalyticsLibrary), &console);
        assert_eq!(
            console.lines(),
            vec!["AnalyticsLibrary: I display only JSON : test json content"]
        );
    }

    #[test]
    fn test_core_class_passes_xml_through() {
        assert_eq!(
            CoreClass.display_xml("<a/>"),
            "CoreClass: I Work only with XML: <a/>"
        );
    }
}
