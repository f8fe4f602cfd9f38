//! Abstract Factory: create whole families of related products without
//! naming their concrete types.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Chair {
    fn has_legs(&self) -> bool;
    fn useful_function(&self) -> String;
}

pub trait CoffeeTable {
    fn useful_function(&self) -> String;

    /// Works with any chair, but only a chair from the same family gives the
    /// intended result.
    fn another_useful_function(&self, collaborator: &dyn Chair) -> String;
}

pub trait Sofa {
    fn operation(&self) -> String;
}

/// Every method returns a product of the same variant.
pub trait FurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair>;
    fn create_coffee_table(&self) -> Box<dyn CoffeeTable>;
    fn create_sofa(&self) -> Box<dyn Sofa>;
}

pub struct VictorianChair;

impl Chair for VictorianChair {
    fn has_legs(&self) -> bool {
        true
    }

    fn useful_function(&self) -> String {
        "The result of the product VictorianChair.".to_string()
    }
}

pub struct ModernChair;

impl Chair for ModernChair {
    fn has_legs(&self) -> bool {
        false
    }

    fn useful_function(&self) -> String {
        "The result of the product ModernChair.".to_string()
    }
}

pub struct VictorianCoffeeTable;

impl CoffeeTable for VictorianCoffeeTable {
    fn useful_function(&self) -> String {
        "The result of the product VictorianCoffeTable.".to_string()
    }

    fn another_useful_function(&self, collaborator: &dyn Chair) -> String {
        format!(
            "The result of the VictorianCoffeTable collaborating with the ({})",
            collaborator.useful_function()
        )
    }
}

pub struct ModernCoffeeTable;

impl CoffeeTable for ModernCoffeeTable {
    fn useful_function(&self) -> String {
        "The result of the product ModernCoffeTable.".to_string()
    }

    fn another_useful_function(&self, collaborator: &dyn Chair) -> String {
        format!(
            "The result of the ModernCoffeTable collaborating with the ({})",
            collaborator.useful_function()
        )
    }
}

pub struct VictorianSofa;

impl Sofa for VictorianSofa {
    fn operation(&self) -> String {
        "VictorianSofa product".to_string()
    }
}

pub struct ModernSofa;

impl Sofa for ModernSofa {
    fn operation(&self) -> String {
        "ModernSofa product".to_string()
    }
}

pub struct VictorianFurnitureFactory;

impl FurnitureFactory for VictorianFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(VictorianChair)
    }

    fn create_coffee_table(&self) -> Box<dyn CoffeeTable> {
        Box::new(VictorianCoffeeTable)
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(VictorianSofa)
    }
}

pub struct ModernFurnitureFactory;

impl FurnitureFactory for ModernFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ModernChair)
    }

    fn create_coffee_table(&self) -> Box<dyn CoffeeTable> {
        Box::new(ModernCoffeeTable)
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(ModernSofa)
    }
}

/// Only talks to the factory and products through their traits.
pub fn client_code(factory: &dyn FurnitureFactory, console: &dyn Console) {
    let chair = factory.create_chair();
    let coffee_table = factory.create_coffee_table();

    console.write_line(&chair.useful_function());
    console.write_line(&coffee_table.another_useful_function(chair.as_ref()));
}

/// Builds a complete room from one variant. Adding a variant needs no change here.
pub fn furnish_room(factory: &dyn FurnitureFactory, console: &dyn Console) {
    let chair = factory.create_chair();
    let coffee_table = factory.create_coffee_table();
    let sofa = factory.create_sofa();

    console.write_line(&format!(
        "Room: {} | {} | {}",
        chair.useful_function(),
        coffee_table.useful_function(),
        sofa.operation()
    ));
}

pub struct AbstractFactoryDemo;

#[async_trait]
impl Demo for AbstractFactoryDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "abstract-factory",
            title: "Abstract Factory",
            category: PatternCategory::Creational,
            summary: "Creates families of related products without specifying their concrete classes",
            complexity: 2,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let console = console.as_ref();

        console.write_line("Client: Testing client code with the ModernFurnitureFactory");
        client_code(&ModernFurnitureFactory, console);
        console.blank_line();

        console.write_line(
            "Client: Testing the same client code with the VictorianFurnitureFactory...",
        );
        client_code(&VictorianFurnitureFactory, console);
        console.blank_line();

        furnish_room(&ModernFurnitureFactory, console);
        furnish_room(&VictorianFurnitureFactory, console);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_factories_produce_matching_variants() {
        let modern = ModernFurnitureFactory;
        let victorian = VictorianFurnitureFactory;

        assert!(!modern.create_chair().has_legs());
        assert!(victorian.create_chair().has_legs());
        assert_eq!(modern.create_sofa().operation(), "ModernSofa product");
        assert_eq!(victorian.create_sofa().operation(), "VictorianSofa product");
    }

    #[test]
    fn test_client_code_collaboration_output() {
        let console = BufferConsole::new();
        client_code(&ModernFurnitureFactory, &console);

        assert_eq!(
            console.lines(),
            vec![
                "The result of the product ModernChair.",
                "The result of the ModernCoffeTable collaborating with the (The result of the product ModernChair.)",
            ]
        );
    }

    #[test]
    fn test_furnish_room_uses_single_family() {
        let console = BufferConsole::new();
        furnish_room(&VictorianFurnitureFactory, &console);

        let line = &console.lines()[0];
        assert!(line.contains("VictorianChair"));
        assert!(line.contains("VictorianCoffeTable"));
        assert!(line.contains("VictorianSofa"));
        assert!(!line.contains("Modern"));
    }
}
