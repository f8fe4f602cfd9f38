//! Builder: assemble a house step by step, with a director that knows the
//! usual recipes.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct House {
    pub has_walls: bool,
    pub has_doors: bool,
    pub has_windows: bool,
    pub has_roof: bool,
    pub has_garage: bool,
}

impl House {
    pub fn config(&self) -> String {
        format!(
            "hasWall: {}, hasDoors: {}, hasWindows: {}, hasRoof: {}, hasGarage: {}",
            self.has_walls, self.has_doors, self.has_windows, self.has_roof, self.has_garage
        )
    }
}

pub trait Builder {
    fn build_walls(&mut self);
    fn build_doors(&mut self);
    fn build_windows(&mut self);
    fn build_roof(&mut self);
    fn build_garage(&mut self);
    fn reset(&mut self);
}

#[derive(Debug, Default)]
pub struct HouseBuilder {
    house: House,
}

impl HouseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands over the finished house; the builder starts again from scratch.
    pub fn get_house(&mut self) -> House {
        std::mem::take(&mut self.house)
    }
}

impl Builder for HouseBuilder {
    fn build_walls(&mut self) {
        self.house.has_walls = true;
    }

    fn build_doors(&mut self) {
        self.house.has_doors = true;
    }

    fn build_windows(&mut self) {
        self.house.has_windows = true;
    }

    fn build_roof(&mut self) {
        self.house.has_roof = true;
    }

    fn build_garage(&mut self) {
        self.house.has_garage = true;
    }

    fn reset(&mut self) {
        self.house = House::default();
    }
}

/// Runs construction steps in a fixed order against any builder.
#[derive(Debug, Default)]
pub struct Director;

impl Director {
    pub fn new() -> Self {
        Self
    }

    pub fn build_minimal_house(&self, builder: &mut dyn Builder) {
        builder.build_walls();
        builder.build_doors();
        builder.build_roof();
    }

    pub fn build_full_house(&self, builder: &mut dyn Builder) {
        builder.build_walls();
        builder.build_garage();
        builder.build_doors();
        builder.build_roof();
        builder.build_windows();
    }
}

pub fn client_code(director: &Director, console: &dyn Console) {
    let mut builder = HouseBuilder::new();

    console.write_line("minimal house");
    director.build_minimal_house(&mut builder);
    console.write_line(&builder.get_house().config());

    console.write_line("full house");
    director.build_full_house(&mut builder);
    console.write_line(&builder.get_house().config());

    // The builder can also be driven without a director.
    console.write_line("custom house");
    builder.build_doors();
    builder.build_garage();
    console.write_line(&builder.get_house().config());
}

pub struct BuilderDemo;

#[async_trait]
impl Demo for BuilderDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "builder",
            title: "Builder",
            category: PatternCategory::Creational,
            summary: "Constructs complex objects step by step with the same construction process",
            complexity: 2,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        client_code(&Director::new(), console.as_ref());
        Ok(())
    }
}
