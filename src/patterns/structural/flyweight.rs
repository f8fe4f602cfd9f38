//! Flyweight: cars in a police database share their brand/model/color
//! objects; only plates and owner are stored per car.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Intrinsic state, shared between many cars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedState {
    pub brand: String,
    pub model: String,
    pub color: String,
}

impl SharedState {
    pub fn new(brand: &str, model: &str, color: &str) -> Self {
        Self {
            brand: brand.to_string(),
            model: model.to_string(),
            color: color.to_string(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.brand, self.model, self.color)
    }
}

/// Extrinsic state, supplied by the caller on every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueState {
    pub plates: String,
    pub owner: String,
}

#[derive(Debug)]
pub struct Flyweight {
    shared_state: SharedState,
}

impl Flyweight {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }

    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    pub fn operation(&self, unique_state: &UniqueState) -> Result<String> {
        let shared = serde_json::to_string(&self.shared_state)?;
        let unique = serde_json::to_string(unique_state)?;
        Ok(format!(
            "Flyweight: Displaying shared ({}) and unique ({}) state.",
            shared, unique
        ))
    }
}

/// Lists flyweights in the order they were first created.
#[derive(Debug, Default)]
pub struct FlyweightFactory {
    flyweights: HashMap<String, Arc<Flyweight>>,
    order: Vec<String>,
}

impl FlyweightFactory {
    pub fn new(initial: Vec<SharedState>) -> Self {
        let mut factory = Self::default();
        for state in initial {
            factory.get_flyweight(state);
        }
        factory
    }

    pub fn contains(&self, shared_state: &SharedState) -> bool {
        self.flyweights.contains_key(&shared_state.key())
    }

    /// Returns the cached flyweight for this state, creating it on first use.
    pub fn get_flyweight(&mut self, shared_state: SharedState) -> Arc<Flyweight> {
        let key = shared_state.key();
        if let Some(flyweight) = self.flyweights.get(&key) {
            return Arc::clone(flyweight);
        }

        tracing::debug!("Creating flyweight {}", key);
        let flyweight = Arc::new(Flyweight::new(shared_state));
        self.order.push(key.clone());
        self.flyweights.insert(key, Arc::clone(&flyweight));
        flyweight
    }

    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn count(&self) -> usize {
        self.flyweights.len()
    }

    pub fn list_flyweights(&self, console: &dyn Console) {
        console.blank_line();
        console.write_line(&format!(
            "FlyweightFactory: I have {} flyweights:",
            self.count()
        ));
        for key in &self.order {
            console.write_line(key);
        }
    }
}

pub fn add_car_to_police_database(
    factory: &mut FlyweightFactory,
    plates: &str,
    owner: &str,
    shared_state: SharedState,
    console: &dyn Console,
) -> Result<Arc<Flyweight>> {
    console.blank_line();
    console.write_line("Client: Adding a car to database.");

    if factory.contains(&shared_state) {
        console.write_line("FlyweightFactory: Reusing existing flyweight.");
    } else {
        console.write_line("FlyweightFactory: Can't find a flyweight, creating new one.");
    }

    let flyweight = factory.get_flyweight(shared_state);
    let unique = UniqueState {
        plates: plates.to_string(),
        owner: owner.to_string(),
    };
    console.write_line(&flyweight.operation(&unique)?);
    Ok(flyweight)
}

pub fn initial_car_models() -> Vec<SharedState> {
    vec![
        SharedState::new("Chevrolet", "Camaro2018", "pink"),
        SharedState::new("Mercedes Benz", "C300", "black"),
        SharedState::new("Mercedes Benz", "C500", "red"),
        SharedState::new("BMW", "M5", "red"),
        SharedState::new("BMW", "X6", "white"),
    ]
}

pub fn client_code(console: &dyn Console) -> Result<()> {
    let mut factory = FlyweightFactory::new(initial_car_models());
    factory.list_flyweights(console);

    add_car_to_police_database(
        &mut factory,
        "CL234IR",
        "James Doe",
        SharedState::new("BMW", "M5", "red"),
        console,
    )?;
    add_car_to_police_database(
        &mut factory,
        "CL234IR",
        "James Doe",
        SharedState::new("BMW", "X1", "red"),
        console,
    )?;

    factory.list_flyweights(console);
    Ok(())
}

pub struct FlyweightDemo;

#[async_trait]
impl Demo for FlyweightDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "flyweight",
            title: "Flyweight",
            category: PatternCategory::Structural,
            summary: "Fits more objects into memory by sharing common state between them",
            complexity: 3,
            popularity: 0,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        client_code(console.as_ref())
    }
}
