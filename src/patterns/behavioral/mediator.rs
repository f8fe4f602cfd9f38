//! Mediator: components report events to a mediator instead of calling each
//! other, and the mediator decides which operations follow.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    A,
    B,
    C,
    D,
}

impl Event {
    /// Which component raises this event.
    pub fn sender(&self) -> &'static str {
        match self {
            Event::A | Event::B => "component 1",
            Event::C | Event::D => "component 2",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::A => "A",
            Event::B => "B",
            Event::C => "C",
            Event::D => "D",
        };
        write!(f, "{}", name)
    }
}

pub trait Mediator {
    /// Reacts to an event and returns every operation it triggered, in order.
    fn notify(&self, event: Event, console: &dyn Console) -> Vec<Event>;
}

#[derive(Debug, Default)]
pub struct Component1;

impl Component1 {
    pub fn do_a(&self, console: &dyn Console) -> Event {
        console.write_line("Component 1 does A.");
        Event::A
    }

    pub fn do_b(&self, console: &dyn Console) -> Event {
        console.write_line("Component 1 does B.");
        Event::B
    }
}

#[derive(Debug, Default)]
pub struct Component2;

impl Component2 {
    pub fn do_c(&self, console: &dyn Console) -> Event {
        console.write_line("Component 2 does C.");
        Event::C
    }

    pub fn do_d(&self, console: &dyn Console) -> Event {
        console.write_line("Component 2 does D.");
        Event::D
    }
}

#[derive(Debug, Default)]
pub struct ConcreteMediator {
    component1: Component1,
    component2: Component2,
}

impl ConcreteMediator {
    pub fn new(component1: Component1, component2: Component2) -> Self {
        Self {
            component1,
            component2,
        }
    }

    pub fn component1(&self) -> &Component1 {
        &self.component1
    }

    pub fn component2(&self) -> &Component2 {
        &self.component2
    }

    fn follow(&self, event: Event, console: &dyn Console, triggered: &mut Vec<Event>) {
        triggered.push(event);
        triggered.extend(self.notify(event, console));
    }
}

impl Mediator for ConcreteMediator {
    fn notify(&self, event: Event, console: &dyn Console) -> Vec<Event> {
        let mut triggered = Vec::new();
        match event {
            Event::A => {
                console.write_line("Mediator reacts on A and triggers following operations:");
                let next = self.component2.do_c(console);
                self.follow(next, console, &mut triggered);
            }
            Event::D => {
                console.write_line("Mediator reacts on D and triggers following operations:");
                let next = self.component1.do_b(console);
                self.follow(next, console, &mut triggered);
                let next = self.component2.do_c(console);
                self.follow(next, console, &mut triggered);
            }
            Event::B | Event::C => {}
        }
        triggered
    }
}

pub fn client_code(console: &dyn Console) {
    let mediator = ConcreteMediator::default();

    console.write_line("Client triggers operation A.");
    let event = mediator.component1().do_a(console);
    mediator.notify(event, console);

    console.blank_line();

    console.write_line("Client triggers operation D.");
    let event = mediator.component2().do_d(console);
    mediator.notify(event, console);
}

pub struct MediatorDemo;

#[async_trait]
impl Demo for MediatorDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "mediator",
            title: "Mediator",
            category: PatternCategory::Behavioral,
            summary: "Restricts direct communication between objects and routes it through a mediator",
            complexity: 2,
            popularity: 0,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        client_code(console.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_event_a_triggers_c() {
        let console = BufferConsole::new();
        let mediator = ConcreteMediator::default();
        assert_eq!(mediator.notify(Event::A, &console), vec![Event::C]);
    }

    #[test]
    fn test_event_d_triggers_b_then_c() {
        let console = BufferConsole::new();
        let mediator = ConcreteMediator::default();
        assert_eq!(mediator.notify(Event::D, &console), vec![Event::B, Event::C]);
        assert_eq!(
            console.lines(),
            vec![
                "Mediator reacts on D and triggers following operations:",
                "Component 1 does B.",
                "Component 2 does C.",
            ]
        );
    }

    #[test]
    fn test_b_and_c_are_terminal() {
        let console = BufferConsole::new();
        let mediator = ConcreteMediator::default();
        assert!(mediator.notify(Event::B, &console).is_empty());
        assert!(mediator.notify(Event::C, &console).is_empty());
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_client_code_transcript() {
        let console = BufferConsole::new();
        client_code(&console);
        let lines = console.lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Client triggers operation A.");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Client triggers operation D.");
        assert_eq!(Event::D.sender(), "component 2");
    }
}
