pub mod chain_of_responsibility;
pub mod command;
pub mod iterator;
pub mod mediator;
