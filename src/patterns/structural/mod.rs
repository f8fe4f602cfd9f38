pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod decorator;
pub mod flyweight;
pub mod proxy;
