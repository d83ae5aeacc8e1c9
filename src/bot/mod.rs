mod orchestrator;
mod strategies;
mod strategy;

pub use orchestrator::*;
pub use strategies::*;
pub use strategy::*;
