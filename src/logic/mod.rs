pub mod alerts;
pub mod calculations;
pub mod engine;
pub mod health;
pub mod irrigation;
pub mod prediction;

pub use engine::{DecisionEngine, Evaluation};
