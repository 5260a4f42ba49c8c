//! Состав логотипа и движок резолюции зависимых выборов

pub mod engine;
pub mod types;

pub use engine::{BallRowField, ComponentRowField, CompositionEngine};
pub use types::{BallRow, ComponentRow, Composition};
