mod controller;
mod engine;
mod error;
mod grid;
mod normalize;

pub use controller::{Mode, SimulationController};
pub use error::FrameError;
pub use grid::{BrightnessField, CellGrid};
