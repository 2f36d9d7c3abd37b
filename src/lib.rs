// Library exports for foraging-sim
// Headless simulation core; drivers and renderers sit on top of `world::Simulation`

pub mod utils;
pub mod species;
pub mod fighting;
pub mod occupant;
pub mod board;
pub mod generation;
pub mod stats;
pub mod config;
pub mod error;
pub mod world;
pub mod debug;
pub mod diagnostics;
