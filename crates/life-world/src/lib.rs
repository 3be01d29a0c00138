//! World simulation engine.
//!
//! This module implements the toroidal species grid, the rule table that
//! turns one generation into the next, and the driver that applies commands
//! between generations.

pub mod grid;
pub mod engine;
pub mod command;
pub mod simulation;

pub use grid::Grid;
pub use engine::TransitionEngine;
pub use command::Command;
pub use simulation::Simulation;
