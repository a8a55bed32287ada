//! plat2d application layer
//!
//! Configuration, level building and the headless frame driver on top of
//! the `plat2d_core` simulation.

pub mod config;
pub mod input;
pub mod level;
pub mod systems;
