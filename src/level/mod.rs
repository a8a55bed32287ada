//! Level construction utilities
//!
//! This module provides a declarative API for building platformer levels in code.

mod level_builder;

pub use level_builder::LevelBuilder;
