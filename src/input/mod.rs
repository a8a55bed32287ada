//! Input handling module
//!
//! Provides scripted input for headless runs.

mod input_script;

pub use input_script::{InputAction, InputMapper, InputScript, Phase};
