//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`P2D_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use plat2d_core::{InputConfig, PlayerConfig, SlimeConfig, WeaponConfig, WorldConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// World physics
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Player movement and jump tuning
    #[serde(default)]
    pub player: PlayerConfig,
    /// Slime patrol tuning
    #[serde(default)]
    pub enemy: SlimeConfig,
    /// Joystick thresholds
    #[serde(default)]
    pub input: InputConfig,
    /// Player weapon
    #[serde(default)]
    pub weapon: WeaponConfig,
    /// Headless demo run
    #[serde(default)]
    pub demo: DemoConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`P2D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // P2D_PHYSICS__GRAVITY=2.0 -> physics.gravity = 2.0
        figment = figment.merge(Env::prefixed("P2D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Everything the game world needs, gathered from the sections above
    pub fn to_world_config(&self) -> WorldConfig {
        WorldConfig {
            physics: self.physics.to_physics_config(),
            gravity: self.physics.gravity,
            tile_size: self.physics.tile_size,
            player: self.player.clone(),
            slime: self.enemy.clone(),
            input: self.input.clone(),
            weapon: self.weapon.clone(),
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity multiplier per frame
    pub damping: f32,
    /// Cap on unit-step correction loops
    pub max_correction_steps: u32,
    /// Vertical slack when checking what sits on a grabbed ledge
    pub ledge_stack_margin: f32,
    /// Tile edge length, used for prefab sizes
    pub tile_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let physics = plat2d_core::PhysicsConfig::default();
        Self {
            gravity: 1.4,
            damping: physics.damping,
            max_correction_steps: physics.max_correction_steps,
            ledge_stack_margin: physics.ledge_stack_margin,
            tile_size: plat2d_core::TILE_SIZE,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's config
    pub fn to_physics_config(&self) -> plat2d_core::PhysicsConfig {
        plat2d_core::PhysicsConfig {
            damping: self.damping,
            max_correction_steps: self.max_correction_steps,
            ledge_stack_margin: self.ledge_stack_margin,
        }
    }
}

/// Headless demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to simulate
    pub frames: u32,
    /// Milliseconds per frame
    pub dt_ms: f32,
    /// Viewport size around the player
    pub view_width: f32,
    pub view_height: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt_ms: 16.0,
            view_width: 960.0,
            view_height: 540.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log a body summary every this many frames (0 = never)
    pub report_interval: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 60,
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.physics.gravity, 1.4);
        assert_eq!(config.physics.max_correction_steps, 512);
        assert_eq!(config.weapon.rpm, 600.0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("gravity"));
        assert!(toml.contains("jump_force"));
        assert!(toml.contains("crouch_threshold"));
    }

    #[test]
    fn test_to_world_config() {
        let mut config = AppConfig::default();
        config.physics.gravity = 2.0;
        config.physics.damping = 0.8;
        config.enemy.max_speed = 3.0;

        let world = config.to_world_config();
        assert_eq!(world.gravity, 2.0);
        assert_eq!(world.physics.damping, 0.8);
        assert_eq!(world.slime.max_speed, 3.0);
        assert_eq!(world.tile_size, 48.0);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[player]\njump_force = 8.0\n").unwrap();
        assert_eq!(config.player.jump_force, 8.0);
        assert_eq!(config.player.walk_max_speed, 3.0);
        assert_eq!(config.demo.frames, 600);
    }

    #[test]
    fn test_missing_dir_gives_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.physics.tile_size, 48.0);
    }
}
