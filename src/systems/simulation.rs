//! Game simulation system
//!
//! Runs the frame loop for the headless demo:
//! - Viewport tracking around the player
//! - Stepping the world
//! - Tallying what happened for the log

use log::{debug, info};
use plat2d_core::{BodyFlags, FrameInput, FrameReport, GameWorld, Vec2, ViewRect};

use crate::config::{DebugConfig, DemoConfig};

/// Running totals over a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub frames: u32,
    pub shots: u32,
    pub kills: u32,
    pub unconverged: u32,
}

/// Drives a [`GameWorld`] one frame at a time
pub struct SimulationSystem {
    view_width: f32,
    view_height: f32,
    dt_ms: f32,
    report_interval: u32,
    /// Last place the view was centered, kept when the player is gone
    focus: Vec2,
    stats: SimulationStats,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(demo: &DemoConfig, debug: &DebugConfig) -> Self {
        Self {
            view_width: demo.view_width,
            view_height: demo.view_height,
            dt_ms: demo.dt_ms,
            report_interval: debug.report_interval,
            focus: Vec2::ZERO,
            stats: SimulationStats::default(),
        }
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// The view for the coming frame, centered on the player
    pub fn viewport(&mut self, world: &GameWorld) -> ViewRect {
        if let Some(body) = world.player().and_then(|key| world.body(key)) {
            self.focus = body.position;
        }
        ViewRect::centered(self.focus, self.view_width, self.view_height)
    }

    /// Run one simulation frame
    pub fn update(&mut self, world: &mut GameWorld, input: &FrameInput) -> FrameReport {
        let view = self.viewport(world);
        let report = world.step(input, &view, self.dt_ms);

        self.stats.frames += 1;
        self.stats.shots += report.shots.len() as u32;
        self.stats.kills += report.removed.len() as u32;
        self.stats.unconverged += report.unconverged.len() as u32;

        for (_, body) in &report.removed {
            debug!("frame {}: {} removed", self.stats.frames, body.label);
        }

        if self.report_interval > 0 && self.stats.frames % self.report_interval == 0 {
            self.log_player(world);
        }
        report
    }

    fn log_player(&self, world: &GameWorld) {
        match world.player().and_then(|key| world.body(key)) {
            Some(body) => info!(
                "frame {}: player at ({:.1}, {:.1}) vel ({:.2}, {:.2}){}{}",
                self.stats.frames,
                body.position.x,
                body.position.y,
                body.velocity.x,
                body.velocity.y,
                if body.flags.contains(BodyFlags::GROUNDED) { " grounded" } else { "" },
                if body.flags.contains(BodyFlags::ON_LEDGE) { " on ledge" } else { "" },
            ),
            None => info!("frame {}: no player", self.stats.frames),
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&DemoConfig::default(), &DebugConfig::default())
    }
}
