//! Scripted input for headless runs
//!
//! The demo has no devices to read, so it plays back a list of phases. Each
//! phase holds a set of semantic actions for a number of frames.

use plat2d_core::{Buttons, ControlIntent, FrameInput};

/// What the player is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    /// Pull the stick down
    Crouch,
    /// Hold "A"
    Jump,
    /// Hold "B": runs while moving, fires while standing still
    Action,
}

/// Maps semantic actions to the stick and buttons the core reads
pub struct InputMapper;

impl InputMapper {
    /// Combine held actions into one frame of input
    ///
    /// Opposite directions cancel out.
    pub fn map_actions(actions: &[InputAction]) -> FrameInput {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut buttons = Buttons::default();
        for action in actions {
            match action {
                InputAction::MoveLeft => x -= 1.0,
                InputAction::MoveRight => x += 1.0,
                InputAction::Crouch => y += 1.0,
                InputAction::Jump => buttons.jump = true,
                InputAction::Action => buttons.action = true,
            }
        }
        FrameInput::new(ControlIntent::new(x, y), buttons)
    }
}

/// One stretch of held input
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub frames: u32,
    pub actions: Vec<InputAction>,
}

/// A looping sequence of phases
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    phases: Vec<Phase>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase; zero-length phases are dropped
    pub fn then(mut self, frames: u32, actions: &[InputAction]) -> Self {
        if frames > 0 {
            self.phases.push(Phase {
                frames,
                actions: actions.to_vec(),
            });
        }
        self
    }

    /// Frames in one pass through the script
    pub fn len(&self) -> u32 {
        self.phases.iter().map(|p| p.frames).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Input for `frame`, wrapping around at the end of the script
    pub fn input_at(&self, frame: u32) -> FrameInput {
        let len = self.len();
        if len == 0 {
            return FrameInput::default();
        }
        let mut offset = frame % len;
        for phase in &self.phases {
            if offset < phase.frames {
                return InputMapper::map_actions(&phase.actions);
            }
            offset -= phase.frames;
        }
        FrameInput::default()
    }

    /// Walk right, hop a gap, shoot, crouch, then walk back
    pub fn demo() -> Self {
        use InputAction::*;
        Self::new()
            .then(30, &[])
            .then(90, &[MoveRight])
            .then(12, &[MoveRight, Jump])
            .then(60, &[MoveRight, Action])
            .then(40, &[Action])
            .then(30, &[Crouch])
            .then(120, &[MoveLeft])
            .then(18, &[Jump])
            .then(40, &[])
    }
}
