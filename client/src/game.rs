use log::{debug, info};
use shared::{Color, Phase};

/// Client-side mirror of the server's phase.
///
/// The client never decides a phase on its own; it only applies what the
/// server pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
    phase: Phase,
    background: Color,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Ready,
            background: Phase::Ready.background(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Applies a pushed phase. Returns whether anything changed.
    pub fn set_phase(&mut self, phase: Phase) -> bool {
        if phase == self.phase {
            debug!("Phase {:?} pushed again", phase);
            return false;
        }

        info!("Server moved game to {:?}", phase);
        self.phase = phase;
        self.background = phase.background();
        true
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}
