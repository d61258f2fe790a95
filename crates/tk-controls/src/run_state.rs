//! Running / paused state of a session.

/// Whether the tick driver advances the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    /// Flip between running and paused.
    pub fn toggle(&mut self) {
        *self = match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        tracing::info!(state = ?self, "run state toggled");
    }

    pub fn is_paused(self) -> bool {
        matches!(self, RunState::Paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        assert_eq!(RunState::default(), RunState::Running);
        assert!(!RunState::default().is_paused());
    }

    #[test]
    fn toggle_round_trip() {
        let mut state = RunState::Running;
        state.toggle();
        assert!(state.is_paused());
        state.toggle();
        assert_eq!(state, RunState::Running);
    }
}
