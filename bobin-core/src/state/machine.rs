//! State machine definition

use super::events::Event;

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationState {
    /// Entering turn count and wire diameter
    #[default]
    Idle,
    /// Positioning the carriage between the bobbin flanges
    Offset,
    /// Winding under pedal control
    Running,
    /// Pedal released mid-job
    Paused,
    /// Target turn count reached
    Finished,
}

impl OperationState {
    /// Check if the pedal and turn sensor are live in this state
    pub fn is_winding(&self) -> bool {
        matches!(self, OperationState::Running | OperationState::Paused)
    }

    /// Check if the parameter fields are on screen and editable
    pub fn accepts_input(&self) -> bool {
        matches!(self, OperationState::Idle)
    }

    /// Check if the jog keys drive the carriage
    pub fn allows_jog(&self) -> bool {
        matches!(self, OperationState::Offset)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use OperationState::*;

        match (self, event) {
            // Idle transitions
            (Idle, Confirm) => Offset,

            // Offset transitions
            (Offset, Confirm) => Running,

            // Running transitions
            (Running, PedalReleased) => Paused,
            (Running, TargetReached) => Finished,
            // Escape is deliberately unassigned while winding
            (Running, Escape) => Running,

            // Paused transitions
            (Paused, PedalPressed) => Running,
            (Paused, TargetReached) => Finished,

            // Finished transitions
            (Finished, Confirm) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_flow() {
        let state = OperationState::Idle;
        let offset = state.transition(Event::Confirm);
        assert_eq!(offset, OperationState::Offset);

        let running = offset.transition(Event::Confirm);
        assert_eq!(running, OperationState::Running);

        let finished = running.transition(Event::TargetReached);
        assert_eq!(finished, OperationState::Finished);

        let idle = finished.transition(Event::Confirm);
        assert_eq!(idle, OperationState::Idle);
    }

    #[test]
    fn test_pause_resume() {
        let paused = OperationState::Running.transition(Event::PedalReleased);
        assert_eq!(paused, OperationState::Paused);
        let running = paused.transition(Event::PedalPressed);
        assert_eq!(running, OperationState::Running);
    }

    #[test]
    fn test_pressing_pedal_while_running_stays() {
        assert_eq!(
            OperationState::Running.transition(Event::PedalPressed),
            OperationState::Running
        );
    }

    #[test]
    fn test_escape_is_ignored_everywhere() {
        for state in [
            OperationState::Idle,
            OperationState::Offset,
            OperationState::Running,
            OperationState::Paused,
            OperationState::Finished,
        ] {
            assert_eq!(state.transition(Event::Escape), state);
        }
    }

    #[test]
    fn test_pedal_ignored_outside_winding() {
        for state in [OperationState::Idle, OperationState::Offset, OperationState::Finished] {
            assert_eq!(state.transition(Event::PedalPressed), state);
            assert_eq!(state.transition(Event::PedalReleased), state);
        }
    }

    #[test]
    fn test_confirm_ignored_while_winding() {
        assert_eq!(
            OperationState::Running.transition(Event::Confirm),
            OperationState::Running
        );
        assert_eq!(
            OperationState::Paused.transition(Event::Confirm),
            OperationState::Paused
        );
    }

    #[test]
    fn test_state_predicates() {
        assert!(OperationState::Running.is_winding());
        assert!(OperationState::Paused.is_winding());
        assert!(!OperationState::Finished.is_winding());
        assert!(OperationState::Idle.accepts_input());
        assert!(OperationState::Offset.allows_jog());
        assert!(!OperationState::Running.allows_jog());
    }
}
