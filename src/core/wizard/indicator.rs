//! Step indicator model.
//!
//! Each indicator reports its step's status relative to the current step and
//! whether clicking it may request a jump. Rendering lives in the front-end;
//! this is only the data the renderer needs.

use super::types::{StepStatus, WizardState};

/// Props for rendering one step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    /// 1-based step index.
    pub step: usize,
    /// Current step of the wizard at the time the indicator was built.
    pub current_step: usize,
    pub status: StepStatus,
    /// Clicking requests `jump_to(step)`.
    pub clickable: bool,
    /// Whether the connector after this step is filled. Always false for
    /// the last step, which has no connector.
    pub connector_complete: bool,
    pub is_last: bool,
}

impl StepIndicator {
    pub fn new(step: usize, state: &WizardState, indicators_enabled: bool) -> Self {
        Self {
            step,
            current_step: state.current_step,
            status: StepStatus::of(step, state.current_step),
            clickable: indicators_enabled && !state.completed && step != state.current_step,
            connector_complete: step < state.total_steps && state.current_step > step,
            is_last: step == state.total_steps,
        }
    }

    /// Jump target for a click, if the click should do anything.
    pub fn click_target(&self) -> Option<usize> {
        self.clickable.then_some(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current: usize, total: usize) -> WizardState {
        WizardState::new(current, total).unwrap()
    }

    #[test]
    fn test_indicator_status_and_click() {
        let s = state(2, 3);
        let first = StepIndicator::new(1, &s, true);
        let active = StepIndicator::new(2, &s, true);
        let last = StepIndicator::new(3, &s, true);

        assert_eq!(first.status, StepStatus::Complete);
        assert_eq!(first.click_target(), Some(1));
        assert!(first.connector_complete);

        assert_eq!(active.status, StepStatus::Active);
        assert_eq!(active.click_target(), None);
        assert!(!active.connector_complete);

        assert_eq!(last.status, StepStatus::Inactive);
        assert!(last.is_last);
        assert!(!last.connector_complete);
    }

    #[test]
    fn test_disabled_indicators_are_not_clickable() {
        let s = state(1, 3);
        let indicator = StepIndicator::new(3, &s, false);
        assert_eq!(indicator.click_target(), None);
    }

    #[test]
    fn test_completed_wizard_indicators_all_complete() {
        let mut s = state(3, 3);
        s.current_step = 4;
        s.completed = true;
        for step in 1..=3 {
            let indicator = StepIndicator::new(step, &s, true);
            assert_eq!(indicator.status, StepStatus::Complete);
            assert!(!indicator.clickable);
        }
    }
}
