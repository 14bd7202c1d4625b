//! Wizard Controller
//!
//! Single source of truth for wizard progression. Owns the step content, the
//! [`WizardState`] and the caller-supplied hooks, and applies the four
//! navigation operations:
//!
//! | Operation      | Guard                                                    |
//! |----------------|----------------------------------------------------------|
//! | `go_back`      | `current_step > 1`                                       |
//! | `go_next`      | not last step, predicate(current_step)                   |
//! | `jump_to(j)`   | `j != current_step`, `1 <= j <= total`, indicators on    |
//! | `complete`     | last step, predicate(current_step)                       |
//!
//! Guards fail silently. Every operation is a no-op once the wizard is
//! completed. The validation predicate is always evaluated for the step being
//! left, never for the target step.

use super::indicator::StepIndicator;
use super::types::{
    Direction, PrimaryAction, PrimaryButton, WizardError, WizardLabels, WizardPosition,
    WizardState,
};

/// Predicate consulted before leaving a step forward. Receives the 1-based
/// index of the step being left.
pub type StepValidator = Box<dyn Fn(usize) -> bool>;

/// Called with the new step index after every non-terminal transition.
pub type StepChangeHook = Box<dyn FnMut(usize)>;

/// Called once when the wizard completes, with the state as it was just
/// before the terminal transition was applied.
pub type CompletionHook = Box<dyn FnMut(&WizardState)>;

// ============================================================================
// Builder
// ============================================================================

/// Construction-time configuration for a [`WizardController`].
pub struct WizardBuilder<S> {
    steps: Vec<S>,
    initial_step: usize,
    labels: WizardLabels,
    validator: Option<StepValidator>,
    on_step_change: Option<StepChangeHook>,
    on_complete: Option<CompletionHook>,
    disable_step_indicators: bool,
}

impl<S> WizardBuilder<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self {
            steps,
            initial_step: 1,
            labels: WizardLabels::default(),
            validator: None,
            on_step_change: None,
            on_complete: None,
            disable_step_indicators: false,
        }
    }

    pub fn initial_step(mut self, step: usize) -> Self {
        self.initial_step = step;
        self
    }

    pub fn labels(mut self, labels: WizardLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn validator(mut self, validator: impl Fn(usize) -> bool + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn on_step_change(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.on_step_change = Some(Box::new(hook));
        self
    }

    pub fn on_complete(mut self, hook: impl FnMut(&WizardState) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn disable_step_indicators(mut self, disabled: bool) -> Self {
        self.disable_step_indicators = disabled;
        self
    }

    pub fn build(self) -> Result<WizardController<S>, WizardError> {
        let state = WizardState::new(self.initial_step, self.steps.len())?;
        log::debug!(
            "Wizard built: {} steps, starting at step {}",
            state.total_steps,
            state.current_step
        );
        Ok(WizardController {
            steps: self.steps,
            state,
            labels: self.labels,
            validator: self.validator,
            on_step_change: self.on_step_change,
            on_complete: self.on_complete,
            disable_step_indicators: self.disable_step_indicators,
        })
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Stepped wizard over step content `S`.
pub struct WizardController<S> {
    steps: Vec<S>,
    state: WizardState,
    labels: WizardLabels,
    validator: Option<StepValidator>,
    on_step_change: Option<StepChangeHook>,
    on_complete: Option<CompletionHook>,
    disable_step_indicators: bool,
}

impl<S> WizardController<S> {
    // ── Read side ───────────────────────────────────────────────────────

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.state.total_steps
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn position(&self) -> WizardPosition {
        self.state.position()
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    pub fn is_last_step(&self) -> bool {
        self.state.is_last_step()
    }

    pub fn labels(&self) -> &WizardLabels {
        &self.labels
    }

    pub fn step_indicators_disabled(&self) -> bool {
        self.disable_step_indicators
    }

    /// Content of the visible step, `None` once completed.
    pub fn current_content(&self) -> Option<&S> {
        if self.state.completed {
            return None;
        }
        self.steps.get(self.state.current_step - 1)
    }

    pub fn current_content_mut(&mut self) -> Option<&mut S> {
        if self.state.completed {
            return None;
        }
        self.steps.get_mut(self.state.current_step - 1)
    }

    /// Content of a step by 1-based index.
    pub fn content(&self, step: usize) -> Option<&S> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Whether the validation predicate accepts leaving the current step.
    pub fn current_step_valid(&self) -> bool {
        self.validator
            .as_ref()
            .map_or(true, |validate| validate(self.state.current_step))
    }

    pub fn can_go_back(&self) -> bool {
        !self.state.completed && self.state.current_step > 1
    }

    pub fn can_go_next(&self) -> bool {
        !self.state.completed
            && self.state.current_step < self.state.total_steps
            && self.current_step_valid()
    }

    pub fn can_complete(&self) -> bool {
        self.state.is_last_step() && self.current_step_valid()
    }

    /// The back button is hidden on the first step and after completion.
    pub fn show_back_button(&self) -> bool {
        self.can_go_back()
    }

    /// The footer disappears once the wizard is completed.
    pub fn show_footer(&self) -> bool {
        !self.state.completed
    }

    /// Descriptor for the footer's primary button.
    pub fn primary_button(&self) -> PrimaryButton {
        if self.state.is_last_step() {
            PrimaryButton {
                action: PrimaryAction::Complete,
                label: self.labels.complete.clone(),
                enabled: self.current_step_valid(),
            }
        } else {
            PrimaryButton {
                action: PrimaryAction::Continue,
                label: self.labels.next.clone(),
                enabled: !self.state.completed && self.current_step_valid(),
            }
        }
    }

    /// One indicator per step, in order.
    pub fn indicators(&self) -> Vec<StepIndicator> {
        (1..=self.state.total_steps)
            .map(|step| {
                StepIndicator::new(step, &self.state, !self.disable_step_indicators)
            })
            .collect()
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Move one step back. Returns whether the transition was applied.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.state.direction = Direction::Backward;
        self.update_step(self.state.current_step - 1);
        true
    }

    /// Move one step forward if the current step validates.
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            log::trace!(
                "go_next refused on step {} of {}",
                self.state.current_step,
                self.state.total_steps
            );
            return false;
        }
        self.state.direction = Direction::Forward;
        self.update_step(self.state.current_step + 1);
        true
    }

    /// Jump directly to `target`, skipping intermediate validation.
    pub fn jump_to(&mut self, target: usize) -> bool {
        if self.state.completed
            || self.disable_step_indicators
            || target == self.state.current_step
            || target == 0
            || target > self.state.total_steps
        {
            return false;
        }
        self.state.direction = Direction::between(self.state.current_step, target);
        self.update_step(target);
        true
    }

    /// Finish the wizard from the last step.
    ///
    /// The completion hook runs first, then the state moves to the completed
    /// pseudo-state. Any asynchronous work the hook starts is not awaited.
    pub fn complete(&mut self) -> bool {
        if !self.can_complete() {
            return false;
        }
        if let Some(hook) = self.on_complete.as_mut() {
            hook(&self.state);
        }
        self.state.direction = Direction::Forward;
        self.state.current_step = self.state.total_steps + 1;
        self.state.completed = true;
        log::info!("Wizard completed after {} steps", self.state.total_steps);
        true
    }

    /// Footer primary button: complete on the last step, otherwise go next.
    pub fn advance(&mut self) -> bool {
        if self.state.is_last_step() {
            self.complete()
        } else {
            self.go_next()
        }
    }

    fn update_step(&mut self, new_step: usize) {
        log::debug!(
            "Wizard step {} -> {} ({:?})",
            self.state.current_step,
            new_step,
            self.state.direction
        );
        self.state.current_step = new_step;
        if new_step <= self.state.total_steps {
            if let Some(hook) = self.on_step_change.as_mut() {
                hook(new_step);
            }
        }
    }
}
