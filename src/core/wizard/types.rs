//! Wizard Domain Types
//!
//! Defines the value types shared by the stepped wizard:
//! - [`WizardState`]: authoritative progression state owned by the controller
//! - [`Direction`]: which way the last transition moved
//! - [`WizardPosition`]: a step or the terminal completed pseudo-state
//! - [`StepStatus`]: how a single step relates to the current position
//! - [`WizardError`]: construction-time configuration errors
//!
//! Navigation itself has no error type. A refused transition is a no-op and the
//! surrounding UI is expected to disable the control that would trigger it.

use serde::{Deserialize, Serialize};

// ============================================================================
// Direction / Position
// ============================================================================

/// Direction of the most recent transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Moving towards later steps (also the mount default).
    #[default]
    Forward,
    /// Moving towards earlier steps.
    Backward,
}

impl Direction {
    /// Direction implied by moving from `from` to `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Sign used by the transition engine (+1 forward, -1 backward).
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Position in the wizard state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum WizardPosition {
    /// On a step, 1-based.
    Step(usize),
    /// Terminal state reached via `complete()`.
    Completed,
}

/// Status of one step relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Active,
    Inactive,
}

impl StepStatus {
    /// Classify `step` against `current_step` (both 1-based).
    pub fn of(step: usize, current_step: usize) -> Self {
        if step == current_step {
            StepStatus::Active
        } else if step < current_step {
            StepStatus::Complete
        } else {
            StepStatus::Inactive
        }
    }
}

// ============================================================================
// WizardState
// ============================================================================

/// Progression state of a wizard.
///
/// `current_step` is 1-based. `current_step == total_steps + 1` is the
/// completed pseudo-state and is only reachable through `complete()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub total_steps: usize,
    pub direction: Direction,
    pub completed: bool,
}

impl WizardState {
    /// Create the mount-time state.
    pub fn new(initial_step: usize, total_steps: usize) -> Result<Self, WizardError> {
        if total_steps == 0 {
            return Err(WizardError::NoSteps);
        }
        if initial_step == 0 || initial_step > total_steps {
            return Err(WizardError::InitialStepOutOfRange {
                initial: initial_step,
                total: total_steps,
            });
        }
        Ok(Self {
            current_step: initial_step,
            total_steps,
            direction: Direction::Forward,
            completed: false,
        })
    }

    pub fn position(&self) -> WizardPosition {
        if self.completed {
            WizardPosition::Completed
        } else {
            WizardPosition::Step(self.current_step)
        }
    }

    pub fn is_last_step(&self) -> bool {
        !self.completed && self.current_step == self.total_steps
    }

    /// Progress through the wizard (0-100), counting finished steps.
    pub fn progress_percent(&self) -> u8 {
        let done = if self.completed {
            self.total_steps
        } else {
            self.current_step - 1
        };
        ((done as f32 / self.total_steps as f32) * 100.0) as u8
    }
}

// ============================================================================
// Labels / primary action
// ============================================================================

/// Footer button text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardLabels {
    pub back: String,
    pub next: String,
    pub complete: String,
}

impl Default for WizardLabels {
    fn default() -> Self {
        Self {
            back: "Back".to_string(),
            next: "Continue".to_string(),
            complete: "Complete".to_string(),
        }
    }
}

/// What the footer's primary button does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Continue,
    Complete,
}

/// Primary button descriptor: kind, label and whether it is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryButton {
    pub action: PrimaryAction,
    pub label: String,
    pub enabled: bool,
}

// ============================================================================
// Errors
// ============================================================================

/// Wizard configuration errors, raised only while building a controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Wizard needs at least one step")]
    NoSteps,

    #[error("Initial step {initial} is outside 1..={total}")]
    InitialStepOutOfRange { initial: usize, total: usize },
}
