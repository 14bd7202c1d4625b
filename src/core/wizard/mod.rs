//! Stepped Wizard
//!
//! Walks a user through an ordered, fixed set of steps with validation
//! gating, directional transitions and a completion hook.
//!
//! # Overview
//!
//! - [`WizardController`]: owns the current step and applies navigation
//! - [`StepIndicator`]: per-step status and jump affordance
//! - [`TransitionEngine`]: slide/fade/height animation driven by state
//!
//! # State machine
//!
//! ```text
//!   Step(i) ──go_back──▶ Step(i-1)
//!   Step(i) ──go_next──▶ Step(i+1)          (guarded by predicate(i))
//!   Step(i) ──jump_to──▶ Step(j)            (not validated)
//!   Step(n) ──complete─▶ Completed          (guarded, terminal)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use dareup::core::wizard::WizardBuilder;
//!
//! let mut wizard = WizardBuilder::new(vec!["name", "college", "level"])
//!     .validator(|step| step != 2)
//!     .on_step_change(|step| log::info!("now on step {step}"))
//!     .on_complete(|_| log::info!("done"))
//!     .build()?;
//!
//! wizard.go_next();
//! assert_eq!(wizard.current_step(), 2);
//! ```

mod controller;
mod indicator;
mod transition;
mod types;

pub use controller::*;
pub use indicator::*;
pub use transition::*;
pub use types::*;
