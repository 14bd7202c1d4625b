//! Transition Engine
//!
//! Presentation-only animation model for step changes. It observes the
//! controller's [`WizardState`] and produces [`TransitionFrame`]s:
//!
//! ```text
//!   forward:   entering  -1.0 ──▶ 0.0      exiting  0.0 ──▶ +0.5 (fading)
//!   backward:  entering  +1.0 ──▶ 0.0      exiting  0.0 ──▶ -0.5 (fading)
//! ```
//!
//! Offsets are fractions of the content width. The container height eases
//! towards the entering step's natural height (0 once completed), so steps of
//! different length do not cause layout jumps. The first observed state is
//! shown without animation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::{Direction, WizardPosition, WizardState};

/// Default slide and height animation duration.
pub const DEFAULT_TRANSITION_MS: u64 = 400;

/// How far the exiting layer travels before it is gone.
const EXIT_TRAVEL: f32 = 0.5;

/// Animation timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub duration: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_TRANSITION_MS),
        }
    }
}

impl TransitionConfig {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(ms),
        }
    }
}

/// One rendered copy of a step's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub step: usize,
    /// Horizontal offset as a fraction of the content width.
    pub offset: f32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
}

/// Snapshot of the animation at the current instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Step that is (or is becoming) the interactive one.
    pub entering: Option<Layer>,
    /// Step on its way out, only present while animating.
    pub exiting: Option<Layer>,
    /// Animated container height in rows.
    pub height: f32,
    pub settled: bool,
}

#[derive(Debug, Clone, Copy)]
struct Slide {
    direction: Direction,
    exiting: Option<usize>,
    elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
struct HeightTween {
    from: f32,
    to: f32,
    elapsed: Duration,
}

/// Observes wizard state and animates between steps.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    config: TransitionConfig,
    shown: Option<WizardPosition>,
    slide: Option<Slide>,
    height: HeightTween,
}

impl TransitionEngine {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            shown: None,
            slide: None,
            height: HeightTween {
                from: 0.0,
                to: 0.0,
                elapsed: Duration::ZERO,
            },
        }
    }

    /// Report the wizard state and the natural height of its visible step.
    ///
    /// A changed position starts a slide. An unchanged position only
    /// retargets the height so it keeps tracking the visible content.
    pub fn observe(&mut self, state: &WizardState, content_height: u16) {
        let position = state.position();
        let target = match position {
            WizardPosition::Completed => 0.0,
            WizardPosition::Step(_) => f32::from(content_height),
        };

        match self.shown {
            None => {
                // Mount: show immediately.
                self.shown = Some(position);
                self.height = HeightTween {
                    from: target,
                    to: target,
                    elapsed: self.config.duration,
                };
            }
            Some(shown) if shown == position => {
                if (self.height.to - target).abs() > f32::EPSILON {
                    self.retarget_height(target);
                }
            }
            Some(shown) => {
                let exiting = match shown {
                    WizardPosition::Step(step) => Some(step),
                    WizardPosition::Completed => None,
                };
                self.begin(state.direction, exiting, position, target);
            }
        }
    }

    /// Start a slide from `exiting` to `entering`, easing the height to
    /// `target_height`.
    pub fn begin(
        &mut self,
        direction: Direction,
        exiting: Option<usize>,
        entering: WizardPosition,
        target_height: f32,
    ) {
        log::trace!("Transition {:?} -> {:?} ({:?})", exiting, entering, direction);
        self.shown = Some(entering);
        self.slide = Some(Slide {
            direction,
            exiting,
            elapsed: Duration::ZERO,
        });
        self.retarget_height(target_height);
    }

    /// Advance the animation clock.
    pub fn advance(&mut self, dt: Duration) {
        let duration = self.config.duration;
        if let Some(slide) = self.slide.as_mut() {
            slide.elapsed = (slide.elapsed + dt).min(duration);
            if slide.elapsed >= duration {
                self.slide = None;
            }
        }
        self.height.elapsed = (self.height.elapsed + dt).min(duration);
    }

    pub fn is_animating(&self) -> bool {
        self.slide.is_some() || self.height.elapsed < self.config.duration
    }

    /// Current frame.
    pub fn frame(&self) -> TransitionFrame {
        let entering_step = match self.shown {
            Some(WizardPosition::Step(step)) => Some(step),
            _ => None,
        };

        let (entering, exiting) = match self.slide {
            None => (
                entering_step.map(|step| Layer {
                    step,
                    offset: 0.0,
                    opacity: 1.0,
                }),
                None,
            ),
            Some(slide) => {
                let t = self.progress(slide.elapsed);
                let sign = slide.direction.sign();
                let entering = entering_step.map(|step| Layer {
                    step,
                    offset: -sign * (1.0 - t),
                    opacity: t,
                });
                let exiting = slide.exiting.map(|step| Layer {
                    step,
                    offset: sign * EXIT_TRAVEL * t,
                    opacity: 1.0 - t,
                });
                (entering, exiting)
            }
        };

        let h = self.progress(self.height.elapsed);
        let height = self.height.from + (self.height.to - self.height.from) * h;

        TransitionFrame {
            entering,
            exiting,
            height,
            settled: !self.is_animating(),
        }
    }

    fn retarget_height(&mut self, target: f32) {
        let current = self.frame().height;
        self.height = HeightTween {
            from: current,
            to: target,
            elapsed: Duration::ZERO,
        };
    }

    /// Eased progress in `[0, 1]` (ease-out cubic).
    fn progress(&self, elapsed: Duration) -> f32 {
        if self.config.duration.is_zero() {
            return 1.0;
        }
        let t = (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).clamp(0.0, 1.0);
        1.0 - (1.0 - t).powi(3)
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
