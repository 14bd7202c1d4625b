//! Property-based tests for the stepped wizard.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;

use crate::core::wizard::{
    Direction, TransitionConfig, TransitionEngine, WizardBuilder, WizardController, WizardPosition,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Back,
    Next,
    Jump(usize),
    Complete,
    Advance,
}

fn arb_op(max_step: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Back),
        5 => Just(Op::Next),
        2 => (0..=max_step + 2).prop_map(Op::Jump),
        1 => Just(Op::Complete),
        3 => Just(Op::Advance),
    ]
}

/// Total steps, a rejection mask for the predicate, and an operation list.
fn arb_run() -> impl Strategy<Value = (usize, Vec<bool>, Vec<Op>)> {
    (1usize..8).prop_flat_map(|total| {
        (
            Just(total),
            prop::collection::vec(any::<bool>(), total),
            prop::collection::vec(arb_op(total), 0..40),
        )
    })
}

fn apply(wizard: &mut WizardController<usize>, op: Op) -> bool {
    match op {
        Op::Back => wizard.go_back(),
        Op::Next => wizard.go_next(),
        Op::Jump(target) => wizard.jump_to(target),
        Op::Complete => wizard.complete(),
        Op::Advance => wizard.advance(),
    }
}

proptest! {
    #[test]
    fn current_step_stays_in_range((total, valid, ops) in arb_run()) {
        let mask = valid.clone();
        let mut wizard = WizardBuilder::new((1..=total).collect())
            .validator(move |step| mask[step - 1])
            .build()
            .unwrap();

        for op in ops {
            apply(&mut wizard, op);
            let step = wizard.current_step();
            prop_assert!(step >= 1 && step <= total + 1);
            prop_assert_eq!(step == total + 1, wizard.is_completed());
        }
    }

    #[test]
    fn direction_follows_applied_moves((total, valid, ops) in arb_run()) {
        let mask = valid.clone();
        let mut wizard = WizardBuilder::new((1..=total).collect())
            .validator(move |step| mask[step - 1])
            .build()
            .unwrap();

        for op in ops {
            let before = wizard.current_step();
            let direction_before = wizard.direction();
            if apply(&mut wizard, op) {
                let after = wizard.current_step();
                prop_assert_ne!(before, after);
                let expected = if after > before { Direction::Forward } else { Direction::Backward };
                prop_assert_eq!(wizard.direction(), expected);
            } else {
                prop_assert_eq!(wizard.current_step(), before);
                prop_assert_eq!(wizard.direction(), direction_before);
            }
        }
    }

    #[test]
    fn completion_hook_fires_once_from_last_step((total, valid, ops) in arb_run()) {
        let mask = valid.clone();
        let calls = Rc::new(Cell::new(0u32));
        let seen = calls.clone();
        let mut wizard = WizardBuilder::new((1..=total).collect())
            .validator(move |step| mask[step - 1])
            .on_complete(move |state| {
                assert_eq!(state.current_step, state.total_steps);
                assert!(!state.completed);
                seen.set(seen.get() + 1);
            })
            .build()
            .unwrap();

        for op in ops {
            apply(&mut wizard, op);
        }
        // Drive to the end through the footer button when every step validates.
        if valid.iter().all(|v| *v) {
            while wizard.advance() {}
            prop_assert!(wizard.is_completed());
        }

        let expected = u32::from(wizard.is_completed());
        prop_assert_eq!(calls.get(), expected);
        if wizard.is_completed() {
            for op in [Op::Back, Op::Next, Op::Jump(1), Op::Complete, Op::Advance] {
                prop_assert!(!apply(&mut wizard, op));
            }
            prop_assert_eq!(calls.get(), 1);
        }
    }

    #[test]
    fn forward_moves_only_leave_valid_steps((total, valid, ops) in arb_run()) {
        let mask = valid.clone();
        let mut wizard = WizardBuilder::new((1..=total).collect())
            .validator(move |step| mask[step - 1])
            .disable_step_indicators(true)
            .build()
            .unwrap();

        for op in ops {
            let before = wizard.current_step();
            if apply(&mut wizard, op) && (wizard.current_step() > before) {
                // With jumps disabled, every forward move passed the predicate.
                prop_assert!(valid[before - 1]);
            }
        }
    }

    #[test]
    fn transition_height_settles_on_target(
        heights in prop::collection::vec(1u16..40, 2..6),
        ticks in 1usize..30,
    ) {
        let total = heights.len();
        let mut wizard = WizardBuilder::new((1..=total).collect::<Vec<usize>>())
            .build()
            .unwrap();
        let mut engine = TransitionEngine::new(TransitionConfig::from_millis(200));
        engine.observe(wizard.state(), heights[0]);

        while wizard.go_next() {
            engine.observe(wizard.state(), heights[wizard.current_step() - 1]);
            for _ in 0..ticks {
                engine.advance(Duration::from_millis(16));
                let frame = engine.frame();
                prop_assert!(frame.height >= 0.0);
            }
        }
        engine.advance(Duration::from_millis(200));
        let frame = engine.frame();
        prop_assert!(frame.settled);
        prop_assert!(frame.exiting.is_none());
        prop_assert!((frame.height - f32::from(heights[total - 1])).abs() < 0.01);
        prop_assert_eq!(frame.entering.map(|l| l.step), Some(total));
        prop_assert_eq!(wizard.position(), WizardPosition::Step(total));
    }
}
