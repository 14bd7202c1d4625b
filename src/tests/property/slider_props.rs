//! Property-based tests for the slide-to-accept gesture.

use std::time::Duration;

use proptest::prelude::*;

use crate::core::gesture::{SlideToAccept, SliderConfig};

#[derive(Debug, Clone, Copy)]
enum Input {
    Start(f32),
    Drag(f32),
    Release,
    Nudge(f32),
    Tick(u64),
    Resize(f32),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (-20.0f32..120.0).prop_map(Input::Start),
        (-20.0f32..120.0).prop_map(Input::Drag),
        Just(Input::Release),
        (-30.0f32..30.0).prop_map(Input::Nudge),
        (0u64..400).prop_map(Input::Tick),
        (0.0f32..120.0).prop_map(Input::Resize),
    ]
}

proptest! {
    #[test]
    fn knob_stays_on_track(
        track in 0.0f32..120.0,
        inputs in prop::collection::vec(arb_input(), 0..60),
    ) {
        let mut slider = SlideToAccept::new(track, 5.0, SliderConfig::default());
        for input in inputs {
            match input {
                Input::Start(x) => slider.start(x),
                Input::Drag(x) => slider.drag_to(x),
                Input::Release => slider.release(),
                Input::Nudge(d) => slider.nudge(d),
                Input::Tick(ms) => {
                    slider.tick(Duration::from_millis(ms));
                }
                Input::Resize(w) => slider.set_track_width(w),
            }
            prop_assert!(slider.position() >= 0.0);
            prop_assert!(slider.position() <= slider.max_travel() + f32::EPSILON);
            prop_assert!((0.0..=1.0).contains(&slider.progress()));
        }
    }

    #[test]
    fn accept_notification_fires_once(
        track in 20.0f32..120.0,
        steps in prop::collection::vec(1.0f32..15.0, 1..30),
        ticks in prop::collection::vec(0u64..300, 1..40),
    ) {
        let mut slider = SlideToAccept::new(track, 5.0, SliderConfig::default());
        for step in steps {
            slider.nudge(step);
        }
        // Finish the slide if the nudges fell short.
        slider.nudge(track);
        prop_assert!(slider.is_accepted());

        let mut fired = 0;
        for ms in ticks {
            if slider.tick(Duration::from_millis(ms)) {
                fired += 1;
            }
        }
        if slider.tick(Duration::from_secs(1)) {
            fired += 1;
        }
        prop_assert_eq!(fired, 1);
        prop_assert!(!slider.tick(Duration::from_secs(1)));
    }

    #[test]
    fn release_below_threshold_snaps_back(track in 20.0f32..120.0, fraction in 0.0f32..0.85) {
        let mut slider = SlideToAccept::new(track, 5.0, SliderConfig::default());
        slider.start(0.0);
        slider.drag_to(slider.max_travel() * fraction);
        prop_assert!(!slider.is_accepted());
        slider.release();
        prop_assert_eq!(slider.position(), 0.0);
        prop_assert!(!slider.is_dragging());
    }
}
