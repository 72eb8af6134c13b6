//! Property-based invariant tests for the thumb state.
//!
//! 1. `set_values(values())` leaves the snapshot unchanged.
//! 2. Out-of-range `set_thumb_value` yields exactly `min` or `max`.
//! 3. The highlight span does not depend on thumb order.
//! 4. Disabled state rejects every mutation.
//! 5. Every stored value is in bounds and on the step grid.
//! 6. Pointer fractions always land in bounds.

use mrange_core::config::SliderConfig;
use mrange_widgets::slider_state::SliderState;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Integer-aligned config with `max` on the step grid.
fn stepped_config() -> impl Strategy<Value = SliderConfig> {
    (-500i32..500, 1i32..100, 1i32..20).prop_map(|(min, steps, step)| {
        let min = f64::from(min);
        let step = f64::from(step);
        SliderConfig::new()
            .bounds(min, min + f64::from(steps) * step)
            .step(step)
    })
}

fn raw_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2000.0f64..2000.0, 0..8)
}

fn assert_on_grid(state: &SliderState) -> Result<(), TestCaseError> {
    let config = state.config();
    for &v in state.values() {
        prop_assert!(v >= config.min && v <= config.max, "{} out of bounds", v);
        let steps = (v - config.min) / config.step;
        prop_assert_eq!(steps, steps.round());
    }
    Ok(())
}

proptest! {
    #[test]
    fn set_values_round_trip_is_identity(config in stepped_config(), values in raw_values()) {
        let mut state = SliderState::new(config);
        state.set_values(&values);
        let snapshot = state.snapshot();
        state.set_values(&snapshot);
        prop_assert_eq!(state.values(), snapshot.as_slice());
    }

    #[test]
    fn out_of_range_thumb_value_hits_bound(
        config in stepped_config(),
        overshoot in 0.001f64..1e6,
        below in any::<bool>(),
    ) {
        let mut state = SliderState::new(config.clone().values([config.min]));
        let raw = if below { config.min - overshoot } else { config.max + overshoot };
        prop_assert!(state.set_thumb_value(0, raw));
        let expected = if below { config.min } else { config.max };
        prop_assert_eq!(state.value(0), Some(expected));
    }

    #[test]
    fn highlight_is_order_independent(values in prop::collection::vec(0.0f64..100.0, 2..8)) {
        let forward = SliderState::new(SliderConfig::new().values(values.clone()));
        let mut reversed_values = values;
        reversed_values.reverse();
        let reversed = SliderState::new(SliderConfig::new().values(reversed_values));
        prop_assert_eq!(forward.highlight(), reversed.highlight());
    }

    #[test]
    fn disabled_rejects_all_mutations(
        config in stepped_config(),
        values in raw_values(),
        index in 0usize..8,
        raw in -2000.0f64..2000.0,
        fraction in -1.0f64..2.0,
    ) {
        let mut state = SliderState::new(config);
        state.set_values(&values);
        state.set_disabled(true);
        let before = state.snapshot();

        prop_assert!(!state.set_values(&[raw]));
        prop_assert_eq!(state.add_thumb(Some(raw)), None);
        prop_assert!(!state.remove_thumb(index));
        prop_assert!(!state.set_thumb_value(index, raw));
        prop_assert!(!state.move_thumb_by_pointer(index, fraction));
        prop_assert!(!state.reset());
        prop_assert_eq!(state.values(), before.as_slice());
    }

    #[test]
    fn mutations_keep_values_on_grid(
        config in stepped_config(),
        values in raw_values(),
        extra in prop::option::of(-2000.0f64..2000.0),
        fraction in -1.0f64..2.0,
    ) {
        let mut state = SliderState::new(config);
        state.set_values(&values);
        assert_on_grid(&state)?;
        let index = state.add_thumb(extra).expect("enabled");
        assert_on_grid(&state)?;
        state.move_thumb_by_pointer(index, fraction);
        assert_on_grid(&state)?;
        state.remove_thumb(0);
        assert_on_grid(&state)?;
    }
}
