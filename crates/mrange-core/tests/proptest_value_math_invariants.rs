//! Property-based invariant tests for slider value math.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. `constrain` output lies within `[min, max]`.
//! 2. With `step > 0`, output sits on the step grid anchored at `min`.
//! 3. `constrain` is idempotent.
//! 4. Precision rounding is idempotent.
//! 5. Out-of-range input clamps to exactly `min` or `max`.
//! 6. Percent conversions round-trip on non-degenerate ranges.
//! 7. Track fractions always lie in `[0, 1]`.
//! 8. `normalized` configurations always validate clean.

use mrange_core::config::SliderConfig;
use mrange_core::geometry::TrackBounds;
use mrange_core::value_math::{
    constrain, percent_to_value, round_to_precision, value_to_percent,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Integer-aligned configuration: (min, max, step), step may be zero.
fn grid_config() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000i32..1000, 1i32..2000, 0i32..50)
        .prop_map(|(min, span, step)| (f64::from(min), f64::from(min + span), f64::from(step)))
}

fn raw_value() -> impl Strategy<Value = f64> {
    -5000.0f64..5000.0
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. constrain bounds, grid alignment, idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn constrain_stays_in_bounds((min, max, step) in grid_config(), v in raw_value()) {
        let out = constrain(v, min, max, step, 0);
        prop_assert!(out >= min && out <= max, "{} not in [{}, {}]", out, min, max);
    }

    #[test]
    fn constrain_lands_on_step_grid((min, max, step) in grid_config(), v in raw_value()) {
        prop_assume!(step > 0.0);
        let out = constrain(v, min, max, step, 0);
        let steps = (out - min) / step;
        prop_assert_eq!(steps, steps.round(), "{} is not on the {}-grid from {}", out, step, min);
    }

    #[test]
    fn constrain_is_idempotent((min, max, step) in grid_config(), v in raw_value()) {
        let once = constrain(v, min, max, step, 0);
        let twice = constrain(once, min, max, step, 0);
        prop_assert_eq!(once, twice);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. precision rounding idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn precision_rounding_is_idempotent(v in -1.0e6f64..1.0e6, precision in 0u32..=6) {
        let once = round_to_precision(v, precision);
        prop_assert_eq!(once, round_to_precision(once, precision));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. monotonic clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_range_clamps_to_exact_bound(
        min in -1000i32..1000,
        steps in 1i32..100,
        step in 1i32..50,
        overshoot in 0.001f64..10_000.0,
    ) {
        let (min, step) = (f64::from(min), f64::from(step));
        let max = min + f64::from(steps) * step;
        prop_assert_eq!(constrain(max + overshoot, min, max, step, 0), max);
        prop_assert_eq!(constrain(min - overshoot, min, max, step, 0), min);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7. conversions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn percent_round_trip((min, max, _step) in grid_config(), v in raw_value()) {
        let back = percent_to_value(value_to_percent(v, min, max), min, max);
        prop_assert!((back - v).abs() <= 1e-9 * v.abs().max(1.0), "{} != {}", back, v);
    }

    #[test]
    fn track_fraction_is_unit(left in -500.0f64..500.0, width in 0.0f64..2000.0, x in -5000.0f64..5000.0) {
        let f = TrackBounds::new(left, width).fraction_at(x);
        prop_assert!((0.0..=1.0).contains(&f));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalized_config_has_no_problems_except_equal_bounds(
        min in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), -100.0f64..100.0],
        max in prop_oneof![Just(f64::NAN), -100.0f64..100.0],
        step in prop_oneof![Just(-1.0), Just(f64::NAN), 0.0f64..10.0],
        precision in 0u32..100,
    ) {
        let config = SliderConfig::new()
            .bounds(min, max)
            .step(step)
            .precision(precision)
            .normalized();
        prop_assert!(config.min <= config.max);
        if config.min < config.max {
            prop_assert!(config.validate().is_empty(), "{:?}", config.validate());
        }
    }
}
