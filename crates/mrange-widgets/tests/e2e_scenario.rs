#![forbid(unsafe_code)]

//! End-to-end scenarios on a step-5 slider over `[0, 100]`.

use mrange_core::config::SliderConfig;
use mrange_core::event::{InputEvent, KeyCode, KeyEvent, PointerEvent};
use mrange_core::geometry::TrackBounds;
use mrange_widgets::MultiRangeSlider;
use mrange_widgets::interaction::{IgnoredReason, InteractionOutcome};
use mrange_widgets::notifier::NotificationKind;
use pretty_assertions::assert_eq;
use web_time::Instant;

fn scenario_slider() -> MultiRangeSlider {
    let mut slider = MultiRangeSlider::new(
        SliderConfig::new()
            .bounds(0.0, 100.0)
            .step(5.0)
            .precision(0)
            .values([25.0, 75.0]),
    );
    // 400 px track starting at x = 100: raw value v sits at 100 + 4v.
    slider.set_track_bounds(TrackBounds::new(100.0, 400.0));
    slider
}

fn drag(slider: &mut MultiRangeSlider, thumb: usize, to_x: f64) -> Vec<f64> {
    let now = Instant::now();
    slider.handle_event(
        &InputEvent::PointerDown {
            thumb: Some(thumb),
            pointer: PointerEvent::new(1, 0.0),
        },
        now,
    );
    slider.handle_event(&InputEvent::PointerMove(PointerEvent::new(1, to_x)), now);
    slider.on_frame(now);
    let up = slider.handle_event(&InputEvent::PointerUp(PointerEvent::new(1, to_x)), now);
    up.notification.map(|n| n.values).unwrap_or_default()
}

#[test]
fn drag_to_raw_23_snaps_to_25() {
    let mut slider = scenario_slider();
    let committed = drag(&mut slider, 0, 100.0 + 4.0 * 23.0);
    assert_eq!(committed, vec![25.0, 75.0]);
    assert_eq!(slider.get_current_values(), vec![25.0, 75.0]);
}

#[test]
fn remove_first_thumb() {
    let mut slider = scenario_slider();
    assert!(slider.remove_thumb(0));
    assert_eq!(slider.get_current_values(), vec![75.0]);
}

#[test]
fn add_thumb_to_empty_set() {
    // No baseline was configured, so reset empties the slider.
    let mut slider = MultiRangeSlider::new(SliderConfig::new().bounds(0.0, 100.0));
    assert!(slider.reset());
    assert!(slider.get_current_values().is_empty());
    assert_eq!(slider.add_thumb(None), Some(0));
    assert_eq!(slider.get_current_values(), vec![50.0]);
}

#[test]
fn default_pair_without_values() {
    let slider = MultiRangeSlider::new(SliderConfig::new().bounds(0.0, 100.0));
    assert_eq!(slider.get_current_values(), vec![25.0, 75.0]);
}

#[test]
fn highlight_ignores_thumb_order() {
    let mut forward = scenario_slider();
    let mut backward = scenario_slider();
    forward.set_values(&[20.0, 80.0]);
    backward.set_values(&[80.0, 20.0]);
    let a = forward.highlight().expect("two thumbs");
    let b = backward.highlight().expect("two thumbs");
    assert_eq!(a, b);
    assert_eq!((a.start, a.end), (20.0, 80.0));
}

#[test]
fn crossing_thumbs_keeps_index_order() {
    let mut slider = scenario_slider();
    let committed = drag(&mut slider, 0, 100.0 + 4.0 * 90.0);
    assert_eq!(committed, vec![90.0, 75.0]);
    let span = slider.highlight().expect("two thumbs");
    assert_eq!((span.start, span.end), (75.0, 90.0));
}

#[test]
fn out_of_range_set_thumb_value_clamps_to_bounds() {
    let mut slider = scenario_slider();
    slider.set_thumb_value(0, -40.0);
    slider.set_thumb_value(1, 1e12);
    assert_eq!(slider.get_current_values(), vec![0.0, 100.0]);
}

#[test]
fn disabled_slider_ignores_everything() {
    let mut slider = scenario_slider();
    let commits = std::rc::Rc::new(std::cell::Cell::new(0));
    let hit = std::rc::Rc::clone(&commits);
    slider.subscribe(move |n| {
        if n.kind == NotificationKind::Commit {
            hit.set(hit.get() + 1);
        }
    });
    slider.disable();
    let before = slider.get_current_values();

    assert!(!slider.set_values(&[1.0, 2.0]));
    assert_eq!(slider.add_thumb(Some(10.0)), None);
    assert!(!slider.remove_thumb(0));
    assert!(!slider.set_thumb_value(0, 60.0));
    assert!(!slider.reset());

    let now = Instant::now();
    let press = slider.handle_event(
        &InputEvent::PointerDown {
            thumb: Some(0),
            pointer: PointerEvent::new(1, 0.0),
        },
        now,
    );
    assert_eq!(
        press.dispatch.log.outcome,
        InteractionOutcome::Ignored(IgnoredReason::Disabled)
    );
    slider.handle_event(
        &InputEvent::Key {
            thumb: 0,
            key: KeyEvent::new(KeyCode::End),
        },
        now,
    );

    assert_eq!(slider.get_current_values(), before);
    assert_eq!(commits.get(), 0);

    slider.enable();
    assert!(slider.set_thumb_value(0, 60.0));
    assert_eq!(commits.get(), 1);
}

#[test]
fn keyboard_walk_to_bounds() {
    let mut slider = scenario_slider();
    let now = Instant::now();
    let key = |code| InputEvent::Key {
        thumb: 0,
        key: KeyEvent::new(code),
    };
    for _ in 0..10 {
        slider.handle_event(&key(KeyCode::Left), now);
    }
    assert_eq!(slider.get_current_values(), vec![0.0, 75.0]);
    slider.handle_event(&key(KeyCode::End), now);
    assert_eq!(slider.get_current_values(), vec![100.0, 75.0]);
    assert_eq!(slider.stats().commits_emitted, 11);
    assert_eq!(slider.stats().live_emitted, 0);
}
