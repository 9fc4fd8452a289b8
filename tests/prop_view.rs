//! Property-based tests for the board view and health bars.
//!
//! Run with: cargo test --release prop_view

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use eframe::egui::{Pos2, Rect, Vec2};
use proptest::prelude::*;

use turnview::window::{
    CELL_SIZE, HEALTH_BAR_BORDER, MAX_ZOOM_EXP, MIN_ZOOM_EXP, ViewTransform, WHEEL_STEP, cell_rect,
    health_bar,
};
use turnview::{Health, PluginOptions};

fn point() -> impl Strategy<Value = Pos2> {
    (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Pos2::new(x, y))
}

fn wheel() -> impl Strategy<Value = f32> {
    prop_oneof![
        Just(WHEEL_STEP),
        Just(-WHEEL_STEP),
        (-1200.0f32..1200.0),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// No sequence of wheel events pushes the zoom exponent out of range.
    #[test]
    fn prop_zoom_stays_clamped(
        events in prop::collection::vec((wheel(), point()), 0..60)
    ) {
        let mut view = ViewTransform::default();
        for (delta, cursor) in events {
            view.scroll(delta, cursor);
            prop_assert!(view.zoom_exp() >= MIN_ZOOM_EXP);
            prop_assert!(view.zoom_exp() <= MAX_ZOOM_EXP);
        }
    }

    /// The board point under the cursor stays under the cursor.
    #[test]
    fn prop_zoom_keeps_cursor_fixed(
        warmup in prop::collection::vec((wheel(), point()), 0..5),
        delta in wheel(),
        cursor in point(),
    ) {
        let mut view = ViewTransform::default();
        for (d, c) in warmup {
            view.scroll(d, c);
        }
        let under_cursor = view.invert(cursor);
        let magnitude = cursor.to_vec2().length() + view.shift().length();
        view.scroll(delta, cursor);
        let back = view.apply(under_cursor);

        let tolerance = 1e-3 * (1.0 + magnitude);
        prop_assert!((back - cursor).length() < tolerance, "{back:?} vs {cursor:?}");
    }

    /// A drag moves the view by exactly the pointer travel.
    #[test]
    fn prop_drag_accumulates(
        start in point(),
        moves in prop::collection::vec(point(), 1..20),
    ) {
        let mut view = ViewTransform::default();
        let before = view.shift();
        view.begin_drag(start);
        for pos in &moves {
            prop_assert!(view.pointer_moved(*pos));
        }
        view.end_drag();

        let end = *moves.last().unwrap();
        let expected = before + (end - start);
        prop_assert!((view.shift() - expected).length() < 1e-2);
        prop_assert!(!view.pointer_moved(start));
    }

    /// Moving the pointer without a drag never pans.
    #[test]
    fn prop_hover_does_not_pan(moves in prop::collection::vec(point(), 0..20)) {
        let mut view = ViewTransform::default();
        for pos in moves {
            prop_assert!(!view.pointer_moved(pos));
        }
        prop_assert_eq!(view.shift(), Vec2::ZERO);
    }

    /// The green segment is `track_width * h / m` wide.
    #[test]
    fn prop_health_bar_ratio(
        max in 1u32..10_000,
        hp_percent in 0u32..=100,
        x in 0u16..50,
        y in 0u16..50,
    ) {
        let hp = max * hp_percent / 100;
        let cell = cell_rect(x, y);
        let (track, fill) = health_bar(cell, Health::new(hp, max).fraction());

        #[allow(clippy::cast_precision_loss)]
        let expected = track.width() * hp as f32 / max as f32;
        prop_assert!((fill.width() - expected).abs() < 1e-2);
        prop_assert!((track.width() - (CELL_SIZE - 2.0 * HEALTH_BAR_BORDER)).abs() < 1e-3);
        prop_assert_eq!(fill.min, track.min);
        prop_assert!(cell.contains_rect(track));
    }

    /// Any non-negative finite turn time parses.
    #[test]
    fn prop_turn_time_parses(seconds in 0.0f64..1000.0) {
        let options = PluginOptions::try_parse(&format!("--turn-time {seconds}")).unwrap();
        prop_assert!((options.turn_time - seconds).abs() < 1e-9);
        let short = PluginOptions::try_parse(&format!("-t {seconds}")).unwrap();
        prop_assert_eq!(options, short);
    }
}

#[test]
fn test_health_bar_extremes() {
    let cell = Rect::from_min_size(Pos2::ZERO, Vec2::splat(CELL_SIZE));
    let (track, full) = health_bar(cell, Health::new(100, 100).fraction());
    assert!((full.width() - track.width()).abs() < f32::EPSILON);
    let (_, empty) = health_bar(cell, Health::new(0, 100).fraction());
    assert!(empty.width().abs() < f32::EPSILON);
}
