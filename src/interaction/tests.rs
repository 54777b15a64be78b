//! Unit tests for the gesture state machine.

use super::*;

const TOOLBAR: f64 = 40.0;
const MIN: f64 = 100.0;

fn frame() -> Rect {
    Rect::new(100.0, 100.0, 400.0, 300.0)
}

#[test]
fn test_begin_drag_rejects_while_busy() {
    let mut ctl = InteractionController::new();
    assert!(ctl.begin_drag(PaneId(1), frame()));
    assert!(!ctl.begin_drag(PaneId(2), frame()));
    assert!(!ctl.begin_resize(PaneId(2), frame()));
    assert_eq!(ctl.active_pane(), Some(PaneId(1)));
}

#[test]
fn test_drag_below_threshold_is_ignored() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());

    assert!(ctl.drag_update(PaneId(1), Point::new(0.3, -0.4), TOOLBAR).is_none());
    // Ending a drag that never started commits nothing.
    assert!(ctl.end_drag(PaneId(1), TOOLBAR).is_none());
    assert!(ctl.is_idle());
}

#[test]
fn test_drag_reports_live_origin_and_commits() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());

    let live = ctl.drag_update(PaneId(1), Point::new(30.0, -20.0), TOOLBAR);
    assert_eq!(live, Some(Point::new(130.0, 80.0)));

    // Later, smaller delta wins: only the latest cumulative delta counts.
    let live = ctl.drag_update(PaneId(1), Point::new(10.0, 5.0), TOOLBAR);
    assert_eq!(live, Some(Point::new(110.0, 105.0)));

    let committed = ctl.end_drag(PaneId(1), TOOLBAR);
    assert_eq!(committed, Some(Rect::new(110.0, 105.0, 400.0, 300.0)));
    assert!(ctl.is_idle());
}

#[test]
fn test_drag_stays_active_after_returning_under_threshold() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());

    assert!(ctl.drag_update(PaneId(1), Point::new(5.0, 0.0), TOOLBAR).is_some());
    // Pointer wandered back near the start; the gesture stays live.
    assert!(ctl.drag_update(PaneId(1), Point::new(0.1, 0.0), TOOLBAR).is_some());
    let committed = ctl.end_drag(PaneId(1), TOOLBAR);
    assert_eq!(committed, Some(Rect::new(100.1, 100.0, 400.0, 300.0)));
}

#[test]
fn test_drag_clamps_to_toolbar_strip() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());

    let live = ctl.drag_update(PaneId(1), Point::new(0.0, -90.0), TOOLBAR);
    assert_eq!(live, Some(Point::new(100.0, 40.0)));

    let committed = ctl.end_drag(PaneId(1), TOOLBAR).unwrap();
    assert_eq!(committed.y, 40.0);
    assert_eq!(committed.x, 100.0);
}

#[test]
fn test_drag_update_ignores_other_panes() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());
    assert!(ctl.drag_update(PaneId(2), Point::new(50.0, 50.0), TOOLBAR).is_none());
    assert!(ctl.end_drag(PaneId(2), TOOLBAR).is_none());
    assert_eq!(ctl.active_pane(), Some(PaneId(1)));
}

#[test]
fn test_resize_floors_at_minimum() {
    let mut ctl = InteractionController::new();
    ctl.begin_resize(PaneId(1), frame());

    let size = ctl.resize_update(PaneId(1), Point::new(-500.0, 20.0), MIN);
    assert_eq!(size, Some(Size::new(100.0, 320.0)));
    assert!(ctl.end_resize(PaneId(1)));
    assert!(ctl.is_idle());
}

#[test]
fn test_resize_below_threshold_is_ignored() {
    let mut ctl = InteractionController::new();
    ctl.begin_resize(PaneId(1), frame());
    assert!(ctl.resize_update(PaneId(1), Point::new(0.2, 0.2), MIN).is_none());
    assert!(ctl.end_resize(PaneId(1)));
}

#[test]
fn test_end_resize_requires_matching_pane() {
    let mut ctl = InteractionController::new();
    ctl.begin_resize(PaneId(1), frame());
    assert!(!ctl.end_resize(PaneId(2)));
    assert!(!ctl.is_idle());
}

#[test]
fn test_cancel_pane_clears_matching_gesture_only() {
    let mut ctl = InteractionController::new();
    ctl.begin_drag(PaneId(1), frame());

    ctl.cancel_pane(PaneId(2));
    assert_eq!(ctl.active_pane(), Some(PaneId(1)));

    ctl.cancel_pane(PaneId(1));
    assert!(ctl.is_idle());
}

#[test]
fn test_reset_clears_any_gesture() {
    let mut ctl = InteractionController::new();
    ctl.begin_resize(PaneId(3), frame());
    ctl.reset();
    assert!(ctl.is_idle());
    assert!(ctl.begin_drag(PaneId(3), frame()));
}
