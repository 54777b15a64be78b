//! Unit tests for the engine facade.

use super::*;
use std::sync::{Arc, Mutex};

fn engine() -> PaneEngine {
    PaneEngine::new(QuadviewConfig::default(), Size::new(1200.0, 800.0))
}

fn engine_with_panes(n: usize) -> (PaneEngine, Vec<PaneId>) {
    let mut eng = engine();
    let ids = (0..n).map(|_| eng.add_pane().unwrap()).collect();
    (eng, ids)
}

#[test]
fn test_single_pane_tiled_fills_inner_area() {
    // Scenario A.
    let (eng, ids) = engine_with_panes(1);
    assert_eq!(eng.frame(ids[0]), Some(Rect::new(16.0, 40.0, 1168.0, 744.0)));
}

#[test]
fn test_four_panes_tiled_grid() {
    // Scenario B.
    let (eng, ids) = engine_with_panes(4);
    let rects: Vec<Rect> = ids.iter().map(|id| eng.frame(*id).unwrap()).collect();
    for r in &rects {
        assert_eq!(r.size(), Size::new(576.0, 364.0));
    }
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            let disjoint =
                a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y;
            assert!(disjoint, "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn test_focused_primary_dominates() {
    // Scenario C.
    let (mut eng, ids) = engine_with_panes(3);
    eng.set_display_configuration(DisplayConfiguration::Focused);

    let primary = eng.frame(ids[0]).unwrap();
    for id in &ids[1..] {
        let r = eng.frame(*id).unwrap();
        assert!(primary.width * primary.height >= r.width * r.height);
        assert!(r.width >= 100.0 && r.height >= 100.0);
    }
}

#[test]
fn test_resize_clamps_to_minimum() {
    // Scenario D.
    let (mut eng, ids) = engine_with_panes(2);
    let id = ids[0];

    assert!(eng.begin_pane_resize(id));
    let size = eng.update_pane_resize(id, Point::new(-10000.0, -10000.0));
    assert_eq!(size, Some(Size::new(100.0, 100.0)));
    assert!(eng.end_pane_resize(id));
    assert_eq!(eng.frame(id).unwrap().size(), Size::new(100.0, 100.0));
}

#[test]
fn test_cycle_round_trip_restores_primary() {
    // Scenario E: three tiled panes have non-collinear centers.
    let (mut eng, ids) = engine_with_panes(3);
    let original = eng.order().to_vec();
    let original_frames: Vec<Rect> = ids.iter().map(|id| eng.frame(*id).unwrap()).collect();

    eng.cycle_panes(CycleDirection::Clockwise);
    eng.cycle_panes(CycleDirection::Clockwise);
    eng.cycle_panes(CycleDirection::CounterClockwise);
    eng.cycle_panes(CycleDirection::CounterClockwise);

    assert_eq!(eng.order()[0], original[0]);
    for (id, frame) in ids.iter().zip(original_frames) {
        assert_eq!(eng.frame(*id), Some(frame));
    }
}

#[test]
fn test_add_pane_capacity() {
    let (mut eng, _) = engine_with_panes(4);
    assert!(matches!(
        eng.add_pane(),
        Err(EngineError::CapacityExceeded { max: 4 })
    ));
    assert_eq!(eng.pane_count(), 4);
}

#[test]
fn test_add_pane_in_manual_mode_places_only_new_pane() {
    let (mut eng, ids) = engine_with_panes(1);
    eng.set_display_configuration(DisplayConfiguration::Manual);
    eng.begin_pane_drag(ids[0]);
    eng.update_pane_drag(ids[0], Point::new(484.0, 260.0));
    eng.end_pane_drag(ids[0]);
    let moved = Rect::new(500.0, 300.0, 1168.0, 744.0);
    assert_eq!(eng.frame(ids[0]), Some(moved));

    let second = eng.add_pane().unwrap();
    // Existing manual frame untouched; new pane takes its tiled cell.
    assert_eq!(eng.frame(ids[0]), Some(moved));
    assert_eq!(
        eng.frame(second),
        Some(Rect::new(608.0, 250.0, 576.0, 324.0))
    );
}

#[test]
fn test_remove_pane_is_silent_for_unknown_id() {
    let (mut eng, ids) = engine_with_panes(2);
    eng.remove_pane(PaneId(999));
    assert_eq!(eng.pane_count(), 2);

    eng.remove_pane(ids[0]);
    assert_eq!(eng.order(), &ids[1..]);
    assert!(eng.frame(ids[0]).is_none());
    // Survivor relayouts to the full inner area.
    assert_eq!(eng.frame(ids[1]), Some(Rect::new(16.0, 40.0, 1168.0, 744.0)));
}

#[test]
fn test_remove_pane_notifies_detach_listener() {
    let (mut eng, ids) = engine_with_panes(2);
    let detached = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&detached);
    eng.add_detach_listener(move |id| sink.lock().unwrap().push(id));

    eng.remove_pane(ids[1]);
    eng.remove_pane(ids[1]); // silent repeat must not re-notify
    assert_eq!(*detached.lock().unwrap(), vec![ids[1]]);
}

#[test]
fn test_remove_pane_cancels_gesture() {
    let (mut eng, ids) = engine_with_panes(2);
    assert!(eng.begin_pane_drag(ids[0]));
    eng.remove_pane(ids[0]);
    // Gesture gone: another pane can start a drag at once.
    assert!(eng.begin_pane_drag(ids[1]));
}

#[test]
fn test_bring_to_front_swaps_tiled_slots() {
    let (mut eng, ids) = engine_with_panes(2);
    let left = eng.frame(ids[0]).unwrap();
    let right = eng.frame(ids[1]).unwrap();

    eng.bring_pane_to_front(ids[1]);
    assert_eq!(eng.order(), &[ids[1], ids[0]]);
    assert_eq!(eng.frame(ids[1]), Some(left));
    assert_eq!(eng.frame(ids[0]), Some(right));

    // Promoting the current primary changes nothing.
    eng.bring_pane_to_front(ids[1]);
    assert_eq!(eng.order(), &[ids[1], ids[0]]);
    assert_eq!(eng.frame(ids[1]), Some(left));
}

#[test]
fn test_bring_to_front_rotated_keeps_sizes_moves_centers() {
    let (mut eng, ids) = engine_with_panes(3);
    eng.set_display_configuration(DisplayConfiguration::Rotated3d);
    let before: Vec<Rect> = ids.iter().map(|id| eng.frame(*id).unwrap()).collect();
    let centers_x: Vec<f64> = before.iter().map(|r| r.center().x).collect();

    eng.bring_pane_to_front(ids[2]);
    assert_eq!(eng.order(), &[ids[2], ids[0], ids[1]]);
    // Promoted pane takes the index-0 center; sizes and y are untouched.
    let promoted = eng.frame(ids[2]).unwrap();
    assert!((promoted.center().x - centers_x[0]).abs() < 1e-9);
    assert_eq!(promoted.size(), before[2].size());
    assert_eq!(promoted.y, before[2].y);
}

#[test]
fn test_bring_to_front_layered_reapplies_cascade() {
    let (mut eng, ids) = engine_with_panes(3);
    eng.set_display_configuration(DisplayConfiguration::Layered);
    let primary_rect = eng.frame(ids[0]).unwrap();

    eng.bring_pane_to_front(ids[2]);
    assert_eq!(eng.frame(ids[2]), Some(primary_rect));
}

#[test]
fn test_cycle_rotated_rotates_order() {
    let (mut eng, ids) = engine_with_panes(3);
    eng.set_display_configuration(DisplayConfiguration::Rotated3d);

    eng.cycle_panes(CycleDirection::Clockwise);
    assert_eq!(eng.order(), &[ids[1], ids[2], ids[0]]);
    eng.cycle_panes(CycleDirection::CounterClockwise);
    assert_eq!(eng.order(), &[ids[0], ids[1], ids[2]]);
}

#[test]
fn test_cycle_requires_two_panes() {
    let (mut eng, ids) = engine_with_panes(1);
    let frame = eng.frame(ids[0]);
    eng.cycle_panes(CycleDirection::Clockwise);
    assert_eq!(eng.order(), &ids[..]);
    assert_eq!(eng.frame(ids[0]), frame);
}

#[test]
fn test_drag_switches_to_manual_and_commits_immediately() {
    let (mut eng, ids) = engine_with_panes(2);
    assert_eq!(eng.display_configuration(), DisplayConfiguration::Tiled);
    let start = eng.frame(ids[0]).unwrap();

    assert!(eng.begin_pane_drag(ids[0]));
    // Sub-threshold movement does not take over.
    assert!(eng.update_pane_drag(ids[0], Point::new(0.2, 0.0)).is_none());
    assert_eq!(eng.display_configuration(), DisplayConfiguration::Tiled);

    let live = eng.update_pane_drag(ids[0], Point::new(30.0, 20.0)).unwrap();
    assert_eq!(eng.display_configuration(), DisplayConfiguration::Manual);
    assert_eq!(live, Point::new(start.x + 30.0, start.y + 20.0));
    // Live origin is uncommitted.
    assert_eq!(eng.frame(ids[0]), Some(start));

    let committed = eng.end_pane_drag(ids[0]).unwrap();
    assert_eq!(committed, start.translated(30.0, 20.0));
    assert_eq!(eng.frame(ids[0]), Some(committed));
    assert_eq!(eng.frame_commit(ids[0]), Some(Commit::Immediate));
}

#[test]
fn test_drag_cannot_cross_toolbar_strip() {
    let (mut eng, ids) = engine_with_panes(1);
    eng.begin_pane_drag(ids[0]);
    eng.update_pane_drag(ids[0], Point::new(0.0, -5000.0));
    let committed = eng.end_pane_drag(ids[0]).unwrap();
    assert_eq!(committed.y, 40.0);
}

#[test]
fn test_resize_suppresses_animations_for_gesture() {
    let (mut eng, ids) = engine_with_panes(2);
    assert!(eng.begin_pane_resize(ids[0]));
    eng.update_pane_resize(ids[0], Point::new(50.0, 50.0));
    assert_eq!(eng.frame_commit(ids[0]), Some(Commit::Immediate));

    assert!(eng.end_pane_resize(ids[0]));
    // Suppression lifted: later animated writes stay animated.
    eng.set_display_configuration(DisplayConfiguration::Tiled);
    assert_eq!(eng.frame_commit(ids[0]), Some(Commit::Animated));
}

#[test]
fn test_resize_keeps_origin_fixed() {
    let (mut eng, ids) = engine_with_panes(1);
    let start = eng.frame(ids[0]).unwrap();
    eng.begin_pane_resize(ids[0]);
    eng.update_pane_resize(ids[0], Point::new(-100.0, -200.0));
    eng.end_pane_resize(ids[0]);

    let resized = eng.frame(ids[0]).unwrap();
    assert_eq!(resized.origin(), start.origin());
    assert_eq!(resized.size(), Size::new(start.width - 100.0, start.height - 200.0));
}

#[test]
fn test_busy_gesture_rejects_second() {
    let (mut eng, ids) = engine_with_panes(2);
    assert!(eng.begin_pane_drag(ids[0]));
    assert!(!eng.begin_pane_drag(ids[1]));
    assert!(!eng.begin_pane_resize(ids[1]));
}

#[test]
fn test_container_resize_recomputes_automatic_modes() {
    let (mut eng, ids) = engine_with_panes(1);
    eng.on_container_resize(Size::new(600.0, 400.0));
    // Inner area of the new container.
    assert_eq!(eng.frame(ids[0]), Some(Rect::new(16.0, 40.0, 568.0, 344.0)));
}

#[test]
fn test_container_resize_rescales_manual_frames() {
    let (mut eng, ids) = engine_with_panes(2);
    eng.set_display_configuration(DisplayConfiguration::Manual);
    let before: Vec<Rect> = ids.iter().map(|id| eng.frame(*id).unwrap()).collect();

    eng.on_container_resize(Size::new(600.0, 400.0));
    for (id, old) in ids.iter().zip(before) {
        let scaled = eng.frame(*id).unwrap();
        assert!((scaled.x - old.x / 2.0).abs() < 1e-9);
        assert!((scaled.width - (old.width / 2.0).max(100.0)).abs() < 1e-9);
        assert!(scaled.y >= 40.0);
    }
}

#[test]
fn test_container_resize_single_manual_pane_refits() {
    let (mut eng, ids) = engine_with_panes(1);
    eng.set_display_configuration(DisplayConfiguration::Manual);
    eng.begin_pane_drag(ids[0]);
    eng.update_pane_drag(ids[0], Point::new(100.0, 100.0));
    eng.end_pane_drag(ids[0]);

    eng.on_container_resize(Size::new(600.0, 400.0));
    // A lone manual pane snaps back to the full inner area.
    assert_eq!(eng.frame(ids[0]), Some(Rect::new(16.0, 40.0, 568.0, 344.0)));
}

#[test]
fn test_container_resize_ignores_degenerate_size() {
    let (mut eng, ids) = engine_with_panes(2);
    let before: Vec<Option<Rect>> = ids.iter().map(|id| eng.frame(*id)).collect();
    eng.on_container_resize(Size::new(0.0, 0.0));
    let after: Vec<Option<Rect>> = ids.iter().map(|id| eng.frame(*id)).collect();
    assert_eq!(before, after);
    assert_eq!(eng.container(), Size::new(1200.0, 800.0));
}

#[test]
fn test_demo_capture_apply_round_trip() {
    let (mut eng, ids) = engine_with_panes(3);
    eng.set_display_configuration(DisplayConfiguration::Focused);
    {
        let pane = eng.pane_mut(ids[1]).unwrap();
        pane.title = "News".into();
        pane.url = "https://example.com/news".into();
        pane.show_border = false;
    }
    let frames_before: Vec<Rect> = eng.order().iter().map(|id| eng.frame(*id).unwrap()).collect();
    let numbers_before: Vec<u8> = eng
        .order()
        .iter()
        .map(|id| eng.pane(*id).unwrap().display_number)
        .collect();

    let demo = eng.capture_demo_snapshot("workspace");
    eng.apply_demo_snapshot(&demo);

    assert_eq!(eng.display_configuration(), DisplayConfiguration::Focused);
    assert_eq!(eng.pane_count(), 3);
    // Fresh ids, same arrangement.
    let frames_after: Vec<Rect> = eng.order().iter().map(|id| eng.frame(*id).unwrap()).collect();
    assert_eq!(frames_after, frames_before);
    let numbers_after: Vec<u8> = eng
        .order()
        .iter()
        .map(|id| eng.pane(*id).unwrap().display_number)
        .collect();
    assert_eq!(numbers_after, numbers_before);

    let restored = eng.pane(eng.order()[1]).unwrap();
    assert_eq!(restored.title, "News");
    assert_eq!(restored.url, "https://example.com/news");
    assert!(!restored.show_border);
    assert!(!ids.contains(&restored.id));
}

#[test]
fn test_demo_apply_manual_restores_literal_frames() {
    let (mut eng, ids) = engine_with_panes(2);
    eng.set_display_configuration(DisplayConfiguration::Manual);
    eng.begin_pane_drag(ids[0]);
    eng.update_pane_drag(ids[0], Point::new(200.0, 100.0));
    eng.end_pane_drag(ids[0]);
    let moved = eng.frame(ids[0]).unwrap();

    let demo = eng.capture_demo_snapshot("manual");
    eng.apply_demo_snapshot(&demo);

    assert_eq!(eng.display_configuration(), DisplayConfiguration::Manual);
    assert_eq!(eng.frame(eng.order()[0]), Some(moved));
    assert_eq!(eng.frame_commit(eng.order()[0]), Some(Commit::Immediate));
}

#[test]
fn test_demo_apply_detaches_live_panes_and_caps_restore() {
    let (mut eng, ids) = engine_with_panes(2);
    let detached = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&detached);
    eng.add_detach_listener(move |id| sink.lock().unwrap().push(id));

    let mut demo = eng.capture_demo_snapshot("cap");
    let extra = demo.panes[0].clone();
    for _ in 0..4 {
        demo.panes.push(extra.clone());
    }
    eng.apply_demo_snapshot(&demo);

    assert_eq!(*detached.lock().unwrap(), ids);
    assert_eq!(eng.pane_count(), 4);
}

#[test]
fn test_demo_apply_clears_active_gesture() {
    let (mut eng, ids) = engine_with_panes(1);
    eng.begin_pane_resize(ids[0]);
    let demo = eng.capture_demo_snapshot("mid-gesture");
    eng.apply_demo_snapshot(&demo);

    let restored = eng.order()[0];
    assert!(eng.begin_pane_drag(restored));
    // Animation suppression from the abandoned resize was lifted.
    eng.end_pane_drag(restored);
    eng.set_display_configuration(DisplayConfiguration::Focused);
    assert_eq!(eng.frame_commit(restored), Some(Commit::Animated));
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        BringToFront(usize),
        Cycle(bool),
        SetMode(DisplayConfiguration),
        ResizeContainer(f64, f64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (0usize..4).prop_map(Op::Remove),
            (0usize..4).prop_map(Op::BringToFront),
            any::<bool>().prop_map(Op::Cycle),
            prop_oneof![
                Just(DisplayConfiguration::Manual),
                Just(DisplayConfiguration::Tiled),
                Just(DisplayConfiguration::Focused),
                Just(DisplayConfiguration::Rotated3d),
                Just(DisplayConfiguration::Layered),
            ]
            .prop_map(Op::SetMode),
            (400.0f64..3000.0, 300.0f64..2000.0)
                .prop_map(|(w, h)| Op::ResizeContainer(w, h)),
        ]
    }

    proptest! {
        #[test]
        fn test_engine_invariants_under_random_ops(
            ops in prop::collection::vec(op_strategy(), 1..40)
        ) {
            let mut eng = engine();
            for op in ops {
                match op {
                    Op::Add => {
                        let _ = eng.add_pane();
                    }
                    Op::Remove(i) => {
                        if let Some(id) = eng.order().get(i).copied() {
                            eng.remove_pane(id);
                        }
                    }
                    Op::BringToFront(i) => {
                        if let Some(id) = eng.order().get(i).copied() {
                            eng.bring_pane_to_front(id);
                        }
                    }
                    Op::Cycle(cw) => eng.cycle_panes(if cw {
                        CycleDirection::Clockwise
                    } else {
                        CycleDirection::CounterClockwise
                    }),
                    Op::SetMode(mode) => eng.set_display_configuration(mode),
                    Op::ResizeContainer(w, h) => eng.on_container_resize(Size::new(w, h)),
                }

                // At most four live panes, order a permutation of them.
                prop_assert!(eng.pane_count() <= 4);
                let mut seen = Vec::new();
                for id in eng.order() {
                    prop_assert!(eng.pane(*id).is_some());
                    prop_assert!(!seen.contains(id));
                    seen.push(*id);
                }

                // One frame per live pane, honoring toolbar and minimums.
                for id in eng.order() {
                    let frame = eng.frame(*id);
                    prop_assert!(frame.is_some());
                    let r = frame.unwrap();
                    prop_assert!(r.y >= 40.0 - 1e-9, "{:?}", r);
                    prop_assert!(r.width >= 100.0 - 1e-9, "{:?}", r);
                    prop_assert!(r.height >= 100.0 - 1e-9, "{:?}", r);
                }

                // Display numbers unique among live panes.
                let mut numbers: Vec<u8> = eng
                    .order()
                    .iter()
                    .map(|id| eng.pane(*id).unwrap().display_number)
                    .collect();
                numbers.sort_unstable();
                numbers.dedup();
                prop_assert_eq!(numbers.len(), eng.pane_count());
            }
        }
    }
}
