//! End-to-end scenarios for the gesture lock
//!
//! These drive the widget through its public API only: raw and normalized
//! pointer input, countdown ticks, and the frames handed to the renderer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use lockpad_core::events::{MousePhase, TouchPhase};
use lockpad_core::{
    CellMark, ErrorOutcome, Frame, GestureLockBuilder, InputKind, LockConfig, LockPhase, Outcome,
    PartialLockConfig, Point, PointerEvent, RawInput, Size,
};

const OFFSET_Y: f32 = 200.0;

fn frames_sink() -> (Rc<RefCell<Vec<Frame>>>, impl FnMut(&Frame)) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    (frames, move |frame: &Frame| sink.borrow_mut().push(frame.clone()))
}

#[test]
fn grid_scenario_matches_layout_formula() {
    let (_, renderer) = frames_sink();
    let lock = GestureLockBuilder::new(LockConfig::default())
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    let grid = lock.grid();
    assert_eq!(grid.radius(), 20.0);
    assert_eq!(grid.cell(0).unwrap().center, Point::new(60.0, 60.0 + OFFSET_Y));
    let middle = grid.cell(4).unwrap();
    assert_eq!(middle.index, 4);
    assert_eq!(middle.center, Point::new(140.0, 140.0 + OFFSET_Y));
}

#[test]
fn correct_pattern_unlocks() {
    let successes = Rc::new(Cell::new(0u32));
    let seen = successes.clone();
    let (frames, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .validator(|attempt: &[usize]| attempt == [0, 1, 4])
        .on_success(move || {
            seen.set(seen.get() + 1);
            "Welcome back".to_string()
        })
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();
    lock.init();

    lock.handle(PointerEvent::down(60.0, 260.0));
    lock.handle(PointerEvent::moved(60.0, 260.0));
    lock.handle(PointerEvent::moved(140.0, 262.0));
    lock.handle(PointerEvent::moved(139.0, 341.0));
    assert_eq!(lock.attempt(), &[0, 1, 4]);

    assert_eq!(lock.handle(PointerEvent::up(139.0, 341.0)), Outcome::Unlocked);
    assert_eq!(successes.get(), 1);
    assert!(lock.attempt().is_empty());
    assert_eq!(lock.phase(), LockPhase::Idle);

    let frames = frames.borrow();
    let last = frames.last().unwrap();
    assert_eq!(last.title.text, "Welcome back");
    assert!(last.cells.iter().all(|cell| cell.mark == CellMark::Outline));
}

#[test]
fn wrong_pattern_locks_then_recovers() {
    let (frames, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .validator(|_: &[usize]| false)
        .on_error(|attempt: &[usize], failures: u32| {
            assert_eq!(attempt, [0, 3]);
            assert_eq!(failures, 1);
            ErrorOutcome::new("Locked {seconds}s").with_lockout(2)
        })
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    lock.handle(PointerEvent::down(60.0, 260.0));
    lock.handle(PointerEvent::moved(60.0, 260.0));
    lock.handle(PointerEvent::moved(60.0, 340.0));
    lock.handle(PointerEvent::up(60.0, 340.0));
    assert!(lock.is_locked());

    {
        let frames = frames.borrow();
        let failure = frames.last().unwrap();
        assert_eq!(failure.accent, lock.config().error_color);
        assert_eq!(failure.selected_count(), 2);
    }

    lock.tick();
    assert_eq!(lock.title(), "Locked 1s");
    assert_eq!(frames.borrow().last().unwrap().phase, LockPhase::Locked);

    lock.tick();
    assert_eq!(lock.title(), lock.config().text.title);
    assert_eq!(lock.phase(), LockPhase::Idle);
    assert_eq!(lock.lock_state().failure_count, 0);
    assert!(!lock.is_locked());
}

#[test]
fn three_second_lockout_takes_three_ticks() {
    let (_, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .on_error(|_: &[usize], _: u32| ErrorOutcome::new("wait").with_lockout(3))
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    lock.handle(PointerEvent::down(220.0, 420.0));
    lock.handle(PointerEvent::moved(220.0, 420.0));
    lock.handle(PointerEvent::up(220.0, 420.0));

    assert_eq!(lock.tick(), Outcome::CountingDown { remaining: 2 });
    assert_eq!(lock.tick(), Outcome::CountingDown { remaining: 1 });
    assert_eq!(lock.tick(), Outcome::LockoutExpired);
    assert_eq!(lock.phase(), LockPhase::Idle);
    assert_eq!(lock.lock_state().failure_count, 0);
}

#[test]
fn mouse_binding_ignores_hover() {
    let (_, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .input(InputKind::Mouse)
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    let hover = RawInput::Mouse {
        phase: MousePhase::Move,
        offset: Point::new(60.0, 260.0),
    };
    assert_eq!(lock.handle_raw(&hover), Outcome::Ignored);

    let press = RawInput::Mouse {
        phase: MousePhase::Down,
        offset: Point::new(60.0, 260.0),
    };
    assert_eq!(lock.handle_raw(&press), Outcome::Started);
    assert_eq!(lock.handle_raw(&hover), Outcome::Traced { added: 1 });
}

#[test]
fn touch_binding_translates_client_coordinates() {
    let validated = Rc::new(RefCell::new(Vec::new()));
    let sink = validated.clone();
    let (_, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .input(InputKind::Touch)
        .validator(move |attempt: &[usize]| {
            sink.borrow_mut().push(attempt.to_vec());
            true
        })
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    let origin = Point::new(20.0, 100.0);
    let touch = |phase, x: f32, y: f32| RawInput::Touch {
        phase,
        touches: std::iter::once(Point::new(x + origin.x, y + origin.y)).collect(),
        surface_origin: origin,
    };

    lock.handle_raw(&touch(TouchPhase::Start, 140.0, 260.0));
    lock.handle_raw(&touch(TouchPhase::Move, 140.0, 260.0));
    lock.handle_raw(&touch(TouchPhase::Move, 140.0, 340.0));
    lock.handle_raw(&touch(TouchPhase::Move, 140.0, 420.0));
    let end = RawInput::Touch {
        phase: TouchPhase::End,
        touches: Default::default(),
        surface_origin: origin,
    };
    assert_eq!(lock.handle_raw(&end), Outcome::Unlocked);
    assert_eq!(*validated.borrow(), vec![vec![1, 4, 7]]);
}

#[test]
fn touch_cancel_aborts_without_validation() {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let (_, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .input(InputKind::Touch)
        .validator(move |_: &[usize]| {
            seen.set(seen.get() + 1);
            true
        })
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();

    let at = |phase| RawInput::Touch {
        phase,
        touches: std::iter::once(Point::new(60.0, 260.0)).collect(),
        surface_origin: Point::ZERO,
    };
    lock.handle_raw(&at(TouchPhase::Start));
    lock.handle_raw(&at(TouchPhase::Move));
    assert_eq!(lock.attempt(), &[0]);

    assert_eq!(lock.handle_raw(&at(TouchPhase::Cancel)), Outcome::Aborted);
    assert_eq!(calls.get(), 0);
    assert!(lock.attempt().is_empty());
}

#[test]
fn options_object_resolves_like_the_widget_defaults() {
    let partial: PartialLockConfig = serde_json::from_str(
        r##"{
            "text": { "title": "Unlock", "offset_x": null, "textMaxWidth": 300 },
            "circle": { "num": 4 },
            "normalStyle": "#fafafa",
            "errorStyle": "crimson",
            "fontSize": "18px"
        }"##,
    )
    .unwrap();
    let config = LockConfig::resolve(partial).unwrap();

    assert_eq!(config.text.title, "Unlock");
    assert_eq!(config.text.max_width, 300.0);
    assert_eq!(config.text.offset_y, 100.0);
    assert_eq!(config.circle.num, 4);
    assert_eq!(config.font_size, 18.0);

    let (_, renderer) = frames_sink();
    let lock = GestureLockBuilder::new(config)
        .build(Size::new(360.0, 640.0), renderer)
        .unwrap();
    assert_eq!(lock.grid().len(), 16);
    assert_eq!(lock.grid().radius(), 20.0);
}

#[test]
fn elapsed_time_drives_lockout() {
    let (_, renderer) = frames_sink();
    let mut lock = GestureLockBuilder::new(LockConfig::default())
        .build(Size::new(280.0, 640.0), renderer)
        .unwrap();
    lock.start_lockout("{seconds} seconds left", 2);
    assert_eq!(lock.title(), "2 seconds left");

    for _ in 0..9 {
        lock.advance(Duration::from_millis(100));
    }
    assert_eq!(lock.title(), "2 seconds left");
    lock.advance(Duration::from_millis(100));
    assert_eq!(lock.title(), "1 seconds left");
    lock.advance(Duration::from_millis(1000));
    assert!(!lock.is_locked());
}
