use std::cell::Cell;
use std::rc::Rc;

use placement_core::{
    CompletionTrigger, GoalZone, ItemId, ItemState, PlacementError, PlacementRegistry, Position,
    PuzzleState, ReleaseOutcome,
};
use proptest::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn counter() -> (CompletionTrigger, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (CompletionTrigger::new(move || c.set(c.get() + 1)), count)
}

/// i1 -> A = (10, 10, 5, 5), i2 -> B = (20, 20, 5, 5)
fn puzzle_ab() -> (PlacementRegistry, Rc<Cell<u32>>) {
    let mut builder = PlacementRegistry::builder();
    builder
        .register_item("i1", GoalZone::new(10.0, 10.0, 5.0, 5.0).unwrap())
        .unwrap();
    builder
        .register_item("i2", GoalZone::new(20.0, 20.0, 5.0, 5.0).unwrap())
        .unwrap();
    let (trigger, count) = counter();
    (builder.build(trigger).unwrap(), count)
}

#[test]
fn forward_order_completes_once() {
    init_tracing();
    let (mut reg, count) = puzzle_ab();
    reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap();
    let last = reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap();
    assert_eq!(last, ReleaseOutcome::Completed);
    assert_eq!(reg.puzzle_state(), PuzzleState::Complete);
    assert_eq!(count.get(), 1);
}

#[test]
fn reverse_order_completes_once() {
    init_tracing();
    let (mut reg, count) = puzzle_ab();
    reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap();
    assert_eq!(count.get(), 0);
    let last = reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap();
    assert_eq!(last, ReleaseOutcome::Completed);
    assert!(reg.all_ready());
    assert_eq!(count.get(), 1);
}

#[test]
fn release_outside_goal_is_not_placement() {
    let (mut reg, count) = puzzle_ab();
    assert_eq!(
        reg.on_drag_release("i1", Position::new(0.0, 0.0)).unwrap(),
        ReleaseOutcome::Missed
    );
    assert_eq!(reg.item_state("i1"), Some(ItemState::Pending));
    assert_eq!(count.get(), 0);
}

#[test]
fn release_on_goal_outline_is_not_placement() {
    let (mut reg, _) = puzzle_ab();
    for p in [(10.0, 12.0), (15.0, 12.0), (12.0, 10.0), (12.0, 15.0)] {
        assert_eq!(
            reg.on_drag_release("i1", p.into()).unwrap(),
            ReleaseOutcome::Missed
        );
    }
    assert_eq!(reg.item_state("i1"), Some(ItemState::Pending));
}

#[test]
fn unknown_id_leaves_state_untouched() {
    init_tracing();
    let (mut reg, count) = puzzle_ab();
    reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap();
    let err = reg
        .on_drag_release("ghost", Position::new(1.0, 1.0))
        .unwrap_err();
    assert_eq!(err, PlacementError::UnknownIdentity("ghost".to_string()));
    assert_eq!(reg.item_state("i1"), Some(ItemState::Placed));
    assert_eq!(reg.item_state("i2"), Some(ItemState::Pending));
    assert_eq!(reg.item_state("ghost"), None);
    assert_eq!(count.get(), 0);

    // The puzzle keeps going afterwards.
    reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn duplicate_events_after_completion_do_not_refire() {
    let (mut reg, count) = puzzle_ab();
    reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap();
    reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap();
    for _ in 0..3 {
        assert_eq!(
            reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap(),
            ReleaseOutcome::AlreadyPlaced
        );
        assert_eq!(
            reg.on_drag_release("i1", Position::new(-100.0, 4.0)).unwrap(),
            ReleaseOutcome::AlreadyPlaced
        );
    }
    assert_eq!(count.get(), 1);
    assert_eq!(reg.item_state("i1"), Some(ItemState::Placed));
}

#[test]
fn setup_validation_errors() {
    assert!(matches!(
        GoalZone::new(10.0, 10.0, 0.0, 5.0),
        Err(PlacementError::InvalidGoalZone { .. })
    ));
    let mut builder = PlacementRegistry::builder();
    let goal = GoalZone::new(10.0, 10.0, 5.0, 5.0).unwrap();
    builder.register_item("i1", goal).unwrap();
    assert_eq!(
        builder.register_item("i1", goal).unwrap_err(),
        PlacementError::DuplicateIdentity(ItemId::from("i1"))
    );
}

#[test]
fn single_item_puzzle_completes_on_first_placement() {
    let mut builder = PlacementRegistry::builder();
    builder
        .register_item("only", GoalZone::new(0.0, 0.0, 1.0, 1.0).unwrap())
        .unwrap();
    let (trigger, count) = counter();
    let mut reg = builder.build(trigger).unwrap();
    assert_eq!(reg.puzzle_state(), PuzzleState::InProgress);
    assert_eq!(
        reg.on_drag_release("only", Position::new(0.5, 0.5)).unwrap(),
        ReleaseOutcome::Completed
    );
    assert_eq!(count.get(), 1);
}

proptest! {
    #[test]
    fn any_release_order_fires_exactly_once(
        order in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle(),
        misses in proptest::collection::vec((0..6usize, -50.0f64..0.0), 0..10),
    ) {
        let mut builder = PlacementRegistry::builder();
        for i in 0..6 {
            let goal = GoalZone::new(i as f64 * 10.0, 0.0, 5.0, 5.0).unwrap();
            builder.register_item(format!("p{i}"), goal).unwrap();
        }
        let (trigger, count) = counter();
        let mut reg = builder.build(trigger).unwrap();

        for (i, x) in misses {
            let out = reg.on_drag_release(&format!("p{i}"), Position::new(x, 2.5)).unwrap();
            prop_assert_eq!(out, ReleaseOutcome::Missed);
        }
        for (n, &i) in order.iter().enumerate() {
            prop_assert_eq!(count.get(), 0);
            let centre = Position::new(i as f64 * 10.0 + 2.5, 2.5);
            let out = reg.on_drag_release(&format!("p{i}"), centre).unwrap();
            if n + 1 == order.len() {
                prop_assert_eq!(out, ReleaseOutcome::Completed);
            } else {
                prop_assert_eq!(out, ReleaseOutcome::Placed);
            }
            // Replaying the same release never changes anything.
            let again = reg.on_drag_release(&format!("p{i}"), centre).unwrap();
            prop_assert_eq!(again, ReleaseOutcome::AlreadyPlaced);
        }
        prop_assert_eq!(count.get(), 1);
        prop_assert!(reg.all_ready());
    }

    #[test]
    fn containment_is_strict(
        min_x in -100.0f64..100.0,
        min_y in -100.0f64..100.0,
        w in 0.5f64..50.0,
        h in 0.5f64..50.0,
        fx in 0.01f64..0.99,
        fy in 0.01f64..0.99,
    ) {
        let goal = GoalZone::new(min_x, min_y, w, h).unwrap();
        prop_assert!(goal.contains(min_x + w * fx, min_y + h * fy));
        prop_assert!(!goal.contains(min_x, min_y + h * fy));
        prop_assert!(!goal.contains(goal.max_x(), min_y + h * fy));
        prop_assert!(!goal.contains(min_x + w * fx, min_y));
        prop_assert!(!goal.contains(min_x + w * fx, goal.max_y()));
    }
}
