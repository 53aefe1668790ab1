//! Tests for the register file and save/restore stack.

use dviminer_core::{DviStack, RegisterState};

#[test]
fn test_motion_accumulates() {
    let mut regs = RegisterState::default();
    regs.move_right(100);
    regs.move_right(-30);
    regs.move_down(42);
    assert_eq!(regs.h, 70);
    assert_eq!(regs.v, 42);
}

#[test]
fn test_motion_wraps_at_register_width() {
    let mut regs = RegisterState::default();
    regs.h = i32::MAX;
    regs.move_right(1);
    assert_eq!(regs.h, i32::MIN);
}

#[test]
fn test_reset_to_origin_zeroes_all_six() {
    let mut regs = RegisterState {
        h: 1,
        v: 2,
        w: 3,
        x: 4,
        y: 5,
        z: 6,
    };
    regs.reset_to_origin();
    assert_eq!(regs, RegisterState::default());
}

#[test]
fn test_stack_discipline_round_trips() {
    // N pushes followed by N pops restore the state before the first push.
    let mut stack = DviStack::default();
    let mut regs = RegisterState::default();
    let before = regs;

    for i in 0..5 {
        stack.push(regs);
        regs.move_right(i * 10);
        regs.move_down(i);
    }
    assert_eq!(stack.depth(), 5);
    for _ in 0..5 {
        regs = stack.pop().expect("stack must hold a frame");
    }
    assert_eq!(regs, before);
    assert!(stack.is_empty());
}

#[test]
fn test_pop_on_empty_returns_none() {
    let mut stack = DviStack::default();
    assert!(stack.pop().is_none());
}

#[test]
fn test_clear_empties_stack() {
    let mut stack = DviStack::default();
    stack.push(RegisterState::default());
    stack.push(RegisterState::default());
    stack.clear();
    assert!(stack.is_empty());
    assert_eq!(stack.depth(), 0);
}
