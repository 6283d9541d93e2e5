//! State checker tests for kdbg-check

use crate::{Checked, ContextState, IrqState, StateChecker, Unchecked};

fn checker() -> StateChecker<Checked> {
    StateChecker::new()
}

#[test]
fn test_initial_state() {
    let chk = checker();
    assert_eq!(chk.state(), ContextState::INITIAL);
    assert!(!chk.is_locked());
    assert_eq!(chk.isr_depth(), 0);
    assert_eq!(chk.irq_state(), IrqState::Disabled);
    assert!(chk.is_enabled());
}

#[test]
fn test_thread_lock_cycle() {
    let mut chk = checker();
    chk.enable_interrupts();
    for _ in 0..3 {
        chk.lock();
        assert!(chk.is_locked());
        chk.check_class_locked();
        chk.unlock();
        assert!(!chk.is_locked());
    }
}

#[test]
#[should_panic(expected = "dbg_check_lock")]
fn test_lock_twice_halts() {
    let mut chk = checker();
    chk.lock();
    chk.lock();
}

#[test]
#[should_panic(expected = "dbg_check_unlock")]
fn test_unlock_unlocked_halts() {
    let mut chk = checker();
    chk.unlock();
}

#[test]
#[should_panic(expected = "dbg_check_lock")]
fn test_thread_lock_inside_isr_halts() {
    let mut chk = checker();
    chk.enter_isr();
    chk.lock();
}

#[test]
fn test_isr_lock_cycle() {
    let mut chk = checker();
    chk.enter_isr();
    chk.lock_from_isr();
    chk.check_class_interrupt();
    chk.unlock_from_isr();
    chk.leave_isr();
    assert_eq!(chk.state(), ContextState::INITIAL);
}

#[test]
#[should_panic(expected = "dbg_check_lock_from_isr")]
fn test_isr_lock_from_thread_halts() {
    let mut chk = checker();
    chk.lock_from_isr();
}

#[test]
#[should_panic(expected = "dbg_check_unlock_from_isr")]
fn test_isr_unlock_unlocked_halts() {
    let mut chk = checker();
    chk.enter_isr();
    chk.unlock_from_isr();
}

#[test]
fn test_enter_lock_leave_lock() {
    let mut chk = checker();
    chk.enter_lock();
    assert!(chk.is_locked());
    chk.leave_lock();
    assert!(!chk.is_locked());
}

#[test]
#[should_panic(expected = "dbg_enter_lock")]
fn test_enter_lock_twice_halts() {
    let mut chk = checker();
    chk.enter_lock();
    chk.enter_lock();
}

#[test]
#[should_panic(expected = "dbg_leave_lock")]
fn test_leave_lock_unmatched_halts() {
    let mut chk = checker();
    chk.leave_lock();
}

#[test]
fn test_interrupt_masking_transitions() {
    let mut chk = checker();
    chk.enable_interrupts();
    assert_eq!(chk.irq_state(), IrqState::Enabled);
    chk.suspend_interrupts();
    assert_eq!(chk.irq_state(), IrqState::Suspended);
    chk.disable_interrupts();
    assert_eq!(chk.irq_state(), IrqState::Disabled);
    chk.enable_interrupts();
    assert_eq!(chk.irq_state(), IrqState::Enabled);
}

#[test]
#[should_panic(expected = "dbg_check_enable")]
fn test_enable_twice_halts() {
    let mut chk = checker();
    chk.enable_interrupts();
    chk.enable_interrupts();
}

#[test]
#[should_panic(expected = "dbg_check_disable")]
fn test_disable_when_disabled_halts() {
    let mut chk = checker();
    chk.disable_interrupts();
}

#[test]
#[should_panic(expected = "dbg_check_suspend")]
fn test_suspend_twice_halts() {
    let mut chk = checker();
    chk.enable_interrupts();
    chk.suspend_interrupts();
    chk.suspend_interrupts();
}

#[test]
#[should_panic(expected = "dbg_check_disable")]
fn test_disable_while_locked_halts() {
    let mut chk = checker();
    chk.enable_interrupts();
    chk.lock();
    chk.disable_interrupts();
}

#[test]
#[should_panic(expected = "dbg_check_enable")]
fn test_enable_inside_isr_halts() {
    let mut chk = checker();
    chk.enter_isr();
    chk.enable_interrupts();
}

#[test]
fn test_isr_nesting_returns_to_previous_depth() {
    let mut chk = checker();
    chk.enter_isr();
    chk.enter_isr();
    assert_eq!(chk.isr_depth(), 2);
    chk.leave_isr();
    assert_eq!(chk.isr_depth(), 1);
    chk.leave_isr();
    assert_eq!(chk.isr_depth(), 0);
}

#[test]
#[should_panic(expected = "dbg_check_leave_isr")]
fn test_leave_isr_underflow_halts() {
    let mut chk = checker();
    chk.leave_isr();
}

#[test]
#[should_panic(expected = "dbg_check_enter_isr")]
fn test_enter_isr_locked_halts() {
    let mut chk = checker();
    chk.lock();
    chk.enter_isr();
}

#[test]
#[should_panic(expected = "dbg_check_enter_isr")]
fn test_isr_nesting_limit_halts() {
    let mut chk = StateChecker::<Checked>::with_max_isr_nesting(2);
    chk.enter_isr();
    chk.enter_isr();
    chk.enter_isr();
}

#[test]
#[should_panic(expected = "dbg_check_leave_isr")]
fn test_leave_isr_while_locked_halts() {
    let mut chk = checker();
    chk.enter_isr();
    chk.lock_from_isr();
    chk.leave_isr();
}

#[test]
#[should_panic(expected = "dbg_check_class_i")]
fn test_class_interrupt_in_thread_halts() {
    let chk = checker();
    chk.check_class_interrupt();
}

#[test]
fn test_class_interrupt_in_isr_returns() {
    let mut chk = checker();
    chk.enter_isr();
    chk.check_class_interrupt();
    chk.enter_isr();
    chk.check_class_interrupt();
}

#[test]
#[should_panic(expected = "dbg_check_class_s")]
fn test_class_locked_unlocked_halts() {
    let chk = checker();
    chk.check_class_locked();
}

#[test]
#[should_panic(expected = "dbg_check_class_s")]
fn test_class_locked_from_isr_halts() {
    let mut chk = checker();
    chk.enter_isr();
    chk.lock_from_isr();
    chk.check_class_locked();
}

#[test]
fn test_init_resets() {
    let mut chk = checker();
    chk.enable_interrupts();
    chk.enter_isr();
    chk.lock_from_isr();
    chk.init();
    assert_eq!(chk.state(), ContextState::INITIAL);
}

#[test]
fn test_unchecked_never_halts_and_never_records() {
    let mut chk = StateChecker::<Unchecked>::new();
    assert!(!chk.is_enabled());
    chk.leave_lock();
    chk.leave_lock();
    chk.unlock();
    chk.leave_isr();
    chk.enable_interrupts();
    chk.enable_interrupts();
    chk.check_class_interrupt();
    chk.check_class_locked();
    assert_eq!(chk.state(), ContextState::INITIAL);
}

#[test]
#[should_panic(expected = "interrupt nesting limit")]
fn test_zero_nesting_limit_rejected() {
    let _ = StateChecker::<Checked>::with_max_isr_nesting(0);
}

#[cfg(feature = "state-check")]
#[test]
#[should_panic(expected = "dbg_leave_lock")]
fn test_default_mode_checks_with_feature() {
    let mut chk = StateChecker::<crate::DefaultMode>::new();
    assert!(chk.is_enabled());
    chk.leave_lock();
}

#[cfg(not(feature = "state-check"))]
#[test]
fn test_default_mode_ignores_violations_without_feature() {
    let mut chk = StateChecker::<crate::DefaultMode>::new();
    assert!(!chk.is_enabled());
    chk.enter_lock();
    chk.leave_lock();
    chk.leave_lock();
    chk.leave_isr();
    assert_eq!(chk.state(), ContextState::INITIAL);
}
