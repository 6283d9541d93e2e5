//! Trace ring tests for kdbg-trace

use kdbg_core::{Clock, SysTime, ThreadRef, ThreadState, WaitRef};

use crate::{mask, EventKind, TraceBuffer};

struct Ticks;

impl Clock for Ticks {
    fn now() -> SysTime {
        SysTime::new(1000)
    }

    fn rt_counter() -> Option<u32> {
        Some(0x0123_4567)
    }
}

struct Tcb(#[allow(dead_code)] u8);

#[test]
fn test_new_ring_is_empty() {
    let ring = TraceBuffer::<8, { mask::ALL }>::new();
    assert_eq!(ring.capacity(), 8);
    assert_eq!(ring.cursor(), 0);
    assert!(ring.is_empty());
    assert_eq!(ring.len(), 0);
    assert!(ring.slots().iter().all(|slot| slot.is_unused()));
    assert_eq!(ring.iter().count(), 0);
    assert!(ring.latest().is_none());
}

#[test]
fn test_stamps_from_clock() {
    let mut ring = TraceBuffer::<8, { mask::ALL }>::new();
    ring.record_isr_enter::<Ticks>("uart");
    let event = ring.latest().copied().unwrap_or_default();
    assert_eq!(event.time(), SysTime::new(1000));
    assert_eq!(event.rtstamp().raw(), 0x23_4567);
    assert_eq!(ring.cursor(), 1);
    assert_eq!(ring.len(), 1);
}

#[test]
fn test_cursor_wraps() {
    let mut ring = TraceBuffer::<3, { mask::ALL }>::new();
    for _ in 0..3 {
        ring.record_isr_enter::<Ticks>("a");
    }
    assert_eq!(ring.cursor(), 0);
    ring.record_isr_leave::<Ticks>("a");
    assert_eq!(ring.cursor(), 1);
    assert_eq!(ring.slots()[0].kind(), EventKind::IsrLeave);
    assert_eq!(ring.len(), 3);
}

#[test]
fn test_switch_class_compiled_out() {
    let t = Tcb(0);
    let mut ring = TraceBuffer::<4, { mask::ISR }>::new();
    ring.record_switch::<Ticks>(ThreadRef::of(&t), ThreadState::Ready, WaitRef::NONE);
    assert!(ring.is_empty());
    ring.record_isr_enter::<Ticks>("tick");
    assert_eq!(ring.len(), 1);
    assert!(!ring.is_recording(mask::SWITCH));
}

#[test]
fn test_isr_class_compiled_out() {
    let t = Tcb(0);
    let mut ring = TraceBuffer::<4, { mask::SWITCH }>::new();
    ring.record_isr_enter::<Ticks>("tick");
    ring.record_isr_leave::<Ticks>("tick");
    assert!(ring.is_empty());
    assert_eq!(ring.cursor(), 0);
    ring.record_switch::<Ticks>(ThreadRef::of(&t), ThreadState::Ready, WaitRef::NONE);
    assert_eq!(ring.len(), 1);
}

#[test]
fn test_nothing_compiled_in() {
    let mut ring = TraceBuffer::<4, { mask::NONE }>::new();
    ring.record_isr_enter::<Ticks>("tick");
    assert!(ring.is_empty());
}

#[test]
fn test_zero_slot_ring_without_classes() {
    let t = Tcb(0);
    let mut ring = TraceBuffer::<0, { mask::NONE }>::new();
    assert_eq!(ring.capacity(), 0);
    assert!(core::mem::size_of::<TraceBuffer<0, { mask::NONE }>>() < 64);

    ring.record_switch::<Ticks>(ThreadRef::of(&t), ThreadState::Ready, WaitRef::NONE);
    ring.record_isr_enter::<Ticks>("tick");
    ring.record_isr_leave::<Ticks>("tick");
    ring.init();
    assert!(ring.is_empty());
    assert!(ring.latest().is_none());
    assert_eq!(ring.iter().count(), 0);
    assert!(ring.snapshot().is_empty());
}

#[test]
fn test_suspend_and_resume() {
    let t = Tcb(0);
    let mut ring = TraceBuffer::<4, { mask::ALL }>::new();
    ring.suspend(mask::ISR);
    assert_eq!(ring.suspended(), mask::ISR);
    ring.record_isr_enter::<Ticks>("tick");
    assert_eq!(ring.cursor(), 0);
    ring.record_switch::<Ticks>(ThreadRef::of(&t), ThreadState::Sleeping, WaitRef::NONE);
    assert_eq!(ring.cursor(), 1);

    ring.resume(mask::ISR);
    assert!(ring.is_recording(mask::ISR));
    ring.record_isr_leave::<Ticks>("tick");
    assert_eq!(ring.cursor(), 2);
}

#[test]
fn test_init_clears() {
    let mut ring = TraceBuffer::<4, { mask::ALL }>::new();
    ring.suspend(mask::SWITCH);
    ring.record_isr_enter::<Ticks>("tick");
    ring.init();
    assert!(ring.is_empty());
    assert_eq!(ring.cursor(), 0);
    assert_eq!(ring.suspended(), mask::NONE);
}
