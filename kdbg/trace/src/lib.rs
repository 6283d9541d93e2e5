#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # kdbg Trace
//!
//! Scheduling event tracer. The scheduler and the interrupt dispatch code
//! append context switch and ISR boundary events to a fixed-capacity ring
//! buffer; the oldest entry is overwritten when the ring is full.
//!
//! Appending is O(1), never allocates and never blocks. The buffer does no
//! locking: thread-context call sites hold the kernel lock, interrupt-context
//! call sites are serialized by nesting on a single core.
//!
//! ## Reading the ring from a debugger
//!
//! [`TraceBuffer`] is `#[repr(C)]`: capacity, cursor, suspended-class mask,
//! then the slots. The cursor is the next slot to overwrite, which is the
//! oldest live entry once the ring has wrapped; walking `size` slots from
//! there visits the events oldest first. Slots whose type field is zero were
//! never written.

pub mod buffer;
pub mod event;

pub use buffer::*;
pub use event::*;

#[cfg(test)]
mod tests;

/// Default number of slots in the trace ring
pub const DEFAULT_TRACE_CAPACITY: usize = 128;

/// Event class bits
pub mod mask {
    /// No event class
    pub const NONE: u8 = 0;
    /// Context switches
    pub const SWITCH: u8 = 1 << 0;
    /// Interrupt handler enter and leave
    pub const ISR: u8 = 1 << 1;
    /// Every event class
    pub const ALL: u8 = SWITCH | ISR;
}

/// Event classes selected by the `trace-switch` and `trace-isr` features
pub const DEFAULT_MASK: u8 = {
    let switch = if cfg!(feature = "trace-switch") { mask::SWITCH } else { mask::NONE };
    let isr = if cfg!(feature = "trace-isr") { mask::ISR } else { mask::NONE };
    switch | isr
};

/// Slots of a ring configured by the crate features; zero when every
/// event class is compiled out, so the ring shrinks to its header
pub const DEFAULT_TRACE_SLOTS: usize = if DEFAULT_MASK == mask::NONE {
    0
} else {
    DEFAULT_TRACE_CAPACITY
};

/// Trace ring configured by the crate features
pub type DefaultTraceBuffer = TraceBuffer<DEFAULT_TRACE_SLOTS, DEFAULT_MASK>;
