#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # kdbg Check
//!
//! Call-context state checker. Kernel entry and exit points report every
//! lock and interrupt transition to a [`StateChecker`], which verifies that
//! the transition is legal for the recorded context and halts the system
//! otherwise.
//!
//! The recorded context is a small state machine: the kernel is either
//! locked or unlocked, crossed with an interrupt nesting depth and the coarse
//! interrupt masking state.
//!
//! | operation            | legal when                      |
//! |----------------------|---------------------------------|
//! | `lock`               | thread context, unlocked        |
//! | `unlock`             | thread context, locked          |
//! | `lock_from_isr`      | interrupt context, unlocked     |
//! | `unlock_from_isr`    | interrupt context, locked       |
//! | `enter_isr`          | unlocked, below maximum nesting |
//! | `leave_isr`          | unlocked, inside an ISR         |
//! | `check_class_interrupt` | interrupt context            |
//! | `check_class_locked` | thread context, locked          |
//!
//! With the `state-check` feature off, [`DefaultMode`] is [`Unchecked`] and
//! all of the above compile to nothing.

pub mod checker;
pub mod mode;
pub mod state;

pub use checker::*;
pub use mode::*;
pub use state::*;

#[cfg(test)]
mod tests;

/// Default maximum interrupt nesting depth
pub const DEFAULT_MAX_ISR_NESTING: u16 = 16;
