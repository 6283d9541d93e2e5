#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # kdbg Core
//!
//! Shared vocabulary of the kernel debug layer: time stamps, non-owning
//! thread and wait-object references, the scheduler's thread states, the
//! fatal halt entry point and the `dbg_check!` / `dbg_assert!` macros.
//!
//! The halt path is the single exit for every contract violation detected by
//! the state checker or by an assertion. It never returns.

use core::fmt;

pub mod clock;
pub mod fill;
pub mod halt;
pub mod thread;
pub mod time;

mod assert;

pub use clock::*;
pub use fill::*;
pub use halt::{halt, panic_message, set_halt_hook, HaltHook};
pub use thread::*;
pub use time::*;

/// kdbg version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `dbg_check!` evaluates its condition only when this is set.
pub const CHECKS_ENABLED: bool = cfg!(feature = "checks");

/// `dbg_assert!` evaluates its condition only when this is set.
pub const ASSERTS_ENABLED: bool = cfg!(feature = "asserts");

/// The one error kind of the debug layer.
///
/// A contract violation is never handed back to a caller as a value to be
/// handled; [`ContractViolation::halt`] is the only thing to do with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractViolation {
    operation: &'static str,
}

impl ContractViolation {
    /// Violation detected by `operation`
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    /// Name of the operation whose contract was broken
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Stop the system, reporting the failing operation.
    #[cold]
    #[inline(never)]
    pub fn halt(self) -> ! {
        halt::halt(self.operation)
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contract violation in {}", self.operation)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContractViolation {}

#[cfg(feature = "defmt")]
impl defmt::Format for ContractViolation {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "contract violation in {=str}", self.operation);
    }
}
