//! `static`-friendly debug record

use core::cell::RefCell;

use critical_section::Mutex;
use kdbg_check::{CheckMode, DefaultMode};
use kdbg_core::Clock;
use kdbg_trace::{DEFAULT_MASK, DEFAULT_TRACE_SLOTS};

use crate::system::SystemDebug;

/// A [`SystemDebug`] that can live in a `static`.
///
/// Access goes through the port's critical section. On a single-core port
/// that is the interrupt mask the kernel lock already uses, so it adds no
/// ordering of its own to the sequences being checked.
pub struct SharedDebug<
    C: Clock,
    M: CheckMode = DefaultMode,
    const N: usize = DEFAULT_TRACE_SLOTS,
    const MASK: u8 = DEFAULT_MASK,
> {
    inner: Mutex<RefCell<SystemDebug<C, M, N, MASK>>>,
}

impl<C: Clock, M: CheckMode, const N: usize, const MASK: u8> SharedDebug<C, M, N, MASK> {
    /// Create the shared record
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SystemDebug::new())),
        }
    }

    /// Create the shared record with a custom interrupt nesting limit
    pub const fn with_max_isr_nesting(max: u16) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SystemDebug::with_max_isr_nesting(max))),
        }
    }

    /// Run `f` with exclusive access to the debug record
    pub fn with<R>(&self, f: impl FnOnce(&mut SystemDebug<C, M, N, MASK>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

impl<C: Clock, M: CheckMode, const N: usize, const MASK: u8> Default
    for SharedDebug<C, M, N, MASK>
{
    fn default() -> Self {
        Self::new()
    }
}
