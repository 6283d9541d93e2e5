//! The state checker proper

use core::marker::PhantomData;

use kdbg_core::ContractViolation;

use crate::mode::{CheckMode, DefaultMode};
use crate::state::{ContextState, IrqState};
use crate::DEFAULT_MAX_ISR_NESTING;

/// Verifies kernel lock and interrupt transitions.
///
/// One instance per core, owned by the kernel and mutated only from the
/// kernel's entry and exit paths. Those paths are already serialized by the
/// kernel lock or by interrupt nesting on a single core; the checker adds no
/// locking of its own.
///
/// A failed check halts through [`kdbg_core::halt`] with the operation name.
#[derive(Debug)]
pub struct StateChecker<M: CheckMode = DefaultMode> {
    state: ContextState,
    max_isr_nesting: u16,
    _mode: PhantomData<M>,
}

#[cold]
#[inline(never)]
fn violation(operation: &'static str) -> ! {
    ContractViolation::new(operation).halt()
}

impl<M: CheckMode> StateChecker<M> {
    /// Create a checker in the initial state
    pub const fn new() -> Self {
        Self::with_max_isr_nesting(DEFAULT_MAX_ISR_NESTING)
    }

    /// Create a checker allowing at most `max` nested interrupt handlers
    pub const fn with_max_isr_nesting(max: u16) -> Self {
        assert!(max > 0, "interrupt nesting limit must be at least 1");
        Self {
            state: ContextState::INITIAL,
            max_isr_nesting: max,
            _mode: PhantomData,
        }
    }

    /// Reset to the initial state, before any kernel activity
    pub fn init(&mut self) {
        self.state = ContextState::INITIAL;
    }

    /// Check if transitions are verified in this build
    pub const fn is_enabled(&self) -> bool {
        M::ENABLED
    }

    /// Recorded context
    pub const fn state(&self) -> ContextState {
        self.state
    }

    /// Check if the kernel lock is held
    pub const fn is_locked(&self) -> bool {
        self.state.locked
    }

    /// Interrupt nesting depth
    pub const fn isr_depth(&self) -> u16 {
        self.state.isr_depth
    }

    /// Last reported interrupt masking state
    pub const fn irq_state(&self) -> IrqState {
        self.state.irq
    }

    /// Configured maximum interrupt nesting depth
    pub const fn max_isr_nesting(&self) -> u16 {
        self.max_isr_nesting
    }

    /// Lock flag set without a context check.
    ///
    /// Used by port code that takes the kernel lock outside the normal API,
    /// for example around a context switch.
    #[inline]
    pub fn enter_lock(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.locked {
            violation("dbg_enter_lock");
        }
        self.state.locked = true;
    }

    /// Lock flag cleared without a context check
    #[inline]
    pub fn leave_lock(&mut self) {
        if !M::ENABLED {
            return;
        }
        if !self.state.locked {
            violation("dbg_leave_lock");
        }
        self.state.locked = false;
    }

    #[inline]
    fn set_irq(&mut self, irq: IrqState, operation: &'static str) {
        let st = &mut self.state;
        if st.isr_depth != 0 || st.locked || st.irq == irq {
            violation(operation);
        }
        st.irq = irq;
    }

    /// Interrupts about to be disabled
    #[inline]
    pub fn disable_interrupts(&mut self) {
        if M::ENABLED {
            self.set_irq(IrqState::Disabled, "dbg_check_disable");
        }
    }

    /// Kernel-aware interrupts about to be masked
    #[inline]
    pub fn suspend_interrupts(&mut self) {
        if M::ENABLED {
            self.set_irq(IrqState::Suspended, "dbg_check_suspend");
        }
    }

    /// Interrupts about to be enabled
    #[inline]
    pub fn enable_interrupts(&mut self) {
        if M::ENABLED {
            self.set_irq(IrqState::Enabled, "dbg_check_enable");
        }
    }

    /// Kernel lock taken from thread context
    #[inline]
    pub fn lock(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.isr_depth != 0 || self.state.locked {
            violation("dbg_check_lock");
        }
        self.state.locked = true;
    }

    /// Kernel lock released from thread context
    #[inline]
    pub fn unlock(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.isr_depth != 0 || !self.state.locked {
            violation("dbg_check_unlock");
        }
        self.state.locked = false;
    }

    /// Kernel lock taken from an interrupt handler
    #[inline]
    pub fn lock_from_isr(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.isr_depth == 0 || self.state.locked {
            violation("dbg_check_lock_from_isr");
        }
        self.state.locked = true;
    }

    /// Kernel lock released from an interrupt handler
    #[inline]
    pub fn unlock_from_isr(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.isr_depth == 0 || !self.state.locked {
            violation("dbg_check_unlock_from_isr");
        }
        self.state.locked = false;
    }

    /// Interrupt handler prologue
    #[inline]
    pub fn enter_isr(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.locked || self.state.isr_depth >= self.max_isr_nesting {
            violation("dbg_check_enter_isr");
        }
        self.state.isr_depth += 1;
    }

    /// Interrupt handler epilogue
    #[inline]
    pub fn leave_isr(&mut self) {
        if !M::ENABLED {
            return;
        }
        if self.state.locked || self.state.isr_depth == 0 {
            violation("dbg_check_leave_isr");
        }
        self.state.isr_depth -= 1;
    }

    /// Caller claims to run in interrupt context (I-class API)
    #[inline]
    pub fn check_class_interrupt(&self) {
        if M::ENABLED && self.state.isr_depth == 0 {
            violation("dbg_check_class_i");
        }
    }

    /// Caller claims to run in locked thread context (S-class API)
    #[inline]
    pub fn check_class_locked(&self) {
        if M::ENABLED && (self.state.isr_depth != 0 || !self.state.locked) {
            violation("dbg_check_class_s");
        }
    }
}

impl<M: CheckMode> Default for StateChecker<M> {
    fn default() -> Self {
        Self::new()
    }
}
