//! Checker and tracer behind the kernel hooks

use core::marker::PhantomData;

use kdbg_check::{CheckMode, DefaultMode, StateChecker};
use kdbg_core::{Clock, ThreadRef, ThreadState, WaitRef};
use kdbg_trace::{TraceBuffer, DEFAULT_MASK, DEFAULT_TRACE_SLOTS};

/// Debug record of one kernel instance.
///
/// `C` stamps trace records, `M` selects live or no-op state checking,
/// `N` and `MASK` size the trace ring and pick its event classes.
///
/// Hooks take `&mut self`: the kernel calls them with its lock held or from
/// interrupt context on the same core, which is what serializes them.
#[derive(Debug)]
pub struct SystemDebug<
    C: Clock,
    M: CheckMode = DefaultMode,
    const N: usize = DEFAULT_TRACE_SLOTS,
    const MASK: u8 = DEFAULT_MASK,
> {
    checker: StateChecker<M>,
    trace: TraceBuffer<N, MASK>,
    _clock: PhantomData<fn() -> C>,
}

impl<C: Clock, M: CheckMode, const N: usize, const MASK: u8> SystemDebug<C, M, N, MASK> {
    /// Create the debug record
    pub const fn new() -> Self {
        Self {
            checker: StateChecker::new(),
            trace: TraceBuffer::new(),
            _clock: PhantomData,
        }
    }

    /// Create the debug record with a custom interrupt nesting limit
    pub const fn with_max_isr_nesting(max: u16) -> Self {
        Self {
            checker: StateChecker::with_max_isr_nesting(max),
            trace: TraceBuffer::new(),
            _clock: PhantomData,
        }
    }

    /// Reset checker and trace ring; called once during kernel init
    pub fn init(&mut self) {
        self.checker.init();
        self.trace.init();
    }

    /// State checker
    pub const fn checker(&self) -> &StateChecker<M> {
        &self.checker
    }

    /// Trace ring
    pub const fn tracer(&self) -> &TraceBuffer<N, MASK> {
        &self.trace
    }

    /// Trace ring, for suspending and resuming event classes
    pub fn tracer_mut(&mut self) -> &mut TraceBuffer<N, MASK> {
        &mut self.trace
    }

    /// Before disabling interrupts
    #[inline]
    pub fn sys_disable(&mut self) {
        self.checker.disable_interrupts();
    }

    /// Before masking kernel-aware interrupts
    #[inline]
    pub fn sys_suspend(&mut self) {
        self.checker.suspend_interrupts();
    }

    /// Before enabling interrupts
    #[inline]
    pub fn sys_enable(&mut self) {
        self.checker.enable_interrupts();
    }

    /// After taking the kernel lock from thread context
    #[inline]
    pub fn sys_lock(&mut self) {
        self.checker.lock();
    }

    /// Before releasing the kernel lock from thread context
    #[inline]
    pub fn sys_unlock(&mut self) {
        self.checker.unlock();
    }

    /// After taking the kernel lock from an interrupt handler
    #[inline]
    pub fn sys_lock_from_isr(&mut self) {
        self.checker.lock_from_isr();
    }

    /// Before releasing the kernel lock from an interrupt handler
    #[inline]
    pub fn sys_unlock_from_isr(&mut self) {
        self.checker.unlock_from_isr();
    }

    /// Lock flag set by port code bypassing `sys_lock`.
    ///
    /// Typically the ISR-tail preemption path, which switches threads with
    /// the lock held on behalf of the interrupted thread.
    #[inline]
    pub fn enter_lock(&mut self) {
        self.checker.enter_lock();
    }

    /// Lock flag cleared by port code bypassing `sys_unlock`, such as the
    /// thread start trampoline
    #[inline]
    pub fn leave_lock(&mut self) {
        self.checker.leave_lock();
    }

    /// Interrupt handler prologue
    #[inline]
    pub fn isr_prologue(&mut self, name: &'static str) {
        self.trace.record_isr_enter::<C>(name);
        self.checker.enter_isr();
    }

    /// Interrupt handler epilogue
    #[inline]
    pub fn isr_epilogue(&mut self, name: &'static str) {
        self.checker.leave_isr();
        self.trace.record_isr_leave::<C>(name);
    }

    /// Scheduler switched to `next`; the outgoing thread entered `state`
    /// waiting on `wait`.
    ///
    /// Runs with the kernel lock held in thread context, either taken by
    /// `sys_lock` or by port code through `enter_lock` on the ISR tail.
    #[inline]
    pub fn context_switch(&mut self, next: ThreadRef, state: ThreadState, wait: WaitRef) {
        self.checker.check_class_locked();
        self.trace.record_switch::<C>(next, state, wait);
    }

    /// Entry of an I-class function
    #[inline]
    pub fn check_class_i(&self) {
        self.checker.check_class_interrupt();
    }

    /// Entry of an S-class function
    #[inline]
    pub fn check_class_s(&self) {
        self.checker.check_class_locked();
    }
}

impl<C: Clock, M: CheckMode, const N: usize, const MASK: u8> Default
    for SystemDebug<C, M, N, MASK>
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl<C: Clock, M: CheckMode, const N: usize, const MASK: u8> defmt::Format
    for SystemDebug<C, M, N, MASK>
{
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SystemDebug {{ {}, trace {=usize}/{=usize} }}",
            self.checker.state(),
            self.trace.len(),
            N
        );
    }
}
