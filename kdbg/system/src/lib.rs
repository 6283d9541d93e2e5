#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # kdbg
//!
//! Runtime verification and scheduling trace for a preemptive real-time
//! kernel, wired to the kernel's entry and exit hooks.
//!
//! A kernel embeds one [`SystemDebug`] per core and calls it from:
//! - the system lock and unlock paths (thread and ISR forms),
//! - the interrupt prologue and epilogue,
//! - the scheduler's context switch,
//! - the I-class and S-class API entry points.
//!
//! ```no_run
//! use kdbg::{Clock, SharedDebug, SysTime, ThreadRef, ThreadState, WaitRef};
//!
//! struct Tick;
//!
//! impl Clock for Tick {
//!     fn now() -> SysTime {
//!         SysTime::new(0)
//!     }
//! }
//!
//! static DBG: SharedDebug<Tick> = SharedDebug::new();
//!
//! fn systick_handler() {
//!     DBG.with(|dbg| dbg.isr_prologue(kdbg::function_name!()));
//!     DBG.with(|dbg| {
//!         dbg.sys_lock_from_isr();
//!         dbg.check_class_i();
//!         dbg.sys_unlock_from_isr();
//!     });
//!     DBG.with(|dbg| dbg.isr_epilogue(kdbg::function_name!()));
//! }
//! # systick_handler();
//! ```
//!
//! Each concern can be compiled out on its own: `state-check` for the
//! context checker, `trace-switch` and `trace-isr` for the trace classes,
//! `checks` and `asserts` for the assertion macros.

pub mod shared;
pub mod system;

pub use shared::SharedDebug;
pub use system::SystemDebug;

pub use kdbg_check::{
    CheckMode, Checked, ContextState, DefaultMode, IrqState, StateChecker, Unchecked,
    DEFAULT_MAX_ISR_NESTING,
};
pub use kdbg_core::{
    dbg_assert, dbg_check, fill, function_name, halt, panic_message, set_halt_hook, Clock,
    ContractViolation, HaltHook, RtStamp, SysTime, ThreadRef, ThreadState, WaitRef,
    STACK_FILL_VALUE, THREAD_FILL_VALUE,
};
pub use kdbg_trace::{
    mask, DefaultTraceBuffer, EventKind, EventPayload, TraceBuffer, TraceEvent, DEFAULT_MASK,
    DEFAULT_TRACE_CAPACITY, DEFAULT_TRACE_SLOTS,
};
