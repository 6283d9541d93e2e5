//! Fatal system halt
//!
//! Every contract violation ends here. The reason string is kept where a
//! debugger attached after the fact can find it, an optional hook gets a last
//! look, and control passes to the platform panic handler. Scheduling is
//! never resumed.

use core::cell::Cell;
use critical_section::Mutex;

/// Called by [`halt`] before the system stops, with the halt reason.
///
/// Runs with the system in an undefined state: it must not block, allocate
/// or call back into the kernel.
pub type HaltHook = fn(&'static str);

static PANIC_MSG: Mutex<Cell<Option<&'static str>>> = Mutex::new(Cell::new(None));
static HALT_HOOK: Mutex<Cell<Option<HaltHook>>> = Mutex::new(Cell::new(None));

/// Install the halt hook, returning the previous one
pub fn set_halt_hook(hook: Option<HaltHook>) -> Option<HaltHook> {
    critical_section::with(|cs| HALT_HOOK.borrow(cs).replace(hook))
}

/// Reason passed to the last [`halt`], if the system has halted
pub fn panic_message() -> Option<&'static str> {
    critical_section::with(|cs| PANIC_MSG.borrow(cs).get())
}

/// Halt the system.
///
/// `reason` names the failing operation. On Cortex-M interrupts are masked
/// first so no handler runs on top of a corrupted kernel.
#[cold]
#[inline(never)]
pub fn halt(reason: &'static str) -> ! {
    #[cfg(all(feature = "cortex-m", target_arch = "arm"))]
    cortex_m::interrupt::disable();

    let hook = critical_section::with(|cs| {
        PANIC_MSG.borrow(cs).set(Some(reason));
        HALT_HOOK.borrow(cs).get()
    });

    #[cfg(feature = "defmt")]
    defmt::error!("system halted: {=str}", reason);

    if let Some(hook) = hook {
        hook(reason);
    }

    panic!("system halted: {}", reason)
}
