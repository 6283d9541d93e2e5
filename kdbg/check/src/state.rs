//! Recorded execution context

use core::fmt;

/// Coarse interrupt masking state as last reported to the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IrqState {
    /// All interrupt sources enabled
    Enabled = 0,
    /// Kernel-aware interrupts masked, fast interrupts still served
    Suspended = 1,
    /// All maskable interrupts disabled
    Disabled = 2,
}

impl IrqState {
    /// Short name
    pub const fn name(self) -> &'static str {
        match self {
            IrqState::Enabled => "enabled",
            IrqState::Suspended => "suspended",
            IrqState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for IrqState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// Where in the kernel execution currently is.
///
/// `#[repr(C)]` so a debugger can read it straight out of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ContextState {
    pub(crate) isr_depth: u16,
    pub(crate) locked: bool,
    pub(crate) irq: IrqState,
}

impl ContextState {
    /// State before the kernel starts: unlocked, thread context,
    /// interrupts still disabled by the startup code.
    pub const INITIAL: Self = Self {
        isr_depth: 0,
        locked: false,
        irq: IrqState::Disabled,
    };

    /// Check if the kernel lock is held
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Interrupt nesting depth, 0 in thread context
    pub const fn isr_depth(&self) -> u16 {
        self.isr_depth
    }

    /// Last reported interrupt masking state
    pub const fn irq(&self) -> IrqState {
        self.irq
    }

    /// Check if execution is inside an interrupt handler
    pub const fn in_isr(&self) -> bool {
        self.isr_depth > 0
    }
}

impl Default for ContextState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} isr:{} irq:{}",
            if self.locked { "locked" } else { "unlocked" },
            self.isr_depth,
            self.irq
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ContextState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ContextState{{ locked: {}, isr: {}, irq: {} }}",
            self.locked,
            self.isr_depth,
            self.irq
        );
    }
}
