//! Kernel time stamps

use core::fmt;

/// Coarse system time, the kernel tick counter.
///
/// Monotonic modulo wraparound; compare with [`SysTime::is_after`] rather
/// than `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SysTime(pub u32);

impl SysTime {
    /// Zero tick
    pub const ZERO: Self = Self(0);

    /// Create a time stamp from a raw tick count
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick value
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Advance by `ticks`, wrapping
    pub const fn wrapping_add(self, ticks: u32) -> Self {
        Self(self.0.wrapping_add(ticks))
    }

    /// Ticks elapsed since `earlier`, correct across one wrap
    pub const fn elapsed_since(self, earlier: SysTime) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Check if this time is after `other` (handles wraparound)
    pub const fn is_after(self, other: SysTime) -> bool {
        let delta = self.0.wrapping_sub(other.0);
        delta != 0 && delta < u32::MAX / 2
    }
}

impl fmt::Display for SysTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick:{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SysTime {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "tick:{}", self.0);
    }
}

/// Fine-grained hardware counter sample, 24 bits wide.
///
/// Zero means the port has no fine clock, not "time zero".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RtStamp(u32);

impl RtStamp {
    /// Number of significant bits
    pub const BITS: u32 = 24;

    /// Mask of the significant bits
    pub const MASK: u32 = (1 << Self::BITS) - 1;

    /// Stamp recorded on ports without a fine counter
    pub const UNAVAILABLE: Self = Self(0);

    /// Truncate a raw counter value to 24 bits
    pub const fn new(counter: u32) -> Self {
        Self(counter & Self::MASK)
    }

    /// Stamp for an optional counter sample
    pub const fn from_counter(counter: Option<u32>) -> Self {
        match counter {
            Some(value) => Self::new(value),
            None => Self::UNAVAILABLE,
        }
    }

    /// Raw 24-bit value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The counter value, or `None` when the port had no fine clock
    pub const fn get(self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0)
        }
    }
}

impl fmt::Display for RtStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => write!(f, "rt:{value}"),
            None => write!(f, "rt:-"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RtStamp {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "rt:{}", self.0);
    }
}
