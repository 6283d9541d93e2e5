//! Trace event records

use core::fmt;

use kdbg_core::{RtStamp, SysTime, ThreadRef, ThreadState, WaitRef};

/// Record type, the low 3 bits of the header word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    /// Slot never written
    Unused = 0,
    /// Context switch
    Switch = 1,
    /// Interrupt handler entered
    IsrEnter = 2,
    /// Interrupt handler left
    IsrLeave = 3,
}

impl EventKind {
    /// Short name
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Unused => "UNUSED",
            EventKind::Switch => "SWITCH",
            EventKind::IsrEnter => "ISR-ENTER",
            EventKind::IsrLeave => "ISR-LEAVE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventKind {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// Event data, one variant per record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum EventPayload {
    /// Slot never written
    Unused,
    /// Context switch
    Switch {
        /// Thread switched in
        next: ThreadRef,
        /// Object the switched-out thread went to sleep on
        wait: WaitRef,
    },
    /// Interrupt handler entered
    IsrEnter {
        /// Handler name
        name: &'static str,
    },
    /// Interrupt handler left
    IsrLeave {
        /// Handler name
        name: &'static str,
    },
}

impl EventPayload {
    /// Record type carried by this payload
    pub const fn kind(&self) -> EventKind {
        match self {
            EventPayload::Unused => EventKind::Unused,
            EventPayload::Switch { .. } => EventKind::Switch,
            EventPayload::IsrEnter { .. } => EventKind::IsrEnter,
            EventPayload::IsrLeave { .. } => EventKind::IsrLeave,
        }
    }
}

const KIND_BITS: u32 = 3;
const STATE_SHIFT: u32 = KIND_BITS;
const STATE_MASK: u32 = (1 << ThreadState::BITS) - 1;
const RTSTAMP_SHIFT: u32 = KIND_BITS + ThreadState::BITS;

/// One slot of the trace ring.
///
/// Layout: a header word packing `type:3 | state:5 | rtstamp:24`, the
/// system time, then the payload. The type bits are always derived from the
/// payload variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct TraceEvent {
    header: u32,
    time: SysTime,
    payload: EventPayload,
}

impl TraceEvent {
    /// Content of a never written slot
    pub const UNUSED: Self = Self {
        header: 0,
        time: SysTime::ZERO,
        payload: EventPayload::Unused,
    };

    const fn pack(payload: EventPayload, state: u8, rtstamp: RtStamp, time: SysTime) -> Self {
        let header = (payload.kind() as u32)
            | (((state as u32) & STATE_MASK) << STATE_SHIFT)
            | (rtstamp.raw() << RTSTAMP_SHIFT);
        Self {
            header,
            time,
            payload,
        }
    }

    /// Context switch to `next`; the outgoing thread entered `state`
    /// waiting on `wait`
    pub const fn switch(
        time: SysTime,
        rtstamp: RtStamp,
        next: ThreadRef,
        state: ThreadState,
        wait: WaitRef,
    ) -> Self {
        Self::pack(EventPayload::Switch { next, wait }, state.bits(), rtstamp, time)
    }

    /// Interrupt handler `name` entered
    pub const fn isr_enter(time: SysTime, rtstamp: RtStamp, name: &'static str) -> Self {
        Self::pack(EventPayload::IsrEnter { name }, 0, rtstamp, time)
    }

    /// Interrupt handler `name` left
    pub const fn isr_leave(time: SysTime, rtstamp: RtStamp, name: &'static str) -> Self {
        Self::pack(EventPayload::IsrLeave { name }, 0, rtstamp, time)
    }

    /// Record type
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Check if the slot was never written
    pub const fn is_unused(&self) -> bool {
        matches!(self.payload, EventPayload::Unused)
    }

    /// Raw header word as seen in memory
    pub const fn header(&self) -> u32 {
        self.header
    }

    /// System time of the event
    pub const fn time(&self) -> SysTime {
        self.time
    }

    /// Fine time stamp, zero when the port has no fine clock
    pub const fn rtstamp(&self) -> RtStamp {
        RtStamp::new(self.header >> RTSTAMP_SHIFT)
    }

    /// Event data
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// State the switched-out thread entered, for switch records only
    pub const fn switched_out_state(&self) -> Option<ThreadState> {
        match self.payload {
            EventPayload::Switch { .. } => {
                ThreadState::from_bits(((self.header >> STATE_SHIFT) & STATE_MASK) as u8)
            }
            _ => None,
        }
    }

    /// Thread switched in, for switch records only
    pub const fn next_thread(&self) -> Option<ThreadRef> {
        match self.payload {
            EventPayload::Switch { next, .. } => Some(next),
            _ => None,
        }
    }

    /// Wait object of the switched-out thread, for switch records only
    pub const fn wait_object(&self) -> Option<WaitRef> {
        match self.payload {
            EventPayload::Switch { wait, .. } => Some(wait),
            _ => None,
        }
    }

    /// Handler name, for ISR records only
    pub const fn isr_name(&self) -> Option<&'static str> {
        match self.payload {
            EventPayload::IsrEnter { name } | EventPayload::IsrLeave { name } => Some(name),
            _ => None,
        }
    }
}

impl Default for TraceEvent {
    fn default() -> Self {
        Self::UNUSED
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.time, self.rtstamp(), self.kind())?;
        match self.payload {
            EventPayload::Unused => Ok(()),
            EventPayload::Switch { next, wait } => match self.switched_out_state() {
                Some(state) => write!(f, " -> {next}, out {state} on {wait}"),
                None => write!(f, " -> {next}, out ? on {wait}"),
            },
            EventPayload::IsrEnter { name } | EventPayload::IsrLeave { name } => {
                write!(f, " {name}")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TraceEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self.payload {
            EventPayload::Unused => defmt::write!(fmt, "UNUSED"),
            EventPayload::Switch { next, wait } => defmt::write!(
                fmt,
                "[{} {}] SWITCH -> {}, out {} on {}",
                self.time,
                self.rtstamp(),
                next,
                self.switched_out_state(),
                wait
            ),
            EventPayload::IsrEnter { name } => {
                defmt::write!(fmt, "[{} {}] ISR-ENTER {=str}", self.time, self.rtstamp(), name)
            }
            EventPayload::IsrLeave { name } => {
                defmt::write!(fmt, "[{} {}] ISR-LEAVE {=str}", self.time, self.rtstamp(), name)
            }
        }
    }
}
