//! The trace ring

use kdbg_core::{Clock, ThreadRef, ThreadState, WaitRef};

use crate::event::TraceEvent;
use crate::{mask, DEFAULT_MASK, DEFAULT_TRACE_SLOTS};

/// Fixed-capacity ring of trace events.
///
/// `N` is the number of slots, `MASK` the event classes compiled in (see
/// [`crate::mask`]). An append for a class outside `MASK` is an empty
/// function after constant folding. With `MASK` at [`mask::NONE`] the ring
/// may have no slots at all.
///
/// The kernel owns one ring for its whole run and appends through
/// `&mut self`; exclusive access comes from the call sites, not from the
/// ring.
#[derive(Debug)]
#[repr(C)]
pub struct TraceBuffer<const N: usize = DEFAULT_TRACE_SLOTS, const MASK: u8 = DEFAULT_MASK> {
    size: u32,
    cursor: u32,
    suspended: u8,
    buffer: [TraceEvent; N],
}

impl<const N: usize, const MASK: u8> TraceBuffer<N, MASK> {
    const VALID_CAPACITY: () = assert!(
        (N > 0 || MASK == mask::NONE) && N <= u32::MAX as usize,
        "trace capacity out of range"
    );

    /// Create an empty ring
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_CAPACITY;
        Self {
            size: N as u32,
            cursor: 0,
            suspended: mask::NONE,
            buffer: [TraceEvent::UNUSED; N],
        }
    }

    /// Clear every slot and resume all classes
    pub fn init(&mut self) {
        self.buffer.fill(TraceEvent::UNUSED);
        self.cursor = 0;
        self.suspended = mask::NONE;
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the next slot to write, the oldest live entry once wrapped
    pub const fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// Event classes compiled in
    pub const fn mask(&self) -> u8 {
        MASK
    }

    /// Event classes currently suspended
    pub const fn suspended(&self) -> u8 {
        self.suspended
    }

    /// Stop recording the classes in `classes` until resumed
    pub fn suspend(&mut self, classes: u8) {
        self.suspended |= classes & mask::ALL;
    }

    /// Resume recording the classes in `classes`
    pub fn resume(&mut self, classes: u8) {
        self.suspended &= !classes;
    }

    /// Check if events of `class` are compiled in and not suspended
    pub const fn is_recording(&self, class: u8) -> bool {
        MASK & class != 0 && self.suspended & class == 0
    }

    #[inline]
    fn push(&mut self, event: TraceEvent) {
        let cursor = self.cursor as usize;
        self.buffer[cursor] = event;
        self.cursor = if cursor + 1 >= N { 0 } else { (cursor + 1) as u32 };
    }

    /// Record a context switch.
    ///
    /// `next` is the thread now running; `state` and `wait` describe where
    /// the outgoing thread went.
    #[inline]
    pub fn record_switch<C: Clock>(&mut self, next: ThreadRef, state: ThreadState, wait: WaitRef) {
        if MASK & mask::SWITCH == 0 || self.suspended & mask::SWITCH != 0 {
            return;
        }
        self.push(TraceEvent::switch(C::now(), C::rt_stamp(), next, state, wait));
    }

    /// Record entry into interrupt handler `name`
    #[inline]
    pub fn record_isr_enter<C: Clock>(&mut self, name: &'static str) {
        if MASK & mask::ISR == 0 || self.suspended & mask::ISR != 0 {
            return;
        }
        self.push(TraceEvent::isr_enter(C::now(), C::rt_stamp(), name));
    }

    /// Record exit from interrupt handler `name`
    #[inline]
    pub fn record_isr_leave<C: Clock>(&mut self, name: &'static str) {
        if MASK & mask::ISR == 0 || self.suspended & mask::ISR != 0 {
            return;
        }
        self.push(TraceEvent::isr_leave(C::now(), C::rt_stamp(), name));
    }

    /// All slots in memory order, unused ones included
    pub fn slots(&self) -> &[TraceEvent] {
        &self.buffer
    }

    /// Recorded events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> + '_ {
        let (newer, older) = self.buffer.split_at(self.cursor as usize);
        older
            .iter()
            .chain(newer.iter())
            .filter(|event| !event.is_unused())
    }

    /// Number of recorded events still in the ring
    pub fn len(&self) -> usize {
        self.buffer.iter().filter(|event| !event.is_unused()).count()
    }

    /// Check if nothing was recorded since the last [`Self::init`]
    pub fn is_empty(&self) -> bool {
        self.latest().is_none()
    }

    /// Most recent event
    pub fn latest(&self) -> Option<&TraceEvent> {
        if N == 0 {
            return None;
        }
        let cursor = self.cursor as usize;
        let last = if cursor == 0 { N - 1 } else { cursor - 1 };
        let event = &self.buffer[last];
        (!event.is_unused()).then_some(event)
    }

    /// Copy of the recorded events, oldest first
    pub fn snapshot(&self) -> heapless::Vec<TraceEvent, N> {
        self.iter().copied().collect()
    }
}

impl<const N: usize, const MASK: u8> Default for TraceBuffer<N, MASK> {
    fn default() -> Self {
        Self::new()
    }
}
