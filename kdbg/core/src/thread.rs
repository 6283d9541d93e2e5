//! Thread identity and thread state as supplied by the scheduler
//!
//! The debug layer never owns kernel objects. [`ThreadRef`] and [`WaitRef`]
//! carry only the address of the object they name: they identify it, they
//! do not keep it alive and they are never dereferenced here. A reference is
//! meaningful until the referenced thread or object is destroyed; after that
//! it is just a number that may be reused.

use core::fmt;
use core::num::NonZeroUsize;
use core::ptr::NonNull;

/// Non-owning reference to a kernel thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ThreadRef(NonZeroUsize);

impl ThreadRef {
    /// Reference to a live thread control block
    pub fn of<T>(thread: &T) -> Self {
        Self(NonNull::from(thread).addr())
    }

    /// Reference from a raw address
    pub const fn from_addr(addr: NonZeroUsize) -> Self {
        Self(addr)
    }

    /// Address of the referenced thread
    pub const fn addr(self) -> usize {
        self.0.get()
    }

    /// Check if this refers to `thread`
    pub fn is<T>(self, thread: &T) -> bool {
        self == Self::of(thread)
    }
}

impl fmt::Display for ThreadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread@{:#x}", self.0.get())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadRef {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "thread@{=usize:#x}", self.0.get());
    }
}

/// Non-owning reference to the object a thread went to sleep on.
///
/// Opaque: a semaphore, a mutex, a queue, whatever the thread state says.
/// `WaitRef::NONE` when the thread is not waiting on anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct WaitRef(Option<NonZeroUsize>);

impl WaitRef {
    /// No wait object
    pub const NONE: Self = Self(None);

    /// Reference to a live wait object
    pub fn of<T>(object: &T) -> Self {
        Self(Some(NonNull::from(object).addr()))
    }

    /// Reference from a raw address, zero meaning none
    pub const fn from_addr(addr: usize) -> Self {
        Self(NonZeroUsize::new(addr))
    }

    /// Address of the referenced object, zero if none
    pub const fn addr(self) -> usize {
        match self.0 {
            Some(addr) => addr.get(),
            None => 0,
        }
    }

    /// Check if there is no wait object
    pub const fn is_none(self) -> bool {
        self.0.is_none()
    }

    /// Check if this refers to `object`
    pub fn is<T>(self, object: &T) -> bool {
        self == Self::of(object)
    }
}

impl fmt::Display for WaitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "obj@{:#x}", addr.get()),
            None => write!(f, "obj@none"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WaitRef {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "obj@{=usize:#x}", self.addr());
    }
}

/// State a thread is put in when it is switched out.
///
/// Every value fits the 5-bit state field of a trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ThreadState {
    /// Waiting in the ready list
    Ready = 0,
    /// Currently running
    Current = 1,
    /// Created but not started
    WaitStart = 2,
    /// Suspended on a thread reference
    Suspended = 3,
    /// Enqueued on an I/O queue
    Queued = 4,
    /// Waiting on a semaphore
    WaitSemaphore = 5,
    /// Waiting on a mutex
    WaitMutex = 6,
    /// Waiting on a condition variable
    WaitCondition = 7,
    /// Sleeping for a time interval
    Sleeping = 8,
    /// Waiting for another thread to terminate
    WaitExit = 9,
    /// Waiting for any of a set of events
    WaitOrEvent = 10,
    /// Waiting for all of a set of events
    WaitAndEvent = 11,
    /// Sending a message, queued on the receiver
    SendMessageQueue = 12,
    /// Sending a message, waiting for the answer
    SendMessage = 13,
    /// Waiting for a message
    WaitMessage = 14,
    /// Terminated
    Final = 15,
}

impl ThreadState {
    /// Width of the state field in a trace record
    pub const BITS: u32 = 5;

    const ALL: [ThreadState; 16] = [
        ThreadState::Ready,
        ThreadState::Current,
        ThreadState::WaitStart,
        ThreadState::Suspended,
        ThreadState::Queued,
        ThreadState::WaitSemaphore,
        ThreadState::WaitMutex,
        ThreadState::WaitCondition,
        ThreadState::Sleeping,
        ThreadState::WaitExit,
        ThreadState::WaitOrEvent,
        ThreadState::WaitAndEvent,
        ThreadState::SendMessageQueue,
        ThreadState::SendMessage,
        ThreadState::WaitMessage,
        ThreadState::Final,
    ];

    /// Raw encoding
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw state value
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if (bits as usize) < Self::ALL.len() {
            Some(Self::ALL[bits as usize])
        } else {
            None
        }
    }

    /// Short name as shown by kernel-aware debuggers
    pub const fn name(self) -> &'static str {
        match self {
            ThreadState::Ready => "READY",
            ThreadState::Current => "CURRENT",
            ThreadState::WaitStart => "WTSTART",
            ThreadState::Suspended => "SUSPENDED",
            ThreadState::Queued => "QUEUED",
            ThreadState::WaitSemaphore => "WTSEM",
            ThreadState::WaitMutex => "WTMTX",
            ThreadState::WaitCondition => "WTCOND",
            ThreadState::Sleeping => "SLEEPING",
            ThreadState::WaitExit => "WTEXIT",
            ThreadState::WaitOrEvent => "WTOREVT",
            ThreadState::WaitAndEvent => "WTANDEVT",
            ThreadState::SendMessageQueue => "SNDMSGQ",
            ThreadState::SendMessage => "SNDMSG",
            ThreadState::WaitMessage => "WTMSG",
            ThreadState::Final => "FINAL",
        }
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}
