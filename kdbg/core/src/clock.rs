//! Time sources supplied by the port

use crate::time::{RtStamp, SysTime};

/// Time source used to stamp trace records.
///
/// Implemented by the port on a zero-sized type; all functions are
/// associated so that a stamp costs no more than the counter reads.
pub trait Clock {
    /// Current coarse system time
    fn now() -> SysTime;

    /// Fine-grained hardware counter, if the port has one
    fn rt_counter() -> Option<u32> {
        None
    }

    /// Fine counter truncated to the trace record width
    #[inline]
    fn rt_stamp() -> RtStamp {
        RtStamp::from_counter(Self::rt_counter())
    }
}

/// Adds the Cortex-M DWT cycle counter as fine clock to a coarse tick source.
///
/// The DWT unit must have been enabled (`DCB::enable_trace` and
/// `DWT::enable_cycle_counter`) before the first record is written.
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
pub struct DwtClock<T: Clock>(core::marker::PhantomData<T>);

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl<T: Clock> Clock for DwtClock<T> {
    #[inline]
    fn now() -> SysTime {
        T::now()
    }

    #[inline]
    fn rt_counter() -> Option<u32> {
        Some(cortex_m::peripheral::DWT::cycle_count())
    }
}
