//! Monotonic millisecond time source used to time conversions.
//!
//! Blocking delays (only used while bringing a device up) go through
//! [`embedded_hal::delay::DelayNs`] instead.

pub trait Clock {
    /// Milliseconds since an arbitrary epoch. Wraps around.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// [`Clock`] backed by the embassy time driver.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of one wrap-around.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
