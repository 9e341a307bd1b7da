//! Bounded busy-waiting, only used while bringing a device up.

use crate::error::{SensorError, SensorResult};
use embedded_hal::delay::DelayNs;

/// Sleep `interval_ms`, then check a condition, at most `attempts` times.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Poll {
    pub attempts: u32,
    pub interval_ms: u32,
}

impl Poll {
    pub const fn new(attempts: u32, interval_ms: u32) -> Self {
        Self { attempts, interval_ms }
    }

    /// Returns once `ready` reports true.
    ///
    /// Errors from `ready` abort the wait immediately. If the attempts run out
    /// a [`SensorError::Timeout`] is returned.
    pub fn until<D, E, F>(&self, delay: &mut D, mut ready: F) -> SensorResult<(), E>
    where
        D: DelayNs,
        F: FnMut() -> SensorResult<bool, E>,
    {
        for attempt in 0..self.attempts {
            delay.delay_ms(self.interval_ms);
            if ready()? {
                log::trace!("ready after {} poll(s)", attempt + 1);
                return Ok(());
            }
        }

        Err(SensorError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDelay;

    #[test]
    fn returns_when_ready() {
        let mut delay = FakeDelay::default();
        let mut calls = 0;
        let result: SensorResult<(), ()> = Poll::new(5, 12).until(&mut delay, || {
            calls += 1;
            Ok(calls == 3)
        });

        assert_eq!(Ok(()), result);
        assert_eq!(3, calls);
        assert_eq!(36, delay.total_ms);
    }

    #[test]
    fn gives_up_after_attempts() {
        let mut delay = FakeDelay::default();
        let mut calls = 0;
        let result: SensorResult<(), ()> = Poll::new(4, 1).until(&mut delay, || {
            calls += 1;
            Ok(false)
        });

        assert_eq!(Err(SensorError::Timeout), result);
        assert_eq!(4, calls);
    }

    #[test]
    fn errors_abort_the_wait() {
        let mut delay = FakeDelay::default();
        let mut calls = 0;
        let result = Poll::new(4, 1).until(&mut delay, || {
            calls += 1;
            Err(SensorError::NotResponding(7u8))
        });

        assert_eq!(Err(SensorError::NotResponding(7)), result);
        assert_eq!(1, calls);
    }
}
