#![cfg_attr(not(test), no_std)]
//! Polled, non-blocking drivers for single-shot I2C sensors.
//!
//! Every driver is a [`Sensor`]: call `setup()` and `begin()` once, then call
//! `update()` on every tick of your main loop. Start a conversion with
//! `request()`, wait for `available()` and collect the result with `read()`.
//!
//! ```ignore
//! let mut adc = Ads1x1x::ads1x1x(I2c::new(i2c), clock);
//! adc.setup_device(ads1x1x::config::Address::Primary, DeviceType::Ads111x, Default::default());
//! adc.begin(&mut delay)?;
//! adc.request(Some(Channel::Ain0Gnd))?;
//! loop {
//!     adc.update();
//!     if adc.available() {
//!         let voltage = adc.read()?;
//!         adc.request(None)?;
//!     }
//! }
//! ```

pub mod ads1x1x;
pub mod bits;
pub mod bus;
pub mod clock;
pub mod dps310;
pub mod error;
pub mod machine;
pub mod register;
pub mod wait;

#[cfg(test)]
mod testing;

pub use bus::{I2c, RegisterBus, Transport};
pub use clock::Clock;
pub use error::{ErrorKind, SensorError, SensorResult};
pub use machine::{Device, Outcome, Sensor, State};

/// ADS101x / ADS111x session.
pub type Ads1x1x<T, C> = Sensor<ads1x1x::Adc, T, C>;

/// DPS310 session.
pub type Dps310<T, C> = Sensor<dps310::Barometer, T, C>;
