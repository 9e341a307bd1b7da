//! ADS101x (12-bit) and ADS111x (16-bit) delta-sigma ADCs in single-shot mode.
//!
//! A conversion is started by setting OS in the config register. The result is
//! ready after one sample period of the programmed data rate.

pub mod config;
mod register;

use crate::bits::{set_bit, set_pattern};
use crate::bus::{RegisterBus, Transport};
use crate::clock::Clock;
use crate::error::SensorResult;
use crate::machine::{Device, Outcome, Sensor};
use config::{Address, Channel, DeviceType, Settings};
use embedded_hal::delay::DelayNs;
use register::{Config, Conversion, FIELD_WIDTH};

/// The only phase of an ADC conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Conversion,
}

/// A converted sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Voltage {
    /// Input voltage in millivolts. Negative for a negative differential input.
    pub millivolts: i32,
    /// Signed conversion code, right aligned.
    pub code: i16,
}

impl Voltage {
    #[cfg(feature = "uom")]
    pub fn to_uom(&self) -> uom::si::f32::ElectricPotential {
        uom::si::f32::ElectricPotential::new::<uom::si::electric_potential::millivolt>(self.millivolts as f32)
    }
}

/// Conversion plan and scaling for the ADS1x1x family.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adc {
    device_type: DeviceType,
}

impl Adc {
    pub fn new(device_type: DeviceType) -> Self {
        Self { device_type }
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Scales a raw conversion register value.
    pub fn decode(&self, raw: u16, settings: &Settings) -> Voltage {
        let code = match self.device_type {
            // 12-bit result in bits 15:4, arithmetic shift keeps the sign
            DeviceType::Ads101x => (raw as i16) >> 4,
            DeviceType::Ads111x => raw as i16,
        };

        Voltage {
            millivolts: code as i32 * settings.full_scale_range.millivolts()
                / self.device_type.full_scale_code(),
            code,
        }
    }
}

impl Device for Adc {
    type Address = Address;
    type Settings = Settings;
    type Request = Option<Channel>;
    type Reading = Voltage;
    type Phase = Phase;

    const NAME: &'static str = "ADS1x1x";

    fn configure<T: Transport, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        _delay: &mut D,
    ) -> SensorResult<(), T::Error> {
        let device_type = self.device_type;
        bus.modify::<Config>(|c| {
            set_pattern(c, register::PGA, u16::from(settings.full_scale_range).into(), FIELD_WIDTH)
        })?;
        bus.modify::<Config>(|c| {
            set_pattern(c, register::DR, settings.data_rate.field(device_type).into(), FIELD_WIDTH)
        })?;
        bus.modify::<Config>(|c| set_bit(c, register::MODE, 1))?;

        log::debug!(
            "{:?}: range {} mV, {} SPS",
            device_type,
            settings.full_scale_range.millivolts(),
            settings.data_rate.effective(device_type).samples_per_second()
        );
        Ok(())
    }

    fn start<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        channel: Option<Channel>,
    ) -> SensorResult<Phase, T::Error> {
        let channel = channel.unwrap_or(settings.channel);
        bus.modify::<Config>(|c| {
            set_bit(c, register::OS, 1);
            set_pattern(c, register::MUX, u16::from(channel).into(), FIELD_WIDTH);
        })?;

        Ok(Phase::Conversion)
    }

    fn trigger<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        _phase: Phase,
    ) -> SensorResult<(), T::Error> {
        self.start(bus, settings, None).map(|_| ())
    }

    fn poll<T: Transport>(
        &mut self,
        _bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        _phase: Phase,
        elapsed_ms: u32,
    ) -> SensorResult<bool, T::Error> {
        Ok(elapsed_ms >= settings.data_rate.conversion_time_ms(self.device_type))
    }

    fn collect<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        _phase: Phase,
    ) -> SensorResult<Outcome<Phase, Voltage>, T::Error> {
        let raw = bus.read::<Conversion>()?;
        Ok(Outcome::Done(self.decode(raw, settings)))
    }
}

impl<T: Transport, C: Clock> Sensor<Adc, T, C> {
    /// Creates a session for an ADS1x1x; call `setup_device()` or `setup()` next.
    pub fn ads1x1x(transport: T, clock: C) -> Self {
        Sensor::new(Adc::default(), transport, clock)
    }

    /// Like `setup()`, also selecting the resolution family.
    pub fn setup_device(&mut self, address: Address, device_type: DeviceType, settings: Settings) {
        self.device_mut().device_type = device_type;
        self.setup(address, settings);
    }
}
