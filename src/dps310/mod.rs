//! Infineon DPS310 barometric pressure sensor, in one-shot mode.
//!
//! Each request measures temperature first and pressure second: pressure
//! compensation needs the temperature taken right before it.

mod calibration;
pub mod config;
mod register;

pub use calibration::Coefficients;

use crate::bits::{has_bit_set, set_bit, set_pattern};
use crate::bus::{RegisterBus, Transport};
use crate::clock::Clock;
use crate::error::{SensorError, SensorResult};
use crate::machine::{Device, Outcome, Sensor};
use crate::wait::Poll;
use calibration::raw_24;
use config::{Address, OperationMode, Settings};
use embedded_hal::delay::DelayNs;
use register::*;

/// Value of the product id register on a genuine part.
pub const PRODUCT_ID: u8 = 0x10;

// SENSOR_RDY is polled every 12 ms after a soft reset, COEF_RDY every 1 ms.
const SENSOR_READY: Poll = Poll::new(10, 12);
const COEFFICIENTS_READY: Poll = Poll::new(50, 1);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Temperature,
    Pressure,
}

/// A compensated measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    /// °C
    pub temperature: f32,
    /// hPa
    pub pressure: f32,
}

impl Measurement {
    /// Altitude in meters above the level where pressure is `sea_level_hpa`.
    pub fn altitude(&self, sea_level_hpa: f32) -> f32 {
        altitude(self.pressure, sea_level_hpa)
    }

    #[cfg(feature = "uom")]
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::hectopascal>(self.pressure)
    }

    #[cfg(feature = "uom")]
    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(
            self.temperature,
        )
    }
}

/// International barometric formula.
pub fn altitude(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    44330.0 * (1.0 - libm::powf(pressure_hpa / sea_level_hpa, 0.1903))
}

/// Conversion plan and compensation for the DPS310.
#[derive(Debug, Default)]
pub struct Barometer {
    coefficients: Option<Coefficients>,
    t_raw_sc: f32,
    temperature: f32,
    last: Option<Measurement>,
}

impl Barometer {
    /// Coefficients loaded by the last successful `begin()`.
    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    /// The last measurement handed out, if any.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last
    }

    fn coefficients_or_unknown<E>(&self) -> SensorResult<Coefficients, E> {
        self.coefficients.ok_or(SensorError::Unknown)
    }
}

pub fn read_id<T: Transport>(bus: &mut RegisterBus<'_, T>) -> SensorResult<u8, T::Error> {
    bus.read::<ProductId>()
}

/// Resets the chip to factory defaults and waits until it reports ready.
pub fn soft_reset<T: Transport, D: DelayNs>(
    bus: &mut RegisterBus<'_, T>,
    delay: &mut D,
) -> SensorResult<(), T::Error> {
    bus.write::<Reset>(SOFT_RESET)?;
    SENSOR_READY.until(delay, || {
        Ok(has_bit_set(bus.read::<MeasCfg>()?, meas_cfg::SENSOR_RDY))
    })
}

fn apply_operation_mode<T: Transport>(
    bus: &mut RegisterBus<'_, T>,
    mode: OperationMode,
) -> SensorResult<(), T::Error> {
    bus.modify::<MeasCfg>(|v| set_pattern(v, meas_cfg::MEAS_CTRL, u8::from(mode).into(), MEAS_CTRL_WIDTH))
}

fn apply_pressure_settings<T: Transport>(
    bus: &mut RegisterBus<'_, T>,
    settings: &Settings,
) -> SensorResult<(), T::Error> {
    bus.modify::<PrsCfg>(|v| {
        set_pattern(v, prs_cfg::PM_RATE, u8::from(settings.pressure_sampling_rate).into(), RATE_WIDTH);
        set_pattern(v, prs_cfg::PM_PRC, u8::from(settings.pressure_precision).into(), PRC_WIDTH);
    })?;
    bus.modify::<CfgReg>(|v| {
        set_bit(v, cfg_reg::P_SHIFT, settings.pressure_precision.needs_shift() as u32)
    })
}

fn apply_temperature_settings<T: Transport>(
    bus: &mut RegisterBus<'_, T>,
    settings: &Settings,
) -> SensorResult<(), T::Error> {
    bus.modify::<TmpCfg>(|v| {
        set_bit(v, tmp_cfg::TMP_EXT, u8::from(settings.temperature_source).into());
        set_pattern(v, tmp_cfg::TMP_RATE, u8::from(settings.temperature_sampling_rate).into(), RATE_WIDTH);
        set_pattern(v, tmp_cfg::TMP_PRC, u8::from(settings.temperature_precision).into(), PRC_WIDTH);
    })?;
    bus.modify::<CfgReg>(|v| {
        set_bit(v, cfg_reg::T_SHIFT, settings.temperature_precision.needs_shift() as u32)
    })
}

fn load_coefficients<T: Transport, D: DelayNs>(
    bus: &mut RegisterBus<'_, T>,
    settings: &Settings,
    delay: &mut D,
) -> SensorResult<Coefficients, T::Error> {
    bus.modify::<CoefSrce>(|v| {
        set_bit(v, coef_srce::TMP_COEF_SRCE, u8::from(settings.temperature_source).into())
    })?;
    COEFFICIENTS_READY.until(delay, || {
        Ok(has_bit_set(bus.read::<MeasCfg>()?, meas_cfg::COEF_RDY))
    })?;

    Coefficients::read(bus)
}

impl Device for Barometer {
    type Address = Address;
    type Settings = Settings;
    type Request = ();
    type Reading = Measurement;
    type Phase = Phase;

    const NAME: &'static str = "DPS310";
    const STARTUP_DELAY_MS: u32 = 50;

    fn configure<T: Transport, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        delay: &mut D,
    ) -> SensorResult<(), T::Error> {
        self.coefficients = None;

        let id = read_id(bus)?;
        if id != PRODUCT_ID {
            return Err(SensorError::UnexpectedIdentity(id));
        }

        soft_reset(bus, delay)?;
        log::debug!("DPS310 reset");

        apply_pressure_settings(bus, settings)?;
        apply_temperature_settings(bus, settings)?;
        let coefficients = load_coefficients(bus, settings, delay)?;
        log::debug!("DPS310 coefficients: {:?}", coefficients);
        self.coefficients = Some(coefficients);

        apply_operation_mode(bus, OperationMode::Standby)
    }

    fn start<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        _request: (),
    ) -> SensorResult<Phase, T::Error> {
        self.trigger(bus, settings, Phase::Temperature)?;
        Ok(Phase::Temperature)
    }

    fn trigger<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        _settings: &Settings,
        phase: Phase,
    ) -> SensorResult<(), T::Error> {
        let mode = match phase {
            Phase::Temperature => OperationMode::OneShotTemperature,
            Phase::Pressure => OperationMode::OneShotPressure,
        };
        apply_operation_mode(bus, mode)
    }

    fn poll<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        _settings: &Settings,
        phase: Phase,
        _elapsed_ms: u32,
    ) -> SensorResult<bool, T::Error> {
        let flag = match phase {
            Phase::Temperature => meas_cfg::TMP_RDY,
            Phase::Pressure => meas_cfg::PRS_RDY,
        };
        let ready = has_bit_set(bus.read::<MeasCfg>()?, flag);
        log::trace!("DPS310 {:?} ready: {}", phase, ready);

        Ok(ready)
    }

    fn collect<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Settings,
        phase: Phase,
    ) -> SensorResult<Outcome<Phase, Measurement>, T::Error> {
        let coefficients = self.coefficients_or_unknown()?;
        let mut raw = [0u8; 3];

        match phase {
            Phase::Temperature => {
                bus.read_block(TMP_B2, &mut raw)?;
                self.t_raw_sc = raw_24(&raw) as f32 / settings.temperature_precision.scale_factor();
                self.temperature = coefficients.compensate_temperature(self.t_raw_sc);

                Ok(Outcome::Next(Phase::Pressure))
            }
            Phase::Pressure => {
                bus.read_block(PRS_B2, &mut raw)?;
                let p_raw_sc = raw_24(&raw) as f32 / settings.pressure_precision.scale_factor();
                let measurement = Measurement {
                    temperature: self.temperature,
                    pressure: coefficients.compensate_pressure(p_raw_sc, self.t_raw_sc),
                };
                self.last = Some(measurement);

                Ok(Outcome::Done(measurement))
            }
        }
    }
}

impl<T: Transport, C: Clock> Sensor<Barometer, T, C> {
    /// Creates a session for a DPS310; call `setup()` next.
    pub fn dps310(transport: T, clock: C) -> Self {
        Sensor::new(Barometer::default(), transport, clock)
    }

    /// Reads the product id register.
    pub fn read_id(&mut self) -> SensorResult<u8, T::Error> {
        read_id(&mut self.bus())
    }

    /// Soft resets the chip. Settings are lost until the next `begin()`.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> SensorResult<(), T::Error> {
        soft_reset(&mut self.bus(), delay)
    }

    /// Altitude from the last measured pressure, `None` before the first measurement.
    pub fn altitude(&self, sea_level_hpa: f32) -> Option<f32> {
        self.device().last_measurement().map(|m| m.altitude(sea_level_hpa))
    }

    /// Typical time the configured temperature and pressure measurements take together.
    pub fn measurement_time_ms(&self) -> u32 {
        let settings = self.settings();
        settings.temperature_precision.measurement_time_ms()
            + settings.pressure_precision.measurement_time_ms()
    }
}
