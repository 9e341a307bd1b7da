use super::register::{COEF, COEF_LEN};
use crate::bits::twos_complement;
use crate::bus::{RegisterBus, Transport};
use crate::error::SensorResult;

/// Per-unit calibration coefficients, sign extended.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Coefficients {
    pub c0: i32,
    pub c1: i32,
    pub c00: i32,
    pub c10: i32,
    pub c01: i32,
    pub c11: i32,
    pub c20: i32,
    pub c21: i32,
    pub c30: i32,
}

impl Coefficients {
    /// Reads the coefficient block, one register at a time.
    ///
    /// The caller must have seen COEF_RDY set first.
    pub fn read<T: Transport>(bus: &mut RegisterBus<'_, T>) -> SensorResult<Self, T::Error> {
        let mut buf = [0u8; COEF_LEN];
        bus.read_block(COEF, &mut buf)?;

        Ok(Self::decode(&buf))
    }

    /// Unpacks the coefficient block. c0 and c1 are 12 bits wide, c00 and c10
    /// 20 bits, the rest 16 bits; neighbours share a byte at the nibble boundary.
    pub fn decode(b: &[u8; COEF_LEN]) -> Self {
        let u = |i: usize| b[i] as u32;

        Self {
            c0: twos_complement((u(0) << 4) | (u(1) >> 4), 12),
            c1: twos_complement(((u(1) & 0x0F) << 8) | u(2), 12),
            c00: twos_complement((u(3) << 12) | (u(4) << 4) | (u(5) >> 4), 20),
            c10: twos_complement(((u(5) & 0x0F) << 16) | (u(6) << 8) | u(7), 20),
            c01: twos_complement((u(8) << 8) | u(9), 16),
            c11: twos_complement((u(10) << 8) | u(11), 16),
            c20: twos_complement((u(12) << 8) | u(13), 16),
            c21: twos_complement((u(14) << 8) | u(15), 16),
            c30: twos_complement((u(16) << 8) | u(17), 16),
        }
    }

    /// Temperature in °C from a scaled raw temperature.
    pub fn compensate_temperature(&self, t_raw_sc: f32) -> f32 {
        0.5 * self.c0 as f32 + self.c1 as f32 * t_raw_sc
    }

    /// Pressure in hPa from scaled raw pressure and temperature.
    ///
    /// `t_raw_sc` must come from the temperature measurement taken just before.
    pub fn compensate_pressure(&self, p_raw_sc: f32, t_raw_sc: f32) -> f32 {
        let p = p_raw_sc;
        let c00 = self.c00 as f32;
        let c10 = self.c10 as f32;
        let c20 = self.c20 as f32;
        let c30 = self.c30 as f32;
        let c01 = self.c01 as f32;
        let c11 = self.c11 as f32;
        let c21 = self.c21 as f32;

        let pascal = c00 + p * (c10 + p * (c20 + p * c30)) + t_raw_sc * (c01 + p * (c11 + p * c21));
        pascal / 100.0
    }
}

/// Joins three result bytes, MSB first, into a signed 24-bit value.
pub fn raw_24(b: &[u8; 3]) -> i32 {
    twos_complement(((b[0] as u32) << 16) | ((b[1] as u32) << 8) | b[2] as u32, 24)
}
