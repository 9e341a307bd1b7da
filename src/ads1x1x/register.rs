use crate::register::register;

register!(
    /// Last conversion result, left aligned. ADS101x only fills bits 15:4.
    Conversion, 0x00, u16
);
register!(Config, 0x01, u16);

/// Operational status. Writing 1 starts a single conversion.
pub const OS: u32 = 15;
/// Input multiplexer, 3 bits.
pub const MUX: u32 = 12;
/// Programmable gain amplifier (full-scale range), 3 bits.
pub const PGA: u32 = 9;
/// 1 = single-shot / power-down.
pub const MODE: u32 = 8;
/// Data rate, 3 bits.
pub const DR: u32 = 5;

pub const FIELD_WIDTH: u32 = 3;
