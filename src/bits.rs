//! Bit and bitfield helpers for 8- and 16-bit register words.
//!
//! Positions are counted from the least significant bit. None of these helpers
//! perform I/O and none of them can fail.

/// A register word the transport can move: one or two bytes, most significant byte first.
pub trait RegisterWord: Copy + PartialEq + core::fmt::Debug {
    /// Number of bytes on the wire.
    const BYTES: usize;

    fn to_u32(self) -> u32;

    /// Truncates to the word width.
    fn from_u32(v: u32) -> Self;

    fn from_be_slice(b: &[u8]) -> Self;

    fn write_be(self, out: &mut [u8]);
}

impl RegisterWord for u8 {
    const BYTES: usize = 1;

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(v: u32) -> Self {
        v as u8
    }

    fn from_be_slice(b: &[u8]) -> Self {
        b[0]
    }

    fn write_be(self, out: &mut [u8]) {
        out[0] = self;
    }
}

impl RegisterWord for u16 {
    const BYTES: usize = 2;

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(v: u32) -> Self {
        v as u16
    }

    fn from_be_slice(b: &[u8]) -> Self {
        u16::from_be_bytes([b[0], b[1]])
    }

    fn write_be(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.to_be_bytes());
    }
}

#[inline]
const fn field_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Sets (`value != 0`) or clears (`value == 0`) a single bit.
pub fn set_bit<W: RegisterWord>(target: &mut W, position: u32, value: u32) {
    let word = target.to_u32();
    let word = if value != 0 {
        word | (1 << position)
    } else {
        word & !(1 << position)
    };
    *target = W::from_u32(word);
}

/// Replaces the `width`-bit field starting at `position` with `value`.
///
/// `value` is not masked: it must fit in `width` bits.
pub fn set_pattern<W: RegisterWord>(target: &mut W, position: u32, value: u32, width: u32) {
    let mask = field_mask(width) << position;
    *target = W::from_u32((target.to_u32() & !mask) | (value << position));
}

/// Returns true if the bit at `position` is set.
pub fn has_bit_set<W: RegisterWord>(target: W, position: u32) -> bool {
    target.to_u32() & (1 << position) != 0
}

/// Returns true if the `width`-bit field at `position` equals `bits`.
pub fn has_pattern<W: RegisterWord>(target: W, position: u32, bits: u32, width: u32) -> bool {
    (target.to_u32() >> position) & field_mask(width) == bits
}

/// Sign-extends a `bit_length`-wide raw value into an `i32`.
///
/// If bit `bit_length - 1` is set every higher bit is set, otherwise every
/// higher bit is cleared. A `bit_length` of 32 or more returns `raw` unchanged.
pub fn twos_complement(raw: u32, bit_length: u32) -> i32 {
    if bit_length == 0 || bit_length >= 32 {
        return raw as i32;
    }

    let mask = field_mask(bit_length);
    if raw & (1 << (bit_length - 1)) != 0 {
        (raw | !mask) as i32
    } else {
        (raw & mask) as i32
    }
}
