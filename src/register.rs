//! Typed register markers.
//!
//! Each device module declares its registers as zero-sized marker types
//! implementing [`Reg`]. The marker carries the register address and the width
//! of the word stored there, which lets [`RegisterBus`](crate::bus::RegisterBus)
//! move exactly the right number of bytes.

use crate::bits::RegisterWord;

/// A register at a fixed address holding a `Word`.
pub trait Reg {
    const ADDR: u8;
    type Word: RegisterWord;
}

/// Declares a marker type for a register.
macro_rules! register {
    ($(#[$meta:meta])* $name:ident, $addr:expr, $word:ty) => {
        $(#[$meta])*
        pub struct $name;

        impl $crate::register::Reg for $name {
            const ADDR: u8 = $addr;
            type Word = $word;
        }
    };
}

pub(crate) use register;
