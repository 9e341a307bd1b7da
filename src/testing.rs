use crate::bits::RegisterWord;
use crate::bus::{Transport, MAX_REG_BYTES};
use crate::clock::Clock;
use crate::register::Reg;
use core::cell::Cell;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;
use heapless::Vec;

/// Error returned by an offline [`FakeBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offline;

/// A register write observed by the [`FakeBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub address: SevenBitAddress,
    pub register: u8,
    pub data: [u8; MAX_REG_BYTES],
    pub len: usize,
}

impl Write {
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// Register file backed transport. Every register holds up to [`MAX_REG_BYTES`] bytes.
pub struct FakeBus {
    pub registers: [[u8; MAX_REG_BYTES]; 256],
    pub writes: Vec<Write, 64>,
    pub reads: usize,
    pub opened: usize,
    pub closed: usize,
    pub offline: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            registers: [[0u8; MAX_REG_BYTES]; 256],
            writes: Vec::new(),
            reads: 0,
            opened: 0,
            closed: 0,
            offline: false,
        }
    }

    /// Stores `value` big-endian at the register identified by `R`.
    pub fn with_value<R: Reg>(&mut self, value: R::Word) -> &mut Self {
        let mut buf = [0u8; MAX_REG_BYTES];
        let n = <R::Word as RegisterWord>::BYTES;
        value.write_be(&mut buf[..n]);
        self.registers[R::ADDR as usize] = buf;
        self
    }

    /// Fills consecutive single-byte registers starting at `first`.
    pub fn set_bytes(&mut self, first: u8, bytes: &[u8]) -> &mut Self {
        for (i, b) in bytes.iter().enumerate() {
            self.registers[first.wrapping_add(i as u8) as usize][0] = *b;
        }
        self
    }

    pub fn value<R: Reg>(&self) -> R::Word {
        let n = <R::Word as RegisterWord>::BYTES;
        R::Word::from_be_slice(&self.registers[R::ADDR as usize][..n])
    }

    /// Total number of transfers seen, successful or not.
    pub fn transfers(&self) -> usize {
        self.reads + self.writes.len()
    }

    pub fn writes_to(&self, register: u8) -> impl Iterator<Item = &Write> {
        self.writes.iter().filter(move |w| w.register == register)
    }
}

impl Transport for FakeBus {
    type Error = Offline;

    fn open(&mut self) {
        self.opened += 1;
    }

    fn close(&mut self) {
        self.closed += 1;
    }

    fn read_register(
        &mut self,
        _address: SevenBitAddress,
        register: u8,
        data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.reads += 1;
        if self.offline {
            return Err(Offline);
        }

        let len = data.len().min(MAX_REG_BYTES);
        data[..len].copy_from_slice(&self.registers[register as usize][..len]);
        Ok(())
    }

    fn write_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        let len = data.len().min(MAX_REG_BYTES);
        let mut logged = [0u8; MAX_REG_BYTES];
        logged[..len].copy_from_slice(&data[..len]);
        self.writes.push(Write { address, register, data: logged, len }).unwrap();

        if self.offline {
            return Err(Offline);
        }

        self.registers[register as usize][..len].copy_from_slice(&data[..len]);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClock {
    now: Cell<u32>,
}

impl FakeClock {
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Returns immediately, keeping a tally of the requested time.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ms: u32,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}
