//! Byte-oriented register transport.
//!
//! [`Transport`] is the seam between the drivers and the physical bus. The
//! [`I2c`] adapter implements it for any blocking `embedded-hal` I2C bus, tests
//! implement it with a fake register file. [`RegisterBus`] binds a transport to
//! a device address and adds typed register access on top.

use crate::bits::RegisterWord;
use crate::error::{SensorError, SensorResult};
use crate::register::Reg;
use embedded_hal::i2c::SevenBitAddress;

/// Largest register transfer the drivers issue, in bytes.
pub const MAX_REG_BYTES: usize = 2;

pub trait Transport {
    type Error: core::fmt::Debug;

    /// Called by `begin()` before any register access.
    fn open(&mut self) {}

    /// Called by `end()`.
    fn close(&mut self) {}

    /// Reads `data.len()` bytes starting at `register`. The first byte read is the most significant.
    fn read_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Writes `data` to `register`, most significant byte first.
    ///
    /// `data` holds one register word, at most [`MAX_REG_BYTES`] bytes.
    fn write_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}

/// [`Transport`] over a blocking `embedded-hal` I2C bus.
pub struct I2c<I2cType> {
    i2c: I2cType,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2cType) -> Self {
        Self { i2c }
    }

    /// Gives back the wrapped bus.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Transport for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = I2cType::Error;

    fn read_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], data)
    }

    fn write_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        debug_assert!(data.len() <= MAX_REG_BYTES);
        let len = data.len().min(MAX_REG_BYTES);
        let mut frame = [0u8; MAX_REG_BYTES + 1];
        frame[0] = register;
        frame[1..=len].copy_from_slice(&data[..len]);

        self.i2c.write(address, &frame[..=len])
    }
}

/// A transport bound to one device address, with typed register access.
///
/// Every failure is reported as [`SensorError::NotResponding`] and is never retried.
pub struct RegisterBus<'a, T> {
    transport: &'a mut T,
    address: SevenBitAddress,
}

impl<'a, T: Transport> RegisterBus<'a, T> {
    pub fn new(transport: &'a mut T, address: SevenBitAddress) -> Self {
        Self { transport, address }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Reads the register identified by the marker `R`.
    pub fn read<R: Reg>(&mut self) -> SensorResult<R::Word, T::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let buf = &mut buf[..<R::Word as RegisterWord>::BYTES];
        self.transport
            .read_register(self.address, R::ADDR, buf)
            .map_err(SensorError::NotResponding)?;

        Ok(R::Word::from_be_slice(buf))
    }

    /// Writes `value` to the register identified by the marker `R`.
    pub fn write<R: Reg>(&mut self, value: R::Word) -> SensorResult<(), T::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let buf = &mut buf[..<R::Word as RegisterWord>::BYTES];
        value.write_be(buf);

        self.transport
            .write_register(self.address, R::ADDR, buf)
            .map_err(SensorError::NotResponding)
    }

    /// Read-modify-write of the register identified by `R`.
    pub fn modify<R: Reg>(&mut self, f: impl FnOnce(&mut R::Word)) -> SensorResult<(), T::Error> {
        let mut value = self.read::<R>()?;
        f(&mut value);
        self.write::<R>(value)
    }

    /// Reads consecutive single-byte registers starting at `first`, one transfer per byte.
    pub fn read_block(&mut self, first: u8, buf: &mut [u8]) -> SensorResult<(), T::Error> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            self.transport
                .read_register(self.address, first.wrapping_add(offset as u8), core::slice::from_mut(byte))
                .map_err(SensorError::NotResponding)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::register;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    register!(Word16, 0x01, u16);
    register!(Byte8, 0x08, u8);

    const ADDR: u8 = 0x48;

    #[test]
    fn reads_words_msb_first() {
        let expectations = [
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x85, 0x83]),
            I2cTransaction::write_read(ADDR, vec![0x08], vec![0xC0]),
        ];
        let mut transport = I2c::new(I2cMock::new(&expectations));
        let mut bus = RegisterBus::new(&mut transport, ADDR);

        assert_eq!(0x8583, bus.read::<Word16>().unwrap());
        assert_eq!(0xC0, bus.read::<Byte8>().unwrap());

        transport.release().done();
    }

    #[test]
    fn writes_words_msb_first() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x01, 0xC3, 0x85]),
            I2cTransaction::write(ADDR, vec![0x08, 0x02]),
        ];
        let mut transport = I2c::new(I2cMock::new(&expectations));
        let mut bus = RegisterBus::new(&mut transport, ADDR);

        bus.write::<Word16>(0xC385).unwrap();
        bus.write::<Byte8>(0x02).unwrap();

        transport.release().done();
    }

    #[test]
    fn modify_is_read_then_write() {
        let expectations = [
            I2cTransaction::write_read(ADDR, vec![0x08], vec![0b1100_0000]),
            I2cTransaction::write(ADDR, vec![0x08, 0b1100_0010]),
        ];
        let mut transport = I2c::new(I2cMock::new(&expectations));
        let mut bus = RegisterBus::new(&mut transport, ADDR);

        bus.modify::<Byte8>(|v| crate::bits::set_pattern(v, 0, 0b010, 3)).unwrap();

        transport.release().done();
    }

    #[test]
    fn read_block_reads_one_byte_per_register() {
        let expectations = [
            I2cTransaction::write_read(ADDR, vec![0x03], vec![0x12]),
            I2cTransaction::write_read(ADDR, vec![0x04], vec![0x34]),
            I2cTransaction::write_read(ADDR, vec![0x05], vec![0x56]),
        ];
        let mut transport = I2c::new(I2cMock::new(&expectations));
        let mut bus = RegisterBus::new(&mut transport, ADDR);

        let mut buf = [0u8; 3];
        bus.read_block(0x03, &mut buf).unwrap();
        assert_eq!([0x12, 0x34, 0x56], buf);

        transport.release().done();
    }

    #[test]
    fn bus_errors_surface_as_not_responding() {
        use embedded_hal::i2c::ErrorKind;

        let expectations = [I2cTransaction::write_read(ADDR, vec![0x08], vec![0x00])
            .with_error(ErrorKind::Other)];
        let mut transport = I2c::new(I2cMock::new(&expectations));
        let mut bus = RegisterBus::new(&mut transport, ADDR);

        assert_eq!(Err(SensorError::NotResponding(ErrorKind::Other)), bus.read::<Byte8>());

        transport.release().done();
    }
}
