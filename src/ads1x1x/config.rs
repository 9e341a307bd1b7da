use embedded_hal::i2c::SevenBitAddress;

/// I2C address, selected by how the ADDR pin is strapped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Address {
    /// ADDR to GND
    #[default]
    Primary,
    /// ADDR to VDD
    Secondary,
    /// ADDR to SDA
    Tertiary,
    /// ADDR to SCL
    Quaternary,
}

impl From<Address> for SevenBitAddress {
    fn from(address: Address) -> Self {
        match address {
            Address::Primary => 0x48,
            Address::Secondary => 0x49,
            Address::Tertiary => 0x4A,
            Address::Quaternary => 0x4B,
        }
    }
}

/// Resolution family.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DeviceType {
    /// ADS1013/4/5, 12-bit.
    #[default]
    Ads101x,
    /// ADS1113/4/5, 16-bit.
    Ads111x,
}

impl DeviceType {
    /// Largest positive code of a conversion result.
    pub fn full_scale_code(self) -> i32 {
        match self {
            DeviceType::Ads101x => 0x7FF,
            DeviceType::Ads111x => 0x7FFF,
        }
    }
}

/// Input multiplexer setting: positive input first, negative input second.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Channel {
    #[default]
    Ain0Ain1,
    Ain0Ain3,
    Ain1Ain3,
    Ain2Ain3,
    Ain0Gnd,
    Ain1Gnd,
    Ain2Gnd,
    Ain3Gnd,
}

impl Channel {
    /// Index of the positive input.
    pub fn number(self) -> u8 {
        match self {
            Channel::Ain0Ain1 | Channel::Ain0Ain3 | Channel::Ain0Gnd => 0,
            Channel::Ain1Ain3 | Channel::Ain1Gnd => 1,
            Channel::Ain2Ain3 | Channel::Ain2Gnd => 2,
            Channel::Ain3Gnd => 3,
        }
    }

    /// True when the negative input is GND.
    pub fn is_single_ended(self) -> bool {
        matches!(
            self,
            Channel::Ain0Gnd | Channel::Ain1Gnd | Channel::Ain2Gnd | Channel::Ain3Gnd
        )
    }
}

impl From<Channel> for u16 {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Ain0Ain1 => 0b000,
            Channel::Ain0Ain3 => 0b001,
            Channel::Ain1Ain3 => 0b010,
            Channel::Ain2Ain3 => 0b011,
            Channel::Ain0Gnd => 0b100,
            Channel::Ain1Gnd => 0b101,
            Channel::Ain2Gnd => 0b110,
            Channel::Ain3Gnd => 0b111,
        }
    }
}

/// Input range mapped onto the full code span.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FullScaleRange {
    Fsr6144mV,
    Fsr4096mV,
    #[default]
    Fsr2048mV,
    Fsr1024mV,
    Fsr512mV,
    Fsr256mV,
}

impl FullScaleRange {
    pub fn millivolts(self) -> i32 {
        match self {
            FullScaleRange::Fsr6144mV => 6144,
            FullScaleRange::Fsr4096mV => 4096,
            FullScaleRange::Fsr2048mV => 2048,
            FullScaleRange::Fsr1024mV => 1024,
            FullScaleRange::Fsr512mV => 512,
            FullScaleRange::Fsr256mV => 256,
        }
    }
}

impl From<FullScaleRange> for u16 {
    fn from(range: FullScaleRange) -> Self {
        match range {
            FullScaleRange::Fsr6144mV => 0b000,
            FullScaleRange::Fsr4096mV => 0b001,
            FullScaleRange::Fsr2048mV => 0b010,
            FullScaleRange::Fsr1024mV => 0b011,
            FullScaleRange::Fsr512mV => 0b100,
            FullScaleRange::Fsr256mV => 0b101,
        }
    }
}

/// Samples per second. Which rates exist depends on the [`DeviceType`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    #[default]
    Sps128,
    Sps250,
    Sps475,
    Sps490,
    Sps860,
    Sps920,
    Sps1600,
    Sps2400,
    Sps3300,
}

impl DataRate {
    pub fn samples_per_second(self) -> u32 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps490 => 490,
            DataRate::Sps860 => 860,
            DataRate::Sps920 => 920,
            DataRate::Sps1600 => 1600,
            DataRate::Sps2400 => 2400,
            DataRate::Sps3300 => 3300,
        }
    }

    /// The rate actually programmed on `device_type`.
    ///
    /// Rates the device does not support fall back to the device default,
    /// 1600 SPS on ADS101x and 128 SPS on ADS111x.
    pub fn effective(self, device_type: DeviceType) -> DataRate {
        match (device_type, self) {
            (
                DeviceType::Ads101x,
                DataRate::Sps128
                | DataRate::Sps250
                | DataRate::Sps490
                | DataRate::Sps920
                | DataRate::Sps1600
                | DataRate::Sps2400
                | DataRate::Sps3300,
            ) => self,
            (DeviceType::Ads101x, _) => DataRate::Sps1600,
            (
                DeviceType::Ads111x,
                DataRate::Sps8
                | DataRate::Sps16
                | DataRate::Sps32
                | DataRate::Sps64
                | DataRate::Sps128
                | DataRate::Sps250
                | DataRate::Sps475
                | DataRate::Sps860,
            ) => self,
            (DeviceType::Ads111x, _) => DataRate::Sps128,
        }
    }

    /// DR field value on `device_type`, after fallback.
    pub fn field(self, device_type: DeviceType) -> u16 {
        match (device_type, self.effective(device_type)) {
            (DeviceType::Ads101x, DataRate::Sps128) => 0b000,
            (DeviceType::Ads101x, DataRate::Sps250) => 0b001,
            (DeviceType::Ads101x, DataRate::Sps490) => 0b010,
            (DeviceType::Ads101x, DataRate::Sps920) => 0b011,
            (DeviceType::Ads101x, DataRate::Sps1600) => 0b100,
            (DeviceType::Ads101x, DataRate::Sps2400) => 0b101,
            (DeviceType::Ads101x, DataRate::Sps3300) => 0b110,
            (DeviceType::Ads111x, DataRate::Sps8) => 0b000,
            (DeviceType::Ads111x, DataRate::Sps16) => 0b001,
            (DeviceType::Ads111x, DataRate::Sps32) => 0b010,
            (DeviceType::Ads111x, DataRate::Sps64) => 0b011,
            (DeviceType::Ads111x, DataRate::Sps128) => 0b100,
            (DeviceType::Ads111x, DataRate::Sps250) => 0b101,
            (DeviceType::Ads111x, DataRate::Sps475) => 0b110,
            (DeviceType::Ads111x, DataRate::Sps860) => 0b111,
            _ => 0b100,
        }
    }

    /// Time one conversion takes on `device_type`, rounded up to whole milliseconds.
    pub fn conversion_time_ms(self, device_type: DeviceType) -> u32 {
        1000u32.div_ceil(self.effective(device_type).samples_per_second())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub(crate) channel: Channel,
    pub(crate) full_scale_range: FullScaleRange,
    pub(crate) data_rate: DataRate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel: Channel::Ain0Ain1,
            full_scale_range: FullScaleRange::Fsr2048mV,
            data_rate: DataRate::Sps128,
        }
    }
}

impl Settings {
    /// Channel converted when `request()` is not given one.
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = channel;

        self
    }

    pub fn full_scale_range(mut self, full_scale_range: FullScaleRange) -> Self {
        self.full_scale_range = full_scale_range;

        self
    }

    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = data_rate;

        self
    }

    pub fn default_channel(&self) -> Channel {
        self.channel
    }

    pub fn range(&self) -> FullScaleRange {
        self.full_scale_range
    }

    pub fn rate(&self) -> DataRate {
        self.data_rate
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::Default => Settings::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(0x48, SevenBitAddress::from(Address::default()));
        assert_eq!(0x4B, SevenBitAddress::from(Address::Quaternary));
    }

    #[test]
    fn channel_numbers() {
        assert_eq!(0, Channel::Ain0Ain1.number());
        assert_eq!(1, Channel::Ain1Ain3.number());
        assert_eq!(2, Channel::Ain2Gnd.number());
        assert_eq!(3, Channel::Ain3Gnd.number());
        assert!(Channel::Ain1Gnd.is_single_ended());
        assert!(!Channel::Ain2Ain3.is_single_ended());
    }

    #[test]
    fn data_rate_fields() {
        assert_eq!(0b000, DataRate::Sps128.field(DeviceType::Ads101x));
        assert_eq!(0b110, DataRate::Sps3300.field(DeviceType::Ads101x));
        assert_eq!(0b100, DataRate::Sps128.field(DeviceType::Ads111x));
        assert_eq!(0b110, DataRate::Sps475.field(DeviceType::Ads111x));
        assert_eq!(0b111, DataRate::Sps860.field(DeviceType::Ads111x));
    }

    #[test]
    fn unsupported_rates_fall_back() {
        assert_eq!(DataRate::Sps1600, DataRate::Sps8.effective(DeviceType::Ads101x));
        assert_eq!(0b100, DataRate::Sps860.field(DeviceType::Ads101x));
        assert_eq!(DataRate::Sps128, DataRate::Sps3300.effective(DeviceType::Ads111x));
        assert_eq!(0b100, DataRate::Sps920.field(DeviceType::Ads111x));
    }

    #[test]
    fn conversion_times_round_up() {
        assert_eq!(8, DataRate::Sps128.conversion_time_ms(DeviceType::Ads101x));
        assert_eq!(125, DataRate::Sps8.conversion_time_ms(DeviceType::Ads111x));
        assert_eq!(1, DataRate::Sps3300.conversion_time_ms(DeviceType::Ads101x));
        assert_eq!(3, DataRate::Sps475.conversion_time_ms(DeviceType::Ads111x));
        // falls back to 1600 SPS
        assert_eq!(1, DataRate::Sps8.conversion_time_ms(DeviceType::Ads101x));
    }

    #[test]
    fn builder_and_preset() {
        let settings = Settings::default()
            .channel(Channel::Ain3Gnd)
            .full_scale_range(FullScaleRange::Fsr4096mV)
            .data_rate(DataRate::Sps860);

        assert_eq!(Channel::Ain3Gnd, settings.default_channel());
        assert_eq!(FullScaleRange::Fsr4096mV, settings.range());
        assert_eq!(DataRate::Sps860, settings.rate());
        assert_eq!(Settings::default(), Settings::from_preset(Preset::Default));
        assert_eq!(0b010, u16::from(Settings::default().range()));
    }
}
