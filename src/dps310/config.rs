use embedded_hal::i2c::SevenBitAddress;

/// I2C address, selected by the SDO pin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Address {
    /// SDO high or floating
    #[default]
    Primary,
    /// SDO pulled to GND
    Secondary,
}

impl From<Address> for SevenBitAddress {
    fn from(address: Address) -> Self {
        match address {
            Address::Primary => 0x77,
            Address::Secondary => 0x76,
        }
    }
}

/// Measurements per second in background mode. Also stored in one-shot mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SamplingRate {
    #[default]
    Hz1,
    Hz2,
    Hz4,
    Hz8,
    Hz16,
    Hz32,
    Hz64,
    Hz128,
}

impl From<SamplingRate> for u8 {
    fn from(rate: SamplingRate) -> Self {
        match rate {
            SamplingRate::Hz1 => 0b000,
            SamplingRate::Hz2 => 0b001,
            SamplingRate::Hz4 => 0b010,
            SamplingRate::Hz8 => 0b011,
            SamplingRate::Hz16 => 0b100,
            SamplingRate::Hz32 => 0b101,
            SamplingRate::Hz64 => 0b110,
            SamplingRate::Hz128 => 0b111,
        }
    }
}

/// Oversampling. More samples means less noise and a longer measurement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    #[default]
    X1,
    X2,
    X4,
    X8,
    X16,
    X32,
    X64,
    X128,
}

impl Precision {
    /// Divisor applied to a raw result measured at this precision.
    pub fn scale_factor(self) -> f32 {
        match self {
            Precision::X1 => 524288.0,
            Precision::X2 => 1572864.0,
            Precision::X4 => 3670016.0,
            Precision::X8 => 7864320.0,
            Precision::X16 => 253952.0,
            Precision::X32 => 516096.0,
            Precision::X64 => 1040384.0,
            Precision::X128 => 2088960.0,
        }
    }

    /// Typical time one measurement takes.
    pub fn measurement_time_ms(self) -> u32 {
        match self {
            Precision::X1 => 4,
            Precision::X2 => 6,
            Precision::X4 => 9,
            Precision::X8 => 15,
            Precision::X16 => 28,
            Precision::X32 => 54,
            Precision::X64 => 105,
            Precision::X128 => 207,
        }
    }

    /// Above 8x the result no longer fits the result registers unshifted.
    pub fn needs_shift(self) -> bool {
        self > Precision::X8
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        match precision {
            Precision::X1 => 0b0000,
            Precision::X2 => 0b0001,
            Precision::X4 => 0b0010,
            Precision::X8 => 0b0011,
            Precision::X16 => 0b0100,
            Precision::X32 => 0b0101,
            Precision::X64 => 0b0110,
            Precision::X128 => 0b0111,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TemperatureSource {
    /// Internal ASIC sensor.
    Asic,
    /// External MEMS sensor, the one the pressure coefficients are calibrated against.
    #[default]
    Mems,
}

impl From<TemperatureSource> for u8 {
    fn from(source: TemperatureSource) -> Self {
        match source {
            TemperatureSource::Asic => 0,
            TemperatureSource::Mems => 1,
        }
    }
}

/// MEAS_CTRL field. Only standby and the one-shot modes are ever issued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationMode {
    Standby,
    OneShotPressure,
    OneShotTemperature,
    ContinuousPressure,
    ContinuousTemperature,
    ContinuousPressureAndTemperature,
}

impl From<OperationMode> for u8 {
    fn from(mode: OperationMode) -> Self {
        match mode {
            OperationMode::Standby => 0b000,
            OperationMode::OneShotPressure => 0b001,
            OperationMode::OneShotTemperature => 0b010,
            OperationMode::ContinuousPressure => 0b101,
            OperationMode::ContinuousTemperature => 0b110,
            OperationMode::ContinuousPressureAndTemperature => 0b111,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub(crate) temperature_sampling_rate: SamplingRate,
    pub(crate) temperature_precision: Precision,
    pub(crate) temperature_source: TemperatureSource,
    pub(crate) pressure_sampling_rate: SamplingRate,
    pub(crate) pressure_precision: Precision,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature_sampling_rate: SamplingRate::Hz1,
            temperature_precision: Precision::X1,
            temperature_source: TemperatureSource::Mems,
            pressure_sampling_rate: SamplingRate::Hz1,
            pressure_precision: Precision::X2,
        }
    }
}

impl Settings {
    pub fn temperature_sampling_rate(mut self, rate: SamplingRate) -> Self {
        self.temperature_sampling_rate = rate;

        self
    }

    /// Temperature oversampling. Also selects the divisor applied to raw temperature results.
    pub fn temperature_precision(mut self, precision: Precision) -> Self {
        self.temperature_precision = precision;

        self
    }

    /// Which temperature sensor to use. The coefficient source follows this setting.
    pub fn temperature_source(mut self, source: TemperatureSource) -> Self {
        self.temperature_source = source;

        self
    }

    pub fn pressure_sampling_rate(mut self, rate: SamplingRate) -> Self {
        self.pressure_sampling_rate = rate;

        self
    }

    pub fn pressure_precision(mut self, precision: Precision) -> Self {
        self.pressure_precision = precision;

        self
    }

    pub fn temperature(&self) -> (SamplingRate, Precision, TemperatureSource) {
        (self.temperature_sampling_rate, self.temperature_precision, self.temperature_source)
    }

    pub fn pressure(&self) -> (SamplingRate, Precision) {
        (self.pressure_sampling_rate, self.pressure_precision)
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::Default | Preset::LowPowerWeatherStation => Settings::default(),
            Preset::StandardPrecisionIndoorNavigation => Settings::default()
                .temperature_sampling_rate(SamplingRate::Hz2)
                .pressure_sampling_rate(SamplingRate::Hz2)
                .pressure_precision(Precision::X16),
            Preset::HighPrecisionSports => Settings::default()
                .temperature_sampling_rate(SamplingRate::Hz4)
                .pressure_sampling_rate(SamplingRate::Hz4)
                .pressure_precision(Precision::X64),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    Default,
    LowPowerWeatherStation,
    StandardPrecisionIndoorNavigation,
    HighPrecisionSports,
}
