use crate::register::register;

/// First of three pressure result bytes (PRS_B2, PRS_B1, PRS_B0).
pub const PRS_B2: u8 = 0x00;
/// First of three temperature result bytes (TMP_B2, TMP_B1, TMP_B0).
pub const TMP_B2: u8 = 0x03;
/// First of the 18 calibration coefficient bytes.
pub const COEF: u8 = 0x10;
pub const COEF_LEN: usize = 18;

register!(PrsCfg, 0x06, u8);
register!(TmpCfg, 0x07, u8);
register!(
    /// Sensor operating mode and status.
    MeasCfg, 0x08, u8
);
register!(CfgReg, 0x09, u8);
register!(Reset, 0x0C, u8);
register!(ProductId, 0x0D, u8);
register!(CoefSrce, 0x28, u8);

/// Writing this to [`Reset`] performs a soft reset.
pub const SOFT_RESET: u8 = 0x09;

pub mod prs_cfg {
    /// Measurement rate, 3 bits.
    pub const PM_RATE: u32 = 4;
    /// Oversampling, 4 bits.
    pub const PM_PRC: u32 = 0;
}

pub mod tmp_cfg {
    /// Temperature sensor selection.
    pub const TMP_EXT: u32 = 7;
    pub const TMP_RATE: u32 = 4;
    pub const TMP_PRC: u32 = 0;
}

pub mod meas_cfg {
    pub const COEF_RDY: u32 = 7;
    pub const SENSOR_RDY: u32 = 6;
    pub const TMP_RDY: u32 = 5;
    pub const PRS_RDY: u32 = 4;
    /// Measurement mode, 3 bits.
    pub const MEAS_CTRL: u32 = 0;
}

pub mod cfg_reg {
    pub const T_SHIFT: u32 = 3;
    pub const P_SHIFT: u32 = 2;
}

pub mod coef_srce {
    /// Sensor the temperature coefficients were calibrated against.
    pub const TMP_COEF_SRCE: u32 = 7;
}

pub const RATE_WIDTH: u32 = 3;
pub const PRC_WIDTH: u32 = 4;
pub const MEAS_CTRL_WIDTH: u32 = 3;
