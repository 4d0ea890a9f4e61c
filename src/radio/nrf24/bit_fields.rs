use bitfield_struct::bitfield;

/// The CONFIG register.
///
/// [`Config::new()`] is the driver's base value: all IRQ lines masked
/// (the driver only ever polls STATUS) and 16-bit CRC enabled. Power and
/// Rx/Tx selection vary per mode on top of that base.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    #[bits(1, default = true)]
    pub mask_rx_dr: bool,

    #[bits(1, default = true)]
    pub mask_tx_ds: bool,

    #[bits(1, default = true)]
    pub mask_max_rt: bool,

    #[bits(1, default = true)]
    pub en_crc: bool,

    /// 16-bit CRC when set, 8-bit otherwise.
    #[bits(1, default = true)]
    pub crco: bool,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub fn as_rx(self) -> Self {
        self.with_is_rx(true)
    }

    pub fn as_tx(self) -> Self {
        self.with_is_rx(false)
    }
}

/// The SETUP_RETR register.
///
/// Defaults encode the fixed link policy: retry every 2ms, give up
/// after 15 retries (16 attempts total).
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// Retry interval, in 250us steps above 250us.
    #[bits(4, default = 7)]
    pub ard: u8,

    /// Retry count.
    #[bits(4, default = 15)]
    pub arc: u8,
}
