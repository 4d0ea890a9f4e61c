//! Types shared by the driver's public surface.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The mode the radio was last explicitly put in.
///
/// Transmission is deliberately absent: it is a transient excursion
/// handled entirely inside [`transmit()`](fn@crate::radio::RF24::transmit)
/// and [`wait_tx_result()`](fn@crate::radio::RF24::wait_tx_result), which
/// restore `Rx` afterwards if it was active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatingMode {
    /// Not listening. Depending on how this mode was entered the chip is
    /// either in standby (oscillator running, faster next operation) or
    /// fully powered down.
    Standby,
    /// Actively listening on data pipe 1.
    Rx,
}

#[cfg(feature = "defmt")]
impl defmt::Format for OperatingMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OperatingMode::Standby => defmt::write!(fmt, "Standby"),
            OperatingMode::Rx => defmt::write!(fmt, "Rx"),
        }
    }
}

impl Display for OperatingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            OperatingMode::Standby => write!(f, "Standby"),
            OperatingMode::Rx => write!(f, "Rx"),
        }
    }
}

/// The STATUS byte the chip clocks out while receiving the command byte
/// of every SPI transaction.
///
/// The driver refreshes its cached copy on each transaction; use
/// [`update()`](fn@crate::radio::RF24::update) to refresh it explicitly
/// and [`status()`](fn@crate::radio::RF24::status) to inspect it.
#[bitfield(u8, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// New data arrived in the RX FIFO.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// The last payload left the TX FIFO and was acknowledged.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// The chip's retry budget ran out without an acknowledgement.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// Pipe number of the payload at the head of the RX FIFO.
    #[bits(3, access = RO)]
    pub(crate) rx_pipe: u8,

    /// The TX FIFO cannot accept another payload.
    #[bits(1, access = RO)]
    pub(crate) tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}
