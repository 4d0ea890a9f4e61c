use embedded_hal::{digital::OutputPin, spi::SpiBus};

mod address;
pub(crate) mod bit_fields;
mod constants;
mod init;
mod mode;
mod rx;
mod tx;
pub use constants::{commands, mnemonics, registers, MAX_PAYLOAD_SIZE};

use crate::{
    timing::{RadioTimer, FALLING_EDGE_GAP_US, RISING_EDGE_GAP_US},
    types::{OperatingMode, StatusFlags},
};

/// A collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error on the CE or CSN line.
    Gpo(DO),
    /// The retry-policy register did not echo back what
    /// [`init()`](fn@RF24::init) wrote to it. There is probably no
    /// powered nRF24L01 on the bus.
    ChipNotFound,
}

/// Driver for a single nRF24L01+ transceiver.
///
/// The driver owns the SPI bus and both control lines: `csn_pin` is
/// asserted around every transaction, and `ce_pin` edges are paced
/// through the given [`RadioTimer`]. All waits are bounded busy-polls;
/// nothing here is interrupt-driven or reentrant.
pub struct RF24<SPI, CE, CSN, TIM> {
    spi: SPI,
    ce_pin: CE,
    csn_pin: CSN,
    timer: TIM,
    buf: [u8; MAX_PAYLOAD_SIZE as usize + 1],
    status: StatusFlags,
    mode: OperatingMode,
    resume_rx: bool,
}

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Instantiate an [`RF24`] object on the specified `spi` bus with
    /// the given control pins and edge-pacing strategy.
    ///
    /// Both pins must already be configured as outputs by the HAL.
    /// Nothing touches the hardware until [`init()`](fn@RF24::init).
    pub fn new(spi: SPI, ce_pin: CE, csn_pin: CSN, timer: TIM) -> RF24<SPI, CE, CSN, TIM> {
        RF24 {
            spi,
            ce_pin,
            csn_pin,
            timer,
            buf: [0u8; MAX_PAYLOAD_SIZE as usize + 1],
            status: StatusFlags::from_bits(0),
            mode: OperatingMode::Standby,
            resume_rx: false,
        }
    }

    /// The mode the radio was last explicitly put in.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// The STATUS flags captured during the most recent SPI transaction.
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Refresh the cached STATUS flags with a no-op command.
    pub fn update(&mut self) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_read(0, commands::NOP)
    }

    /// Discard whatever sits in the TX FIFO.
    pub fn flush_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    /// Discard all unread payloads in the RX FIFO.
    pub fn flush_rx(&mut self) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    /// One chip-selected transaction over the first `len` scratch bytes.
    ///
    /// CSN is released even when the bus errors out, and the STATUS byte
    /// the chip shifts out first is cached on success.
    fn spi_transfer(&mut self, len: u8) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self
            .spi
            .transfer_in_place(&mut self.buf[..len as usize])
            .and_then(|()| self.spi.flush())
            .map_err(Nrf24Error::Spi);
        self.csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        result?;
        self.status = StatusFlags::from_bits(self.buf[0]);
        Ok(())
    }

    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self.status
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.buf[..=len as usize].fill(0);
        self.buf[0] = command;
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        command: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.buf[0] = command | commands::W_REGISTER;
        self.buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.buf[0] = command | commands::W_REGISTER;
        let buf_len = buf.len();
        self.buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    /// Drive the CE line, honoring the minimum interval since the
    /// previous edge. Never skipped or batched: every mode change comes
    /// back through here.
    fn ce(&mut self, level: bool) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.timer.wait_edge_gap(if level {
            RISING_EDGE_GAP_US
        } else {
            FALLING_EDGE_GAP_US
        });
        if level {
            self.ce_pin.set_high()
        } else {
            self.ce_pin.set_low()
        }
        .map_err(Nrf24Error::Gpo)?;
        self.timer.record_edge();
        Ok(())
    }
}
