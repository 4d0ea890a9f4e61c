use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{commands, mnemonics, registers, Nrf24Error, RF24, MAX_PAYLOAD_SIZE};
use crate::timing::RadioTimer;

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Has a new payload arrived since the flag was last cleared?
    ///
    /// A single cheap STATUS read, meant for tight polling loops.
    pub fn new_data_ready(&mut self) -> Result<bool, Nrf24Error<SPI::Error, GPOERR>> {
        self.update()?;
        Ok(self.status.rx_dr())
    }

    /// Does the RX FIFO still hold unread payloads?
    ///
    /// Distinct from [`new_data_ready()`](fn@RF24::new_data_ready): the
    /// status flag may already be cleared while earlier packets sit
    /// unread in the FIFO.
    pub fn available(&mut self) -> Result<bool, Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        Ok(self.buf[1] & mnemonics::RX_EMPTY == 0)
    }

    /// Fetch the payload at the head of the RX FIFO into `buf`.
    ///
    /// Clears the data-ready flag, asks the chip for the payload's
    /// length, and copies that many bytes out. Returns the number of
    /// bytes written to `buf`. The chip-reported length is not trusted:
    /// it is clamped to the payload maximum and to `buf.len()`, so a
    /// 32-byte buffer always suffices.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<u8, Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?;

        self.spi_read(1, commands::R_RX_PL_WID)?;
        let capacity = buf.len().min(MAX_PAYLOAD_SIZE as usize) as u8;
        let len = self.buf[1].min(capacity);
        if len == 0 {
            return Ok(0);
        }

        self.spi_read(len, commands::R_RX_PAYLOAD)?;
        buf[..len as usize].copy_from_slice(&self.buf[1..(len as usize + 1)]);
        Ok(len)
    }
}
