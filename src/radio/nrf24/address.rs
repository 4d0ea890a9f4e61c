use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{registers, Nrf24Error, RF24};
use crate::timing::RadioTimer;

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Set the address this radio listens on (data pipe 1).
    pub fn set_rx_address(
        &mut self,
        address: &[u8; 3],
    ) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_write_buf(registers::RX_ADDR_P1, address)
    }

    /// Set the address transmissions are sent to.
    ///
    /// Pipe 0 is pointed at the same address, because that is the pipe
    /// the chip's auto-ack reply comes back on.
    pub fn set_tx_address(
        &mut self,
        address: &[u8; 3],
    ) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.spi_write_buf(registers::TX_ADDR, address)?;
        self.spi_write_buf(registers::RX_ADDR_P0, address)
    }
}
