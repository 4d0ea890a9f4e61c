use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{bit_fields::Config, mnemonics, registers, Nrf24Error, RF24};
use crate::{timing::RadioTimer, types::OperatingMode};

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Start listening on data pipe 1.
    ///
    /// A no-op when the radio is already in [`OperatingMode::Rx`]:
    /// repeated calls produce no further register traffic or CE edges.
    pub fn as_rx(&mut self) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        if self.mode == OperatingMode::Rx {
            return Ok(());
        }
        self.spi_write_byte(
            registers::CONFIG,
            Config::new().with_power(true).as_rx().into_bits(),
        )?;
        // pipe 1 receives; pipe 0 stays reserved for TX ack capture
        self.spi_write_byte(registers::EN_RXADDR, mnemonics::PIPE_1)?;
        self.ce(true)?;
        self.mode = OperatingMode::Rx;
        Ok(())
    }

    /// Stop listening and park the chip.
    ///
    /// With `standby` the oscillator keeps running, so the next mode
    /// change starts faster at the cost of higher idle current;
    /// otherwise the chip is powered down entirely.
    pub fn as_idle(&mut self, standby: bool) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        if self.mode == OperatingMode::Rx {
            self.ce(false)?;
            if !standby {
                self.spi_write_byte(registers::CONFIG, Config::new().into_bits())?;
            }
        } else if standby {
            self.spi_write_byte(registers::CONFIG, Config::new().with_power(true).into_bits())?;
        } else {
            self.spi_write_byte(registers::CONFIG, Config::new().into_bits())?;
        }
        self.mode = OperatingMode::Standby;
        Ok(())
    }
}
