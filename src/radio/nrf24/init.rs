use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{
    bit_fields::SetupRetry,
    mnemonics, registers, Nrf24Error, RF24,
};
use crate::timing::RadioTimer;

/// Settling time after power-on or reset before configuration sticks.
const POWER_ON_SETTLE_US: u32 = 5000;

/// The one channel this driver uses (2442 MHz).
const RF_CHANNEL: u8 = 42;

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Bring the chip into its fixed operating profile.
    ///
    /// The retry-policy register is written first and read back; a
    /// mismatch means no chip answered and init fails with
    /// [`Nrf24Error::ChipNotFound`] without touching anything else. On
    /// success the chip is left configured for 250kbps at maximum TX
    /// power (range over throughput), dynamic payload lengths and
    /// auto-ack on pipes 0 and 1, 3-byte addresses, and a fixed channel.
    /// None of these are reconfigurable at runtime.
    pub fn init(&mut self) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        self.ce(false)?;
        self.csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self.timer.pause(POWER_ON_SETTLE_US);

        // 2ms interval, 15 retries (16 attempts total)
        let retries = SetupRetry::new().into_bits();
        self.spi_write_byte(registers::SETUP_RETR, retries)?;
        self.spi_read(1, registers::SETUP_RETR)?;
        if self.buf[1] != retries {
            return Err(Nrf24Error::ChipNotFound);
        }

        self.spi_write_byte(
            registers::RF_SETUP,
            mnemonics::RF_PWR_MAX | mnemonics::RF_DR_LOW,
        )?;
        // dynamic payload lengths for TX (pipe 0) and RX (pipe 1)
        self.spi_write_byte(registers::DYNPD, mnemonics::PIPE_0 | mnemonics::PIPE_1)?;
        self.spi_write_byte(registers::FEATURE, mnemonics::EN_DPL)?;
        // discard stale events from before the reset
        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_RX_DR | mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        self.spi_write_byte(registers::RF_CH, RF_CHANNEL)?;
        self.spi_write_byte(registers::SETUP_AW, mnemonics::AW_3_BYTES)?;
        // ack on pipe 1 for received data, pipe 0 for our own TX acks
        self.spi_write_byte(registers::EN_AA, mnemonics::PIPE_0 | mnemonics::PIPE_1)
    }
}
