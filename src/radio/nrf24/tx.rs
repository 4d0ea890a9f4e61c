use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{bit_fields::Config, commands, mnemonics, registers, Nrf24Error, RF24, MAX_PAYLOAD_SIZE};
use crate::{timing::RadioTimer, types::OperatingMode};

/// Interval between STATUS polls while waiting for a transmit result.
const POLL_STEP_US: u32 = 10;

/// Poll iterations before giving up, roughly 100ms at 10us per step.
const POLL_BUDGET: u16 = 10_000;

impl<SPI, CE, CSN, TIM, GPOERR> RF24<SPI, CE, CSN, TIM>
where
    SPI: SpiBus<u8>,
    CE: OutputPin<Error = GPOERR>,
    CSN: OutputPin<Error = GPOERR>,
    TIM: RadioTimer,
{
    /// Queue `buf` (at most 32 bytes) and start transmitting it.
    ///
    /// If the radio was receiving, it is parked in standby first and
    /// receive resumes automatically once [`wait_tx_result()`]
    /// completes. CE is left high on return; every `transmit()` must be
    /// paired with exactly one [`wait_tx_result()`] call, which also
    /// satisfies the minimum CE hold time.
    ///
    /// [`wait_tx_result()`]: fn@RF24::wait_tx_result
    pub fn transmit(&mut self, buf: &[u8]) -> Result<(), Nrf24Error<SPI::Error, GPOERR>> {
        if self.mode == OperatingMode::Rx {
            // keep the oscillator running so receive resumes quickly
            self.as_idle(true)?;
            self.resume_rx = true;
        }

        self.spi_write_byte(
            registers::CONFIG,
            Config::new().with_power(true).as_tx().into_bits(),
        )?;
        // pipe 0 catches the ack reply (see set_tx_address)
        self.spi_write_byte(registers::EN_RXADDR, mnemonics::PIPE_0)?;

        // W_TX_PAYLOAD is documented to reset the FIFO on its own, but
        // skipping this flush leaves the previous payload queued: it
        // goes out again 2-4 times before new writes are picked up.
        self.flush_tx()?;

        let len = buf.len().min(MAX_PAYLOAD_SIZE as usize);
        self.spi_write_buf(commands::W_TX_PAYLOAD, &buf[..len])?;

        self.ce(true)
    }

    /// Block until the transmission started by
    /// [`transmit()`](fn@RF24::transmit) concludes.
    ///
    /// Returns `Ok(true)` when the chip reported the payload sent (and
    /// acknowledged). `Ok(false)` covers both the chip exhausting its
    /// retry budget and this wait exhausting its own ~100ms poll budget;
    /// the two are not distinguished. Either way the data-sent and
    /// max-retries flags are cleared, CE is already low, and receive
    /// mode is restored if it was active before the transmit.
    pub fn wait_tx_result(&mut self) -> Result<bool, Nrf24Error<SPI::Error, GPOERR>> {
        self.update()?;
        // drop CE right away so the next edge's settling clock starts early
        self.ce(false)?;

        let mut remaining = POLL_BUDGET;
        while (!self.status.tx_ds() || self.status.tx_full())
            && !self.status.max_rt()
            && remaining > 0
        {
            self.timer.pause(POLL_STEP_US);
            self.update()?;
            remaining -= 1;
        }
        let sent = self.status.tx_ds();

        // both flags are write-one-to-clear
        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;

        if self.resume_rx {
            self.resume_rx = false;
            self.as_rx()?;
        }
        Ok(sent)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::super::commands::W_REGISTER;
    use super::{commands, registers, POLL_BUDGET, POLL_STEP_US};
    use crate::{
        spi_test_expects,
        test::{csn_expects, mk_radio},
        OperatingMode,
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;
    use std::vec::Vec;

    #[test]
    fn transmit_from_standby() {
        let ce_expectations = [PinTransaction::set(PinState::High)];

        let mut payload_cmd = vec![0x55u8; 9];
        payload_cmd[0] = commands::W_TX_PAYLOAD;

        let spi_expectations = spi_test_expects![
            // power up as TX
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Eu8],
                vec![0xEu8, 0u8],
            ),
            // only pipe 0 open, for the ack reply
            (
                vec![registers::EN_RXADDR | W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (payload_cmd, vec![0u8; 9]),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(4), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin, timer) =
            (mocks.0, mocks.1, mocks.2, mocks.3, mocks.4);
        radio.transmit(&[0x55u8; 8]).unwrap();
        assert_eq!(radio.mode(), OperatingMode::Standby);
        assert_eq!(timer.edge_gaps(), vec![200u32]);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn transmit_truncates_oversized_payload() {
        let ce_expectations = [PinTransaction::set(PinState::High)];

        let mut payload_cmd = vec![0x77u8; 33];
        payload_cmd[0] = commands::W_TX_PAYLOAD;

        let spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Eu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (payload_cmd, vec![0u8; 33]),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(4), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        radio.transmit(&[0x77u8; 40]).unwrap();
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn wait_tx_result_success() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // data-sent already flagged on the first status read
            (vec![commands::NOP], vec![0x2Eu8]),
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(2), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin, timer) =
            (mocks.0, mocks.1, mocks.2, mocks.3, mocks.4);
        assert!(radio.wait_tx_result().unwrap());
        // both result flags read as cleared afterwards
        assert!(!radio.status().tx_ds());
        assert!(!radio.status().max_rt());
        assert_eq!(timer.edge_gaps(), vec![10u32]);
        assert!(timer.pauses().is_empty());
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn wait_tx_result_polls_while_fifo_full() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // data-sent set but the FIFO still reads full: keep polling
            (vec![commands::NOP], vec![0x2Fu8]),
            (vec![commands::NOP], vec![0x2Eu8]),
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(3), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin, timer) =
            (mocks.0, mocks.1, mocks.2, mocks.3, mocks.4);
        assert!(radio.wait_tx_result().unwrap());
        assert_eq!(timer.pauses(), vec![POLL_STEP_US]);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn wait_tx_result_max_retries() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            (vec![commands::NOP], vec![0x1Eu8]),
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(2), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(!radio.wait_tx_result().unwrap());
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn wait_tx_result_times_out() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];

        // the chip never reports anything: one initial read plus the
        // full poll budget, then the unconditional flag clear
        let mut spi_expectations = Vec::new();
        for _ in 0..(POLL_BUDGET as usize + 1) {
            spi_expectations.push(SpiTransaction::transfer_in_place(
                vec![commands::NOP],
                vec![0xEu8],
            ));
            spi_expectations.push(SpiTransaction::flush());
        }
        spi_expectations.extend(spi_test_expects![
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
        ]);

        let mocks = mk_radio(
            &ce_expectations,
            &csn_expects(POLL_BUDGET as usize + 2),
            &spi_expectations,
        );
        let (mut radio, mut spi, mut ce_pin, mut csn_pin, timer) =
            (mocks.0, mocks.1, mocks.2, mocks.3, mocks.4);
        assert!(!radio.wait_tx_result().unwrap());
        // CE was dropped before the poll loop ever started
        assert_eq!(timer.edge_gaps(), vec![10u32]);
        assert_eq!(timer.pauses().len(), POLL_BUDGET as usize);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn transmit_from_rx_restores_rx() {
        let ce_expectations = [
            // as_rx
            PinTransaction::set(PinState::High),
            // transmit parks in standby, then arms
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            // wait_tx_result drops CE, then re-enters rx
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];

        let mut payload_cmd = vec![0xABu8; 4];
        payload_cmd[0] = commands::W_TX_PAYLOAD;

        let spi_expectations = spi_test_expects![
            // as_rx()
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
            // transmit(): standby park writes no CONFIG, then TX setup
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Eu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (payload_cmd, vec![0u8; 4]),
            // wait_tx_result()
            (vec![commands::NOP], vec![0x2Eu8]),
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
            // receive resumes
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(10), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin, timer) =
            (mocks.0, mocks.1, mocks.2, mocks.3, mocks.4);
        radio.as_rx().unwrap();
        radio.transmit(&[0xAB; 3]).unwrap();
        assert_eq!(radio.mode(), OperatingMode::Standby);
        assert!(radio.wait_tx_result().unwrap());
        assert_eq!(radio.mode(), OperatingMode::Rx);
        // every edge waited its own settling interval
        assert_eq!(timer.edge_gaps(), vec![200u32, 10, 200, 10, 200]);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn failed_transmit_still_restores_rx() {
        let ce_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];

        let mut payload_cmd = vec![0x01u8; 2];
        payload_cmd[0] = commands::W_TX_PAYLOAD;

        let spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Eu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (payload_cmd, vec![0u8; 2]),
            // retry budget exhausted
            (vec![commands::NOP], vec![0x1Eu8]),
            (
                vec![registers::STATUS | W_REGISTER, 0x30u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &csn_expects(10), &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        radio.as_rx().unwrap();
        radio.transmit(&[0x01]).unwrap();
        assert!(!radio.wait_tx_result().unwrap());
        assert_eq!(radio.mode(), OperatingMode::Rx);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }
}
