//! A module to encapsulate all things related to radio operation.

mod nrf24;
pub use nrf24::{Nrf24Error, RF24, MAX_PAYLOAD_SIZE};
