#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`RF24::new()`](fn@crate::radio::RF24::new)
//! - [`RF24::init()`](fn@crate::radio::RF24::init)
//! - [`RF24::set_rx_address()`](fn@crate::radio::RF24::set_rx_address)
//! - [`RF24::set_tx_address()`](fn@crate::radio::RF24::set_tx_address)
//! - [`RF24::as_rx()`](fn@crate::radio::RF24::as_rx)
//! - [`RF24::as_idle()`](fn@crate::radio::RF24::as_idle)
//! - [`RF24::new_data_ready()`](fn@crate::radio::RF24::new_data_ready)
//! - [`RF24::available()`](fn@crate::radio::RF24::available)
//! - [`RF24::read()`](fn@crate::radio::RF24::read)
//! - [`RF24::transmit()`](fn@crate::radio::RF24::transmit)
//! - [`RF24::wait_tx_result()`](fn@crate::radio::RF24::wait_tx_result)
//!
//! ## Advanced API
//!
//! - [`RF24::mode()`](fn@crate::radio::RF24::mode)
//! - [`RF24::status()`](fn@crate::radio::RF24::status)
//! - [`RF24::update()`](fn@crate::radio::RF24::update)
//! - [`RF24::flush_tx()`](fn@crate::radio::RF24::flush_tx)
//! - [`RF24::flush_rx()`](fn@crate::radio::RF24::flush_rx)
//!
#![no_std]

mod types;
pub use types::{OperatingMode, StatusFlags};
pub mod timing;
pub mod radio;
pub use radio::{Nrf24Error, RF24, MAX_PAYLOAD_SIZE};
