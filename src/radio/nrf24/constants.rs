/// The largest payload the chip can carry in one packet.
pub const MAX_PAYLOAD_SIZE: u8 = 32;

/// A private module encapsulating register offsets for the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const TX_ADDR: u8 = 0x10;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// A private module encapsulating SPI commands for the nRF24L01.
pub mod commands {
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// A private module to encapsulate bit mnemonics.
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;

    /// Pipe bits shared by the EN_AA, EN_RXADDR and DYNPD registers.
    pub const PIPE_0: u8 = 1 << 0;
    pub const PIPE_1: u8 = 1 << 1;

    /// RF_SETUP: 250kbps data rate.
    pub const RF_DR_LOW: u8 = 1 << 5;
    /// RF_SETUP: 0dBm output power.
    pub const RF_PWR_MAX: u8 = 3 << 1;

    /// SETUP_AW: 3-byte addresses.
    pub const AW_3_BYTES: u8 = 0x01;

    /// FEATURE: enable dynamic payload lengths.
    pub const EN_DPL: u8 = 1 << 2;

    /// FIFO_STATUS: the RX FIFO holds no unread payloads.
    pub const RX_EMPTY: u8 = 1 << 0;
}
