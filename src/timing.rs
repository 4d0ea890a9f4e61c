//! Pacing of radio-enable (CE) edges.
//!
//! The chip has no direct transition between its two active states; every
//! Rx/Tx switch passes through an inactive period, and each CE edge is
//! only registered if the line held its previous level long enough. The
//! driver funnels every edge through a [`RadioTimer`], chosen once at
//! construction:
//!
//! - [`CounterTimer`] stamps each edge on a free-running microsecond
//!   counter and spins only for the budget that has not already elapsed.
//! - [`FixedPause`] keeps no timestamps and pauses for the full
//!   worst-case interval before every edge, trading throughput for not
//!   needing a counter.

use embedded_hal::delay::DelayNs;

/// Minimum interval between the previous CE edge and a rising edge.
///
/// The datasheet asks for 10us here, but rising edges are not reliably
/// detected until the line has been quiet for ~150-200us.
pub const RISING_EDGE_GAP_US: u32 = 200;

/// Minimum interval between the previous CE edge and a falling edge.
pub const FALLING_EDGE_GAP_US: u32 = 10;

/// Time source consumed by the driver for CE pacing and bounded pauses.
pub trait RadioTimer {
    /// Busy-wait for at least `micros` microseconds.
    fn pause(&mut self, micros: u32);

    /// Block until at least `micros` microseconds have passed since the
    /// edge last noted with [`RadioTimer::record_edge()`].
    fn wait_edge_gap(&mut self, micros: u32);

    /// Note that a CE edge was just driven.
    fn record_edge(&mut self);
}

/// A free-running counter with microsecond resolution.
///
/// The counter is expected to wrap; intervals are measured with wrapping
/// arithmetic, so any monotonically incrementing 32-bit source works.
pub trait Monotonic {
    /// The current counter value in microseconds.
    fn now_us(&mut self) -> u32;
}

/// Edge pacing backed by a [`Monotonic`] counter.
///
/// Only the remainder of the settling interval is spent waiting, so
/// back-to-back operations that were already separated by useful work
/// pay little or nothing here.
pub struct CounterTimer<M> {
    clock: M,
    last_edge: u32,
}

impl<M: Monotonic> CounterTimer<M> {
    pub fn new(mut clock: M) -> Self {
        let last_edge = clock.now_us();
        Self { clock, last_edge }
    }
}

impl<M: Monotonic> RadioTimer for CounterTimer<M> {
    fn pause(&mut self, micros: u32) {
        let start = self.clock.now_us();
        while self.clock.now_us().wrapping_sub(start) <= micros {}
    }

    fn wait_edge_gap(&mut self, micros: u32) {
        while self.clock.now_us().wrapping_sub(self.last_edge) <= micros {}
    }

    fn record_edge(&mut self) {
        self.last_edge = self.clock.now_us();
    }
}

/// Edge pacing that always waits the full interval.
///
/// Backed by any [`DelayNs`], typically a calibrated busy-wait loop on
/// targets without a usable timer peripheral.
pub struct FixedPause<D> {
    delay: D,
}

impl<D: DelayNs> FixedPause<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> RadioTimer for FixedPause<D> {
    fn pause(&mut self, micros: u32) {
        self.delay.delay_us(micros);
    }

    fn wait_edge_gap(&mut self, micros: u32) {
        self.delay.delay_us(micros);
    }

    fn record_edge(&mut self) {}
}
