// SPDX-License-Identifier: Apache-2.0

//! The capability a benchmark scenario drives: one instance of a synchronous
//! circuit under simulation.

/// A simulated circuit exposing a clock, an active-high reset and a readable
/// output.
///
/// Implementations only supply the raw signal accessors and `evaluate`; the
/// reset sequence and clock edge are provided in terms of those so every
/// model is driven identically.
pub trait SimulatedDevice {
    /// Drives the clock input. Takes effect at the next `evaluate`.
    fn set_clock(&mut self, high: bool);

    /// Current logical value of the clock input.
    fn clock(&self) -> bool;

    /// Drives the reset input. Takes effect at the next `evaluate`.
    fn set_reset(&mut self, asserted: bool);

    /// Recomputes internal and output state from the current inputs.
    fn evaluate(&mut self);

    /// Reads the observed output. Must not change device state.
    fn read_output(&self) -> u32;

    /// Brings the device to its deterministic starting state.
    ///
    /// Reset is asserted with the clock low, then the clock is taken high and
    /// low again, and finally reset is released; each step is evaluated.
    fn apply_reset(&mut self) {
        self.set_reset(true);
        self.set_clock(false);
        self.evaluate();

        self.set_clock(true);
        self.evaluate();

        self.set_clock(false);
        self.evaluate();

        self.set_reset(false);
        self.evaluate();
    }

    /// Flips the clock and evaluates once. This is a single edge; two calls
    /// make a full clock period.
    #[inline]
    fn toggle_clock(&mut self) {
        let clk = self.clock();
        self.set_clock(!clk);
        self.evaluate();
    }
}
