// SPDX-License-Identifier: Apache-2.0

//! Native model of the benchmarked `Top` circuit: `N` 32-bit counters that
//! clear under reset and increment on every rising clock edge.

use crate::device::SimulatedDevice;

/// Counter count of the `Top` instance the benchmark names refer to.
pub const TOP_N: usize = 1000;

pub struct CounterTop {
    clk: bool,
    rst: bool,
    // Clock value seen by the previous evaluate, for edge detection.
    last_clk: bool,
    cnt: Vec<u32>,
}

impl CounterTop {
    pub fn new(n: usize) -> Self {
        CounterTop {
            clk: false,
            rst: false,
            last_clk: false,
            cnt: vec![0; n],
        }
    }

    pub fn counter_count(&self) -> usize {
        self.cnt.len()
    }

    pub fn counter(&self, index: usize) -> Option<u32> {
        self.cnt.get(index).copied()
    }
}

impl Default for CounterTop {
    fn default() -> Self {
        CounterTop::new(TOP_N)
    }
}

impl SimulatedDevice for CounterTop {
    fn set_clock(&mut self, high: bool) {
        self.clk = high;
    }

    fn clock(&self) -> bool {
        self.clk
    }

    fn set_reset(&mut self, asserted: bool) {
        self.rst = asserted;
    }

    fn evaluate(&mut self) {
        let rising = self.clk && !self.last_clk;
        self.last_clk = self.clk;
        if self.rst {
            self.cnt.iter_mut().for_each(|c| *c = 0);
        } else if rising {
            self.cnt.iter_mut().for_each(|c| *c = c.wrapping_add(1));
        }
    }

    fn read_output(&self) -> u32 {
        self.cnt.first().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_rising_edges_only() {
        let mut top = CounterTop::new(4);
        top.apply_reset();
        for _ in 0..10 {
            top.toggle_clock();
        }
        // Ten edges are five full periods.
        assert_eq!(top.read_output(), 5);
        assert_eq!(top.counter(3), Some(5));
        assert_eq!(top.counter(4), None);
    }

    #[test]
    fn test_reset_clears_all_counters() {
        let mut top = CounterTop::new(8);
        top.apply_reset();
        for _ in 0..7 {
            top.toggle_clock();
        }
        assert_eq!(top.read_output(), 4);
        top.apply_reset();
        assert!((0..8).all(|i| top.counter(i) == Some(0)));
        assert!(!top.clock());
    }

    #[test]
    fn test_reset_holds_through_edges() {
        let mut top = CounterTop::new(2);
        top.set_reset(true);
        for _ in 0..6 {
            top.toggle_clock();
        }
        assert_eq!(top.read_output(), 0);
    }

    #[test]
    fn test_counter_wraps() {
        let mut top = CounterTop::new(1);
        top.cnt[0] = u32::MAX;
        top.toggle_clock();
        assert_eq!(top.read_output(), 0);
    }

    #[test]
    fn test_default_is_top_n1000() {
        assert_eq!(CounterTop::default().counter_count(), TOP_N);
    }
}
