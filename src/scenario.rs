// SPDX-License-Identifier: Apache-2.0

//! The fixed benchmark scenario table.

/// How a scenario's elapsed time is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Elapsed nanoseconds divided by the timed edge count.
    PerOp,
    /// Elapsed nanoseconds for the whole timed loop.
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    /// Untimed clock edges run after reset.
    pub warmup_edges: u32,
    pub timed_edges: u32,
    /// Whether the output is read after every timed edge.
    pub reads_output: bool,
    pub metric: Metric,
}

impl Scenario {
    /// Converts the measured elapsed time into the reported value.
    pub fn report(&self, elapsed_ns: f64) -> f64 {
        match self.metric {
            Metric::PerOp => elapsed_ns / f64::from(self.timed_edges),
            Metric::Total => elapsed_ns,
        }
    }
}

// The x1000000 rows report total time, not per-edge time.
pub const SCENARIOS: [Scenario; 4] = [
    Scenario {
        name: "simulation_tick_top_n1000_x1",
        warmup_edges: 10_000,
        timed_edges: 100_000,
        reads_output: false,
        metric: Metric::PerOp,
    },
    Scenario {
        name: "simulation_tick_top_n1000_x1000000",
        warmup_edges: 0,
        timed_edges: 1_000_000,
        reads_output: false,
        metric: Metric::Total,
    },
    Scenario {
        name: "testbench_tick_top_n1000_x1",
        warmup_edges: 10_000,
        timed_edges: 100_000,
        reads_output: true,
        metric: Metric::PerOp,
    },
    Scenario {
        name: "testbench_tick_top_n1000_x1000000",
        warmup_edges: 0,
        timed_edges: 1_000_000,
        reads_output: true,
        metric: Metric::Total,
    },
];
