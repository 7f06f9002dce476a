// SPDX-License-Identifier: Apache-2.0

//! Drives the scenario table against freshly constructed devices and times
//! the clock edges.

use std::hint::black_box;
use std::io::Write;
use std::time::Instant;

use crate::device::SimulatedDevice;
use crate::scenario::Scenario;
use crate::tickbench_error::TickbenchError;

/// Timestamp source bounding a measurement window.
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    /// Nanoseconds from `start` to `end`.
    fn elapsed_ns(&self, start: Self::Instant, end: Self::Instant) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_ns(&self, start: Instant, end: Instant) -> f64 {
        end.saturating_duration_since(start).as_nanos() as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub nanos: f64,
}

impl std::fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BENCH {} {:.2}", self.name, self.nanos)
    }
}

pub struct BenchmarkRunner<C: Clock = MonotonicClock> {
    clock: C,
}

impl BenchmarkRunner<MonotonicClock> {
    pub fn new() -> Self {
        BenchmarkRunner {
            clock: MonotonicClock,
        }
    }
}

impl Default for BenchmarkRunner<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> BenchmarkRunner<C> {
    pub fn with_clock(clock: C) -> Self {
        BenchmarkRunner { clock }
    }

    /// Runs one scenario on a device obtained from `make_device` and writes
    /// its result line to `out`. The line is flushed while the device is
    /// still alive; the device is dropped afterwards.
    pub fn run_scenario<D, F, W>(
        &self,
        scenario: &Scenario,
        make_device: &mut F,
        out: &mut W,
    ) -> Result<ScenarioResult, TickbenchError>
    where
        D: SimulatedDevice,
        F: FnMut() -> Result<D, TickbenchError>,
        W: Write,
    {
        log::info!("scenario {}: constructing device", scenario.name);
        let mut device = make_device()?;
        device.apply_reset();

        if scenario.warmup_edges > 0 {
            log::debug!(
                "scenario {}: {} warm-up edges",
                scenario.name,
                scenario.warmup_edges
            );
            for _ in 0..scenario.warmup_edges {
                device.toggle_clock();
            }
        }

        log::debug!(
            "scenario {}: measuring {} edges (reads output: {})",
            scenario.name,
            scenario.timed_edges,
            scenario.reads_output
        );
        let elapsed_ns = if scenario.reads_output {
            let start = self.clock.now();
            for _ in 0..scenario.timed_edges {
                device.toggle_clock();
                black_box(device.read_output());
            }
            let end = self.clock.now();
            self.clock.elapsed_ns(start, end)
        } else {
            let start = self.clock.now();
            for _ in 0..scenario.timed_edges {
                device.toggle_clock();
            }
            let end = self.clock.now();
            self.clock.elapsed_ns(start, end)
        };

        let result = ScenarioResult {
            name: scenario.name,
            nanos: scenario.report(elapsed_ns),
        };
        writeln!(out, "{}", result)?;
        out.flush()?;
        drop(device);
        Ok(result)
    }

    /// Runs `scenarios` in order, writing each result line to `out` as soon
    /// as its scenario finishes.
    pub fn run_all<D, F, W>(
        &self,
        scenarios: &[Scenario],
        mut make_device: F,
        out: &mut W,
    ) -> Result<Vec<ScenarioResult>, TickbenchError>
    where
        D: SimulatedDevice,
        F: FnMut() -> Result<D, TickbenchError>,
        W: Write,
    {
        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_scenario(scenario, &mut make_device, out)?;
            results.push(result);
        }
        Ok(results)
    }
}
