// SPDX-License-Identifier: Apache-2.0

//! Per-edge latency benchmarks for a compiled hardware simulation model.
//!
//! A fixed table of scenarios is run against freshly constructed
//! [`SimulatedDevice`] instances; each scenario prints one
//! `BENCH <name> <nanoseconds>` line.

pub mod c_api;
pub mod config;
pub mod counter_top;
pub mod device;
pub mod dso_device;
pub mod runner;
pub mod scenario;
pub mod tickbench_error;

pub use c_api::{load_model_library, ModelLibrary};
pub use config::{Config, ModelSource};
pub use counter_top::{CounterTop, TOP_N};
pub use device::SimulatedDevice;
pub use dso_device::DsoDevice;
pub use runner::{BenchmarkRunner, Clock, MonotonicClock, ScenarioResult};
pub use scenario::{Metric, Scenario, SCENARIOS};
pub use tickbench_error::TickbenchError;
