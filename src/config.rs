// SPDX-License-Identifier: Apache-2.0

//! Selects which simulation model the benchmark drives.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming a shared object that exports the model C API.
pub const MODEL_DSO_ENV: &str = "TICKBENCH_MODEL_DSO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// The in-crate `CounterTop` model.
    Builtin,
    /// An externally compiled model loaded from this path.
    SharedLibrary(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model: ModelSource,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds a config from `lookup`. Paths are kept as raw OS strings, so
    /// non-UTF-8 paths reach the loader unchanged.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let model = match lookup(MODEL_DSO_ENV) {
            Some(path) if !is_blank(&path) => ModelSource::SharedLibrary(PathBuf::from(path)),
            _ => ModelSource::Builtin,
        };
        Config { model }
    }
}

fn is_blank(value: &OsString) -> bool {
    match value.to_str() {
        Some(s) => s.trim().is_empty(),
        None => false,
    }
}
