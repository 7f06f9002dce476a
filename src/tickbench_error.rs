// SPDX-License-Identifier: Apache-2.0

#[derive(Debug)]
pub struct TickbenchError(pub String);

impl std::fmt::Display for TickbenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tickbench error: {}", self.0)
    }
}

impl std::error::Error for TickbenchError {}

impl From<std::io::Error> for TickbenchError {
    fn from(e: std::io::Error) -> Self {
        TickbenchError(format!("I/O failure: {}", e))
    }
}
