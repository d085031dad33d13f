use crate::analysis::ScanResult;
use serde::Serialize;
use std::io::{self, Write};

/// JSON reporter for programmatic output
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, result: &ScanResult, out: &mut W) -> io::Result<()> {
        let report = JsonReport::from_result(result);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        out.flush()
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total: usize,
    packages_checked: usize,
    unused: Vec<String>,
    failures: Vec<JsonFailure>,
}

#[derive(Serialize)]
struct JsonFailure {
    message: String,
}

impl JsonReport {
    fn from_result(result: &ScanResult) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            total: result.unused.len(),
            packages_checked: result.packages_checked,
            unused: result
                .unused
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect(),
            failures: result
                .failures
                .iter()
                .map(|e| JsonFailure {
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}
