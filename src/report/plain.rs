use crate::analysis::ScanResult;
use std::io::{self, Write};

/// One unreferenced path per line, nothing at all when there are none
pub struct PlainReporter;

impl PlainReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, result: &ScanResult, out: &mut W) -> io::Result<()> {
        for path in &result.unused {
            writeln!(out, "{}", path.display())?;
        }
        out.flush()
    }
}

impl Default for PlainReporter {
    fn default() -> Self {
        Self::new()
    }
}
