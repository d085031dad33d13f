mod json;
mod plain;

pub use json::JsonReporter;
pub use plain::PlainReporter;

use crate::analysis::ScanResult;
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Plain,
    Json,
}

/// Reporter for outputting scan results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    /// Write the report to the output file, or stdout
    pub fn report(&self, result: &ScanResult) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                let mut out = BufWriter::new(File::create(path)?);
                self.write(result, &mut out)
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                self.write(result, &mut out)
            }
        }
    }

    fn write<W: io::Write>(&self, result: &ScanResult, out: &mut W) -> Result<()> {
        match self.format {
            ReportFormat::Plain => PlainReporter::new().write(result, out)?,
            ReportFormat::Json => JsonReporter::new().write(result, out)?,
        }
        Ok(())
    }
}
