//! Export download formats and attachment naming.

use crate::types::Timestamp;

/// Format of a data export download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Timestamped download filename, e.g.
    /// `goshuin-export-20260806T120000Z.json`.
    pub fn attachment_filename(self, now: Timestamp) -> String {
        format!(
            "goshuin-export-{}.{}",
            now.format("%Y%m%dT%H%M%SZ"),
            self.extension()
        )
    }
}
