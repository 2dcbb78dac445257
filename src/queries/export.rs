//! CSV export of the overview table.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config;
use crate::error::{Result, SphaeraError};
use crate::models::{DashboardRow, Rounding};
use crate::queries::OverviewQuery;

// ---------------------------------------------------------------------------
// ExportQuery
// ---------------------------------------------------------------------------

/// Serializes freshly computed overview rows as comma-separated values.
///
/// Headers are the overview column names. The configured [`Rounding`] is
/// applied here and nowhere else.
pub struct ExportQuery<'a> {
    overview: OverviewQuery<'a>,
    rounding: Rounding,
    reference: NaiveDate,
}

impl<'a> ExportQuery<'a> {
    pub fn new(overview: OverviewQuery<'a>, rounding: Rounding, reference: NaiveDate) -> Self {
        Self {
            overview,
            rounding,
            reference,
        }
    }

    /// File name for an export taken on the reference date,
    /// e.g. `sphaera_em_20250314.csv`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.csv",
            config::EXPORT_PREFIX,
            self.reference.format("%Y%m%d")
        )
    }

    /// The full table as CSV text.
    pub fn to_csv(&self) -> Result<String> {
        let bytes = write_rows(Vec::new(), &self.overview.rows(), self.rounding)?;
        String::from_utf8(bytes)
            .map_err(|e| SphaeraError::InvalidArgument(format!("Non UTF-8 CSV output: {}", e)))
    }

    /// Write the table into `dir` (created if missing) and return the file path.
    pub fn write_csv<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let file = fs::File::create(&path)?;
        write_rows(file, &self.overview.rows(), self.rounding)?;
        tracing::info!(path = %path.display(), "overview exported");
        Ok(path)
    }

    /// Write the table into the user's download directory.
    pub fn write_csv_default(&self) -> Result<PathBuf> {
        self.write_csv(config::default_export_dir())
    }
}

/// Serialize `rows` to `out`, returning the writer once flushed.
///
/// The header line is always written, even when `rows` is empty.
pub fn write_rows<W: Write>(out: W, rows: &[DashboardRow], rounding: Rounding) -> Result<W> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(DashboardRow::HEADERS)?;
    for row in rows {
        wtr.serialize(row.rounded(rounding))?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| SphaeraError::Io(std::io::Error::other(e.to_string())))
}
