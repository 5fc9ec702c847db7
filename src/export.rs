//! Export of selected records to a downloadable document.

use std::io;

use serde::Serialize;

use crate::{
    officer::HouseOfficerRecord,
    view::{Selection, View},
};

/// Date layout used in exported documents, e.g. `Jan 15, 2025`.
pub const EXPORT_DATE_FORMAT: &str = "%b %d, %Y";

/// Export failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No visible row is selected; the exporter was not called.
    #[error("no house officers selected")]
    EmptySelection,
    /// CSV encoding failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    /// Writing the document failed.
    #[error("export write failed: {0}")]
    Io(#[from] io::Error),
}

/// Consumer of a non-empty set of records.
pub trait Exporter {
    /// Writes `records`, already in display order.
    fn export(&mut self, records: &[&HouseOfficerRecord]) -> Result<(), ExportError>;
}

/// Sends the visible, selected rows of `view` to `exporter`.
///
/// Rejects an empty selection before the exporter is invoked. Returns the
/// number of exported rows.
pub fn export_selection<E: Exporter + ?Sized>(
    view: &View<'_>,
    selection: &Selection,
    exporter: &mut E,
) -> Result<usize, ExportError> {
    let rows = selection.selected_in(view);
    if rows.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    exporter.export(&rows)?;
    tracing::info!(rows = rows.len(), "exported selected officers");
    Ok(rows.len())
}

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Full Name")]
    full_name: &'a str,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Unit")]
    unit: &'static str,
    #[serde(rename = "Date Signed In")]
    date_signed_in: String,
    #[serde(rename = "Clinical Presentation Topic")]
    topic: &'a str,
    #[serde(rename = "Presentation Date")]
    presentation_date: String,
    #[serde(rename = "Expected Sign-out")]
    expected_sign_out: String,
}

impl<'a> From<&'a HouseOfficerRecord> for ExportRow<'a> {
    fn from(rec: &'a HouseOfficerRecord) -> Self {
        Self {
            full_name: &rec.full_name,
            gender: rec.gender.as_str(),
            unit: rec.unit_assigned.as_str(),
            date_signed_in: rec.date_signed_in.format(EXPORT_DATE_FORMAT).to_string(),
            topic: &rec.clinical_presentation_topic,
            presentation_date: rec
                .clinical_presentation_date
                .format(EXPORT_DATE_FORMAT)
                .to_string(),
            expected_sign_out: rec
                .expected_sign_out_date
                .format(EXPORT_DATE_FORMAT)
                .to_string(),
        }
    }
}

/// Tabular CSV document, one row per officer with a header row.
pub struct CsvExporter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvExporter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, ExportError> {
        self.writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}

impl<W: io::Write> Exporter for CsvExporter<W> {
    fn export(&mut self, records: &[&HouseOfficerRecord]) -> Result<(), ExportError> {
        for rec in records {
            self.writer.serialize(ExportRow::from(*rec))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
