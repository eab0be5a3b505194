use std::io;

use super::report_model::ChargesReport;
use crate::errors::{Error, Result};

/// Writes the header block and then the charges block as CSV.
pub fn write_to_csv<W: io::Write>(report: &ChargesReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    for row in report.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// The report as CSV text, e.g. for an email attachment.
pub fn to_csv_string(report: &ChargesReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_to_csv(report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Report(e.to_string()))
}

/// File name offered when the report is downloaded.
pub fn download_filename(month: u32, year: i32) -> String {
    format!("charges_report_{month}-{year}.csv")
}
