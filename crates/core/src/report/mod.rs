//! Monthly journal report sent to finance.

mod csv_writer;
mod report_model;
mod report_renderer;

pub use csv_writer::{download_filename, to_csv_string, write_to_csv};
pub use report_model::{ChargesReport, ReportRow, REPORT_COLUMNS};
pub use report_renderer::{render_charges_block, render_charges_report, render_header_block};
