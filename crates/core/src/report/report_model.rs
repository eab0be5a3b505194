use serde::{Deserialize, Serialize};

/// Every row of the journal has this many fields.
pub const REPORT_COLUMNS: usize = 5;

pub type ReportRow = Vec<String>;

/// Journal for one month: fixed header rows followed by one debit row per
/// charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargesReport {
    pub header_block: Vec<ReportRow>,
    pub charges_block: Vec<ReportRow>,
}

impl ChargesReport {
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.header_block.iter().chain(self.charges_block.iter())
    }
}
