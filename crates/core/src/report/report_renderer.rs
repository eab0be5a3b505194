use rust_decimal::Decimal;

use super::report_model::{ChargesReport, ReportRow, REPORT_COLUMNS};
use crate::charges::{BillingPeriod, ChargeLine};
use crate::settings::Settings;

fn row<const N: usize>(fields: [&str; N]) -> ReportRow {
    let mut row: ReportRow = fields.iter().map(|f| f.to_string()).collect();
    row.resize(REPORT_COLUMNS, String::new());
    row
}

fn blank_row() -> ReportRow {
    vec![String::new(); REPORT_COLUMNS]
}

/// Journal header: name, description and total, then the single credit line
/// and the column headers of the debit lines.
pub fn render_header_block(
    period: &BillingPeriod,
    total: Decimal,
    settings: &Settings,
) -> Vec<ReportRow> {
    let label = period.label();
    let amount = format!("{:.2}", total);
    let journal_name = format!("{} {}", settings.journal_name_prefix, label);
    let journal_description = format!("{} {}", settings.journal_description_prefix, label);
    let credit_description = format!("{}: {}", settings.credit_line_prefix, period.long_label());

    vec![
        row(["Journal Name", journal_name.as_str()]),
        row(["Journal Description", journal_description.as_str()]),
        row(["Journal Amount", amount.as_str()]),
        blank_row(),
        row(["Cost Centre", "Activity", "Analysis", "Credit", "Line Description"]),
        row([
            settings.credit_cost_centre.as_str(),
            settings.credit_activity.as_str(),
            settings.credit_analysis.as_str(),
            amount.as_str(),
            credit_description.as_str(),
        ]),
        blank_row(),
        row(["Cost Centre", "Activity", "Analysis", "Debit", "Line Description"]),
    ]
}

/// One debit row per charge.
pub fn render_charges_block(lines: &[ChargeLine]) -> Vec<ReportRow> {
    lines
        .iter()
        .map(|line| {
            vec![
                line.cost_centre.clone(),
                line.activity.clone(),
                line.analysis_code.clone(),
                format!("{:.2}", line.amount),
                line.description.clone(),
            ]
        })
        .collect()
}

/// Journal for `period` listing every charge in `lines`.
pub fn render_charges_report(
    period: &BillingPeriod,
    lines: &[ChargeLine],
    settings: &Settings,
) -> ChargesReport {
    let total: Decimal = lines.iter().map(|line| line.amount).sum();
    ChargesReport {
        header_block: render_header_block(period, total, settings),
        charges_block: render_charges_block(lines),
    }
}
