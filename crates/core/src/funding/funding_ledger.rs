//! Ordered view over the funding sources that can be charged for a period.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::FundingSource;

/// Funding sources still chargeable for a period, earliest expiry first.
///
/// The ledger owns copies of the sources, so deductions made during an
/// allocation never touch the caller's snapshot.
#[derive(Debug, Clone, Default)]
pub struct FundingLedger {
    sources: Vec<FundingSource>,
}

impl FundingLedger {
    /// Builds the ledger for a period ending (exclusive) on `period_end`.
    ///
    /// Sources without an expiry date, expiring before `period_end`, or with no
    /// effort left are dropped. Equal expiry dates fall back to the funding id.
    pub fn for_period(funding: &[FundingSource], period_end: NaiveDate) -> Self {
        let mut sources: Vec<FundingSource> = funding
            .iter()
            .filter(|source| source.is_chargeable_until(period_end))
            .cloned()
            .collect();
        sources.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self { sources }
    }

    pub fn sources(&self) -> &[FundingSource] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Days of effort left across the ledger.
    pub fn total_effort_left(&self) -> Decimal {
        self.sources.iter().map(FundingSource::effort_left).sum()
    }

    /// Charges `amount` to the source at `position`, capped at the money the
    /// source has left. Returns the amount actually charged.
    pub fn deduct(&mut self, position: usize, amount: Decimal) -> Decimal {
        let Some(source) = self.sources.get_mut(position) else {
            return Decimal::ZERO;
        };
        let charged = amount.min(source.funding_left()).max(Decimal::ZERO);
        source.charged += charged;
        charged
    }

    /// Charges a fixed `amount` to the source at `position` without checking
    /// what is left. Used for pro-rata charges.
    pub fn record_charge(&mut self, position: usize, amount: Decimal) {
        if let Some(source) = self.sources.get_mut(position) {
            source.charged += amount;
        }
    }

    pub fn into_sources(self) -> Vec<FundingSource> {
        self.sources
    }
}

/// Funding sources of a project that can be charged for a period, in the
/// order they are drawn down.
pub fn valid_funding_sources(
    funding: &[FundingSource],
    period_end: NaiveDate,
) -> Vec<FundingSource> {
    FundingLedger::for_period(funding, period_end).into_sources()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::FundingKind;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source(id: &str, expiry: Option<NaiveDate>, budget: Decimal, charged: Decimal) -> FundingSource {
        FundingSource {
            id: id.to_string(),
            project_id: "p1".to_string(),
            kind: FundingKind::External,
            funding_body: Some("UKRI".to_string()),
            cost_centre: Some("centre".to_string()),
            activity: Some("G12345".to_string()),
            analysis_code: Some("1234".to_string()),
            expiry_date: expiry,
            budget,
            daily_rate: dec!(100),
            monthly_pro_rata_charge: None,
            charged,
        }
    }

    #[test]
    fn test_orders_by_expiry_then_id() {
        let funding = vec![
            source("c", Some(date(2026, 1, 1)), dec!(500), dec!(0)),
            source("b", Some(date(2025, 12, 31)), dec!(500), dec!(0)),
            source("a", Some(date(2026, 1, 1)), dec!(500), dec!(0)),
        ];
        let ids: Vec<String> = valid_funding_sources(&funding, date(2025, 7, 1))
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_excludes_expired_exhausted_and_undated() {
        let funding = vec![
            source("expired", Some(date(2025, 6, 30)), dec!(500), dec!(0)),
            source("exhausted", Some(date(2026, 1, 1)), dec!(500), dec!(500)),
            source("undated", None, dec!(500), dec!(0)),
            source("boundary", Some(date(2025, 7, 1)), dec!(500), dec!(0)),
        ];
        let ledger = FundingLedger::for_period(&funding, date(2025, 7, 1));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.sources()[0].id, "boundary");
        assert_eq!(ledger.total_effort_left(), dec!(5));
    }

    #[test]
    fn test_deduct_never_overdraws() {
        let funding = vec![source("a", Some(date(2026, 1, 1)), dec!(300), dec!(100))];
        let mut ledger = FundingLedger::for_period(&funding, date(2025, 7, 1));
        assert_eq!(ledger.deduct(0, dec!(250)), dec!(200));
        assert_eq!(ledger.sources()[0].charged, dec!(300));
        assert_eq!(ledger.deduct(3, dec!(10)), dec!(0));
        // The snapshot is untouched.
        assert_eq!(funding[0].charged, dec!(100));
    }
}
