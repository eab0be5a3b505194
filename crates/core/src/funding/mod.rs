//! Funding sources and the ledger used to draw them down.

mod funding_ledger;
mod funding_model;
mod funding_traits;

mod funding_model_tests;

pub use funding_ledger::{valid_funding_sources, FundingLedger};
pub use funding_model::{
    default_daily_rate, suggested_monthly_pro_rata_charge, FundingKind, FundingSource, NewFundingSource,
};
pub use funding_traits::FundingRepositoryTrait;
