use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::errors::{Result, ValidationError};

/// First day of the given calendar month.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month).into());
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidInput(format!("{year}-{month:02} is not a valid month")).into()
    })
}

/// First day of the month following the one containing `date`.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// First day of the month preceding the one containing `date`.
pub fn previous_month_start(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// Full English month name, e.g. "June".
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Start of the last month and the current month relative to `today`, with
/// their names.
pub fn get_current_and_last_month(today: NaiveDate) -> (NaiveDate, String, NaiveDate, String) {
    let current_month_start = today.with_day(1).unwrap_or(today);
    let last_month_start = previous_month_start(today);
    (
        last_month_start,
        month_name(last_month_start),
        current_month_start,
        month_name(current_month_start),
    )
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        if let Some(next) = current.succ_opt() {
            current = next;
        } else {
            break;
        }
    }
    days
}

/// Monday to Friday dates in the half-open range `[start, end)`.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let Some(last) = end.pred_opt() else {
        return Vec::new();
    };
    get_days_between(start, last)
        .into_iter()
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Number of calendar months touched by `[start, end]`, counting partial
/// months at both ends. 2025-03-15..2025-07-08 spans five months.
pub fn calendar_months_spanned(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1;
    months.max(0) as u32
}
