//! Application settings persisted as key/value pairs.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{Result, ValidationError};

pub const WORKDAY_HOURS_KEY: &str = "workday_hours";
pub const WORKING_DAYS_PER_YEAR_KEY: &str = "working_days_per_year";
pub const CREDIT_COST_CENTRE_KEY: &str = "credit_cost_centre";
pub const CREDIT_ACTIVITY_KEY: &str = "credit_activity";
pub const CREDIT_ANALYSIS_KEY: &str = "credit_analysis";
pub const JOURNAL_NAME_PREFIX_KEY: &str = "journal_name_prefix";
pub const JOURNAL_DESCRIPTION_PREFIX_KEY: &str = "journal_description_prefix";
pub const CREDIT_LINE_PREFIX_KEY: &str = "credit_line_prefix";
pub const CHARGE_CONTACT_KEY: &str = "charge_contact";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub workday_hours: u32,
    pub working_days_per_year: u32,
    pub credit_cost_centre: String,
    pub credit_activity: String,
    pub credit_analysis: String,
    pub journal_name_prefix: String,
    pub journal_description_prefix: String,
    pub credit_line_prefix: String,
    pub charge_contact: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workday_hours: DEFAULT_WORKDAY_HOURS,
            working_days_per_year: DEFAULT_WORKING_DAYS_PER_YEAR,
            credit_cost_centre: DEFAULT_CREDIT_COST_CENTRE.to_string(),
            credit_activity: DEFAULT_CREDIT_ACTIVITY.to_string(),
            credit_analysis: DEFAULT_CREDIT_ANALYSIS.to_string(),
            journal_name_prefix: DEFAULT_JOURNAL_NAME_PREFIX.to_string(),
            journal_description_prefix: DEFAULT_JOURNAL_DESCRIPTION_PREFIX.to_string(),
            credit_line_prefix: DEFAULT_CREDIT_LINE_PREFIX.to_string(),
            charge_contact: DEFAULT_CHARGE_CONTACT.to_string(),
        }
    }
}

impl Settings {
    /// Builds settings from stored pairs. Unknown keys are ignored and values
    /// that do not parse keep their default.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            match key.as_str() {
                WORKDAY_HOURS_KEY => {
                    settings.workday_hours = value.parse().unwrap_or(DEFAULT_WORKDAY_HOURS);
                }
                WORKING_DAYS_PER_YEAR_KEY => {
                    settings.working_days_per_year =
                        value.parse().unwrap_or(DEFAULT_WORKING_DAYS_PER_YEAR);
                }
                CREDIT_COST_CENTRE_KEY => settings.credit_cost_centre = value,
                CREDIT_ACTIVITY_KEY => settings.credit_activity = value,
                CREDIT_ANALYSIS_KEY => settings.credit_analysis = value,
                JOURNAL_NAME_PREFIX_KEY => settings.journal_name_prefix = value,
                JOURNAL_DESCRIPTION_PREFIX_KEY => settings.journal_description_prefix = value,
                CREDIT_LINE_PREFIX_KEY => settings.credit_line_prefix = value,
                CHARGE_CONTACT_KEY => settings.charge_contact = value,
                _ => {}
            }
        }
        settings
    }

    /// Default value stored for a known key.
    pub fn default_value(key: &str) -> Option<String> {
        let defaults = Settings::default();
        let value = match key {
            WORKDAY_HOURS_KEY => defaults.workday_hours.to_string(),
            WORKING_DAYS_PER_YEAR_KEY => defaults.working_days_per_year.to_string(),
            CREDIT_COST_CENTRE_KEY => defaults.credit_cost_centre,
            CREDIT_ACTIVITY_KEY => defaults.credit_activity,
            CREDIT_ANALYSIS_KEY => defaults.credit_analysis,
            JOURNAL_NAME_PREFIX_KEY => defaults.journal_name_prefix,
            JOURNAL_DESCRIPTION_PREFIX_KEY => defaults.journal_description_prefix,
            CREDIT_LINE_PREFIX_KEY => defaults.credit_line_prefix,
            CHARGE_CONTACT_KEY => defaults.charge_contact,
            _ => return None,
        };
        Some(value)
    }
}

/// Partial update of the settings; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub workday_hours: Option<u32>,
    pub working_days_per_year: Option<u32>,
    pub credit_cost_centre: Option<String>,
    pub credit_activity: Option<String>,
    pub credit_analysis: Option<String>,
    pub journal_name_prefix: Option<String>,
    pub journal_description_prefix: Option<String>,
    pub credit_line_prefix: Option<String>,
    pub charge_contact: Option<String>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.workday_hours == Some(0) || self.workday_hours.is_some_and(|h| h > 24) {
            return Err(ValidationError::InvalidInput(
                "Workday hours must be between 1 and 24.".to_string(),
            )
            .into());
        }
        if self.working_days_per_year == Some(0)
            || self.working_days_per_year.is_some_and(|d| d > 366)
        {
            return Err(ValidationError::InvalidInput(
                "Working days per year must be between 1 and 366.".to_string(),
            )
            .into());
        }
        let codes = [
            (CREDIT_COST_CENTRE_KEY, &self.credit_cost_centre),
            (CREDIT_ACTIVITY_KEY, &self.credit_activity),
            (CREDIT_ANALYSIS_KEY, &self.credit_analysis),
        ];
        for (key, value) in codes {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ValidationError::MissingField(key.to_string()).into());
            }
        }
        Ok(())
    }

    /// Key/value pairs to store for the fields that are set.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(hours) = self.workday_hours {
            pairs.push((WORKDAY_HOURS_KEY, hours.to_string()));
        }
        if let Some(days) = self.working_days_per_year {
            pairs.push((WORKING_DAYS_PER_YEAR_KEY, days.to_string()));
        }
        let text_fields = [
            (CREDIT_COST_CENTRE_KEY, &self.credit_cost_centre),
            (CREDIT_ACTIVITY_KEY, &self.credit_activity),
            (CREDIT_ANALYSIS_KEY, &self.credit_analysis),
            (JOURNAL_NAME_PREFIX_KEY, &self.journal_name_prefix),
            (JOURNAL_DESCRIPTION_PREFIX_KEY, &self.journal_description_prefix),
            (CREDIT_LINE_PREFIX_KEY, &self.credit_line_prefix),
            (CHARGE_CONTACT_KEY, &self.charge_contact),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_falls_back_to_defaults() {
        let settings = Settings::from_pairs(vec![
            (WORKDAY_HOURS_KEY.to_string(), "7.5".to_string()),
            (CHARGE_CONTACT_KEY.to_string(), "rse@example.ac.uk".to_string()),
            ("theme".to_string(), "dark".to_string()),
        ]);
        assert_eq!(settings.workday_hours, DEFAULT_WORKDAY_HOURS);
        assert_eq!(settings.charge_contact, "rse@example.ac.uk");
        assert_eq!(settings.credit_cost_centre, "ITPP");
    }

    #[test]
    fn test_update_validation() {
        let update = SettingsUpdate {
            workday_hours: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = SettingsUpdate {
            credit_activity: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = SettingsUpdate {
            workday_hours: Some(8),
            working_days_per_year: Some(210),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        assert_eq!(update.to_pairs().len(), 2);
    }

    #[test]
    fn test_default_value_for_unknown_key() {
        assert_eq!(Settings::default_value("theme"), None);
        assert_eq!(
            Settings::default_value(WORKING_DAYS_PER_YEAR_KEY).as_deref(),
            Some("220")
        );
    }
}
