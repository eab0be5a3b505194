/// Hours in one chargeable working day
pub const DEFAULT_WORKDAY_HOURS: u32 = 7;

/// Working days assumed in one calendar year
pub const DEFAULT_WORKING_DAYS_PER_YEAR: u32 = 220;

/// Daily rate applied to new funding sources when none is given
pub const DEFAULT_DAILY_RATE: &str = "389.00";

/// Decimal precision for monetary amounts
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for chargeable days and effort figures
pub const DAYS_DECIMAL_PRECISION: u32 = 1;

/// Fixed credit line of the monthly journal
pub const DEFAULT_CREDIT_COST_CENTRE: &str = "ITPP";
pub const DEFAULT_CREDIT_ACTIVITY: &str = "G80410";
pub const DEFAULT_CREDIT_ANALYSIS: &str = "162104";

/// Text fragments of the journal header block
pub const DEFAULT_JOURNAL_NAME_PREFIX: &str = "RCS_MANAGER RSE";
pub const DEFAULT_JOURNAL_DESCRIPTION_PREFIX: &str = "RCS RSE Recharge for";
pub const DEFAULT_CREDIT_LINE_PREFIX: &str = "RSE Projects";

/// Contact appended to every generated charge line description
pub const DEFAULT_CHARGE_CONTACT: &str = "rcs-manager@imperial.ac.uk";

/// Signature used at the end of notification messages
pub const NOTIFICATION_SIGNATURE: &str = "ProCAT";
