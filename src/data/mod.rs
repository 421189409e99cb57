pub mod app_settings;
pub mod holiday;
pub mod persistence;
pub mod schedule;

pub use app_settings::{AppSettings, SelectionPolicy};
pub use holiday::{Holiday, HolidayDirectory};
pub use schedule::{EntryId, ScheduleEntry, ScheduleStore};

use chrono::NaiveDate;

/// Canonical lookup key for all day-scoped data. Locale independent.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}
