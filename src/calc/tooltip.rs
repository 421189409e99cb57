use crate::data::{HolidayDirectory, ScheduleStore, date_key};
use chrono::NaiveDate;

/// Hover text for a day: the date key, the holiday's local name, then the schedule list.
pub fn compose_tooltip(
    date: NaiveDate,
    holidays: &HolidayDirectory,
    schedules: &ScheduleStore,
) -> String {
    let key = date_key(date);
    let mut text = key.clone();
    if let Some(h) = holidays.get(&key) {
        text.push('\n');
        text.push_str(&h.local_name);
    }
    let entries = schedules.texts_for(&key);
    if !entries.is_empty() {
        text.push_str(&format!(
            "\n\nSchedules ({}):\n- {}",
            entries.len(),
            entries.join("\n- ")
        ));
    }
    text
}
