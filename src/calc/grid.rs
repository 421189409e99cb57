use crate::data::{HolidayDirectory, ScheduleStore, date_key};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Schedule-count bucket used for cell shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTier {
    None,
    One,
    /// 2–3 entries.
    Few,
    /// 4–5 entries.
    Several,
    /// 6 or more entries.
    Many,
}

impl ScheduleTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ScheduleTier::None,
            1 => ScheduleTier::One,
            2..=3 => ScheduleTier::Few,
            4..=5 => ScheduleTier::Several,
            _ => ScheduleTier::Many,
        }
    }

    /// 0 for no schedules, 1–4 for increasing density.
    pub fn level(self) -> u8 {
        match self {
            ScheduleTier::None => 0,
            ScheduleTier::One => 1,
            ScheduleTier::Few => 2,
            ScheduleTier::Several => 3,
            ScheduleTier::Many => 4,
        }
    }
}

/// One cell of the year grid, rebuilt on every render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub in_year: bool,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub schedule_count: usize,
    pub holiday_name: Option<String>,
}

impl DayCell {
    /// Weekends and holidays share the rest-day style, which wins over the schedule tier.
    pub fn is_rest_day(&self) -> bool {
        self.is_weekend || self.is_holiday
    }

    pub fn tier(&self) -> ScheduleTier {
        ScheduleTier::from_count(self.schedule_count)
    }

    /// Filler cells from the adjacent years are not interactive.
    pub fn is_interactive(&self) -> bool {
        self.in_year
    }
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First day (Sunday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Last day (Saturday) of the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let offset = 6 - date.weekday().num_days_from_sunday() as u64;
    date.checked_add_days(Days::new(offset)).unwrap_or(date)
}

/// Every date from the Sunday on or before Jan 1 through the Saturday on or
/// after Dec 31 of `year`, consecutive and inclusive.
///
/// At the edges of chrono's range the grid is clipped to the dates that exist.
pub fn generate_year_grid(year: i32) -> Vec<NaiveDate> {
    let (Some(year_start), Some(year_end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };
    let start = week_start(year_start);
    let end = week_end(year_end);

    let mut days = Vec::with_capacity(378);
    let mut current = start;
    loop {
        days.push(current);
        if current >= end {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// Derives the flagged cells for `year` from the current holiday and schedule state.
pub fn build_day_cells(
    year: i32,
    today: NaiveDate,
    holidays: &HolidayDirectory,
    schedules: &ScheduleStore,
    selected: Option<NaiveDate>,
) -> Vec<DayCell> {
    generate_year_grid(year)
        .into_iter()
        .map(|date| {
            let key = date_key(date);
            let holiday = holidays.get(&key);
            DayCell {
                date,
                in_year: date.year() == year,
                is_weekend: is_weekend(date),
                is_holiday: holiday.is_some(),
                is_today: date == today,
                is_selected: selected == Some(date),
                schedule_count: schedules.count_for(&key),
                holiday_name: holiday.map(|h| h.local_name.clone()),
                key,
            }
        })
        .collect()
}

/// Splits the grid into Sunday-to-Saturday rows.
pub fn weeks(cells: &[DayCell]) -> Vec<&[DayCell]> {
    cells.chunks(7).collect()
}
