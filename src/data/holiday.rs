use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One public holiday as returned by the holiday API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: String,
    pub local_name: String,
    pub name: String,
}

impl Holiday {
    pub fn new(date: &str, local_name: &str, name: &str) -> Self {
        Holiday {
            date: date.to_string(),
            local_name: local_name.to_string(),
            name: name.to_string(),
        }
    }
}

/// Read-only lookup of the holidays for the displayed year, keyed by `yyyy-MM-dd`.
///
/// The directory is never merged: every refresh replaces it wholesale, and a
/// failed refresh leaves it empty. Every holiday is kept even when several
/// share a date; lookups by date return the first one listed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HolidayDirectory {
    year: Option<i32>,
    holidays: Vec<Holiday>,
    first_by_date: HashMap<String, usize>,
}

impl HolidayDirectory {
    pub fn new(year: i32, holidays: Vec<Holiday>) -> Self {
        let mut first_by_date = HashMap::with_capacity(holidays.len());
        for (i, h) in holidays.iter().enumerate() {
            first_by_date.entry(h.date.clone()).or_insert(i);
        }
        HolidayDirectory {
            year: Some(year),
            holidays,
            first_by_date,
        }
    }

    /// An empty directory for `year`, used when the holiday source fails.
    pub fn empty(year: i32) -> Self {
        HolidayDirectory {
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn get(&self, date_key: &str) -> Option<&Holiday> {
        self.first_by_date
            .get(date_key)
            .and_then(|&i| self.holidays.get(i))
    }

    /// Every holiday on `date_key`, in listed order.
    pub fn all_on<'a>(&'a self, date_key: &'a str) -> impl Iterator<Item = &'a Holiday> + 'a {
        self.holidays.iter().filter(move |h| h.date == date_key)
    }

    pub fn is_holiday(&self, date_key: &str) -> bool {
        self.first_by_date.contains_key(date_key)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays sorted by date; same-date holidays keep their listed order.
    pub fn sorted(&self) -> Vec<&Holiday> {
        let mut list: Vec<&Holiday> = self.holidays.iter().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date));
        list
    }
}
