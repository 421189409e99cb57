use crate::calc::{DayCell, ScheduleTier, build_day_cells, weeks};
use crate::data::{AppSettings, HolidayDirectory, ScheduleStore};
use crate::net::{NagerClient, refresh_holidays};
use anyhow::{Context, Result};
use chrono::Local;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub async fn run(settings: &AppSettings, year: i32) -> Result<()> {
    let client = NagerClient::from_settings(settings).context("failed to build holiday client")?;
    let holidays = refresh_holidays(&client, year).await;
    let today = Local::now().date_naive();
    let cells = build_day_cells(year, today, &holidays, &ScheduleStore::default(), None);
    write_grid(&cells, &holidays, year, &mut std::io::stdout())
}

/// Prints the grid with one row per weekday and one column per week.
pub(crate) fn write_grid<W: std::io::Write>(
    cells: &[DayCell],
    holidays: &HolidayDirectory,
    year: i32,
    out: &mut W,
) -> Result<()> {
    let rows = weeks(cells);
    writeln!(out, "{} ({} weeks)", year, rows.len())?;
    for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
        let line: String = rows.iter().map(|week| cell_char(&week[weekday])).collect();
        writeln!(out, "{} {}", label, line)?;
    }
    writeln!(
        out,
        "legend: · outside year  # weekend/holiday  . free  1-4 schedules"
    )?;
    for cell in cells.iter().filter(|c| c.is_interactive()) {
        if let Some(name) = &cell.holiday_name {
            let mut names = vec![name.as_str()];
            names.extend(
                holidays
                    .all_on(&cell.key)
                    .skip(1)
                    .map(|h| h.local_name.as_str()),
            );
            writeln!(out, "  {} {}", cell.key, names.join(", "))?;
        }
    }
    Ok(())
}

pub(crate) fn cell_char(cell: &DayCell) -> char {
    if !cell.is_interactive() {
        return '·';
    }
    if cell.is_rest_day() {
        return '#';
    }
    match cell.tier() {
        ScheduleTier::None => '.',
        tier => char::from(b'0' + tier.level()),
    }
}
