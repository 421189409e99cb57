use crate::data::{AppSettings, HolidayDirectory};
use crate::net::{NagerClient, refresh_holidays};
use anyhow::{Context, Result};

pub async fn run(settings: &AppSettings, year: i32) -> Result<()> {
    let client = NagerClient::from_settings(settings).context("failed to build holiday client")?;
    let directory = refresh_holidays(&client, year).await;
    write_holidays(&directory, year, &mut std::io::stdout())
}

pub(crate) fn write_holidays<W: std::io::Write>(
    data: &HolidayDirectory,
    year: i32,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Holidays {}", year)?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<16} {}", "Date", "Local name", "Name")?;
    for h in data.sorted() {
        writeln!(out, "  {:<14} {:<16} {}", h.date, h.local_name, h.name)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", data.len())?;
    Ok(())
}
