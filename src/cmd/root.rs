use crate::data::AppSettings;
use crate::net::{NagerClient, UnsplashClient};
use crate::state::AppState;
use crate::ui::calendar_view::{App, run_app};
use crate::ui::{install_panic_hook, restore_terminal, setup_terminal};
use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::sync::Arc;

pub async fn run(settings: AppSettings) -> Result<()> {
    let holidays = Arc::new(
        NagerClient::from_settings(&settings).context("failed to build holiday client")?,
    );
    let background = Arc::new(
        UnsplashClient::from_settings(&settings).context("failed to build background client")?,
    );

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    info!(
        "opening calendar today={} country={} policy={:?}",
        today, settings.country_code, settings.selection_policy
    );
    let mut app = App::new(AppState::new(today, settings.selection_policy));

    let result = run_app(&mut terminal, &mut app, holidays, background).await;

    restore_terminal(&mut terminal)?;
    info!(
        "calendar closed with {} schedule(s) over {} day(s)",
        app.state.schedules.total(),
        app.state.schedules.dates().count()
    );
    result
}
