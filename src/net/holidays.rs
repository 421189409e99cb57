use crate::data::{AppSettings, Holiday, HolidayDirectory, parse_date_key};
use crate::net::FetchError;
use log::{debug, error, info, warn};
use std::future::Future;
use std::time::Duration;

/// Anything that can list a year's public holidays.
pub trait HolidaySource {
    fn fetch_holidays(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<Holiday>, FetchError>> + Send;
}

/// Client for the Nager.Date public holiday API.
#[derive(Clone, Debug)]
pub struct NagerClient {
    http: reqwest::Client,
    base_url: String,
    country_code: String,
}

impl NagerClient {
    pub fn new(
        base_url: impl Into<String>,
        country_code: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            country_code: country_code.into(),
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, FetchError> {
        Self::new(
            settings.holiday_api_url.clone(),
            settings.country_code.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn url_for(&self, year: i32) -> String {
        format!(
            "{}/PublicHolidays/{}/{}",
            self.base_url.trim_end_matches('/'),
            year,
            self.country_code
        )
    }
}

impl HolidaySource for NagerClient {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<Holiday>, FetchError> {
        let url = self.url_for(year);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        parse_holidays(&body)
    }
}

/// Decodes the API's JSON array of `{date, localName, name, ...}`.
pub fn parse_holidays(body: &str) -> Result<Vec<Holiday>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Fetches `year`'s holidays, degrading to an empty directory on any failure.
pub async fn refresh_holidays<S: HolidaySource>(source: &S, year: i32) -> HolidayDirectory {
    info!("fetching holidays year={}", year);
    match source.fetch_holidays(year).await {
        Ok(mut holidays) => {
            holidays.retain(|h| {
                let valid = parse_date_key(&h.date).is_some();
                if !valid {
                    warn!("skipping holiday with malformed date {:?}", h.date);
                }
                valid
            });
            info!("holidays loaded year={} count={}", year, holidays.len());
            HolidayDirectory::new(year, holidays)
        }
        Err(e) => {
            error!("holiday fetch failed year={}: {}", year, e);
            HolidayDirectory::empty(year)
        }
    }
}
