use crate::data::AppSettings;
use crate::data::app_settings::background_access_key;
use crate::net::FetchError;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Decorative backdrop shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Background {
    /// Not fetched yet.
    #[default]
    Pending,
    Photo {
        url: String,
        author: Option<String>,
    },
    /// Plain gradient used whenever no photo is available.
    Fallback,
}

pub trait BackgroundSource {
    fn fetch_background(&self) -> impl Future<Output = Result<Background, FetchError>> + Send;
}

/// Random-photo client for the Unsplash API.
#[derive(Clone, Debug)]
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    query: String,
    access_key: Option<String>,
}

#[derive(Deserialize)]
struct PhotoResponse {
    urls: PhotoUrls,
    #[serde(default)]
    user: Option<PhotoUser>,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Deserialize)]
struct PhotoUser {
    name: String,
}

impl UnsplashClient {
    pub fn new(
        base_url: impl Into<String>,
        query: impl Into<String>,
        access_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            query: query.into(),
            access_key,
        })
    }

    /// Builds a client whose key comes from the environment.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, FetchError> {
        Self::new(
            settings.background_api_url.clone(),
            settings.background_query.clone(),
            background_access_key(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn url(&self) -> String {
        format!("{}/photos/random", self.base_url.trim_end_matches('/'))
    }
}

impl BackgroundSource for UnsplashClient {
    async fn fetch_background(&self) -> Result<Background, FetchError> {
        let Some(key) = self.access_key.as_deref() else {
            return Err(FetchError::NotConfigured);
        };
        let url = self.url();
        debug!("GET {} query={}", url, self.query);

        let response = self
            .http
            .get(&url)
            .query(&[("query", self.query.as_str())])
            .header("Authorization", format!("Client-ID {}", key))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        parse_photo(&body)
    }
}

pub fn parse_photo(body: &str) -> Result<Background, FetchError> {
    let photo: PhotoResponse = serde_json::from_str(body)?;
    Ok(Background::Photo {
        url: photo.urls.regular,
        author: photo.user.map(|u| u.name),
    })
}

/// Fetches a background photo, falling back to the gradient on any failure.
pub async fn load_background<S: BackgroundSource>(source: &S) -> Background {
    match source.fetch_background().await {
        Ok(bg) => {
            info!("background photo loaded");
            bg
        }
        Err(FetchError::NotConfigured) => {
            warn!("background key is not configured; using fallback gradient");
            Background::Fallback
        }
        Err(e) => {
            error!("background fetch failed, using fallback gradient: {}", e);
            Background::Fallback
        }
    }
}
