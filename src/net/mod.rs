pub mod background;
pub mod error;
pub mod holidays;

pub use background::{Background, BackgroundSource, UnsplashClient, load_background};
pub use error::FetchError;
pub use holidays::{HolidaySource, NagerClient, refresh_holidays};
