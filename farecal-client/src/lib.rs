pub mod config;
pub mod http;
pub mod models;

pub use config::ApiConfig;
pub use http::{FareApi, HttpFareApi};
pub use models::{
    CalendarDayPrice, DayStatus, FareProduct, FareSearchResult, HolidayEntry, MonthPricing,
};

/// The one failure kind the engine distinguishes. A non-success HTTP
/// status is not an error; collaborator calls return `Ok(None)` for it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
