use serde::Deserialize;

/// Endpoint configuration for the pricing service and the holiday feed.
/// Compiled-in defaults point at the live services; a `config/default`
/// file or `FARECAL_`-prefixed environment variables override them.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_holiday_url")]
    pub holiday_url: String,

    /// Sent as the `jx-lang` header on pricing calls.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://ecapi.starlux-airlines.com/searchFlight/v2/flights".to_string()
}

fn default_holiday_url() -> String {
    "https://data.ntpc.gov.tw/api/datasets/308dcd75-6434-45bc-a95f-584da4fed251/json".to_string()
}

fn default_language() -> String {
    "zh-TW".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            holiday_url: default_holiday_url(),
            language: default_language(),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FARECAL"))
            .build()?;

        s.try_deserialize()
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn calendar_url(&self) -> String {
        format!("{}/calendars/monthly", self.base_url)
    }
}
