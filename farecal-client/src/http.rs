use async_trait::async_trait;
use farecal_shared::{CabinClass, YearMonth};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::models::{
    FareSearchRequest, FareSearchResult, HolidayEntry, MonthCalendarRequest, MonthPricing,
};
use crate::{ClientError, ClientResult};

/// The three collaborator calls the orchestrator consumes. `Ok(None)`
/// means the service answered outside the 2xx range without a transport
/// failure; callers proceed with empty-result semantics.
#[async_trait]
pub trait FareApi: Send + Sync {
    async fn search_fares(
        &self,
        departure: YearMonth,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
    ) -> ClientResult<Option<FareSearchResult>>;

    async fn monthly_calendar(
        &self,
        departure: YearMonth,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
        fare_family_code: &str,
    ) -> ClientResult<Option<MonthPricing>>;

    async fn list_holidays(&self) -> ClientResult<Option<Vec<HolidayEntry>>>;
}

/// Live implementation over the pricing service and the holiday feed.
/// One attempt per call; timeouts are left to the transport.
pub struct HttpFareApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpFareApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> ClientResult<Option<T>>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("jx-lang", self.config.language.as_str())
            .header("X-Requested-With", "XMLHttpRequest")
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::decode(url, response).await
    }

    async fn get_json<T>(&self, url: &str) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::decode(url, response).await
    }

    async fn decode<T>(url: &str, response: reqwest::Response) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url, "non-success response treated as empty payload");
            return Ok(None);
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(parsed))
    }

    fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[async_trait]
impl FareApi for HttpFareApi {
    async fn search_fares(
        &self,
        departure: YearMonth,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
    ) -> ClientResult<Option<FareSearchResult>> {
        let body =
            FareSearchRequest::round_trip(departure, Self::today(), from_code, to_code, cabin);
        tracing::debug!(%departure, from_code, to_code, %cabin, "issuing fare search");
        self.post_json(&self.config.search_url(), &body).await
    }

    async fn monthly_calendar(
        &self,
        departure: YearMonth,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
        fare_family_code: &str,
    ) -> ClientResult<Option<MonthPricing>> {
        let body = MonthCalendarRequest::round_trip(
            departure,
            Self::today(),
            from_code,
            to_code,
            cabin,
            fare_family_code,
        );
        tracing::debug!(%departure, from_code, to_code, fare_family_code, "issuing monthly calendar");
        self.post_json(&self.config.calendar_url(), &body).await
    }

    async fn list_holidays(&self) -> ClientResult<Option<Vec<HolidayEntry>>> {
        tracing::debug!(url = %self.config.holiday_url, "issuing holiday list");
        self.get_json(&self.config.holiday_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(server: &mockito::Server) -> ApiConfig {
        ApiConfig {
            base_url: server.url(),
            holiday_url: format!("{}/holidays", server.url()),
            language: "zh-TW".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_decodes_success_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "success": true,
                    "traceId": "t-1",
                    "message": {"code": "0", "content": "ok"},
                    "meta": {"fareProducts": [
                        {"fareFamilyCode": "BIZ-STD", "cabin": "business", "name": "Standard"}
                    ]}
                }"#,
            )
            .create_async()
            .await;

        let api = HttpFareApi::new(config_for(&server));
        let result = api
            .search_fares(
                YearMonth::new(2025, 11).unwrap(),
                "TPE",
                "NRT",
                CabinClass::Business,
            )
            .await
            .expect("call succeeds")
            .expect("payload present");

        assert_eq!(result.fare_family_code(CabinClass::Business), "BIZ-STD");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_empty_payload_not_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/calendars/monthly")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let api = HttpFareApi::new(config_for(&server));
        let result = api
            .monthly_calendar(
                YearMonth::new(2025, 11).unwrap(),
                "TPE",
                "NRT",
                CabinClass::Economy,
                "",
            )
            .await
            .expect("non-2xx does not fail the call");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/holidays")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{not valid json")
            .create_async()
            .await;

        let api = HttpFareApi::new(config_for(&server));
        let err = api.list_holidays().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_holidays_decode() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/holidays")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"date": "20251101", "year": "2025", "name": "All Saints' Day",
                     "isholiday": "true", "holidaycategory": "observance"}
                ]"#,
            )
            .create_async()
            .await;

        let api = HttpFareApi::new(config_for(&server));
        let holidays = api
            .list_holidays()
            .await
            .expect("call succeeds")
            .expect("payload present");

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name.as_deref(), Some("All Saints' Day"));
    }
}
