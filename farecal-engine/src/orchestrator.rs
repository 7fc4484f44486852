use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Weekday;
use farecal_client::models::{FareSearchResult, HolidayEntry, MonthPricing};
use farecal_client::{ClientError, ClientResult, FareApi};
use farecal_shared::{CabinClass, RouteQuery, YearMonth};
use serde::Serialize;
use tokio::sync::watch;

use crate::calmath;
use crate::grid::{self, GridCell};
use crate::route;

/// Week-start convention of the calendar screen.
pub const WEEK_START: Weekday = Weekday::Mon;

/// Externally observable lifecycle of one orchestration run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// State published to the presentation collaborator. The grid is non-empty
/// only in `Ready`; the alert message is set only in `Error`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrchestrationState {
    pub phase: Phase,
    pub query: Option<RouteQuery>,
    pub grid: Vec<GridCell>,
    pub weekday_labels: [Weekday; 7],
    pub alert_message: Option<String>,
}

impl OrchestrationState {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            query: None,
            grid: Vec::new(),
            weekday_labels: calmath::weekday_labels(WEEK_START),
            alert_message: None,
        }
    }

    fn loading(query: RouteQuery) -> Self {
        Self {
            phase: Phase::Loading,
            query: Some(query),
            ..Self::idle()
        }
    }

    fn ready(query: RouteQuery, grid: grid::MonthGrid) -> Self {
        Self {
            phase: Phase::Ready,
            query: Some(query),
            grid: grid.cells,
            weekday_labels: grid.weekday_labels,
            alert_message: None,
        }
    }

    fn error(query: RouteQuery, message: String) -> Self {
        Self {
            phase: Phase::Error,
            query: Some(query),
            alert_message: Some(message),
            ..Self::idle()
        }
    }
}

/// Drives one fare-calendar run: optional fare search, then the monthly
/// calendar and holiday calls fanned out and joined, then the grid build.
/// Each run owns its state; there is no retry and no cancellation of an
/// in-flight run.
pub struct CalendarOrchestrator {
    api: Arc<dyn FareApi>,
    tx: watch::Sender<OrchestrationState>,
}

impl CalendarOrchestrator {
    pub fn new(api: Arc<dyn FareApi>) -> Self {
        let (tx, _) = watch::channel(OrchestrationState::idle());
        Self { api, tx }
    }

    /// Observe state transitions. The receiver starts at `Idle` and tracks
    /// the latest published state; dropped receivers simply miss updates.
    pub fn subscribe(&self) -> watch::Receiver<OrchestrationState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> OrchestrationState {
        self.tx.borrow().clone()
    }

    /// Run the machine for `query`. Re-invocation restarts from scratch;
    /// the terminal state is both published and returned.
    pub async fn start(&self, query: RouteQuery) -> OrchestrationState {
        tracing::info!(departure = %query.departure, from = %query.from.code, to = %query.to.code, cabin = %query.cabin, "starting fare-calendar run");
        self.publish(OrchestrationState::loading(query.clone()));

        let state = match self.run(&query).await {
            Ok(grid) => {
                tracing::info!(cells = grid.cells.len(), "fare-calendar run succeeded");
                OrchestrationState::ready(query, grid)
            }
            Err(err) => {
                tracing::warn!(error = %err, "fare-calendar run failed");
                OrchestrationState::error(query, err.to_string())
            }
        };

        self.publish(state.clone());
        state
    }

    async fn run(&self, query: &RouteQuery) -> Result<grid::MonthGrid, ClientError> {
        let route = route::resolve(&query.from, &query.to);

        // Home-origin trips are priced directly; the fare-family step only
        // exists for trips the service has to re-anchor at a home airport.
        let search = if route.is_home_origin {
            None
        } else {
            self.api
                .search_fares(
                    query.departure,
                    &route.search_from.code,
                    &route.search_to.code,
                    query.cabin,
                )
                .await?
        };

        let fare_family_code = search
            .as_ref()
            .map(|result| result.fare_family_code(query.cabin))
            .unwrap_or_default();

        // The calendar pair branches on the search payload being absent,
        // not on the origin: an empty search response also keeps the
        // original pair.
        let (calendar_from, calendar_to) = if search.is_some() {
            (&query.to, &query.from)
        } else {
            (&query.from, &query.to)
        };

        let (pricing, holidays) = tokio::try_join!(
            self.api.monthly_calendar(
                query.departure,
                &calendar_from.code,
                &calendar_to.code,
                query.cabin,
                &fare_family_code,
            ),
            self.api.list_holidays(),
        )?;

        let days = pricing.map(|p| p.data.calendars).unwrap_or_default();
        let holidays = holidays.unwrap_or_default();
        let (max_price, min_price) = grid::price_bounds(&days);

        Ok(grid::build_grid(
            query, &days, &holidays, max_price, min_price, WEEK_START,
        ))
    }

    fn publish(&self, state: OrchestrationState) {
        // send_replace never fails even with no live receivers; updates
        // for departed screens are dropped on the floor.
        self.tx.send_replace(state);
    }
}

/// Scripted collaborator double for orchestrator tests: each call returns
/// its scripted response once and records the arguments it was issued
/// with.
#[derive(Default)]
pub struct ScriptedFareApi {
    search_response: Mutex<Option<ClientResult<Option<FareSearchResult>>>>,
    calendar_response: Mutex<Option<ClientResult<Option<MonthPricing>>>>,
    holiday_response: Mutex<Option<ClientResult<Option<Vec<HolidayEntry>>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Search {
        from: String,
        to: String,
    },
    Calendar {
        from: String,
        to: String,
        fare_family_code: String,
    },
    Holidays,
}

impl ScriptedFareApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_search(&self, response: ClientResult<Option<FareSearchResult>>) {
        *self.search_response.lock().unwrap() = Some(response);
    }

    pub fn script_calendar(&self, response: ClientResult<Option<MonthPricing>>) {
        *self.calendar_response.lock().unwrap() = Some(response);
    }

    pub fn script_holidays(&self, response: ClientResult<Option<Vec<HolidayEntry>>>) {
        *self.holiday_response.lock().unwrap() = Some(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl FareApi for ScriptedFareApi {
    async fn search_fares(
        &self,
        _departure: YearMonth,
        from_code: &str,
        to_code: &str,
        _cabin: CabinClass,
    ) -> ClientResult<Option<FareSearchResult>> {
        self.record(RecordedCall::Search {
            from: from_code.to_string(),
            to: to_code.to_string(),
        });
        self.search_response.lock().unwrap().take().unwrap_or(Ok(None))
    }

    async fn monthly_calendar(
        &self,
        _departure: YearMonth,
        from_code: &str,
        to_code: &str,
        _cabin: CabinClass,
        fare_family_code: &str,
    ) -> ClientResult<Option<MonthPricing>> {
        self.record(RecordedCall::Calendar {
            from: from_code.to_string(),
            to: to_code.to_string(),
            fare_family_code: fare_family_code.to_string(),
        });
        self.calendar_response.lock().unwrap().take().unwrap_or(Ok(None))
    }

    async fn list_holidays(&self) -> ClientResult<Option<Vec<HolidayEntry>>> {
        self.record(RecordedCall::Holidays);
        self.holiday_response.lock().unwrap().take().unwrap_or(Ok(None))
    }
}
