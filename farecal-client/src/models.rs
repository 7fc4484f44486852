use chrono::{Duration, NaiveDate};
use farecal_shared::{CabinClass, Price, YearMonth};
use serde::{Deserialize, Serialize};

const WIRE_DATE_FORMAT: &str = "%Y%m%d";

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub departure_date: String,
    pub departure: String,
    pub arrival: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Travelers {
    pub adt: u32,
    pub chd: u32,
    pub inf: u32,
}

impl Travelers {
    /// The calendar screen always prices for one adult.
    pub fn one_adult() -> Self {
        Self { adt: 1, chd: 0, inf: 0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FareSearchRequest {
    pub itineraries: Vec<Itinerary>,
    pub travelers: Travelers,
    pub cabin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendarRequest {
    pub itineraries: Vec<Itinerary>,
    pub travelers: Travelers,
    pub cabin: String,
    pub go_fare_family_code: String,
}

/// Outbound/inbound reference dates for a month query. The service rejects
/// departures in the past, so a query for the current month is anchored to
/// tomorrow; any other month is anchored to its first day. The return leg
/// sits five days out.
pub fn reference_dates(month: YearMonth, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let outbound = if month.contains(today) {
        today + Duration::days(1)
    } else {
        month.first_day()
    };
    (outbound, outbound + Duration::days(5))
}

fn round_trip(
    month: YearMonth,
    today: NaiveDate,
    from_code: &str,
    to_code: &str,
) -> Vec<Itinerary> {
    let (outbound, inbound) = reference_dates(month, today);
    vec![
        Itinerary {
            departure_date: outbound.format(WIRE_DATE_FORMAT).to_string(),
            departure: from_code.to_string(),
            arrival: to_code.to_string(),
        },
        Itinerary {
            departure_date: inbound.format(WIRE_DATE_FORMAT).to_string(),
            departure: to_code.to_string(),
            arrival: from_code.to_string(),
        },
    ]
}

impl FareSearchRequest {
    pub fn round_trip(
        month: YearMonth,
        today: NaiveDate,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
    ) -> Self {
        Self {
            itineraries: round_trip(month, today, from_code, to_code),
            travelers: Travelers::one_adult(),
            cabin: cabin.code().to_string(),
        }
    }
}

impl MonthCalendarRequest {
    pub fn round_trip(
        month: YearMonth,
        today: NaiveDate,
        from_code: &str,
        to_code: &str,
        cabin: CabinClass,
        fare_family_code: &str,
    ) -> Self {
        Self {
            itineraries: round_trip(month, today, from_code, to_code),
            travelers: Travelers::one_adult(),
            cabin: cabin.code().to_string(),
            go_fare_family_code: fare_family_code.to_string(),
        }
    }
}

// ============================================================================
// Fare-search response
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FareSearchResult {
    pub success: bool,
    pub trace_id: String,
    pub message: Message,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

impl FareSearchResult {
    /// Fare-family code of the first fare product sold in `cabin`, or ""
    /// when the response carries none.
    pub fn fare_family_code(&self, cabin: CabinClass) -> String {
        self.meta
            .as_ref()
            .and_then(|meta| meta.fare_products.iter().find(|p| p.cabin == cabin.code()))
            .map(|p| p.fare_family_code.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub code: String,
    pub content: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    #[serde(default)]
    pub fare_products: Vec<FareProduct>,
}

/// One fare-family descriptor from the search response meta block. The
/// cabin is kept as the raw wire code so unrecognized cabins never fail
/// the decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FareProduct {
    pub fare_family_code: String,
    pub cabin: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Monthly-calendar response
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthPricing {
    pub success: bool,
    pub trace_id: String,
    pub message: Message,
    pub data: CalendarData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarData {
    #[serde(default)]
    pub calendars: Vec<CalendarDayPrice>,
}

/// One per available-for-query day, in order. Entries are not guaranteed
/// to cover every calendar day; the grid builder consumes them in sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayPrice {
    pub departure_date: String,
    pub status: DayStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Unavailable,
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Holiday feed
// ============================================================================

/// Loosely typed government holiday feed entry: every field is optional and
/// the source mixes casings. Dates are `YYYYMMDD`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HolidayEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "isholiday", alias = "isHoliday")]
    pub is_holiday: Option<String>,
    #[serde(default, alias = "holidaycategory", alias = "holidayCategory")]
    pub holiday_category: Option<String>,
}

impl HolidayEntry {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT).ok()
    }
}
