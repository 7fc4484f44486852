use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Airport, CabinClass};

/// A calendar month, the granularity at which fares are queried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// First day of the month. Construction validates the pair, so this
    /// cannot fail afterwards.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("YearMonth is validated at construction")
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s}"))?;
        let year: i32 = year.parse().map_err(|_| format!("bad year in {s}"))?;
        let month: u32 = month.parse().map_err(|_| format!("bad month in {s}"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("invalid month: {s}"))
    }
}

/// A fare amount in the service's minor currency unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: i32,
    pub currency_code: String,
}

/// Immutable input to one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteQuery {
    pub departure: YearMonth,
    pub cabin: CabinClass,
    pub from: Airport,
    pub to: Airport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2025-11".parse().expect("valid");
        assert_eq!(ym, YearMonth { year: 2025, month: 11 });
        assert_eq!(ym.to_string(), "2025-11");
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("202511".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_contains_checks_year_and_month() {
        let ym = YearMonth::new(2025, 11).expect("valid");
        assert!(ym.contains(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()));
    }

    #[test]
    fn test_first_day() {
        let ym = YearMonth::new(2024, 2).expect("valid");
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
