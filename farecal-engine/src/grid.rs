use std::collections::HashMap;

use chrono::{Datelike, Weekday};
use farecal_client::{CalendarDayPrice, DayStatus, HolidayEntry};
use farecal_shared::{Price, RouteQuery, YearMonth};
use serde::Serialize;
use uuid::Uuid;

use crate::calmath;

/// Price tier of a day cell relative to the month's bounds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Max,
    Min,
    Neutral,
    Blank,
}

/// One rendered unit of the month calendar: a leading padding cell or a
/// day cell carrying price and holiday annotations. Cells are immutable
/// once built; `id` is opaque and excluded from semantic comparisons.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GridCell {
    pub id: Uuid,
    pub day_label: String,
    pub status: Option<DayStatus>,
    pub price: Option<Price>,
    pub color_tier: ColorTier,
    pub is_holiday: bool,
}

impl GridCell {
    fn padding() -> Self {
        Self {
            id: Uuid::new_v4(),
            day_label: String::new(),
            status: None,
            price: None,
            color_tier: ColorTier::Blank,
            is_holiday: false,
        }
    }

    fn day(
        day: u32,
        entry: Option<&CalendarDayPrice>,
        tier: ColorTier,
        is_holiday: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            day_label: day.to_string(),
            status: entry.map(|e| e.status),
            price: entry.and_then(|e| e.price.clone()),
            color_tier: tier,
            is_holiday,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.day_label.is_empty()
    }
}

/// The built month: row-major cells, 7 columns, plus the rotated weekday
/// header.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthGrid {
    pub cells: Vec<GridCell>,
    pub weekday_labels: [Weekday; 7],
}

/// Max/min fare over the priced days of a month. Unpriced entries are
/// ignored; both bounds are `None` when no day carries a price.
pub fn price_bounds(days: &[CalendarDayPrice]) -> (Option<i32>, Option<i32>) {
    let amounts = days.iter().filter_map(|d| d.price.as_ref().map(|p| p.amount));
    (amounts.clone().max(), amounts.min())
}

/// Build the month grid from the joined pricing and holiday payloads.
///
/// Pricing entries are consumed in order, one per real day-of-month
/// starting from day 1; they are not assumed to cover the whole month.
/// The walk runs to `weeks * 7 + 1`: the extra slot keeps a month whose
/// last day lands on the final grid column from being dropped.
pub fn build_grid(
    query: &RouteQuery,
    pricing: &[CalendarDayPrice],
    holidays: &[HolidayEntry],
    max_price: Option<i32>,
    min_price: Option<i32>,
    week_start: Weekday,
) -> MonthGrid {
    let first = query.departure.first_day();
    let days_in_month = calmath::days_in_month(first);
    let offset = calmath::weekday_offset(first, week_start);
    let weeks = calmath::weeks_in_month(first, week_start);
    let holiday_days = holiday_lookup(query.departure, holidays);

    let mut entries = pricing.iter();
    let mut cells = Vec::with_capacity((weeks * 7 + 1) as usize);

    for counter in 1..=weeks * 7 + 1 {
        if counter <= offset {
            cells.push(GridCell::padding());
            continue;
        }

        let day = counter - offset;
        if day > days_in_month {
            continue;
        }

        let entry = entries.next();
        let tier = match entry.and_then(|e| e.price.as_ref()) {
            Some(price) if Some(price.amount) == max_price => ColorTier::Max,
            Some(price) if Some(price.amount) == min_price => ColorTier::Min,
            _ => ColorTier::Neutral,
        };
        cells.push(GridCell::day(day, entry, tier, holiday_days.contains_key(&day)));
    }

    MonthGrid {
        cells,
        weekday_labels: calmath::weekday_labels(week_start),
    }
}

/// Day-of-month index of the holiday entries falling in the query month.
/// Later duplicates for the same day overwrite earlier ones.
fn holiday_lookup(month: YearMonth, holidays: &[HolidayEntry]) -> HashMap<u32, HolidayEntry> {
    let mut by_day = HashMap::new();
    for entry in holidays {
        if let Some(date) = entry.parsed_date() {
            if month.contains(date) {
                by_day.insert(date.day(), entry.clone());
            }
        }
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use farecal_shared::{Airport, CabinClass};

    fn airport(code: &str) -> Airport {
        Airport {
            region: "Asia".to_string(),
            location: code.to_string(),
            name: format!("{code} International Airport"),
            code: code.to_string(),
            disabled: false,
        }
    }

    fn query(year: i32, month: u32) -> RouteQuery {
        RouteQuery {
            departure: YearMonth::new(year, month).unwrap(),
            cabin: CabinClass::Business,
            from: airport("TPE"),
            to: airport("NRT"),
        }
    }

    fn priced_day(day: u32, amount: i32) -> CalendarDayPrice {
        CalendarDayPrice {
            departure_date: format!("202511{day:02}"),
            status: DayStatus::Available,
            reason: None,
            price: Some(Price {
                amount,
                currency_code: "TWD".to_string(),
            }),
        }
    }

    fn holiday(date: &str) -> HolidayEntry {
        HolidayEntry {
            date: Some(date.to_string()),
            year: Some(date[..4].to_string()),
            name: Some("holiday".to_string()),
            is_holiday: Some("true".to_string()),
            holiday_category: Some("public".to_string()),
        }
    }

    /// Comparable view of a cell without its opaque id.
    fn semantic(cell: &GridCell) -> (String, Option<DayStatus>, Option<Price>, ColorTier, bool) {
        (
            cell.day_label.clone(),
            cell.status,
            cell.price.clone(),
            cell.color_tier,
            cell.is_holiday,
        )
    }

    #[test]
    fn test_november_2025_layout() {
        // November 2025 starts on a Saturday: offset 6, 30 days, 5 weeks.
        let grid = build_grid(&query(2025, 11), &[], &[], None, None, Weekday::Mon);

        assert_eq!(grid.cells.len(), 36);
        assert!(grid.cells[..6].iter().all(GridCell::is_padding));
        assert_eq!(grid.cells[6].day_label, "1");
        assert_eq!(grid.cells.last().unwrap().day_label, "30");
        assert_eq!(grid.weekday_labels[0], Weekday::Mon);
        assert_eq!(grid.weekday_labels[6], Weekday::Sun);
    }

    #[test]
    fn test_price_tiers_in_order() {
        let pricing: Vec<_> = [100, 200, 100, 300, 150]
            .iter()
            .enumerate()
            .map(|(i, &amount)| priced_day(i as u32 + 1, amount))
            .collect();
        let (max, min) = price_bounds(&pricing);
        assert_eq!((max, min), (Some(300), Some(100)));

        let grid = build_grid(&query(2025, 11), &pricing, &[], max, min, Weekday::Mon);
        let tiers: Vec<_> = grid
            .cells
            .iter()
            .filter(|c| !c.is_padding() && c.price.is_some())
            .map(|c| c.color_tier)
            .collect();

        assert_eq!(
            tiers,
            vec![
                ColorTier::Min,
                ColorTier::Neutral,
                ColorTier::Min,
                ColorTier::Max,
                ColorTier::Neutral,
            ]
        );
    }

    #[test]
    fn test_all_prices_equal_are_max_tier() {
        // The max check runs before the min check, so a flat month is all max.
        let pricing = vec![priced_day(1, 500), priced_day(2, 500)];
        let (max, min) = price_bounds(&pricing);
        assert_eq!((max, min), (Some(500), Some(500)));

        let grid = build_grid(&query(2025, 11), &pricing, &[], max, min, Weekday::Mon);
        let priced: Vec<_> = grid.cells.iter().filter(|c| c.price.is_some()).collect();
        assert_eq!(priced.len(), 2);
        assert!(priced.iter().all(|c| c.color_tier == ColorTier::Max));
    }

    #[test]
    fn test_no_priced_days_are_neutral() {
        let pricing = vec![CalendarDayPrice {
            departure_date: "20251101".to_string(),
            status: DayStatus::Unavailable,
            reason: Some("soldout".to_string()),
            price: None,
        }];
        let grid = build_grid(&query(2025, 11), &pricing, &[], None, None, Weekday::Mon);

        let day_cells: Vec<_> = grid.cells.iter().filter(|c| !c.is_padding()).collect();
        assert!(day_cells.iter().all(|c| c.color_tier == ColorTier::Neutral));
        assert_eq!(day_cells[0].status, Some(DayStatus::Unavailable));
    }

    #[test]
    fn test_fewer_entries_than_days_leaves_trailing_days_priceless() {
        let pricing = vec![priced_day(1, 100), priced_day(2, 200)];
        let (max, min) = price_bounds(&pricing);
        let grid = build_grid(&query(2025, 11), &pricing, &[], max, min, Weekday::Mon);

        let day_cells: Vec<_> = grid.cells.iter().filter(|c| !c.is_padding()).collect();
        assert_eq!(day_cells.len(), 30);
        assert!(day_cells[0].price.is_some());
        assert!(day_cells[1].price.is_some());
        assert!(day_cells[2..].iter().all(|c| c.price.is_none()));
        assert!(day_cells[2..].iter().all(|c| c.status.is_none()));
    }

    #[test]
    fn test_holiday_flags_only_matching_month_days() {
        let holidays = vec![
            holiday("20251101"),
            holiday("20251225"),
            holiday("20241101"), // wrong year
            holiday("20251001"), // wrong month
            HolidayEntry::default(), // unparseable
        ];
        let grid = build_grid(&query(2025, 11), &[], &holidays, None, None, Weekday::Mon);

        let flagged: Vec<_> = grid
            .cells
            .iter()
            .filter(|c| c.is_holiday)
            .map(|c| c.day_label.clone())
            .collect();
        assert_eq!(flagged, vec!["1", "25"]);
    }

    #[test]
    fn test_duplicate_holiday_entries_overwrite() {
        let mut second = holiday("20251101");
        second.name = Some("later entry".to_string());
        let by_day = holiday_lookup(
            YearMonth::new(2025, 11).unwrap(),
            &[holiday("20251101"), second],
        );
        assert_eq!(by_day.len(), 1);
        assert_eq!(by_day[&1].name.as_deref(), Some("later entry"));
    }

    #[test]
    fn test_build_is_deterministic_modulo_ids() {
        let pricing = vec![priced_day(1, 100), priced_day(2, 300)];
        let holidays = vec![holiday("20251102")];
        let (max, min) = price_bounds(&pricing);

        let a = build_grid(&query(2025, 11), &pricing, &holidays, max, min, Weekday::Mon);
        let b = build_grid(&query(2025, 11), &pricing, &holidays, max, min, Weekday::Mon);

        let a: Vec<_> = a.cells.iter().map(semantic).collect();
        let b: Vec<_> = b.cells.iter().map(semantic).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_month_fits_its_grid() {
        for year in 2024..=2026 {
            for month in 1..=12 {
                let q = query(year, month);
                let grid = build_grid(&q, &[], &[], None, None, Weekday::Mon);
                let days = calmath::days_in_month(q.departure.first_day());
                let day_cells = grid.cells.iter().filter(|c| !c.is_padding()).count();
                assert_eq!(day_cells as u32, days, "{year}-{month} dropped days");
                assert_eq!(
                    grid.cells.last().unwrap().day_label,
                    days.to_string(),
                    "{year}-{month} last day missing"
                );
            }
        }
    }
}
