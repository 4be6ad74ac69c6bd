//! Per-day grouping and month grid construction

use std::collections::BTreeMap;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use crate::calendar::moon::{moon_info, MoonInfo};
use crate::models::CalendarEvent;
use crate::utils::errors::Result;
use crate::utils::helpers::{each_day, end_of_day, first_of_month, is_same_month, last_of_month, start_of_day};

pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Events occupying `day`, ordered by start time
///
/// An event occupies a day when `[start, end-or-start]` overlaps the day from
/// `00:00:00` to `23:59:59.999`.
pub fn events_for_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    let (from, to) = (start_of_day(day), end_of_day(day));
    let mut matching: Vec<&CalendarEvent> = events.iter().filter(|e| e.overlaps(from, to)).collect();
    matching.sort_by_key(|e| e.start);
    matching
}

/// Bucket events by every day they occupy within `[from, to]`
///
/// Days without events have no entry.
pub fn group_by_day(
    events: &[CalendarEvent],
    from: NaiveDate,
    to: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    if from > to {
        return buckets;
    }

    for event in events {
        let first = event.start.date_naive().max(from);
        let last = event.span_end().date_naive().min(to);
        for day in each_day(first, last) {
            buckets.entry(day).or_default().push(event);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|e| e.start);
    }
    buckets
}

/// Days shown for a month: whole weeks covering the first through the last day
pub fn month_days(year: i32, month: u32, week_start: Weekday) -> Result<Vec<NaiveDate>> {
    let first = first_of_month(year, month)?.week(week_start).first_day();
    let last = last_of_month(year, month)?.week(week_start).last_day();
    Ok(each_day(first, last).collect())
}

/// Events starting inside the month, ordered by start
pub fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Result<Vec<&CalendarEvent>> {
    let from = start_of_day(first_of_month(year, month)?);
    let to = end_of_day(last_of_month(year, month)?);

    let mut matching: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.start >= from && e.start <= to)
        .collect();
    matching.sort_by_key(|e| e.start);
    Ok(matching)
}

#[derive(Debug, Clone, Copy)]
pub struct GridOptions {
    pub max_visible: usize,
    pub week_start: Weekday,
    pub today: NaiveDate,
}

impl GridOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            week_start: Weekday::Mon,
            today,
        }
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub moon: MoonInfo,
    /// Events rendered in the cell
    pub visible: Vec<CalendarEvent>,
    /// Count behind the "+N more" badge
    pub overflow: usize,
}

impl DayCell {
    pub fn new(date: NaiveDate, events: &[&CalendarEvent], max_visible: usize) -> Self {
        let visible: Vec<CalendarEvent> = events.iter().take(max_visible).map(|e| (*e).clone()).collect();
        let overflow = events.len() - visible.len();
        Self {
            date,
            in_month: true,
            is_today: false,
            moon: moon_info(date),
            visible,
            overflow,
        }
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow
    }

    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, events: &[CalendarEvent], options: GridOptions) -> Result<Self> {
        let days = month_days(year, month, options.week_start)?;
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return Ok(Self { year, month, weeks: Vec::new() });
        };
        let buckets = group_by_day(events, first, last);

        let cells: Vec<DayCell> = days
            .into_iter()
            .map(|date| {
                let day_events = buckets.get(&date).map(Vec::as_slice).unwrap_or(&[]);
                let mut cell = DayCell::new(date, day_events, options.max_visible);
                cell.in_month = is_same_month(date, year, month);
                cell.is_today = date == options.today;
                cell
            })
            .collect();

        let weeks = cells.chunks(7).map(<[DayCell]>::to_vec).collect();
        Ok(Self { year, month, weeks })
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}
