//! Moon phase estimation
//!
//! Approximates the lunar phase of a civil date from its Julian day number and
//! the mean synodic month. The result drives the phase indicator shown in every
//! calendar day cell; it is not ephemeris accurate.

use std::fmt;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Julian day of a reference new moon (2000-01-06)
pub const REFERENCE_NEW_MOON_JD: f64 = 2451550.1;

/// Mean length of the synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Civil calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<DateTime<Utc>> for CalendarDate {
    fn from(timestamp: DateTime<Utc>) -> Self {
        timestamp.date_naive().into()
    }
}

/// Named lunar phase bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Bucket a phase value in `[0, 1)`
    pub fn from_phase(phase: f64) -> Self {
        if !(0.03..0.97).contains(&phase) {
            MoonPhase::New
        } else if phase < 0.22 {
            MoonPhase::WaxingCrescent
        } else if phase < 0.28 {
            MoonPhase::FirstQuarter
        } else if phase < 0.47 {
            MoonPhase::WaxingGibbous
        } else if phase < 0.53 {
            MoonPhase::Full
        } else if phase < 0.72 {
            MoonPhase::WaningGibbous
        } else if phase < 0.78 {
            MoonPhase::LastQuarter
        } else {
            MoonPhase::WaningCrescent
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase summary for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonInfo {
    pub phase: f64,
    pub name: MoonPhase,
    pub illumination: f64,
}

impl MoonInfo {
    pub fn percent(&self) -> u8 {
        phase_percent(self.phase)
    }

    /// Tooltip text, e.g. `Full Moon (50%)`
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.name, self.percent())
    }
}

/// Julian day number of a proleptic Gregorian date
pub fn julian_day_number(date: CalendarDate) -> i64 {
    let year = i64::from(date.year);
    let month = i64::from(date.month);
    let day = i64::from(date.day);

    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Phase in `[0, 1)`: 0 is new moon, 0.5 is full moon
pub fn moon_phase(date: impl Into<CalendarDate>) -> f64 {
    let jdn = julian_day_number(date.into()) as f64;
    let cycles = (jdn - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH_DAYS;
    let phase = cycles - cycles.floor();
    // rounding can land exactly on the upper bound
    if (0.0..1.0).contains(&phase) {
        phase
    } else {
        0.0
    }
}

/// Approximate lit fraction of the disc: 0 at new moon, 1 at full moon
pub fn illumination(phase: f64) -> f64 {
    1.0 - (0.5 - phase).abs() * 2.0
}

pub fn is_waxing(phase: f64) -> bool {
    phase < 0.5
}

pub fn phase_percent(phase: f64) -> u8 {
    (phase * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn moon_info(date: impl Into<CalendarDate>) -> MoonInfo {
    let phase = moon_phase(date);
    MoonInfo {
        phase,
        name: MoonPhase::from_phase(phase),
        illumination: illumination(phase),
    }
}
