use chrono::{NaiveDateTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open occupancy window `[from, to)` of a resource.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
pub struct Interval {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Interval {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Interval { from, to }
    }

    /// Back-to-back windows (one ends exactly when the other starts) do not overlap.
    /// Windows starting at the same instant always do, even when empty.
    pub fn is_overlapping(&self, other: &Interval) -> bool {
        self.from == other.from || (self.from < other.to && self.to > other.from)
    }

    pub fn duration(&self) -> TimeDelta {
        self.to - self.from
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from.date() == self.to.date() {
            write!(f, "{} {}-{}", self.from.date(), self.from.format("%H:%M"), self.to.format("%H:%M"))
        } else {
            write!(f, "{} - {}", self.from.format("%Y-%m-%d %H:%M"), self.to.format("%Y-%m-%d %H:%M"))
        }
    }
}

/// Three-letter timetable code, e.g. `Tue`.
pub fn day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Accepts `Tue`, `TUE`, `tue` and full names such as `Tuesday`.
pub fn parse_day_code(code: &str) -> Option<Weekday> {
    code.trim().parse::<Weekday>().ok()
}

/// Parses the time-based subset of ISO-8601 durations used by timetables
/// (`PT1H30M`, `PT45M`, `P1DT2H`, `PT90S`).
pub fn parse_iso_duration(text: &str) -> Option<TimeDelta> {
    let rest = text.trim().strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }
    let (days, time) = match rest.split_once('T') {
        Some((days, time)) => (days, Some(time)),
        None => (rest, None),
    };

    let mut total = TimeDelta::zero();
    if !days.is_empty() {
        let count = days.strip_suffix('D')?.parse::<i64>().ok()?;
        total = total.checked_add(&TimeDelta::try_days(count)?)?;
    }

    if let Some(time) = time {
        if time.is_empty() {
            return None;
        }
        let mut digits = String::new();
        for c in time.chars() {
            match c {
                '0'..='9' => digits.push(c),
                'H' | 'M' | 'S' => {
                    let value = digits.parse::<i64>().ok()?;
                    digits.clear();
                    let part = match c {
                        'H' => TimeDelta::try_hours(value)?,
                        'M' => TimeDelta::try_minutes(value)?,
                        _ => TimeDelta::try_seconds(value)?,
                    };
                    total = total.checked_add(&part)?;
                }
                _ => return None,
            }
        }
        if !digits.is_empty() {
            return None;
        }
    }
    Some(total)
}
