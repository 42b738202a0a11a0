use crate::airport::Airport;
use crate::time::day_code;
use chrono::{NaiveTime, TimeDelta, Weekday};
use std::fmt;

pub type FlightNumber = u32;

/// A weekly-recurring timetable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    pub flight_number: FlightNumber,
    pub day_of_week: Weekday,
    pub origin: Airport,
    pub destination: Airport,
    /// Local times as published. The arrival instant of an occurrence is derived
    /// from departure + duration, never from `arrival_time`.
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration: TimeDelta,
}

impl RouteDefinition {
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.day_of_week == day
    }

    pub fn departs_from(&self, airport: &str) -> bool {
        *self.origin.code == *airport
    }
}

impl fmt::Display for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{} {}-{}",
            self.flight_number,
            day_code(self.day_of_week),
            self.origin.code,
            self.destination.code,
            self.departure_time.format("%H:%M"),
            self.arrival_time.format("%H:%M"),
        )
    }
}
