use crate::airport::AirportCode;
use crate::route::{FlightNumber, RouteDefinition};
use crate::time::Interval;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId {
    pub flight_number: FlightNumber,
    pub date: NaiveDate,
}

impl FlightId {
    pub fn new(flight_number: FlightNumber, date: NaiveDate) -> Self {
        FlightId { flight_number, date }
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.flight_number, self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationStatus {
    Remaining,
    Completed,
}

impl AllocationStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, AllocationStatus::Completed)
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStatus::Remaining => write!(f, "Remaining"),
            AllocationStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A route bound to one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOccurrence {
    pub id: FlightId,
    pub route: Arc<RouteDefinition>,
    pub interval: Interval,
}

impl FlightOccurrence {
    pub fn new(route: Arc<RouteDefinition>, date: NaiveDate) -> Self {
        let departure = date.and_time(route.departure_time);
        // may cross midnight; saturates at the end of the calendar
        let arrival = departure
            .checked_add_signed(route.duration)
            .unwrap_or(NaiveDateTime::MAX);
        FlightOccurrence {
            id: FlightId::new(route.flight_number, date),
            interval: Interval::new(departure, arrival),
            route,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.id.date
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.interval.from
    }

    pub fn arrival(&self) -> NaiveDateTime {
        self.interval.to
    }

    pub fn origin_id(&self) -> &AirportCode {
        &self.route.origin.code
    }

    pub fn destination_id(&self) -> &AirportCode {
        &self.route.destination.code
    }
}
