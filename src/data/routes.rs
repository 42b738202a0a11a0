use crate::airport::Airport;
use crate::error::DataLoadingError;
use crate::route::{FlightNumber, RouteDefinition};
use crate::time::{parse_day_code, parse_iso_duration};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta, Weekday};
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::sync::Arc;

#[derive(Deserialize)]
struct RawRoutes {
    #[serde(rename = "Route", default)]
    routes: Vec<RawRoute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRoute {
    flight_number: FlightNumber,
    day_of_week: String,
    departure_time: String,
    departure_airport: String,
    #[serde(rename = "DepartureAirportIATACode")]
    departure_airport_code: String,
    arrival_time: String,
    arrival_airport: String,
    #[serde(rename = "ArrivalAirportIATACode")]
    arrival_airport_code: String,
    duration: String,
}

/// Longest block time accepted for a single leg.
const MAX_DURATION_HOURS: i64 = 48;

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, DataLoadingError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| DataLoadingError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

impl TryFrom<RawRoute> for RouteDefinition {
    type Error = DataLoadingError;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        let day_of_week =
            parse_day_code(&raw.day_of_week).ok_or_else(|| DataLoadingError::InvalidValue {
                field: "DayOfWeek",
                value: raw.day_of_week.clone(),
            })?;
        let duration = parse_iso_duration(&raw.duration)
            .filter(|d| *d > TimeDelta::zero() && *d <= TimeDelta::hours(MAX_DURATION_HOURS))
            .ok_or_else(|| DataLoadingError::InvalidValue {
                field: "Duration",
                value: raw.duration.clone(),
            })?;
        Ok(RouteDefinition {
            flight_number: raw.flight_number,
            day_of_week,
            origin: Airport::new(raw.departure_airport_code.trim(), raw.departure_airport.trim()),
            destination: Airport::new(raw.arrival_airport_code.trim(), raw.arrival_airport.trim()),
            departure_time: parse_time("DepartureTime", &raw.departure_time)?,
            arrival_time: parse_time("ArrivalTime", &raw.arrival_time)?,
            duration,
        })
    }
}

/// Weekly timetable, loaded from XML of the form `<Routes><Route>...</Route></Routes>`.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    routes: Vec<Arc<RouteDefinition>>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        RouteCatalog {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<usize, DataLoadingError> {
        let file = std::fs::File::open(path)?;
        let added = self.load_from_reader(io::BufReader::new(file))?;
        log::info!("loaded {} routes from {}", added, path.display());
        Ok(added)
    }

    pub fn load_from_reader<R: io::BufRead>(&mut self, reader: R) -> Result<usize, DataLoadingError> {
        let raw: RawRoutes = quick_xml::de::from_reader(reader)?;
        let routes = raw
            .routes
            .into_iter()
            .map(RouteDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let added = routes.len();
        self.routes.extend(routes.into_iter().map(Arc::new));
        Ok(added)
    }

    pub fn all(&self) -> &[Arc<RouteDefinition>] {
        &self.routes
    }

    /// `None` if `day` is not a recognisable day code.
    pub fn on_day(&self, day: &str) -> Option<Vec<&RouteDefinition>> {
        let day = parse_day_code(day)?;
        Some(self.filter(|r| r.runs_on(day)))
    }

    pub fn departing_on_day(&self, airport: &str, day: &str) -> Option<Vec<&RouteDefinition>> {
        let day = parse_day_code(day)?;
        Some(self.filter(|r| r.runs_on(day) && r.departs_from(airport)))
    }

    pub fn departing(&self, airport: &str) -> Vec<&RouteDefinition> {
        self.filter(|r| r.departs_from(airport))
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&RouteDefinition> {
        let day: Weekday = date.weekday();
        self.filter(|r| r.runs_on(day))
    }

    fn filter(&self, predicate: impl Fn(&RouteDefinition) -> bool) -> Vec<&RouteDefinition> {
        self.routes
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| predicate(r))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn reset(&mut self) {
        self.routes.clear();
    }
}
