use crate::aircraft::Aircraft;
use crate::airport::Airport;
use crate::crew::{CabinCrew, CrewId, CrewMember, Pilot, Rank};
use crate::data::{Fleet, Roster, RouteCatalog};
use crate::flight::{FlightId, FlightOccurrence};
use crate::route::RouteDefinition;
use crate::time::parse_day_code;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

/// 2024-01-01 is a Monday.
pub fn date(day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day_of_month).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn add_aircraft(
    aircraft: &mut Vec<Aircraft>,
    tail: &str,
    type_code: &str,
    cabin_crew_required: usize,
    initial_location_id: &str,
) {
    aircraft.push(Aircraft {
        id: id(tail),
        type_code: id(type_code),
        manufacturer: "Airbus".to_string(),
        model: type_code.to_string(),
        seats: 180,
        cabin_crew_required,
        initial_location_id: id(initial_location_id),
    });
}

fn member(crew_id: CrewId, home_base: &str, type_ratings: &[&str]) -> CrewMember {
    CrewMember {
        id: crew_id,
        forename: "Crew".to_string(),
        surname: format!("#{}", crew_id),
        home_base: id(home_base),
        type_ratings: type_ratings.iter().map(|t| id(t)).collect(),
    }
}

pub fn add_pilot(
    pilots: &mut Vec<Pilot>,
    crew_id: CrewId,
    rank: Rank,
    home_base: &str,
    type_ratings: &[&str],
) {
    pilots.push(Pilot {
        member: member(crew_id, home_base, type_ratings),
        rank,
    });
}

pub fn add_cabin_crew(
    cabin_crew: &mut Vec<CabinCrew>,
    crew_id: CrewId,
    home_base: &str,
    type_ratings: &[&str],
) {
    cabin_crew.push(CabinCrew {
        member: member(crew_id, home_base, type_ratings),
    });
}

/// `duration` is in minutes; the published arrival time is derived from it.
pub fn add_route(
    routes: &mut Vec<RouteDefinition>,
    flight_number: u32,
    day: &str,
    origin_id: &str,
    destination_id: &str,
    departure_time: NaiveTime,
    duration: i64,
) {
    let duration = TimeDelta::minutes(duration);
    routes.push(RouteDefinition {
        flight_number,
        day_of_week: parse_day_code(day).unwrap(),
        origin: Airport::new(origin_id, origin_id),
        destination: Airport::new(destination_id, destination_id),
        departure_time,
        arrival_time: departure_time + duration,
        duration,
    });
}

pub fn occurrence(route: &RouteDefinition, date: NaiveDate) -> FlightOccurrence {
    FlightOccurrence::new(Arc::new(route.clone()), date)
}

pub fn flight_id(flight_number: u32, date: NaiveDate) -> FlightId {
    FlightId::new(flight_number, date)
}

pub fn pools(
    aircraft: Vec<Aircraft>,
    pilots: Vec<Pilot>,
    cabin_crew: Vec<CabinCrew>,
    routes: Vec<RouteDefinition>,
) -> (Fleet, Roster, RouteCatalog) {
    (
        Fleet::new(aircraft),
        Roster::new(pilots, cabin_crew),
        RouteCatalog::new(routes),
    )
}

pub fn arb_airport() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("MAN"), Just("LHR"), Just("EDI")]
}

pub fn arb_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("A320"), Just("E190")]
}

pub fn arb_day() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Mon"), Just("Tue"), Just("Wed")]
}
