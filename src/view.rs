//! Table rows for the interactive inspector.

use crate::crew::{CabinCrew, CrewId, Pilot};
use crate::data::Roster;
use crate::error::AllocationError;
use crate::flight::{AllocationStatus, FlightId, FlightOccurrence};
use crate::route::RouteDefinition;
use crate::schedule::Schedule;
use crate::time::day_code;
use colored::Colorize;
use tabled::Tabled;

/// Which part of the schedule `ls` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Remaining,
    Completed,
    All,
}

impl Listing {
    pub fn parse(arg: Option<&str>) -> Option<Listing> {
        match arg.unwrap_or("a") {
            "r" | "remaining" => Some(Listing::Remaining),
            "c" | "completed" => Some(Listing::Completed),
            "a" | "all" => Some(Listing::All),
            _ => None,
        }
    }

    fn admits(&self, status: AllocationStatus) -> bool {
        match self {
            Listing::Remaining => !status.is_completed(),
            Listing::Completed => status.is_completed(),
            Listing::All => true,
        }
    }
}

fn colored_status(status: AllocationStatus) -> String {
    match status {
        AllocationStatus::Completed => status.to_string().green().to_string(),
        AllocationStatus::Remaining => status.to_string().yellow().to_string(),
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Tabled)]
pub struct FlightRow {
    #[tabled(rename = "Flight")]
    pub flight: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Route")]
    pub route: String,
    #[tabled(rename = "Departs")]
    pub departs: String,
    #[tabled(rename = "Arrives")]
    pub arrives: String,
    #[tabled(rename = "Aircraft")]
    pub aircraft: String,
    #[tabled(rename = "Captain")]
    pub captain: String,
    #[tabled(rename = "First Officer")]
    pub first_officer: String,
    #[tabled(rename = "Cabin")]
    pub cabin_crew: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl FlightRow {
    pub fn new(schedule: &Schedule, flight: &FlightOccurrence) -> Result<Self, AllocationError> {
        let aircraft = schedule.aircraft_for(&flight.id)?;
        let required = aircraft.map_or(0, |a| a.cabin_crew_required);
        let crew_id = |id: Option<CrewId>| or_dash(id.map(|id| format!("#{}", id)));

        Ok(FlightRow {
            flight: flight.id.flight_number.to_string(),
            date: flight.date().to_string(),
            route: format!("{} → {}", flight.origin_id(), flight.destination_id()),
            departs: flight.departure().format("%H:%M").to_string(),
            arrives: flight.arrival().format("%d %H:%M").to_string(),
            aircraft: or_dash(aircraft.map(|a| a.id.to_string())),
            captain: crew_id(schedule.captain_of(&flight.id)?),
            first_officer: crew_id(schedule.first_officer_of(&flight.id)?),
            cabin_crew: format!("{}/{}", schedule.cabin_crew_of(&flight.id)?.len(), required),
            status: colored_status(schedule.status_of(&flight.id)?),
        })
    }
}

pub fn flight_rows(schedule: &Schedule, listing: Listing) -> Result<Vec<FlightRow>, AllocationError> {
    let mut rows = Vec::new();
    for flight in schedule.flights() {
        if listing.admits(schedule.status_of(&flight.id)?) {
            rows.push(FlightRow::new(schedule, flight)?);
        }
    }
    Ok(rows)
}

/// One assigned role of a single flight, as printed by `show`.
#[derive(Debug, Tabled)]
pub struct AssignmentRow {
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Assigned")]
    pub assigned: String,
    #[tabled(rename = "Details")]
    pub details: String,
}

impl AssignmentRow {
    fn crew(role: &str, id: Option<CrewId>, roster: &Roster) -> Self {
        AssignmentRow {
            role: role.to_string(),
            assigned: or_dash(id.map(|id| format!("#{}", id))),
            details: or_dash(id.and_then(|id| roster.name_of(id))),
        }
    }
}

pub fn assignment_rows(
    schedule: &Schedule,
    roster: &Roster,
    flight: &FlightId,
) -> Result<Vec<AssignmentRow>, AllocationError> {
    let aircraft = schedule.aircraft_for(flight)?;
    let mut rows = vec![
        AssignmentRow {
            role: "Aircraft".to_string(),
            assigned: or_dash(aircraft.map(|a| a.id.to_string())),
            details: or_dash(aircraft.map(|a| a.description())),
        },
        AssignmentRow::crew("Captain", schedule.captain_of(flight)?, roster),
        AssignmentRow::crew("First Officer", schedule.first_officer_of(flight)?, roster),
    ];
    rows.extend(
        schedule
            .cabin_crew_of(flight)?
            .iter()
            .map(|id| AssignmentRow::crew("Cabin Crew", Some(*id), roster)),
    );
    Ok(rows)
}

#[derive(Debug, Tabled)]
pub struct RouteRow {
    #[tabled(rename = "Flight")]
    pub flight: String,
    #[tabled(rename = "Day")]
    pub day: String,
    #[tabled(rename = "From")]
    pub origin: String,
    #[tabled(rename = "To")]
    pub destination: String,
    #[tabled(rename = "Departs")]
    pub departs: String,
    #[tabled(rename = "Arrives")]
    pub arrives: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
}

impl From<&RouteDefinition> for RouteRow {
    fn from(route: &RouteDefinition) -> Self {
        RouteRow {
            flight: route.flight_number.to_string(),
            day: day_code(route.day_of_week).to_string(),
            origin: format!("{} ({})", route.origin.code, route.origin.name),
            destination: format!("{} ({})", route.destination.code, route.destination.name),
            departs: route.departure_time.format("%H:%M").to_string(),
            arrives: route.arrival_time.format("%H:%M").to_string(),
            duration: format!(
                "{}h{:02}m",
                route.duration.num_hours(),
                route.duration.num_minutes() % 60
            ),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct CrewRow {
    #[tabled(rename = "Id")]
    pub id: CrewId,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Base")]
    pub base: String,
    #[tabled(rename = "Ratings")]
    pub ratings: String,
}

impl From<&Pilot> for CrewRow {
    fn from(pilot: &Pilot) -> Self {
        CrewRow {
            id: pilot.id,
            name: pilot.name(),
            role: pilot.rank.to_string(),
            base: pilot.home_base.to_string(),
            ratings: ratings(pilot.type_ratings.iter()),
        }
    }
}

impl From<&CabinCrew> for CrewRow {
    fn from(crew: &CabinCrew) -> Self {
        CrewRow {
            id: crew.id,
            name: crew.name(),
            role: "Cabin Crew".to_string(),
            base: crew.home_base.to_string(),
            ratings: ratings(crew.type_ratings.iter()),
        }
    }
}

fn ratings<'a>(types: impl Iterator<Item = &'a std::sync::Arc<str>>) -> String {
    types.map(|t| t.as_ref()).collect::<Vec<_>>().join(", ")
}
