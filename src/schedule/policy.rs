use crate::aircraft::Aircraft;
use crate::airport::AirportCode;
use crate::crew::{CabinCrew, Pilot};
use crate::data::{Fleet, Roster};
use crate::error::AllocationError;
use crate::flight::{FlightId, FlightOccurrence};
use crate::schedule::ledger::Schedule;
use crate::schedule::positions::{PositionRegistry, Resource};
use std::sync::Arc;

/// What one flight asks of the candidate pools.
#[derive(Debug, Clone)]
pub struct Demand {
    pub flight: FlightId,
    pub origin_id: AirportCode,
    pub destination_id: AirportCode,
    /// Known once an aircraft is assigned.
    pub type_code: Option<Arc<str>>,
}

impl Demand {
    pub fn for_flight(flight: &FlightOccurrence) -> Self {
        Demand {
            flight: flight.id.clone(),
            origin_id: flight.origin_id().clone(),
            destination_id: flight.destination_id().clone(),
            type_code: None,
        }
    }
}

/// One fallback level: a filter over the candidate pool. Tiers of a role are
/// tried in order and a tier only runs if the previous ones left the role open.
pub struct Tier<T> {
    pub name: &'static str,
    pub admits: fn(&T, &Demand, &PositionRegistry) -> bool,
}

fn at_origin<T: Resource>(candidate: &T, demand: &Demand, positions: &PositionRegistry) -> bool {
    positions.is_at(candidate, &demand.origin_id)
}

fn rated<T: Resource>(candidate: &T, demand: &Demand, _: &PositionRegistry) -> bool {
    demand
        .type_code
        .as_ref()
        .is_some_and(|t| candidate.is_qualified_for(t))
}

fn anyone<T>(_: &T, _: &Demand, _: &PositionRegistry) -> bool {
    true
}

fn rated_captain(pilot: &Pilot, demand: &Demand, positions: &PositionRegistry) -> bool {
    pilot.is_captain() && rated(pilot, demand, positions)
}

fn captain_at_origin(pilot: &Pilot, demand: &Demand, positions: &PositionRegistry) -> bool {
    pilot.is_captain() && at_origin(pilot, demand, positions)
}

fn any_captain(pilot: &Pilot, _: &Demand, _: &PositionRegistry) -> bool {
    pilot.is_captain()
}

pub const AIRCRAFT_TIERS: &[Tier<Aircraft>] = &[
    Tier { name: "at origin", admits: at_origin },
    Tier { name: "ferry", admits: anyone },
];

pub const CAPTAIN_TIERS: &[Tier<Pilot>] = &[
    Tier { name: "rated captain", admits: rated_captain },
    Tier { name: "captain at origin", admits: captain_at_origin },
    Tier { name: "any captain", admits: any_captain },
    Tier { name: "any pilot", admits: anyone },
];

pub const FIRST_OFFICER_TIERS: &[Tier<Pilot>] = &[
    Tier { name: "rated pilot", admits: rated },
    Tier { name: "pilot at origin", admits: at_origin },
    Tier { name: "any pilot", admits: anyone },
];

pub const CABIN_CREW_TIERS: &[Tier<CabinCrew>] = &[
    Tier { name: "rated crew", admits: rated },
    Tier { name: "crew at origin", admits: at_origin },
    Tier { name: "any crew", admits: anyone },
];

/// Walks the tiers and hands each admitted candidate to `allocate` until
/// `wanted` of them were accepted. Double-booked candidates are skipped; any
/// other ledger error aborts.
pub fn select<'c, T, F>(
    candidates: &'c [T],
    tiers: &[Tier<T>],
    demand: &Demand,
    positions: &PositionRegistry,
    wanted: usize,
    mut allocate: F,
) -> Result<Vec<&'c T>, AllocationError>
where
    T: Resource,
    F: FnMut(&T) -> Result<(), AllocationError>,
{
    let mut chosen = Vec::new();
    for tier in tiers {
        if chosen.len() >= wanted {
            break;
        }
        for candidate in candidates.iter().filter(|c| (tier.admits)(c, demand, positions)) {
            if chosen.len() >= wanted {
                break;
            }
            match allocate(candidate) {
                Ok(()) => {
                    log::debug!(
                        "{}: {} picked from tier '{}'",
                        demand.flight,
                        candidate.resource_id(),
                        tier.name
                    );
                    chosen.push(candidate);
                }
                Err(e) if e.is_double_booking() => log::debug!("{}", e),
                Err(e) => return Err(e),
            }
        }
    }
    Ok(chosen)
}

fn vacancy(filled: bool) -> usize {
    if filled { 0 } else { 1 }
}

/// Greedy first-fit allocation over a materialized schedule.
pub struct GreedyAllocator<'a> {
    fleet: &'a Fleet,
    roster: &'a Roster,
    positions: PositionRegistry,
}

impl<'a> GreedyAllocator<'a> {
    pub fn new(fleet: &'a Fleet, roster: &'a Roster) -> Self {
        GreedyAllocator {
            fleet,
            roster,
            positions: PositionRegistry::seed(fleet, roster),
        }
    }

    pub fn positions(&self) -> &PositionRegistry {
        &self.positions
    }

    /// Visits every remaining flight in schedule order. Flights that cannot be
    /// fully staffed stay remaining; only ledger misuse is an error.
    pub fn allocate(&mut self, schedule: &mut Schedule) -> Result<(), AllocationError> {
        let pending = schedule
            .remaining()
            .map(|f| f.id.clone())
            .collect::<Vec<FlightId>>();

        for flight_id in pending {
            match self.allocate_flight(schedule, &flight_id) {
                Ok(()) => {}
                Err(AllocationError::AlreadyCompleted(flight)) => {
                    log::debug!("{} already completed, skipping", flight)
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "allocation finished: {} completed, {} remaining",
            schedule.completed_count(),
            schedule.remaining_count()
        );
        Ok(())
    }

    pub fn allocate_flight(
        &mut self,
        schedule: &mut Schedule,
        flight_id: &FlightId,
    ) -> Result<(), AllocationError> {
        let flight = schedule
            .flight(flight_id)
            .ok_or_else(|| AllocationError::UnknownFlight(flight_id.clone()))?;
        let mut demand = Demand::for_flight(flight);
        let (fleet, roster) = (self.fleet, self.roster);

        let aircraft = select(
            fleet.all(),
            AIRCRAFT_TIERS,
            &demand,
            &self.positions,
            vacancy(schedule.aircraft_for(flight_id)?.is_some()),
            |a| schedule.allocate_aircraft(a, flight_id),
        )?;
        self.relocate(&aircraft, &demand);
        demand.type_code = schedule.aircraft_for(flight_id)?.map(|a| a.type_code.clone());

        let captain = select(
            roster.pilots(),
            CAPTAIN_TIERS,
            &demand,
            &self.positions,
            vacancy(schedule.captain_of(flight_id)?.is_some()),
            |p| schedule.allocate_captain(p, flight_id),
        )?;
        self.relocate(&captain, &demand);

        let first_officer = select(
            roster.pilots(),
            FIRST_OFFICER_TIERS,
            &demand,
            &self.positions,
            vacancy(schedule.first_officer_of(flight_id)?.is_some()),
            |p| schedule.allocate_first_officer(p, flight_id),
        )?;
        self.relocate(&first_officer, &demand);

        // without an aircraft there is no crew requirement to fill
        let wanted = schedule
            .aircraft_for(flight_id)?
            .map(|a| a.cabin_crew_required)
            .unwrap_or(0)
            .saturating_sub(schedule.cabin_crew_of(flight_id)?.len());
        let cabin_crew = select(
            roster.cabin_crew(),
            CABIN_CREW_TIERS,
            &demand,
            &self.positions,
            wanted,
            |c| schedule.allocate_cabin_crew(c, flight_id),
        )?;
        self.relocate(&cabin_crew, &demand);

        match schedule.complete_allocation(flight_id) {
            Ok(()) => Ok(()),
            Err(AllocationError::IncompleteAllocation { flight, missing }) => {
                log::warn!("{} stays remaining: no {} available", flight, missing);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn relocate<T: Resource>(&mut self, chosen: &[&T], demand: &Demand) {
        for resource in chosen {
            self.positions
                .move_to(resource.resource_id(), demand.destination_id.clone());
        }
    }
}
