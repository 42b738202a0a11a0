use crate::aircraft::{Aircraft, AircraftId};
use crate::crew::{CabinCrew, CrewId, Pilot};
use crate::error::AllocationError;
use crate::flight::{AllocationStatus, FlightId, FlightOccurrence};
use crate::time::Interval;
use std::collections::HashMap;
use std::fmt;

/// Anything that can be committed to a flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceId {
    Aircraft(AircraftId),
    Crew(CrewId),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Aircraft(id) => write!(f, "aircraft {}", id),
            ResourceId::Crew(id) => write!(f, "crew #{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Aircraft,
    Captain,
    FirstOfficer,
    CabinCrew,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Aircraft => write!(f, "aircraft"),
            Role::Captain => write!(f, "captain"),
            Role::FirstOfficer => write!(f, "first officer"),
            Role::CabinCrew => write!(f, "cabin crew"),
        }
    }
}

/// One entry of a resource's timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    pub flight: FlightId,
    pub interval: Interval,
}

#[derive(Debug, Clone, Default)]
struct Allocation {
    aircraft: Option<Aircraft>,
    captain: Option<CrewId>,
    first_officer: Option<CrewId>,
    cabin_crew: Vec<CrewId>,
    completed: bool,
}

/// The allocation ledger: per-flight role assignments plus per-resource
/// timelines. Every flight starts out remaining and only moves to completed
/// through [`Schedule::complete_allocation`].
#[derive(Debug, Clone)]
pub struct Schedule {
    flights: Vec<FlightOccurrence>,
    flights_index: HashMap<FlightId, usize>,
    allocations: Vec<Allocation>,
    /// Ordered by departure, never overlapping.
    timelines: HashMap<ResourceId, Vec<Commitment>>,
}

impl Schedule {
    /// `flights` keep the order they are given in; allocation follows it.
    /// Only the first occurrence of a flight id is kept, so a timetable
    /// loaded twice yields each flight once.
    pub fn new(flights: Vec<FlightOccurrence>) -> Schedule {
        let mut flights_index = HashMap::with_capacity(flights.len());
        let mut unique = Vec::with_capacity(flights.len());
        for flight in flights {
            if flights_index.contains_key(&flight.id) {
                log::warn!("dropping duplicate flight {} ({})", flight.id, flight.route);
                continue;
            }
            flights_index.insert(flight.id.clone(), unique.len());
            unique.push(flight);
        }
        let flights = unique;
        let allocations = vec![Allocation::default(); flights.len()];
        Schedule {
            flights,
            flights_index,
            allocations,
            timelines: HashMap::new(),
        }
    }

    fn index_of(&self, flight: &FlightId) -> Result<usize, AllocationError> {
        self.flights_index
            .get(flight)
            .copied()
            .ok_or_else(|| AllocationError::UnknownFlight(flight.clone()))
    }

    /// Index of a flight that can still take allocations.
    fn open_index(&self, flight: &FlightId) -> Result<usize, AllocationError> {
        let idx = self.index_of(flight)?;
        if self.allocations[idx].completed {
            return Err(AllocationError::AlreadyCompleted(flight.clone()));
        }
        Ok(idx)
    }

    fn ensure_vacant(&self, idx: usize, role: Role) -> Result<(), AllocationError> {
        let allocation = &self.allocations[idx];
        let filled = match role {
            Role::Aircraft => allocation.aircraft.is_some(),
            Role::Captain => allocation.captain.is_some(),
            Role::FirstOfficer => allocation.first_officer.is_some(),
            Role::CabinCrew => false,
        };
        if filled {
            return Err(AllocationError::RoleAlreadyFilled {
                flight: self.flights[idx].id.clone(),
                role,
            });
        }
        Ok(())
    }

    fn find_conflict(&self, resource: &ResourceId, idx: usize) -> Option<&Commitment> {
        let flight = &self.flights[idx];
        self.timelines.get(resource).and_then(|timeline| {
            timeline
                .iter()
                .find(|c| c.flight == flight.id || c.interval.is_overlapping(&flight.interval))
        })
    }

    /// Adds the flight to the resource's timeline unless it clashes with an existing commitment.
    fn commit(&mut self, resource: ResourceId, idx: usize) -> Result<(), AllocationError> {
        if let Some(conflict) = self.find_conflict(&resource, idx) {
            return Err(AllocationError::DoubleBooked {
                resource,
                flight: self.flights[idx].id.clone(),
                conflicting: conflict.flight.clone(),
            });
        }

        let flight = &self.flights[idx];
        let timeline = self.timelines.entry(resource).or_default();
        let pos = timeline.partition_point(|c| c.interval.from <= flight.interval.from);
        timeline.insert(
            pos,
            Commitment {
                flight: flight.id.clone(),
                interval: flight.interval,
            },
        );
        Ok(())
    }

    pub fn allocate_aircraft(
        &mut self,
        aircraft: &Aircraft,
        flight: &FlightId,
    ) -> Result<(), AllocationError> {
        let idx = self.open_index(flight)?;
        self.ensure_vacant(idx, Role::Aircraft)?;
        self.commit(ResourceId::Aircraft(aircraft.id.clone()), idx)?;
        self.allocations[idx].aircraft = Some(aircraft.clone());
        Ok(())
    }

    /// Only the timeline is checked here; rank and type rating are up to the caller.
    pub fn allocate_captain(&mut self, pilot: &Pilot, flight: &FlightId) -> Result<(), AllocationError> {
        let idx = self.open_index(flight)?;
        self.ensure_vacant(idx, Role::Captain)?;
        self.commit(ResourceId::Crew(pilot.id), idx)?;
        self.allocations[idx].captain = Some(pilot.id);
        Ok(())
    }

    pub fn allocate_first_officer(
        &mut self,
        pilot: &Pilot,
        flight: &FlightId,
    ) -> Result<(), AllocationError> {
        let idx = self.open_index(flight)?;
        self.ensure_vacant(idx, Role::FirstOfficer)?;
        self.commit(ResourceId::Crew(pilot.id), idx)?;
        self.allocations[idx].first_officer = Some(pilot.id);
        Ok(())
    }

    /// No upper bound is enforced; callers compare against the aircraft's requirement.
    pub fn allocate_cabin_crew(
        &mut self,
        crew: &CabinCrew,
        flight: &FlightId,
    ) -> Result<(), AllocationError> {
        let idx = self.open_index(flight)?;
        self.commit(ResourceId::Crew(crew.id), idx)?;
        self.allocations[idx].cabin_crew.push(crew.id);
        Ok(())
    }

    /// Moves a fully staffed flight from remaining to completed.
    pub fn complete_allocation(&mut self, flight: &FlightId) -> Result<(), AllocationError> {
        let idx = self.open_index(flight)?;
        let allocation = &self.allocations[idx];
        let missing = match &allocation.aircraft {
            None => Some(Role::Aircraft),
            Some(_) if allocation.captain.is_none() => Some(Role::Captain),
            Some(_) if allocation.first_officer.is_none() => Some(Role::FirstOfficer),
            Some(aircraft) if allocation.cabin_crew.len() < aircraft.cabin_crew_required => {
                Some(Role::CabinCrew)
            }
            Some(_) => None,
        };
        if let Some(missing) = missing {
            return Err(AllocationError::IncompleteAllocation {
                flight: flight.clone(),
                missing,
            });
        }

        self.allocations[idx].completed = true;
        self.assert_invariants();
        Ok(())
    }

    pub fn flight(&self, flight: &FlightId) -> Option<&FlightOccurrence> {
        self.flights_index.get(flight).map(|idx| &self.flights[*idx])
    }

    /// Every flight in allocation order.
    pub fn flights(&self) -> &[FlightOccurrence] {
        &self.flights
    }

    pub fn aircraft_for(&self, flight: &FlightId) -> Result<Option<&Aircraft>, AllocationError> {
        Ok(self.allocations[self.index_of(flight)?].aircraft.as_ref())
    }

    pub fn captain_of(&self, flight: &FlightId) -> Result<Option<CrewId>, AllocationError> {
        Ok(self.allocations[self.index_of(flight)?].captain)
    }

    pub fn first_officer_of(&self, flight: &FlightId) -> Result<Option<CrewId>, AllocationError> {
        Ok(self.allocations[self.index_of(flight)?].first_officer)
    }

    pub fn cabin_crew_of(&self, flight: &FlightId) -> Result<&[CrewId], AllocationError> {
        Ok(&self.allocations[self.index_of(flight)?].cabin_crew)
    }

    pub fn status_of(&self, flight: &FlightId) -> Result<AllocationStatus, AllocationError> {
        Ok(self.status_at(self.index_of(flight)?))
    }

    fn status_at(&self, idx: usize) -> AllocationStatus {
        if self.allocations[idx].completed {
            AllocationStatus::Completed
        } else {
            AllocationStatus::Remaining
        }
    }

    /// Commitments of one resource, ordered by departure.
    pub fn commitments_of(&self, resource: &ResourceId) -> &[Commitment] {
        self.timelines
            .get(resource)
            .map(|t| t.as_slice())
            .unwrap_or(&[])
    }

    pub fn remaining(&self) -> impl Iterator<Item = &FlightOccurrence> + '_ {
        self.flights_with(AllocationStatus::Remaining)
    }

    pub fn completed(&self) -> impl Iterator<Item = &FlightOccurrence> + '_ {
        self.flights_with(AllocationStatus::Completed)
    }

    fn flights_with(&self, status: AllocationStatus) -> impl Iterator<Item = &FlightOccurrence> + '_ {
        self.flights
            .iter()
            .enumerate()
            .filter(move |(idx, _)| self.status_at(*idx) == status)
            .map(|(_, f)| f)
    }

    pub fn remaining_count(&self) -> usize {
        self.allocations.iter().filter(|a| !a.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.allocations.iter().filter(|a| a.completed).count()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        debug_assert!(
            self.timelines.values().all(|timeline| {
                timeline.windows(2).all(|cs| {
                    cs[0].interval.from <= cs[1].interval.from
                        && !cs[0].interval.is_overlapping(&cs[1].interval)
                })
            }),
            "Timeline ordering <-> non-overlap invariant violated"
        );

        debug_assert!(
            self.allocations.iter().filter(|a| a.completed).all(|a| {
                a.captain.is_some()
                    && a.first_officer.is_some()
                    && a.aircraft
                        .as_ref()
                        .is_some_and(|ac| a.cabin_crew.len() >= ac.cabin_crew_required)
            }),
            "Completed <-> fully staffed invariant violated"
        );
    }
}
