use crate::aircraft::Aircraft;
use crate::airport::AirportCode;
use crate::crew::{CabinCrew, Pilot};
use crate::data::{Fleet, Roster};
use crate::schedule::ledger::ResourceId;
use std::collections::HashMap;

/// A fleet or roster record the allocator can pick.
pub trait Resource {
    fn resource_id(&self) -> ResourceId;

    /// Position before any flight was generated.
    fn initial_location_id(&self) -> &AirportCode;

    fn is_qualified_for(&self, type_code: &str) -> bool;
}

impl Resource for Aircraft {
    fn resource_id(&self) -> ResourceId {
        ResourceId::Aircraft(self.id.clone())
    }

    fn initial_location_id(&self) -> &AirportCode {
        &self.initial_location_id
    }

    fn is_qualified_for(&self, type_code: &str) -> bool {
        Aircraft::is_qualified_for(self, type_code)
    }
}

impl Resource for Pilot {
    fn resource_id(&self) -> ResourceId {
        ResourceId::Crew(self.id)
    }

    fn initial_location_id(&self) -> &AirportCode {
        &self.home_base
    }

    fn is_qualified_for(&self, type_code: &str) -> bool {
        self.member.is_qualified_for(type_code)
    }
}

impl Resource for CabinCrew {
    fn resource_id(&self) -> ResourceId {
        ResourceId::Crew(self.id)
    }

    fn initial_location_id(&self) -> &AirportCode {
        &self.home_base
    }

    fn is_qualified_for(&self, type_code: &str) -> bool {
        self.member.is_qualified_for(type_code)
    }
}

/// Where each aircraft and crew member is expected to be after the flights
/// allocated so far. Seeded from the static records and moved only by the
/// allocator; the ledger never reads it.
#[derive(Debug, Clone, Default)]
pub struct PositionRegistry {
    positions: HashMap<ResourceId, AirportCode>,
}

impl PositionRegistry {
    pub fn seed(fleet: &Fleet, roster: &Roster) -> Self {
        let mut registry = PositionRegistry::default();
        fleet.all().iter().for_each(|a| registry.track(a));
        roster.pilots().iter().for_each(|p| registry.track(p));
        roster.cabin_crew().iter().for_each(|c| registry.track(c));
        registry
    }

    fn track<R: Resource>(&mut self, resource: &R) {
        self.positions
            .insert(resource.resource_id(), resource.initial_location_id().clone());
    }

    pub fn position_of(&self, resource: &ResourceId) -> Option<&AirportCode> {
        self.positions.get(resource)
    }

    /// Untracked resources fall back to their static position.
    pub fn is_at<R: Resource>(&self, resource: &R, airport: &str) -> bool {
        let id = resource.resource_id();
        let position = self
            .positions
            .get(&id)
            .unwrap_or_else(|| resource.initial_location_id());
        **position == *airport
    }

    pub fn move_to(&mut self, resource: ResourceId, airport: AirportCode) {
        self.positions.insert(resource, airport);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
