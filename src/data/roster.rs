use crate::airport::AirportCode;
use crate::crew::{CabinCrew, CrewId, CrewMember, Pilot, Rank};
use crate::error::DataLoadingError;
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::sync::Arc;

#[derive(Deserialize)]
struct RawMember {
    forename: String,
    surname: String,
    home_airport: String,
    type_ratings: Vec<String>,
}

#[derive(Deserialize)]
struct RawPilot {
    #[serde(flatten)]
    member: RawMember,
    rank: Rank,
}

#[derive(Deserialize)]
struct RawRoster {
    pilots: Vec<RawPilot>,
    cabincrew: Vec<RawMember>,
}

/// Crew roster, loaded from JSON of the form
/// `{ "pilots": [...], "cabincrew": [...] }`.
#[derive(Debug, Default)]
pub struct Roster {
    pilots: Vec<Pilot>,
    cabin_crew: Vec<CabinCrew>,
    next_id: CrewId,
}

impl Roster {
    pub fn new(pilots: Vec<Pilot>, cabin_crew: Vec<CabinCrew>) -> Self {
        let next_id = pilots
            .iter()
            .map(|p| p.id)
            .chain(cabin_crew.iter().map(|c| c.id))
            .max()
            .map_or(0, |id| id + 1);
        Roster {
            pilots,
            cabin_crew,
            next_id,
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<usize, DataLoadingError> {
        let file = std::fs::File::open(path)?;
        let added = self.load_from_reader(io::BufReader::new(file))?;
        log::info!("loaded {} crew members from {}", added, path.display());
        Ok(added)
    }

    /// Nothing is added unless the whole document parses.
    pub fn load_from_reader<R: io::Read>(&mut self, reader: R) -> Result<usize, DataLoadingError> {
        let raw: RawRoster = serde_json::from_reader(reader)?;

        let mut next_id = self.next_id;
        let mut member = |raw: RawMember| -> Result<CrewMember, DataLoadingError> {
            if raw.home_airport.len() != 3 {
                return Err(DataLoadingError::InvalidValue {
                    field: "home_airport",
                    value: raw.home_airport,
                });
            }
            let id = next_id;
            next_id += 1;
            Ok(CrewMember {
                id,
                forename: raw.forename,
                surname: raw.surname,
                home_base: AirportCode::from(raw.home_airport.as_str()),
                type_ratings: raw.type_ratings.iter().map(|t| Arc::from(t.as_str())).collect(),
            })
        };

        let pilots = raw
            .pilots
            .into_iter()
            .map(|p| member(p.member).map(|member| Pilot { member, rank: p.rank }))
            .collect::<Result<Vec<_>, _>>()?;
        let cabin_crew = raw
            .cabincrew
            .into_iter()
            .map(|c| member(c).map(|member| CabinCrew { member }))
            .collect::<Result<Vec<_>, _>>()?;

        let added = pilots.len() + cabin_crew.len();
        self.pilots.extend(pilots);
        self.cabin_crew.extend(cabin_crew);
        self.next_id = next_id;
        Ok(added)
    }

    pub fn pilots(&self) -> &[Pilot] {
        &self.pilots
    }

    pub fn cabin_crew(&self) -> &[CabinCrew] {
        &self.cabin_crew
    }

    pub fn pilot(&self, id: CrewId) -> Option<&Pilot> {
        self.pilots.iter().find(|p| p.id == id)
    }

    pub fn cabin_crew_member(&self, id: CrewId) -> Option<&CabinCrew> {
        self.cabin_crew.iter().find(|c| c.id == id)
    }

    pub fn name_of(&self, id: CrewId) -> Option<String> {
        self.pilot(id)
            .map(|p| p.name())
            .or_else(|| self.cabin_crew_member(id).map(|c| c.name()))
    }

    pub fn pilots_based_at(&self, airport: &str) -> Vec<&Pilot> {
        self.pilots.iter().filter(|p| *p.home_base == *airport).collect()
    }

    pub fn pilots_rated_for(&self, type_code: &str) -> Vec<&Pilot> {
        self.pilots
            .iter()
            .filter(|p| p.is_qualified_for(type_code))
            .collect()
    }

    pub fn pilots_based_at_rated_for(&self, airport: &str, type_code: &str) -> Vec<&Pilot> {
        self.pilots
            .iter()
            .filter(|p| *p.home_base == *airport && p.is_qualified_for(type_code))
            .collect()
    }

    pub fn cabin_crew_based_at(&self, airport: &str) -> Vec<&CabinCrew> {
        self.cabin_crew
            .iter()
            .filter(|c| *c.home_base == *airport)
            .collect()
    }

    pub fn cabin_crew_rated_for(&self, type_code: &str) -> Vec<&CabinCrew> {
        self.cabin_crew
            .iter()
            .filter(|c| c.is_qualified_for(type_code))
            .collect()
    }

    pub fn cabin_crew_based_at_rated_for(&self, airport: &str, type_code: &str) -> Vec<&CabinCrew> {
        self.cabin_crew
            .iter()
            .filter(|c| *c.home_base == *airport && c.is_qualified_for(type_code))
            .collect()
    }

    pub fn all_crew_count(&self) -> usize {
        self.pilots.len() + self.cabin_crew.len()
    }

    pub fn reset(&mut self) {
        self.pilots.clear();
        self.cabin_crew.clear();
        self.next_id = 0;
    }
}
