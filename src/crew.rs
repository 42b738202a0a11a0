use crate::airport::AirportCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Assigned in load order; pilots and cabin crew share one id space.
pub type CrewId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Captain,
    FirstOfficer,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Captain => write!(f, "Captain"),
            Rank::FirstOfficer => write!(f, "First Officer"),
        }
    }
}

/// Fields shared by every crew member.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewMember {
    pub id: CrewId,
    pub forename: String,
    pub surname: String,
    /// Base at load time. Positions during generation are tracked separately.
    pub home_base: AirportCode,
    pub type_ratings: BTreeSet<Arc<str>>,
}

impl CrewMember {
    pub fn name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    pub fn is_qualified_for(&self, type_code: &str) -> bool {
        self.type_ratings.contains(type_code)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pilot {
    pub member: CrewMember,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CabinCrew {
    pub member: CrewMember,
}

impl Pilot {
    pub fn is_captain(&self) -> bool {
        self.rank == Rank::Captain
    }
}

impl std::ops::Deref for Pilot {
    type Target = CrewMember;

    fn deref(&self) -> &CrewMember {
        &self.member
    }
}

impl std::ops::Deref for CabinCrew {
    type Target = CrewMember;

    fn deref(&self) -> &CrewMember {
        &self.member
    }
}
