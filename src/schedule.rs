//! Schedule generation: materialize the timetable, then staff every flight
//! greedily, recording everything in the allocation ledger.

pub mod ledger;
pub mod materializer;
pub mod policy;
pub mod positions;


pub use ledger::{Commitment, ResourceId, Role, Schedule};
pub use policy::GreedyAllocator;
pub use positions::PositionRegistry;

use crate::data::{Fleet, PassengerNumbers, Roster, RouteCatalog};
use crate::error::ScheduleError;
use chrono::NaiveDate;

impl Schedule {
    /// An unstaffed schedule holding every occurrence of `routes` in `[start, end]`.
    pub fn for_range(
        routes: &RouteCatalog,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Schedule, ScheduleError> {
        Ok(Schedule::new(materializer::materialize(routes.all(), start, end)?))
    }
}

/// Builds the schedule for `[start, end]` and staffs it from `fleet` and
/// `roster`. Understaffed flights are reported through
/// [`Schedule::remaining`], not as errors.
pub fn generate_schedule(
    fleet: &Fleet,
    roster: &Roster,
    routes: &RouteCatalog,
    _passengers: &PassengerNumbers,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Schedule, ScheduleError> {
    let mut schedule = Schedule::for_range(routes, start, end)?;
    log::info!(
        "generating schedule for {} flights between {} and {}",
        schedule.len(),
        start,
        end
    );

    GreedyAllocator::new(fleet, roster).allocate(&mut schedule)?;
    Ok(schedule)
}
