use crate::crew::Rank::{Captain, FirstOfficer};
use crate::error::AllocationError;
use crate::flight::AllocationStatus::{Completed, Remaining};
use crate::schedule::ledger::{ResourceId, Role, Schedule};
use crate::schedule::tests::utils::{
    add_aircraft, add_cabin_crew, add_pilot, add_route, date, flight_id, hm, id, occurrence,
};

struct Fixture {
    aircraft: Vec<crate::aircraft::Aircraft>,
    pilots: Vec<crate::crew::Pilot>,
    cabin_crew: Vec<crate::crew::CabinCrew>,
    schedule: Schedule,
}

/// Flight 1 MAN-LHR 08:00-09:30, flight 2 LHR-MAN 09:00-10:30 (overlaps 1),
/// flight 3 LHR-EDI 09:30-11:00 (back-to-back with 1), all on Tuesday 2024-01-02.
fn fixture() -> Fixture {
    let mut aircraft = Vec::new();
    let mut pilots = Vec::new();
    let mut cabin_crew = Vec::new();
    let mut routes = Vec::new();

    add_aircraft(&mut aircraft, "G-AAAA", "A320", 2, "MAN");
    add_aircraft(&mut aircraft, "G-BBBB", "A320", 2, "LHR");

    add_pilot(&mut pilots, 1, Captain, "MAN", &["A320"]);
    add_pilot(&mut pilots, 2, FirstOfficer, "MAN", &["A320"]);

    add_cabin_crew(&mut cabin_crew, 10, "MAN", &["A320"]);
    add_cabin_crew(&mut cabin_crew, 11, "MAN", &["A320"]);

    add_route(&mut routes, 1, "Tue", "MAN", "LHR", hm(8, 0), 90);
    add_route(&mut routes, 2, "Tue", "LHR", "MAN", hm(9, 0), 90);
    add_route(&mut routes, 3, "Tue", "LHR", "EDI", hm(9, 30), 90);

    let flights = routes.iter().map(|r| occurrence(r, date(2))).collect();
    Fixture {
        aircraft,
        pilots,
        cabin_crew,
        schedule: Schedule::new(flights),
    }
}

#[test]
fn test_allocate_and_query_roles() {
    let Fixture { aircraft, pilots, cabin_crew, mut schedule } = fixture();
    let f1 = flight_id(1, date(2));

    schedule.allocate_aircraft(&aircraft[0], &f1).unwrap();
    schedule.allocate_captain(&pilots[0], &f1).unwrap();
    schedule.allocate_first_officer(&pilots[1], &f1).unwrap();
    schedule.allocate_cabin_crew(&cabin_crew[1], &f1).unwrap();
    schedule.allocate_cabin_crew(&cabin_crew[0], &f1).unwrap();

    assert_eq!(Some(&id("G-AAAA")), schedule.aircraft_for(&f1).unwrap().map(|a| &a.id));
    assert_eq!(Some(1), schedule.captain_of(&f1).unwrap());
    assert_eq!(Some(2), schedule.first_officer_of(&f1).unwrap());
    // insertion order is kept
    assert_eq!(&[11, 10], schedule.cabin_crew_of(&f1).unwrap());

    let f2 = flight_id(2, date(2));
    assert_eq!(None, schedule.aircraft_for(&f2).unwrap());
    assert!(schedule.cabin_crew_of(&f2).unwrap().is_empty());
}

#[test]
fn test_double_booked_aircraft_keeps_first_assignment() {
    let Fixture { aircraft, mut schedule, .. } = fixture();
    let f1 = flight_id(1, date(2));
    let f2 = flight_id(2, date(2));

    schedule.allocate_aircraft(&aircraft[0], &f1).unwrap();
    let err = schedule.allocate_aircraft(&aircraft[0], &f2).unwrap_err();

    assert_eq!(
        AllocationError::DoubleBooked {
            resource: ResourceId::Aircraft(id("G-AAAA")),
            flight: f2.clone(),
            conflicting: f1.clone(),
        },
        err
    );
    assert!(err.is_double_booking());
    assert_eq!(Some(&id("G-AAAA")), schedule.aircraft_for(&f1).unwrap().map(|a| &a.id));
    assert_eq!(None, schedule.aircraft_for(&f2).unwrap());
    assert_eq!(1, schedule.commitments_of(&ResourceId::Aircraft(id("G-AAAA"))).len());
}

#[test]
fn test_double_booked_crew() {
    let Fixture { pilots, cabin_crew, mut schedule, .. } = fixture();
    let f1 = flight_id(1, date(2));
    let f2 = flight_id(2, date(2));

    schedule.allocate_captain(&pilots[0], &f1).unwrap();
    assert!(schedule.allocate_first_officer(&pilots[0], &f2).unwrap_err().is_double_booking());
    // the same pilot cannot fill both seats of one flight
    assert!(schedule.allocate_first_officer(&pilots[0], &f1).unwrap_err().is_double_booking());

    schedule.allocate_cabin_crew(&cabin_crew[0], &f1).unwrap();
    assert!(schedule.allocate_cabin_crew(&cabin_crew[0], &f1).unwrap_err().is_double_booking());
    assert!(schedule.allocate_cabin_crew(&cabin_crew[0], &f2).unwrap_err().is_double_booking());
    assert_eq!(&[10], schedule.cabin_crew_of(&f1).unwrap());
}

#[test]
fn test_back_to_back_flights_are_not_double_booked() {
    let Fixture { aircraft, pilots, mut schedule, .. } = fixture();
    let f1 = flight_id(1, date(2));
    let f3 = flight_id(3, date(2));

    schedule.allocate_aircraft(&aircraft[0], &f3).unwrap();
    schedule.allocate_aircraft(&aircraft[0], &f1).unwrap();
    schedule.allocate_captain(&pilots[0], &f1).unwrap();
    schedule.allocate_captain(&pilots[0], &f3).unwrap();

    // timeline stays ordered by departure regardless of allocation order
    let timeline = schedule.commitments_of(&ResourceId::Aircraft(id("G-AAAA")));
    assert_eq!(vec![f1.clone(), f3.clone()], timeline.iter().map(|c| c.flight.clone()).collect::<Vec<_>>());
    assert_eq!(timeline[0].interval.to, timeline[1].interval.from);
}

#[test]
fn test_reassignment_is_rejected() {
    let Fixture { aircraft, pilots, mut schedule, .. } = fixture();
    let f3 = flight_id(3, date(2));

    schedule.allocate_aircraft(&aircraft[1], &f3).unwrap();
    assert_eq!(
        Err(AllocationError::RoleAlreadyFilled { flight: f3.clone(), role: Role::Aircraft }),
        schedule.allocate_aircraft(&aircraft[0], &f3)
    );
    assert_eq!(Some(&id("G-BBBB")), schedule.aircraft_for(&f3).unwrap().map(|a| &a.id));
    assert!(schedule.commitments_of(&ResourceId::Aircraft(id("G-AAAA"))).is_empty());

    schedule.allocate_captain(&pilots[0], &f3).unwrap();
    assert_eq!(
        Err(AllocationError::RoleAlreadyFilled { flight: f3.clone(), role: Role::Captain }),
        schedule.allocate_captain(&pilots[1], &f3)
    );
}

#[test]
fn test_completion_requires_every_role() {
    let Fixture { aircraft, pilots, cabin_crew, mut schedule } = fixture();
    let f1 = flight_id(1, date(2));
    let missing = |role: Role| -> Result<(), AllocationError> {
        Err(AllocationError::IncompleteAllocation { flight: flight_id(1, date(2)), missing: role })
    };

    assert_eq!(missing(Role::Aircraft), schedule.complete_allocation(&f1));
    schedule.allocate_aircraft(&aircraft[0], &f1).unwrap();
    assert_eq!(missing(Role::Captain), schedule.complete_allocation(&f1));
    schedule.allocate_captain(&pilots[0], &f1).unwrap();
    assert_eq!(missing(Role::FirstOfficer), schedule.complete_allocation(&f1));
    schedule.allocate_first_officer(&pilots[1], &f1).unwrap();
    assert_eq!(missing(Role::CabinCrew), schedule.complete_allocation(&f1));
    schedule.allocate_cabin_crew(&cabin_crew[0], &f1).unwrap();
    assert_eq!(missing(Role::CabinCrew), schedule.complete_allocation(&f1));
    assert_eq!(Remaining, schedule.status_of(&f1).unwrap());
    assert_eq!(3, schedule.remaining_count());

    schedule.allocate_cabin_crew(&cabin_crew[1], &f1).unwrap();
    assert_eq!(Ok(()), schedule.complete_allocation(&f1));

    assert_eq!(Completed, schedule.status_of(&f1).unwrap());
    assert_eq!(1, schedule.completed_count());
    assert_eq!(2, schedule.remaining_count());
    assert!(schedule.remaining().all(|f| f.id != f1));
    assert_eq!(vec![f1.clone()], schedule.completed().map(|f| f.id.clone()).collect::<Vec<_>>());
}

#[test]
fn test_completed_flight_is_terminal() {
    let Fixture { aircraft, pilots, cabin_crew, mut schedule } = fixture();
    let f1 = flight_id(1, date(2));

    schedule.allocate_aircraft(&aircraft[0], &f1).unwrap();
    schedule.allocate_captain(&pilots[0], &f1).unwrap();
    schedule.allocate_first_officer(&pilots[1], &f1).unwrap();
    schedule.allocate_cabin_crew(&cabin_crew[0], &f1).unwrap();
    schedule.allocate_cabin_crew(&cabin_crew[1], &f1).unwrap();
    schedule.complete_allocation(&f1).unwrap();

    assert_eq!(Err(AllocationError::AlreadyCompleted(f1.clone())), schedule.complete_allocation(&f1));
    assert_eq!(1, schedule.completed_count());

    let mut extra = Vec::new();
    add_cabin_crew(&mut extra, 12, "MAN", &["A320"]);
    assert_eq!(
        Err(AllocationError::AlreadyCompleted(f1.clone())),
        schedule.allocate_cabin_crew(&extra[0], &f1)
    );
    assert_eq!(2, schedule.cabin_crew_of(&f1).unwrap().len());
}

#[test]
fn test_unknown_flight() {
    let Fixture { aircraft, mut schedule, .. } = fixture();
    let unknown = flight_id(1, date(3));

    assert_eq!(
        Err(AllocationError::UnknownFlight(unknown.clone())),
        schedule.allocate_aircraft(&aircraft[0], &unknown)
    );
    assert_eq!(Err(AllocationError::UnknownFlight(unknown.clone())), schedule.complete_allocation(&unknown));
    assert!(schedule.captain_of(&unknown).is_err());
    assert!(schedule.flight(&unknown).is_none());
}

#[test]
fn test_flight_crossing_midnight() {
    let mut routes = Vec::new();
    let mut aircraft = Vec::new();
    add_route(&mut routes, 7, "Tue", "LHR", "JFK", hm(22, 0), 8 * 60);
    add_route(&mut routes, 8, "Wed", "JFK", "LHR", hm(5, 0), 7 * 60);
    add_route(&mut routes, 9, "Wed", "JFK", "LHR", hm(6, 0), 7 * 60);
    add_aircraft(&mut aircraft, "G-LONG", "B777", 8, "LHR");

    let late = occurrence(&routes[0], date(2));
    assert_eq!(date(3), late.arrival().date());
    assert_eq!(hm(6, 0), late.arrival().time());

    let mut schedule = Schedule::new(vec![late, occurrence(&routes[1], date(3)), occurrence(&routes[2], date(3))]);
    schedule.allocate_aircraft(&aircraft[0], &flight_id(7, date(2))).unwrap();
    assert!(schedule
        .allocate_aircraft(&aircraft[0], &flight_id(8, date(3)))
        .unwrap_err()
        .is_double_booking());
    schedule.allocate_aircraft(&aircraft[0], &flight_id(9, date(3))).unwrap();
}

#[test]
fn test_duplicate_flight_ids_keep_first() {
    let mut routes = Vec::new();
    add_route(&mut routes, 1, "Tue", "MAN", "LHR", hm(8, 0), 90);
    add_route(&mut routes, 1, "Tue", "MAN", "EDI", hm(9, 0), 60);
    add_route(&mut routes, 2, "Tue", "LHR", "MAN", hm(12, 0), 90);

    let schedule = Schedule::new(routes.iter().map(|r| occurrence(r, date(2))).collect());

    assert_eq!(2, schedule.len());
    assert_eq!(2, schedule.remaining_count());
    let f1 = schedule.flight(&flight_id(1, date(2))).unwrap();
    assert_eq!(&id("LHR"), f1.destination_id());
    assert_eq!(
        vec![flight_id(1, date(2)), flight_id(2, date(2))],
        schedule.flights().iter().map(|f| f.id.clone()).collect::<Vec<_>>()
    );
}
