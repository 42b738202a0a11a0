use crate::error::ScheduleError;
use crate::flight::FlightOccurrence;
use crate::route::RouteDefinition;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Expands the weekly timetable into one occurrence per route per matching
/// date in `[start, end]`, ordered by date then local departure time. Routes
/// departing at the same time keep their catalog order.
pub fn materialize(
    routes: &[Arc<RouteDefinition>],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<FlightOccurrence>, ScheduleError> {
    if start > end {
        return Err(ScheduleError::InvalidDateRange { start, end });
    }

    let mut flights = start
        .iter_days()
        .take_while(|date| *date <= end)
        .flat_map(|date| {
            routes
                .iter()
                .filter(move |route| route.runs_on(date.weekday()))
                .map(move |route| FlightOccurrence::new(route.clone(), date))
        })
        .collect::<Vec<FlightOccurrence>>();

    flights.sort_by_key(|f| (f.date(), f.route.departure_time));
    Ok(flights)
}
