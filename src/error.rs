//! Error types for loading, allocation and schedule generation

use crate::flight::FlightId;
use crate::schedule::ledger::{ResourceId, Role};
use chrono::NaiveDate;
use thiserror::Error;

/// Failure while reading one of the input files.
#[derive(Error, Debug)]
pub enum DataLoadingError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A field parsed but its value is not acceptable
    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Rejections raised by the allocation ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The resource already holds a commitment overlapping the flight
    #[error("{resource} is double-booked: {flight} overlaps {conflicting}")]
    DoubleBooked {
        resource: ResourceId,
        flight: FlightId,
        conflicting: FlightId,
    },

    #[error("Flight {flight} cannot be completed without a {missing}")]
    IncompleteAllocation { flight: FlightId, missing: Role },

    #[error("Flight {0} is not part of this schedule")]
    UnknownFlight(FlightId),

    #[error("Flight {0} is already completed")]
    AlreadyCompleted(FlightId),

    #[error("Flight {flight} already has a {role}")]
    RoleAlreadyFilled { flight: FlightId, role: Role },
}

impl AllocationError {
    /// Double-booking means "try the next candidate"; everything else is a caller error.
    pub fn is_double_booking(&self) -> bool {
        matches!(self, AllocationError::DoubleBooked { .. })
    }
}

/// Fatal errors of schedule generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
