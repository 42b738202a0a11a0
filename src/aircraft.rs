use crate::airport::AirportCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tail code, unique across the fleet.
pub type AircraftId = Arc<str>;

/// One row of the fleet inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    #[serde(rename = "Tailcode")]
    pub id: AircraftId,
    #[serde(rename = "TypeCode")]
    pub type_code: Arc<str>,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Seats")]
    pub seats: u32,
    #[serde(rename = "CabinCrewRequired")]
    pub cabin_crew_required: usize,
    /// Where the aircraft sits before the first generated flight.
    #[serde(rename = "StartingPosition")]
    pub initial_location_id: AirportCode,
}

impl Aircraft {
    pub fn is_qualified_for(&self, type_code: &str) -> bool {
        *self.type_code == *type_code
    }

    pub fn description(&self) -> String {
        format!("{} {} ({})", self.manufacturer, self.model, self.type_code)
    }
}
