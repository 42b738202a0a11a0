use crate::error::DataLoadingError;
use crate::route::FlightNumber;
use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::path::Path;

/// Passenger load forecasts, cached from the `PassengerNumbers` table of a
/// SQLite database. Later loads overwrite entries for the same flight and date.
#[derive(Debug, Default)]
pub struct PassengerNumbers {
    forecasts: HashMap<(FlightNumber, NaiveDate), u32>,
}

impl PassengerNumbers {
    const DATE_FORMAT: &'static str = "%Y-%m-%d";

    pub fn load(&mut self, path: &Path) -> Result<usize, DataLoadingError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let read = self.load_from_connection(&conn)?;
        log::info!("loaded {} passenger forecasts from {}", read, path.display());
        Ok(read)
    }

    pub fn load_from_connection(&mut self, conn: &Connection) -> Result<usize, DataLoadingError> {
        let mut stmt =
            conn.prepare("SELECT Date, FlightNumber, LoadEstimate FROM PassengerNumbers")?;
        let mut rows = stmt.query(rusqlite::params![])?;

        let mut loaded = Vec::new();
        while let Some(row) = rows.next()? {
            let date: String = row.get("Date")?;
            let date = NaiveDate::parse_from_str(&date, Self::DATE_FORMAT).map_err(|_| {
                DataLoadingError::InvalidValue {
                    field: "Date",
                    value: date.clone(),
                }
            })?;
            let flight_number: FlightNumber = row.get("FlightNumber")?;
            let estimate: u32 = row.get("LoadEstimate")?;
            loaded.push(((flight_number, date), estimate));
        }

        let read = loaded.len();
        self.forecasts.extend(loaded);
        Ok(read)
    }

    pub fn forecast(&self, flight_number: FlightNumber, date: NaiveDate) -> Option<u32> {
        self.forecasts.get(&(flight_number, date)).copied()
    }

    pub fn len(&self) -> usize {
        self.forecasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty()
    }

    pub fn reset(&mut self) {
        self.forecasts.clear();
    }
}
