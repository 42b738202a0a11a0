use crate::aircraft::Aircraft;
use crate::error::DataLoadingError;
use std::io;
use std::path::Path;

/// Aircraft inventory, loaded from CSV with the header
/// `Tailcode,TypeCode,Manufacturer,Model,Seats,CabinCrewRequired,StartingPosition`.
#[derive(Debug, Default)]
pub struct Fleet {
    aircraft: Vec<Aircraft>,
}

impl Fleet {
    pub fn new(aircraft: Vec<Aircraft>) -> Self {
        Fleet { aircraft }
    }

    pub fn load(&mut self, path: &Path) -> Result<usize, DataLoadingError> {
        let file = std::fs::File::open(path)?;
        let added = self.load_from_reader(file)?;
        log::info!("loaded {} aircraft from {}", added, path.display());
        Ok(added)
    }

    pub fn load_from_reader<R: io::Read>(&mut self, reader: R) -> Result<usize, DataLoadingError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut loaded = Vec::new();
        for record in reader.deserialize() {
            let aircraft: Aircraft = record?;
            if aircraft.id.is_empty() {
                return Err(DataLoadingError::InvalidValue {
                    field: "Tailcode",
                    value: aircraft.id.to_string(),
                });
            }
            if aircraft.initial_location_id.len() != 3 {
                return Err(DataLoadingError::InvalidValue {
                    field: "StartingPosition",
                    value: aircraft.initial_location_id.to_string(),
                });
            }
            loaded.push(aircraft);
        }

        let added = loaded.len();
        self.aircraft.extend(loaded);
        Ok(added)
    }

    pub fn all(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn by_tail(&self, tail: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| *a.id == *tail)
    }

    pub fn by_type(&self, type_code: &str) -> Vec<&Aircraft> {
        self.aircraft
            .iter()
            .filter(|a| a.is_qualified_for(type_code))
            .collect()
    }

    pub fn starting_at(&self, airport: &str) -> Vec<&Aircraft> {
        self.aircraft
            .iter()
            .filter(|a| *a.initial_location_id == *airport)
            .collect()
    }

    pub fn with_min_seats(&self, seats: u32) -> Vec<&Aircraft> {
        self.aircraft.iter().filter(|a| a.seats >= seats).collect()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn reset(&mut self) {
        self.aircraft.clear();
    }
}
