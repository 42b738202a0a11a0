use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Three-letter IATA code, e.g. `MAN`.
pub type AirportCode = Arc<str>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
}

impl Airport {
    pub fn new(code: &str, name: &str) -> Self {
        Airport {
            code: Arc::from(code),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
