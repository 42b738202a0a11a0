//! Loaders for the four inputs of schedule generation. Every loader is
//! cumulative: loading a second file adds to what is already held.

pub mod fleet;
pub mod passengers;
pub mod roster;
pub mod routes;

pub use fleet::Fleet;
pub use passengers::PassengerNumbers;
pub use roster::Roster;
pub use routes::RouteCatalog;
