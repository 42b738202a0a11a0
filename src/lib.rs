pub mod aircraft;
pub mod airport;
pub mod crew;
pub mod data;
pub mod error;
pub mod flight;
pub mod route;
pub mod schedule;
pub mod time;
pub mod view;

pub use schedule::{generate_schedule, Schedule};
