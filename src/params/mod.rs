//! Simulation parameters and the sources that produce them

mod data;
pub mod loader;
pub mod query;

pub use data::{Frequency, RateType, SimulationParams, MAX_PERIOD_MONTHS};
pub use loader::{load_scenarios, load_scenarios_from_reader, Scenario};
