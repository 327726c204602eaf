//! Projection engine for monthly compound-interest projections

mod engine;
pub mod rates;
mod result;
mod state;

pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use result::{MonthlyData, SimulationResult};
pub use state::ProjectionState;
