//! Compound Projection - month-by-month compound-interest projections
//!
//! This library provides:
//! - A deterministic projection engine over initial capital, periodic contributions,
//!   a flat nominal rate, inflation and an end-of-horizon tax on gains
//! - Parameter sources (query strings, CSV scenario files) with boundary validation
//! - Locale-aware summary cards, chart series and text tables
//! - CSV export of the monthly series
//! - Parallel batch runs over many parameter sets

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod params;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, ExportError, ParamError};
pub use format::{Currency, Locale};
pub use params::{Frequency, RateType, SimulationParams};
pub use projection::{project, MonthlyData, ProjectionConfig, ProjectionEngine, SimulationResult};
pub use scenario::ScenarioRunner;
