//! Scenario runner for batch projections
//!
//! Holds one configuration and projects many parameter sets against it. Each
//! projection is independent, so batches run in parallel.

use log::info;
use rayon::prelude::*;

use crate::params::{Scenario, SimulationParams};
use crate::projection::{ProjectionConfig, ProjectionEngine, SimulationResult};

/// Outcome of one named scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub params: SimulationParams,
    pub result: SimulationResult,
}

/// Runs many projections against a shared configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionConfig::default());
/// let results = runner.sweep_rates(&SimulationParams::default(), &[0.5, 0.8, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { engine: ProjectionEngine::new(config) }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    /// Run a single projection
    pub fn run(&self, params: &SimulationParams) -> SimulationResult {
        self.engine.project(params)
    }

    /// Run projections for many parameter sets, preserving input order
    pub fn run_batch(&self, params: &[SimulationParams]) -> Vec<SimulationResult> {
        params.par_iter().map(|p| self.engine.project(p)).collect()
    }

    /// Run named scenarios, preserving input order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|s| ScenarioOutcome {
                name: s.name.clone(),
                params: s.params.clone(),
                result: self.engine.project(&s.params),
            })
            .collect()
    }

    /// Project `base` once per interest rate, keeping everything else fixed
    pub fn sweep_rates(&self, base: &SimulationParams, rates: &[f64]) -> Vec<SimulationResult> {
        let variants: Vec<SimulationParams> = rates
            .iter()
            .map(|&rate| SimulationParams { interest_rate: rate, ..base.clone() })
            .collect();
        self.run_batch(&variants)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
