//! Output structures for a projection run

use serde::{Deserialize, Serialize};

/// One month of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Period label, e.g. "nov. de 2026"
    pub date: String,

    /// Cumulative principal to date
    pub total_invested: f64,

    /// Interest earned in this month
    pub interest: f64,

    /// Cumulative interest to date
    pub total_interest: f64,

    /// Balance after this month's interest and contribution
    pub balance: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_data: Vec<MonthlyData>,
    pub total_invested: f64,
    pub total_interest: f64,
    pub final_gross_value: f64,
    pub final_net_value: f64,
    pub tax_amount: f64,

    /// Gross value minus everything invested
    pub total_gains: f64,

    /// Net value minus the invested total grown by inflation
    pub real_gains: f64,
}

impl SimulationResult {
    /// Number of projected months
    pub fn months(&self) -> usize {
        self.monthly_data.len()
    }

    /// Last emitted month, if the horizon was non-empty
    pub fn last_month(&self) -> Option<&MonthlyData> {
        self.monthly_data.last()
    }
}
