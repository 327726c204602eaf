//! Running state carried from one month to the next

use crate::params::SimulationParams;

/// Balances at a point in time during a projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Current projection month (1-indexed once the first month starts)
    pub month: u32,

    /// Running balance (principal plus any reinvested interest)
    pub balance: f64,

    /// Cumulative principal put in, including the initial capital
    pub total_invested: f64,

    /// Cumulative interest earned, whether or not it was reinvested
    pub total_interest: f64,
}

impl ProjectionState {
    /// State before the first month
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            month: 0,
            balance: params.initial_capital,
            total_invested: params.initial_capital,
            total_interest: 0.0,
        }
    }

    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Earn one month of interest on the current balance and return it.
    /// When `reinvest` is off the interest is tallied but stays out of the balance.
    pub fn credit_interest(&mut self, monthly_rate: f64, reinvest: bool) -> f64 {
        let earned = self.balance * monthly_rate;
        if reinvest {
            self.balance += earned;
        }
        self.total_interest += earned;
        earned
    }

    pub fn contribute(&mut self, amount: f64) {
        self.balance += amount;
        self.total_invested += amount;
    }
}
