//! Simulation parameter structures

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Longest horizon accepted at the input boundary (100 years)
pub const MAX_PERIOD_MONTHS: u32 = 1200;

/// Cadence at which the periodic contribution is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[serde(alias = "mensal")]
    Monthly,
    #[serde(alias = "trimestral")]
    Quarterly,
    #[serde(alias = "anual")]
    Annual,
}

impl Frequency {
    /// Whether a contribution lands in the given (1-indexed) month
    pub fn is_contribution_month(&self, month: u32) -> bool {
        match self {
            Frequency::Monthly => true,
            Frequency::Quarterly => month % 3 == 0,
            Frequency::Annual => month % 12 == 0,
        }
    }

    /// Token used in shared query strings
    pub fn as_query_token(&self) -> &'static str {
        match self {
            Frequency::Monthly => "mensal",
            Frequency::Quarterly => "trimestral",
            Frequency::Annual => "anual",
        }
    }

    /// Parse either the query token or the English name
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mensal" | "monthly" => Some(Frequency::Monthly),
            "trimestral" | "quarterly" => Some(Frequency::Quarterly),
            "anual" | "annual" | "yearly" => Some(Frequency::Annual),
            _ => None,
        }
    }
}

/// Whether `interest_rate` is quoted per month or per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    #[serde(alias = "mensal")]
    Monthly,
    #[serde(alias = "anual")]
    Annual,
}

impl RateType {
    pub fn as_query_token(&self) -> &'static str {
        match self {
            RateType::Monthly => "mensal",
            RateType::Annual => "anual",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mensal" | "monthly" => Some(RateType::Monthly),
            "anual" | "annual" | "yearly" => Some(RateType::Annual),
            _ => None,
        }
    }
}

/// Investor inputs for a single projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Starting principal
    pub initial_capital: f64,

    /// Amount added on each contribution month
    pub periodic_contribution: f64,

    pub contribution_frequency: Frequency,

    /// Nominal rate in percent, per `rate_type`
    pub interest_rate: f64,

    pub rate_type: RateType,

    /// Horizon in months
    pub period: u32,

    /// Whether earned interest is added to the balance each month
    pub reinvest: bool,

    /// Annual inflation in percent, used only for the real-gain adjustment
    pub inflation: f64,

    /// Tax on gains in percent, applied once at the end of the horizon
    pub tax_rate: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_capital: 1000.0,
            periodic_contribution: 500.0,
            contribution_frequency: Frequency::Monthly,
            interest_rate: 0.8,
            rate_type: RateType::Monthly,
            period: 120, // 10 years
            reinvest: true,
            inflation: 4.0,
            tax_rate: 15.0,
        }
    }
}

impl SimulationParams {
    /// Set the horizon from separate year and month counts
    pub fn with_period_years_months(mut self, years: u32, months: u32) -> Result<Self, ParamError> {
        self.period = years
            .checked_mul(12)
            .and_then(|m| m.checked_add(months))
            .ok_or(ParamError::OutOfRange {
                field: "period",
                value: years as f64 * 12.0 + months as f64,
                min: 0.0,
                max: MAX_PERIOD_MONTHS as f64,
            })?;
        Ok(self)
    }

    /// Whole years in the horizon
    pub fn period_years(&self) -> u32 {
        self.period / 12
    }

    /// Months left over after whole years
    pub fn period_extra_months(&self) -> u32 {
        self.period % 12
    }

    /// Check the parameters before they reach the engine.
    ///
    /// The engine itself accepts anything and lets NaN flow through; callers that
    /// take user input should run this first.
    pub fn validate(&self) -> Result<(), ParamError> {
        non_negative("initialCapital", self.initial_capital)?;
        non_negative("periodicContribution", self.periodic_contribution)?;
        non_negative("interestRate", self.interest_rate)?;
        non_negative("inflation", self.inflation)?;
        in_range("taxRate", self.tax_rate, 0.0, 100.0)?;

        if self.period > MAX_PERIOD_MONTHS {
            return Err(ParamError::OutOfRange {
                field: "period",
                value: self.period as f64,
                min: 0.0,
                max: MAX_PERIOD_MONTHS as f64,
            });
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ParamError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ParamError::Negative { field, value });
    }
    Ok(())
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ParamError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ParamError::OutOfRange { field, value, min, max });
    }
    Ok(())
}
