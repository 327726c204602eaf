//! Load named simulation scenarios from a CSV file

use csv::Reader;
use log::info;
use std::path::Path;

use super::{Frequency, RateType, SimulationParams};
use crate::error::{ExportError, ParamError};

/// A parameter set with a label, as read from a scenario file
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub params: SimulationParams,
}

/// Raw CSV row; column names match the query-string keys
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "name")]
    name: String,
    #[serde(rename = "initialCapital")]
    initial_capital: f64,
    #[serde(rename = "periodicContribution")]
    periodic_contribution: f64,
    #[serde(rename = "contributionFrequency")]
    contribution_frequency: String,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "rateType")]
    rate_type: String,
    #[serde(rename = "period")]
    period: u32,
    #[serde(rename = "reinvest")]
    reinvest: bool,
    #[serde(rename = "inflation")]
    inflation: f64,
    #[serde(rename = "taxRate")]
    tax_rate: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Result<Scenario, ExportError> {
        let name = self.name;
        let to_err = |source: ParamError| ExportError::Scenario { name: name.clone(), source };

        let contribution_frequency = Frequency::from_token(&self.contribution_frequency)
            .ok_or_else(|| {
                to_err(ParamError::UnknownVariant {
                    field: "contributionFrequency",
                    value: self.contribution_frequency.clone(),
                })
            })?;

        let rate_type = RateType::from_token(&self.rate_type).ok_or_else(|| {
            to_err(ParamError::UnknownVariant { field: "rateType", value: self.rate_type.clone() })
        })?;

        let params = SimulationParams {
            initial_capital: self.initial_capital,
            periodic_contribution: self.periodic_contribution,
            contribution_frequency,
            interest_rate: self.interest_rate,
            rate_type,
            period: self.period,
            reinvest: self.reinvest,
            inflation: self.inflation,
            tax_rate: self.tax_rate,
        };
        params.validate().map_err(to_err)?;

        Ok(Scenario { name, params })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ExportError> {
    let path = path.as_ref();
    let scenarios = load_scenarios_from_reader(std::fs::File::open(path)?)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, ExportError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}
