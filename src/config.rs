//! Runtime configuration from environment variables
//!
//! Recognised variables:
//!   PROJECTION_ANCHOR_DATE  anchor for period labels, YYYY-MM-DD (default: today)
//!   PROJECTION_LOCALE       pt-BR | en-US (default: pt-BR)
//!   PROJECTION_CURRENCY     BRL | USD | EUR (default: BRL)

use chrono::NaiveDate;
use log::debug;
use std::env;

use crate::error::ConfigError;
use crate::format::{Currency, Locale};
use crate::projection::ProjectionConfig;

pub const ENV_ANCHOR_DATE: &str = "PROJECTION_ANCHOR_DATE";
pub const ENV_LOCALE: &str = "PROJECTION_LOCALE";
pub const ENV_CURRENCY: &str = "PROJECTION_CURRENCY";

/// Build a configuration from the process environment
pub fn from_env() -> Result<ProjectionConfig, ConfigError> {
    from_lookup(|var| env::var(var).ok())
}

/// Build a configuration from any variable lookup; unset variables keep defaults
pub fn from_lookup<F>(lookup: F) -> Result<ProjectionConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ProjectionConfig::default();

    if let Some(value) = lookup(ENV_ANCHOR_DATE) {
        config.anchor_date = parse_anchor_date(&value).map_err(|reason| ConfigError::InvalidEnv {
            var: ENV_ANCHOR_DATE,
            value: value.clone(),
            reason,
        })?;
    }

    if let Some(value) = lookup(ENV_LOCALE) {
        config.locale = value.parse::<Locale>().map_err(|e| ConfigError::InvalidEnv {
            var: ENV_LOCALE,
            value: value.clone(),
            reason: e.to_string(),
        })?;
    }

    if let Some(value) = lookup(ENV_CURRENCY) {
        config.currency = value.parse::<Currency>().map_err(|e| ConfigError::InvalidEnv {
            var: ENV_CURRENCY,
            value: value.clone(),
            reason: e.to_string(),
        })?;
    }

    debug!("Projection config: {:?}", config);
    Ok(config)
}

/// Parse `YYYY-MM-DD`
pub fn parse_anchor_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.locale, Locale::PtBr);
        assert_eq!(config.currency, Currency::Brl);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = from_lookup(lookup(&[
            (ENV_ANCHOR_DATE, "2030-02-28"),
            (ENV_LOCALE, "en-US"),
            (ENV_CURRENCY, "usd"),
        ]))
        .unwrap();

        assert_eq!(config.anchor_date, NaiveDate::from_ymd_opt(2030, 2, 28).unwrap());
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.currency, Currency::Usd);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = from_lookup(lookup(&[(ENV_ANCHOR_DATE, "28/02/2030")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_ANCHOR_DATE, .. }));

        let err = from_lookup(lookup(&[(ENV_LOCALE, "de-DE")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_LOCALE, .. }));
    }
}
