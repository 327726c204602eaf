//! Query-string parameter source
//!
//! Shared simulation links carry every parameter as a `key=value` pair. Each
//! accepted key has one entry in [`FIELDS`] naming the parser that writes it into
//! a `SimulationParams`; anything not in the table is skipped.

use log::{debug, warn};
use url::form_urlencoded;

use super::{Frequency, RateType, SimulationParams};
use crate::error::ParamError;

/// One accepted query key and the parser that applies it
pub struct Field {
    pub key: &'static str,
    apply: fn(&mut SimulationParams, &str) -> Result<(), ParamError>,
}

/// Every key a shared link may carry
pub const FIELDS: &[Field] = &[
    Field {
        key: "initialCapital",
        apply: |p, v| {
            p.initial_capital = parse_number("initialCapital", v)?;
            Ok(())
        },
    },
    Field {
        key: "periodicContribution",
        apply: |p, v| {
            p.periodic_contribution = parse_number("periodicContribution", v)?;
            Ok(())
        },
    },
    Field {
        key: "contributionFrequency",
        apply: |p, v| {
            p.contribution_frequency = Frequency::from_token(v).ok_or_else(|| {
                ParamError::UnknownVariant { field: "contributionFrequency", value: v.to_string() }
            })?;
            Ok(())
        },
    },
    Field {
        key: "interestRate",
        apply: |p, v| {
            p.interest_rate = parse_number("interestRate", v)?;
            Ok(())
        },
    },
    Field {
        key: "rateType",
        apply: |p, v| {
            p.rate_type = RateType::from_token(v).ok_or_else(|| ParamError::UnknownVariant {
                field: "rateType",
                value: v.to_string(),
            })?;
            Ok(())
        },
    },
    Field {
        key: "period",
        apply: |p, v| {
            p.period = v.trim().parse::<u32>().map_err(|e| ParamError::Malformed {
                field: "period",
                value: v.to_string(),
                reason: e.to_string(),
            })?;
            Ok(())
        },
    },
    Field {
        key: "reinvest",
        // Only the literal "true" turns reinvestment on
        apply: |p, v| {
            p.reinvest = v == "true";
            Ok(())
        },
    },
    Field {
        key: "inflation",
        apply: |p, v| {
            p.inflation = parse_number("inflation", v)?;
            Ok(())
        },
    },
    Field {
        key: "taxRate",
        apply: |p, v| {
            p.tax_rate = parse_number("taxRate", v)?;
            Ok(())
        },
    },
];

fn parse_number(field: &'static str, value: &str) -> Result<f64, ParamError> {
    let parsed: f64 = value.trim().parse().map_err(|e: std::num::ParseFloatError| {
        ParamError::Malformed { field, value: value.to_string(), reason: e.to_string() }
    })?;
    if !parsed.is_finite() {
        return Err(ParamError::NotFinite { field });
    }
    Ok(parsed)
}

/// Overlay key/value pairs onto `base` and validate the outcome
pub fn from_pairs<'a, I>(base: SimulationParams, pairs: I) -> Result<SimulationParams, ParamError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let params = overlay_pairs(base, pairs)?;
    params.validate()?;
    debug!("Parsed simulation parameters: {:?}", params);
    Ok(params)
}

/// Overlay key/value pairs onto `base` without validating.
///
/// Malformed values are still rejected; range checks are left to the caller.
pub fn overlay_pairs<'a, I>(base: SimulationParams, pairs: I) -> Result<SimulationParams, ParamError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut params = base;

    for (key, value) in pairs {
        match FIELDS.iter().find(|f| f.key == key) {
            Some(field) => (field.apply)(&mut params, value)?,
            None => warn!("Ignoring unknown query parameter {:?}", key),
        }
    }

    Ok(params)
}

/// Parse a raw query string such as `?initialCapital=1000&reinvest=true`
pub fn from_query_string(base: SimulationParams, query: &str) -> Result<SimulationParams, ParamError> {
    let params = overlay_query_string(base, query)?;
    params.validate()?;
    debug!("Parsed simulation parameters: {:?}", params);
    Ok(params)
}

/// Like [`from_query_string`], minus the final validation
pub fn overlay_query_string(base: SimulationParams, query: &str) -> Result<SimulationParams, ParamError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let decoded: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes()).into_owned().collect();

    overlay_pairs(base, decoded.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Serialize parameters into a shareable query string
pub fn to_query_string(params: &SimulationParams) -> String {
    let pairs = [
        ("initialCapital", params.initial_capital.to_string()),
        ("periodicContribution", params.periodic_contribution.to_string()),
        ("contributionFrequency", params.contribution_frequency.as_query_token().to_string()),
        ("interestRate", params.interest_rate.to_string()),
        ("rateType", params.rate_type.as_query_token().to_string()),
        ("period", params.period.to_string()),
        ("reinvest", params.reinvest.to_string()),
        ("inflation", params.inflation.to_string()),
        ("taxRate", params.tax_rate.to_string()),
    ];

    form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs.iter()).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_onto_defaults() {
        let params = from_query_string(
            SimulationParams::default(),
            "?initialCapital=2500&contributionFrequency=trimestral&reinvest=false&period=36",
        )
        .unwrap();

        assert_eq!(params.initial_capital, 2500.0);
        assert_eq!(params.contribution_frequency, Frequency::Quarterly);
        assert!(!params.reinvest);
        assert_eq!(params.period, 36);
        // Untouched keys keep their defaults
        assert_eq!(params.interest_rate, 0.8);
        assert_eq!(params.tax_rate, 15.0);
    }

    #[test]
    fn test_reinvest_literal() {
        let base = SimulationParams::default();
        assert!(!from_query_string(base.clone(), "reinvest=TRUE").unwrap().reinvest);
        assert!(!from_query_string(base.clone(), "reinvest=1").unwrap().reinvest);
        assert!(from_query_string(base, "reinvest=true").unwrap().reinvest);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params =
            from_query_string(SimulationParams::default(), "utm_source=mail&taxRate=22.5").unwrap();
        assert_eq!(params.tax_rate, 22.5);
    }

    #[test]
    fn test_malformed_values_rejected() {
        let base = SimulationParams::default();

        assert!(matches!(
            from_query_string(base.clone(), "initialCapital=abc"),
            Err(ParamError::Malformed { field: "initialCapital", .. })
        ));
        assert!(matches!(
            from_query_string(base.clone(), "period=-3"),
            Err(ParamError::Malformed { field: "period", .. })
        ));
        assert!(matches!(
            from_query_string(base.clone(), "rateType=weekly"),
            Err(ParamError::UnknownVariant { field: "rateType", .. })
        ));
        assert!(matches!(
            from_query_string(base.clone(), "inflation=NaN"),
            Err(ParamError::NotFinite { field: "inflation" })
        ));
        assert!(matches!(
            from_query_string(base, "taxRate=150"),
            Err(ParamError::OutOfRange { field: "taxRate", .. })
        ));
    }

    #[test]
    fn test_share_link_round_trip() {
        let params = SimulationParams {
            initial_capital: 12345.67,
            periodic_contribution: 0.0,
            contribution_frequency: Frequency::Annual,
            interest_rate: 11.25,
            rate_type: RateType::Annual,
            period: 301,
            reinvest: false,
            inflation: 3.5,
            tax_rate: 17.5,
        };

        let query = to_query_string(&params);
        assert!(query.contains("contributionFrequency=anual"));
        assert!(query.contains("reinvest=false"));

        let parsed = from_query_string(SimulationParams::default(), &query).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_form_encoded_values() {
        let params = from_query_string(
            SimulationParams::default(),
            "?interestRate=1%2E5&contributionFrequency=+anual&initialCapital=2%20000",
        );
        // "2 000" is not a number once decoded
        assert!(matches!(params, Err(ParamError::Malformed { field: "initialCapital", .. })));

        let params = from_query_string(
            SimulationParams::default(),
            "?interestRate=1%2E5&contributionFrequency=+anual&&period=24",
        )
        .unwrap();
        assert_eq!(params.interest_rate, 1.5);
        assert_eq!(params.contribution_frequency, Frequency::Annual);
        assert_eq!(params.period, 24);
    }

    #[test]
    fn test_overlay_skips_range_checks() {
        let params = overlay_query_string(SimulationParams::default(), "taxRate=150").unwrap();
        assert_eq!(params.tax_rate, 150.0);
        assert!(from_query_string(SimulationParams::default(), "taxRate=150").is_err());

        // Unparseable values are still rejected
        assert!(matches!(
            overlay_query_string(SimulationParams::default(), "taxRate=high"),
            Err(ParamError::Malformed { field: "taxRate", .. })
        ));
    }
}
