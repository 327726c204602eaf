//! Locale-aware formatting for period labels and currency amounts
//!
//! The projection itself is locale-free. Everything that depends on a language or
//! a currency goes through this module with the locale passed in explicitly.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParamError;

/// Display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    fn month_abbreviation(&self, month0: u32) -> &'static str {
        const PT: [&str; 12] = [
            "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
            "dez.",
        ];
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let idx = (month0 % 12) as usize;
        match self {
            Locale::PtBr => PT[idx],
            Locale::EnUs => EN[idx],
        }
    }

    fn separators(&self) -> (char, char) {
        // (thousands, decimal)
        match self {
            Locale::PtBr => ('.', ','),
            Locale::EnUs => (',', '.'),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

impl FromStr for Locale {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(ParamError::UnknownVariant { field: "locale", value: s.to_string() }),
        }
    }
}

/// Currency used when rendering monetary amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    fn symbol(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Currency::Brl, _) => "R$",
            (Currency::Usd, Locale::PtBr) => "US$",
            (Currency::Usd, Locale::EnUs) => "$",
            (Currency::Eur, _) => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(ParamError::UnknownVariant { field: "currency", value: s.to_string() }),
        }
    }
}

/// Label for the calendar month `offset` months after the anchor's month,
/// e.g. `"out. de 2026"` (pt-BR) or `"Oct 2026"` (en-US).
///
/// Only the anchor's month counts. Calendar-date arithmetic would roll Jan 31 + 1
/// month over into March; this always yields February.
pub fn period_label(anchor: NaiveDate, offset: u32, locale: Locale) -> String {
    let total = anchor.year() as i64 * 12 + anchor.month0() as i64 + offset as i64;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    let abbreviation = locale.month_abbreviation(month0);

    match locale {
        Locale::PtBr => format!("{} de {}", abbreviation, year),
        Locale::EnUs => format!("{} {}", abbreviation, year),
    }
}

/// Render an amount with two decimals, grouped thousands and the currency symbol
pub fn format_currency(value: f64, locale: Locale, currency: Currency) -> String {
    let symbol = currency.symbol(locale);
    if !value.is_finite() {
        return format!("{} {}", symbol, value);
    }

    let (thousands, decimal) = locale.separators();
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_digits(int_part, thousands);

    let negative = value < 0.0 && fixed != "0.00";
    let sign = if negative { "-" } else { "" };

    match locale {
        Locale::PtBr => format!("{}{} {}{}{}", sign, symbol, grouped, decimal, frac_part),
        Locale::EnUs => format!("{}{}{}{}{}", sign, symbol, grouped, decimal, frac_part),
    }
}

/// Plain two-decimal rendering used for machine-readable exports
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_label_pt_br() {
        let anchor = date(2026, 10, 16);
        assert_eq!(period_label(anchor, 0, Locale::PtBr), "out. de 2026");
        assert_eq!(period_label(anchor, 1, Locale::PtBr), "nov. de 2026");
        assert_eq!(period_label(anchor, 3, Locale::PtBr), "jan. de 2027");
        assert_eq!(period_label(anchor, 27, Locale::PtBr), "jan. de 2029");
    }

    #[test]
    fn test_period_label_ignores_day_of_month() {
        // Jan 31 + 1 month is February, not an overflow into March
        let anchor = date(2027, 1, 31);
        assert_eq!(period_label(anchor, 1, Locale::EnUs), "Feb 2027");
        assert_eq!(period_label(anchor, 12, Locale::EnUs), "Jan 2028");
    }

    #[test]
    fn test_currency_pt_br() {
        assert_eq!(format_currency(1234.5, Locale::PtBr, Currency::Brl), "R$ 1.234,50");
        assert_eq!(format_currency(0.0, Locale::PtBr, Currency::Brl), "R$ 0,00");
        assert_eq!(format_currency(1_000_000.0, Locale::PtBr, Currency::Brl), "R$ 1.000.000,00");
        assert_eq!(format_currency(-42.126, Locale::PtBr, Currency::Brl), "-R$ 42,13");
        assert_eq!(format_currency(-0.001, Locale::PtBr, Currency::Brl), "R$ 0,00");
        assert_eq!(format_currency(10.0, Locale::PtBr, Currency::Usd), "US$ 10,00");
    }

    #[test]
    fn test_currency_en_us() {
        assert_eq!(format_currency(1234.5, Locale::EnUs, Currency::Usd), "$1,234.50");
        assert_eq!(format_currency(999.999, Locale::EnUs, Currency::Usd), "$1,000.00");
        assert_eq!(format_currency(-7.0, Locale::EnUs, Currency::Eur), "-€7.00");
        assert_eq!(format_currency(123.0, Locale::EnUs, Currency::Brl), "R$123.00");
    }

    #[test]
    fn test_parse_locale_and_currency() {
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en-us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("fr-FR".parse::<Locale>().is_err());
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ','), "1");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1234", ','), "1,234");
        assert_eq!(group_digits("123456", ','), "123,456");
        assert_eq!(group_digits("1234567", '.'), "1.234.567");
    }
}
