//! Presentation-ready views of a projection: summary cards, chart series and tables

use serde::Serialize;
use std::fmt::Write;

use crate::format::{format_currency, Currency, Locale};
use crate::projection::SimulationResult;

/// A labelled, formatted headline figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub value: f64,
    pub formatted: String,
}

/// Headline figures shown above the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub total_invested: Card,
    pub total_interest: Card,
    pub tax_amount: Card,
    pub final_gross_value: Card,
    pub final_net_value: Card,
    pub total_gains: Card,
    pub real_gains: Card,
}

impl SummaryCards {
    pub fn new(result: &SimulationResult, locale: Locale, currency: Currency) -> Self {
        let card = |title_pt: &'static str, title_en: &'static str, value: f64| Card {
            title: match locale {
                Locale::PtBr => title_pt,
                Locale::EnUs => title_en,
            },
            value,
            formatted: format_currency(value, locale, currency),
        };

        Self {
            total_invested: card("Total Investido", "Total Invested", result.total_invested),
            total_interest: card("Total em Juros", "Total Interest", result.total_interest),
            tax_amount: card("Imposto Estimado", "Estimated Tax", result.tax_amount),
            final_gross_value: card("Valor Final Bruto", "Final Gross Value", result.final_gross_value),
            final_net_value: card("Valor Final Líquido", "Final Net Value", result.final_net_value),
            total_gains: card("Ganho Nominal", "Nominal Gain", result.total_gains),
            real_gains: card("Ganho Real", "Real Gain", result.real_gains),
        }
    }

    /// Cards in display order
    pub fn cards(&self) -> [&Card; 7] {
        [
            &self.total_invested,
            &self.total_interest,
            &self.tax_amount,
            &self.final_gross_value,
            &self.final_net_value,
            &self.total_gains,
            &self.real_gains,
        ]
    }
}

/// One x-axis point of the invested-versus-balance chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub total_invested: f64,
    pub balance: f64,
}

/// Two series keyed by period label: cumulative invested and balance
pub fn chart_series(result: &SimulationResult) -> Vec<ChartPoint> {
    result
        .monthly_data
        .iter()
        .map(|row| ChartPoint {
            date: row.date.clone(),
            total_invested: row.total_invested,
            balance: row.balance,
        })
        .collect()
}

/// Plain-text rendering of the summary cards
pub fn render_summary(cards: &SummaryCards) -> String {
    let width = cards.cards().iter().map(|c| c.title.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for card in cards.cards() {
        let pad = width - card.title.chars().count();
        let _ = writeln!(out, "  {}{}  {}", card.title, " ".repeat(pad), card.formatted);
    }
    out
}

/// Plain-text table of the first `limit` months (all months when `None`)
pub fn render_table(
    result: &SimulationResult,
    locale: Locale,
    currency: Currency,
    limit: Option<usize>,
) -> String {
    let headers = match locale {
        Locale::PtBr => ["Data", "Investido", "Juros", "Saldo"],
        Locale::EnUs => ["Date", "Invested", "Interest", "Balance"],
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>20} {:>16} {:>20}",
        headers[0], headers[1], headers[2], headers[3]
    );
    let _ = writeln!(out, "{}", "-".repeat(75));

    let shown = limit.unwrap_or(result.monthly_data.len());
    for row in result.monthly_data.iter().take(shown) {
        let _ = writeln!(
            out,
            "{:<16} {:>20} {:>16} {:>20}",
            row.date,
            format_currency(row.total_invested, locale, currency),
            format_currency(row.interest, locale, currency),
            format_currency(row.balance, locale, currency),
        );
    }

    if result.monthly_data.len() > shown {
        let _ = writeln!(out, "... ({} more months)", result.monthly_data.len() - shown);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use chrono::NaiveDate;

    fn result() -> SimulationResult {
        let config = ProjectionConfig::anchored_at(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let params = SimulationParams { period: 12, ..Default::default() };
        ProjectionEngine::new(config).project(&params)
    }

    #[test]
    fn test_summary_cards_pt_br() {
        let cards = SummaryCards::new(&result(), Locale::PtBr, Currency::Brl);
        assert_eq!(cards.total_invested.title, "Total Investido");
        assert_eq!(cards.total_invested.formatted, "R$ 7.000,00");
        assert_eq!(cards.final_gross_value.formatted, "R$ 7.371,51");
        assert_eq!(cards.tax_amount.formatted, "R$ 55,73");
        assert_eq!(cards.cards().len(), 7);
    }

    #[test]
    fn test_summary_cards_en_us() {
        let cards = SummaryCards::new(&result(), Locale::EnUs, Currency::Usd);
        assert_eq!(cards.final_net_value.title, "Final Net Value");
        assert_eq!(cards.final_net_value.formatted, "$7,315.78");
    }

    #[test]
    fn test_chart_series() {
        let r = result();
        let series = chart_series(&r);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].date, "nov. de 2026");
        assert_eq!(series[0].total_invested, 1500.0);
        assert_eq!(series[11].balance, r.final_gross_value);
    }

    #[test]
    fn test_render_table_limit() {
        let table = render_table(&result(), Locale::PtBr, Currency::Brl, Some(3));
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Data"));
        assert_eq!(lines.len(), 2 + 3 + 1);
        assert!(lines[2].contains("R$ 1.508,00"));
        assert_eq!(lines[5], "... (9 more months)");
    }

    #[test]
    fn test_render_summary_lists_every_card() {
        let text = render_summary(&SummaryCards::new(&result(), Locale::PtBr, Currency::Brl));
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("Valor Final Líquido"));
    }
}
