//! CSV export of the monthly series, and parsing an export back

use csv::{ReaderBuilder, Writer};
use log::info;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::format::{format_fixed, Locale};
use crate::projection::MonthlyData;

/// File name offered for downloads
pub const DEFAULT_EXPORT_FILE: &str = "simulacao_juros_compostos.csv";

/// Which header line to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Header {
    /// Machine-oriented column names
    #[default]
    Plain,
    /// Human-readable column names in the given locale
    Localized(Locale),
}

impl Header {
    pub fn columns(&self) -> [&'static str; 6] {
        match self {
            Header::Plain => ["month", "date", "total_invested", "interest", "total_interest", "balance"],
            Header::Localized(Locale::PtBr) => [
                "Mês",
                "Data",
                "Total Investido",
                "Juros do Mês",
                "Total de Juros",
                "Saldo Bruto",
            ],
            Header::Localized(Locale::EnUs) => [
                "Month",
                "Date",
                "Total Invested",
                "Monthly Interest",
                "Total Interest",
                "Gross Balance",
            ],
        }
    }
}

/// A row as read back from an export; amounts carry two decimals
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub month: u32,
    pub date: String,
    pub total_invested: f64,
    pub interest: f64,
    pub total_interest: f64,
    pub balance: f64,
}

/// Write the series as CSV, amounts fixed to two decimals
pub fn write_csv<W: Write>(writer: W, data: &[MonthlyData], header: Header) -> Result<(), ExportError> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(header.columns())?;

    for row in data {
        csv_writer.write_record([
            row.month.to_string(),
            row.date.clone(),
            format_fixed(row.total_invested),
            format_fixed(row.interest),
            format_fixed(row.total_interest),
            format_fixed(row.balance),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the series to a file
pub fn write_csv_file<P: AsRef<Path>>(path: P, data: &[MonthlyData], header: Header) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(file, data, header)?;
    info!("Wrote {} rows to {}", data.len(), path.display());
    Ok(())
}

/// Render the series as a CSV string
pub fn export_csv_string(data: &[MonthlyData], header: Header) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, data, header)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Parse an export (any header style) back into rows
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ExportRow>, ExportError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 6 {
            return Err(ExportError::Parse {
                line,
                reason: format!("expected 6 fields, found {}", record.len()),
            });
        }

        let number = |idx: usize| -> Result<f64, ExportError> {
            record[idx].trim().parse::<f64>().map_err(|e| ExportError::Parse {
                line,
                reason: format!("column {}: {}", idx + 1, e),
            })
        };

        let month = record[0].trim().parse::<u32>().map_err(|e| ExportError::Parse {
            line,
            reason: format!("column 1: {}", e),
        })?;

        rows.push(ExportRow {
            month,
            date: record[1].to_string(),
            total_invested: number(2)?,
            interest: number(3)?,
            total_interest: number(4)?,
            balance: number(5)?,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use chrono::NaiveDate;

    fn sample() -> Vec<MonthlyData> {
        let config = ProjectionConfig::anchored_at(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let params = SimulationParams { period: 36, ..Default::default() };
        ProjectionEngine::new(config).project(&params).monthly_data
    }

    #[test]
    fn test_plain_header_and_first_row() {
        let csv = export_csv_string(&sample(), Header::Plain).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("month,date,total_invested,interest,total_interest,balance"));
        assert_eq!(lines.next(), Some("1,nov. de 2026,1500.00,8.00,8.00,1508.00"));
        assert_eq!(csv.lines().count(), 37);
    }

    #[test]
    fn test_localized_header() {
        let csv = export_csv_string(&sample(), Header::Localized(Locale::PtBr)).unwrap();
        assert!(csv.starts_with("Mês,Data,Total Investido,Juros do Mês,Total de Juros,Saldo Bruto\n"));
    }

    #[test]
    fn test_round_trip_to_two_decimals() {
        let data = sample();
        let csv = export_csv_string(&data, Header::Localized(Locale::PtBr)).unwrap();
        let rows = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), data.len());
        for (row, original) in rows.iter().zip(&data) {
            assert_eq!(row.month, original.month);
            assert_eq!(row.date, original.date);
            assert!((row.total_invested - original.total_invested).abs() <= 0.005 + 1e-9);
            assert!((row.interest - original.interest).abs() <= 0.005 + 1e-9);
            assert!((row.total_interest - original.total_interest).abs() <= 0.005 + 1e-9);
            assert!((row.balance - original.balance).abs() <= 0.005 + 1e-9);
            assert_eq!(format_fixed(row.balance), format_fixed(original.balance));
        }
    }

    #[test]
    fn test_read_rejects_bad_number() {
        let csv = "month,date,total_invested,interest,total_interest,balance\n1,x,abc,0,0,0\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(ExportError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_empty_series_writes_header_only() {
        let csv = export_csv_string(&[], Header::Plain).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(read_csv(csv.as_bytes()).unwrap().is_empty());
    }
}
