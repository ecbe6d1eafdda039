//! Ordering assembled quarters into a table and exporting it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::NaiveDate;
use polars::prelude::*;
use quarters_core::{DataError, QuarterKey, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::QuarterMap;
use crate::line_items::LineItemSpec;

/// Marker printed for a line item with no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Divisor applied to values for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Values as reported.
    #[default]
    Units,
    /// Thousands.
    Thousands,
    /// Millions.
    Millions,
}

impl Scale {
    /// Number every value is divided by.
    #[must_use]
    pub const fn divisor(self) -> f64 {
        match self {
            Self::Units => 1.0,
            Self::Thousands => 1_000.0,
            Self::Millions => 1_000_000.0,
        }
    }

    /// Applies the scale to a value.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        value / self.divisor()
    }
}

impl FromStr for Scale {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "units" | "unit" | "1" => Ok(Self::Units),
            "thousands" | "k" => Ok(Self::Thousands),
            "millions" | "m" => Ok(Self::Millions),
            other => Err(DataError::InvalidParameter(format!("Unknown scale: {other}"))),
        }
    }
}

/// One output row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Fiscal year and quarter.
    pub key: QuarterKey,
    /// Period end date.
    pub period_end: NaiveDate,
    /// One value per column, `None` when not available.
    pub values: Vec<Option<f64>>,
}

/// Quarters ordered most recent first, one column per line item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyTable {
    /// Line item names in declared order.
    pub columns: Vec<String>,
    /// Rows, descending by fiscal year then quarter.
    pub rows: Vec<Row>,
}

/// Orders records descending by (fiscal year, quarter) and projects the
/// line item columns.
#[must_use]
pub fn build(records: &QuarterMap, line_items: &[LineItemSpec]) -> QuarterlyTable {
    let columns = line_items.iter().map(|spec| spec.name.to_string()).collect();
    let rows = records
        .values()
        .rev()
        .map(|record| Row {
            key: record.key,
            period_end: record.period_end,
            values: line_items
                .iter()
                .map(|spec| record.value(spec.name))
                .collect(),
        })
        .collect();

    QuarterlyTable { columns, rows }
}

impl QuarterlyTable {
    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent row.
    #[must_use]
    pub fn latest(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Value of a named column in a row.
    #[must_use]
    pub fn value(&self, row: &Row, column: &str) -> Option<f64> {
        let index = self.columns.iter().position(|name| name == column)?;
        row.values.get(index).copied().flatten()
    }

    /// Converts to a DataFrame with columns `period`, `period_end` (Date)
    /// and one nullable `f64` column per line item, values scaled.
    pub fn to_dataframe(&self, scale: Scale) -> Result<DataFrame> {
        let periods: Vec<String> = self.rows.iter().map(|row| row.key.to_string()).collect();
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| DataError::Other("Invalid epoch".to_string()))?;
        let days: Vec<i32> = self
            .rows
            .iter()
            .map(|row| (row.period_end - epoch).num_days() as i32)
            .collect();

        let period_end = Column::new("period_end".into(), days)
            .cast(&DataType::Date)
            .map_err(|e| DataError::Export(e.to_string()))?;

        let mut columns = Vec::with_capacity(self.columns.len() + 2);
        columns.push(Column::new("period".into(), periods));
        columns.push(period_end);
        for (index, name) in self.columns.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|row| row.values.get(index).copied().flatten().map(|v| scale.apply(v)))
                .collect();
            columns.push(Column::new(name.as_str().into(), values));
        }

        DataFrame::new(columns).map_err(|e| DataError::Export(e.to_string()))
    }

    /// CSV with a header row; missing values are empty fields.
    pub fn to_csv(&self, scale: Scale) -> Result<String> {
        let mut df = self.to_dataframe(scale)?;
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| DataError::Export(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| DataError::Export(e.to_string()))
    }

    /// JSON array of `{period, fiscal_year, quarter, period_end, values}`
    /// objects, most recent first, missing values as `null`.
    pub fn to_json(&self, scale: Scale) -> Result<String> {
        #[derive(Serialize)]
        struct JsonRow<'a> {
            period: String,
            fiscal_year: i32,
            quarter: u8,
            period_end: NaiveDate,
            values: BTreeMap<&'a str, Option<f64>>,
        }

        let rows: Vec<JsonRow<'_>> = self
            .rows
            .iter()
            .map(|row| JsonRow {
                period: row.key.to_string(),
                fiscal_year: row.key.fiscal_year,
                quarter: row.key.quarter,
                period_end: row.period_end,
                values: self
                    .columns
                    .iter()
                    .zip(row.values.iter().copied())
                    .map(|(name, value)| (name.as_str(), value.map(|v| scale.apply(v))))
                    .collect(),
            })
            .collect();

        serde_json::to_string_pretty(&rows).map_err(|e| DataError::Export(e.to_string()))
    }

    /// Fixed-width text, one row per quarter, `N/A` for missing values.
    #[must_use]
    pub fn render_text(&self, scale: Scale) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.values
                    .iter()
                    .map(|value| match value {
                        Some(v) => format_amount(scale.apply(*v)),
                        None => NOT_AVAILABLE.to_string(),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(String::len)
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:<8} {:<10}", "Period", "Period End");
        for (name, width) in self.columns.iter().zip(widths.iter().copied()) {
            let _ = write!(out, "  {name:>width$}");
        }
        out.push('\n');

        for (row, values) in self.rows.iter().zip(&cells) {
            let _ = write!(
                out,
                "{:<8} {:<10}",
                row.key.to_string(),
                row.period_end.format("%Y-%m-%d")
            );
            for (value, width) in values.iter().zip(widths.iter().copied()) {
                let _ = write!(out, "  {value:>width$}");
            }
            out.push('\n');
        }
        out
    }
}

/// Formats a value with thousands separators and two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
