//! SEC API response types and their conversion into core types.

use chrono::NaiveDate;
use quarters_core::{CompanyFacts, CompanyIdentity, FactPoint, FiscalPeriod, Symbol};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{trace, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Company ticker information from SEC JSON.
///
/// The SEC returns `{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}, ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
    /// Company name
    title: String,
}

/// Finds the company behind a ticker, ignoring case.
pub(crate) fn find_company(
    tickers: &HashMap<String, CompanyTickerInfo>,
    symbol: &Symbol,
) -> Option<CompanyIdentity> {
    tickers
        .values()
        .find(|company| company.ticker.eq_ignore_ascii_case(symbol.as_str()))
        .map(|company| CompanyIdentity::new(symbol.clone(), &company.title, company.cik_str))
}

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyFactsResponse {
    #[serde(default)]
    cik: Option<u64>,
    #[serde(default)]
    entity_name: Option<String>,
    /// Facts organized by taxonomy and tag
    #[serde(default)]
    facts: HashMap<String, HashMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Deserialize)]
struct TagFacts {
    /// Units (USD, shares, etc.) containing the actual fact values
    #[serde(default)]
    units: HashMap<String, Vec<FactValue>>,
}

/// A single fact value with metadata.
#[derive(Debug, Deserialize)]
struct FactValue {
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    val: Option<f64>,
    #[serde(default)]
    fy: Option<i32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<String>,
}

impl FactValue {
    /// Converts to a [`FactPoint`], or `None` if a required field is missing
    /// or a date does not parse.
    fn into_fact_point(self, concept: &str) -> Option<FactPoint> {
        let end = NaiveDate::parse_from_str(self.end.as_deref()?, DATE_FORMAT).ok()?;
        let value = self.val?;
        let start = match self.start.as_deref() {
            Some(start) => Some(NaiveDate::parse_from_str(start, DATE_FORMAT).ok()?),
            None => None,
        };
        let fiscal_year = self.fy?;
        let fiscal_period: FiscalPeriod = self.fp.as_deref()?.parse().ok()?;
        let filed = self
            .filed
            .as_deref()
            .and_then(|filed| NaiveDate::parse_from_str(filed, DATE_FORMAT).ok());

        Some(FactPoint {
            concept: concept.to_string(),
            value,
            start,
            end,
            fiscal_year,
            fiscal_period,
            form: self.form.unwrap_or_default(),
            filed,
        })
    }
}

/// Parses a `companyfacts` response body.
///
/// A body that is not valid JSON, or not shaped like a facts document, is
/// logged and returned as an empty document. Facts without a value, end
/// date, fiscal year or period label, or with unparsable dates, are skipped.
pub fn parse_company_facts(body: &[u8], cik: &str) -> CompanyFacts {
    let response: CompanyFactsResponse = match serde_json::from_slice(body) {
        Ok(response) => response,
        Err(e) => {
            warn!(cik = %cik, error = %e, "Malformed company facts response, treating as empty");
            return CompanyFacts::new();
        }
    };

    let mut document = CompanyFacts {
        cik: response.cik.map(quarters_core::types::pad_cik),
        entity_name: response.entity_name,
        ..CompanyFacts::default()
    };

    let mut skipped = 0usize;
    for (taxonomy, tags) in response.facts {
        for (tag, tag_facts) in tags {
            for (unit, values) in tag_facts.units {
                for value in values {
                    match value.into_fact_point(&tag) {
                        Some(fact) => document.insert(&taxonomy, &unit, fact),
                        None => skipped += 1,
                    }
                }
            }
        }
    }

    if skipped > 0 {
        trace!(cik = %cik, skipped, "Skipped facts with missing fields or invalid dates");
    }
    if document.is_empty() {
        warn!(cik = %cik, "Company facts response contains no usable facts");
    }

    document
}
