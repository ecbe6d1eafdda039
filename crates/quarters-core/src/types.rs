//! Core data types for XBRL company facts.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`CompanyIdentity`] - Name and CIK resolved from a ticker
//! - [`FiscalPeriod`] - Issuer-reported period label (Q1-Q4, FY)
//! - [`FactPoint`] - One disclosed value for one concept
//! - [`ConceptSeries`] - All facts for one concept tag
//! - [`CompanyFacts`] - Taxonomy -> tag -> unit -> facts document
//! - [`QuarterKey`] - Fiscal (year, quarter) index of the output table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// The US-GAAP taxonomy namespace.
pub const US_GAAP: &str = "us-gaap";

/// The unit key for US dollar denominated facts.
pub const USD: &str = "USD";

/// A trading symbol/ticker.
///
/// Symbols are trimmed and uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A company resolved from a ticker symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIdentity {
    /// Ticker the identity was resolved from.
    pub symbol: Symbol,
    /// Registrant display name.
    pub name: String,
    /// SEC Central Index Key, zero-padded to 10 digits.
    pub cik: String,
}

impl CompanyIdentity {
    /// Creates a company identity, zero-padding the CIK.
    #[must_use]
    pub fn new(symbol: Symbol, name: impl Into<String>, cik: impl fmt::Display) -> Self {
        Self {
            symbol,
            name: name.into(),
            cik: pad_cik(cik),
        }
    }
}

/// Zero-pads a CIK to the 10 digits the EDGAR API expects.
#[must_use]
pub fn pad_cik(cik: impl fmt::Display) -> String {
    format!("{:0>10}", cik.to_string())
}

/// Fiscal period label attached to a fact by the issuer.
///
/// The label says which period a figure belongs to; it does not say how
/// long that period is. A `Q3` fact may cover three or nine months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// First fiscal quarter.
    Q1,
    /// Second fiscal quarter.
    Q2,
    /// Third fiscal quarter.
    Q3,
    /// Fourth fiscal quarter.
    Q4,
    /// Full fiscal year.
    FY,
}

impl FiscalPeriod {
    /// Quarter number (1-4) for quarter labels, `None` for `FY`.
    #[must_use]
    pub const fn quarter(self) -> Option<u8> {
        match self {
            Self::Q1 => Some(1),
            Self::Q2 => Some(2),
            Self::Q3 => Some(3),
            Self::Q4 => Some(4),
            Self::FY => None,
        }
    }

    /// Label for a quarter number, `None` outside 1-4.
    #[must_use]
    pub const fn from_quarter(quarter: u8) -> Option<Self> {
        match quarter {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// The label as EDGAR writes it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::FY => "FY",
        }
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FiscalPeriod {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            "FY" => Ok(Self::FY),
            other => Err(DataError::Parse(format!("Unknown fiscal period: {other}"))),
        }
    }
}

/// One disclosed value for one concept.
///
/// `start` is `None` for point-in-time (balance sheet style) facts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactPoint {
    /// Concept tag the value was reported under.
    pub concept: String,
    /// Reported value, in the unit of the series it came from.
    pub value: f64,
    /// Start of the reporting period.
    pub start: Option<NaiveDate>,
    /// End of the reporting period.
    pub end: NaiveDate,
    /// Fiscal year of the filing.
    pub fiscal_year: i32,
    /// Fiscal period label of the filing.
    pub fiscal_period: FiscalPeriod,
    /// Filing form type (e.g. "10-K", "10-Q").
    pub form: String,
    /// Date the filing was accepted.
    pub filed: Option<NaiveDate>,
}

impl FactPoint {
    /// Creates a point-in-time fact with required fields.
    #[must_use]
    pub fn new(
        concept: impl Into<String>,
        value: f64,
        end: NaiveDate,
        fiscal_year: i32,
        fiscal_period: FiscalPeriod,
    ) -> Self {
        Self {
            concept: concept.into(),
            value,
            start: None,
            end,
            fiscal_year,
            fiscal_period,
            form: String::new(),
            filed: None,
        }
    }

    /// Sets the period start date.
    #[must_use]
    pub const fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the filing form type.
    #[must_use]
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = form.into();
        self
    }

    /// Sets the filed-on date.
    #[must_use]
    pub const fn with_filed(mut self, filed: NaiveDate) -> Self {
        self.filed = Some(filed);
        self
    }

    /// Returns true if this is a point-in-time fact.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.start.is_none()
    }
}

/// All facts reported under one concept tag, in source order.
///
/// Not de-duplicated: the same period may appear once per filing that
/// disclosed it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptSeries {
    /// Concept tag shared by every fact in the series.
    pub tag: String,
    /// Facts in the order the source returned them.
    pub facts: Vec<FactPoint>,
}

impl ConceptSeries {
    /// Creates a series for a tag.
    #[must_use]
    pub fn new(tag: impl Into<String>, facts: Vec<FactPoint>) -> Self {
        Self {
            tag: tag.into(),
            facts,
        }
    }

    /// Creates an empty series for a tag.
    #[must_use]
    pub fn empty(tag: impl Into<String>) -> Self {
        Self::new(tag, Vec::new())
    }

    /// Returns the number of facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if there are no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Returns an iterator over the facts.
    pub fn iter(&self) -> impl Iterator<Item = &FactPoint> {
        self.facts.iter()
    }
}

impl<'a> IntoIterator for &'a ConceptSeries {
    type Item = &'a FactPoint;
    type IntoIter = std::slice::Iter<'a, FactPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

/// Facts for one tag, keyed by unit.
pub type UnitFacts = HashMap<String, Vec<FactPoint>>;

/// Tags within one taxonomy.
pub type TaxonomyFacts = HashMap<String, UnitFacts>;

/// Every fact a company has filed, organized by taxonomy, tag and unit.
///
/// Lookups never fail: a missing taxonomy, tag or unit yields an empty
/// [`ConceptSeries`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFacts {
    /// Registrant CIK, if the source reported one.
    pub cik: Option<String>,
    /// Registrant name, if the source reported one.
    pub entity_name: Option<String>,
    /// Taxonomy -> tag -> unit -> facts.
    pub facts: HashMap<String, TaxonomyFacts>,
}

impl CompanyFacts {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one fact under the given taxonomy, tag and unit.
    pub fn insert(&mut self, taxonomy: &str, unit: &str, fact: FactPoint) {
        self.facts
            .entry(taxonomy.to_string())
            .or_default()
            .entry(fact.concept.clone())
            .or_default()
            .entry(unit.to_string())
            .or_default()
            .push(fact);
    }

    /// Returns the facts for a taxonomy, tag and unit.
    #[must_use]
    pub fn series(&self, taxonomy: &str, tag: &str, unit: &str) -> ConceptSeries {
        let facts = self
            .facts
            .get(taxonomy)
            .and_then(|tags| tags.get(tag))
            .and_then(|units| units.get(unit))
            .cloned()
            .unwrap_or_default();
        ConceptSeries::new(tag, facts)
    }

    /// Returns the US-GAAP, USD denominated facts for a tag.
    #[must_use]
    pub fn usd_gaap_series(&self, tag: &str) -> ConceptSeries {
        self.series(US_GAAP, tag, USD)
    }

    /// Returns true if the tag exists in the taxonomy under any unit.
    #[must_use]
    pub fn has_tag(&self, taxonomy: &str, tag: &str) -> bool {
        self.facts
            .get(taxonomy)
            .is_some_and(|tags| tags.contains_key(tag))
    }

    /// Total number of facts across every taxonomy, tag and unit.
    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.facts
            .values()
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Returns true if the document holds no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fact_count() == 0
    }
}

/// Fiscal (year, quarter) index of a reconstructed quarter.
///
/// Ordering is by fiscal year, then quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuarterKey {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Quarter number, 1-4.
    pub quarter: u8,
}

impl QuarterKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(fiscal_year: i32, quarter: u8) -> Self {
        Self {
            fiscal_year,
            quarter,
        }
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.fiscal_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new(" aapl ");
        assert_eq!(symbol.as_str(), "AAPL");
        assert!(Symbol::new("  ").is_empty());
    }

    #[test]
    fn test_cik_padding() {
        let identity = CompanyIdentity::new(Symbol::new("AAPL"), "Apple Inc.", 320193);
        assert_eq!(identity.cik, "0000320193");
        assert_eq!(pad_cik("0000320193"), "0000320193");
    }

    #[rstest]
    #[case("Q1", FiscalPeriod::Q1, Some(1))]
    #[case("q2", FiscalPeriod::Q2, Some(2))]
    #[case("Q3", FiscalPeriod::Q3, Some(3))]
    #[case("Q4", FiscalPeriod::Q4, Some(4))]
    #[case("FY", FiscalPeriod::FY, None)]
    fn test_fiscal_period_parse(
        #[case] label: &str,
        #[case] expected: FiscalPeriod,
        #[case] quarter: Option<u8>,
    ) {
        let parsed: FiscalPeriod = label.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.quarter(), quarter);
    }

    #[test]
    fn test_fiscal_period_rejects_unknown_label() {
        assert!("H1".parse::<FiscalPeriod>().is_err());
        assert_eq!(FiscalPeriod::from_quarter(5), None);
        assert_eq!(FiscalPeriod::from_quarter(4), Some(FiscalPeriod::Q4));
    }

    #[test]
    fn test_company_facts_missing_lookups_are_empty() {
        let mut facts = CompanyFacts::new();
        facts.insert(
            US_GAAP,
            USD,
            FactPoint::new("NetIncomeLoss", 10.0, date(2023, 12, 31), 2023, FiscalPeriod::FY),
        );

        assert_eq!(facts.usd_gaap_series("NetIncomeLoss").len(), 1);
        assert!(facts.usd_gaap_series("Revenues").is_empty());
        assert!(facts.series("dei", "NetIncomeLoss", USD).is_empty());
        assert!(facts.series(US_GAAP, "NetIncomeLoss", "shares").is_empty());
        assert!(facts.has_tag(US_GAAP, "NetIncomeLoss"));
        assert_eq!(facts.fact_count(), 1);
    }

    #[test]
    fn test_quarter_key_ordering_and_display() {
        let mut keys = vec![
            QuarterKey::new(2023, 3),
            QuarterKey::new(2024, 1),
            QuarterKey::new(2023, 4),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                QuarterKey::new(2023, 3),
                QuarterKey::new(2023, 4),
                QuarterKey::new(2024, 1)
            ]
        );
        assert_eq!(QuarterKey::new(2023, 4).to_string(), "Q4 2023");
    }
}
