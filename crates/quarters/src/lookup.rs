//! Single-period lookup of one concept.

use std::str::FromStr;

use chrono::NaiveDate;
use quarters_core::{CompanyFacts, ConceptSeries, DataError, FactPoint, Result, duration_days};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::snapshot::{ANNUAL_FORM, QUARTERLY_FORM};

/// Tags tried, in order, when the requested concept is `Revenues`.
pub const REVENUE_TAGS: [&str; 3] = [
    "RevenueFromContractWithCustomerExcludingAssessedTax",
    "SalesRevenueNet",
    "Revenues",
];

/// Annual (10-K) or quarterly (10-Q) filings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Annual reports.
    #[default]
    Annual,
    /// Quarterly reports.
    Quarterly,
}

impl PeriodType {
    /// Form type filed for this period.
    #[must_use]
    pub const fn form(self) -> &'static str {
        match self {
            Self::Annual => ANNUAL_FORM,
            Self::Quarterly => QUARTERLY_FORM,
        }
    }
}

impl FromStr for PeriodType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "quarterly" => Ok(Self::Quarterly),
            other => Err(DataError::InvalidParameter(format!(
                "Unknown period type: {other}"
            ))),
        }
    }
}

/// What to look up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodQuery {
    /// Requested concept tag.
    pub concept: String,
    /// Annual or quarterly filings.
    pub period_type: PeriodType,
    /// Periods back from the most recent, 0 for the latest.
    pub offset: usize,
    /// Tags tried after `concept`, in order.
    pub alternatives: Vec<String>,
}

impl PeriodQuery {
    /// Latest annual value of a concept.
    #[must_use]
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            period_type: PeriodType::Annual,
            offset: 0,
            alternatives: Vec::new(),
        }
    }

    /// Sets the period type.
    #[must_use]
    pub const fn with_period_type(mut self, period_type: PeriodType) -> Self {
        self.period_type = period_type;
        self
    }

    /// Sets how many periods back to go.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Adds a fallback tag.
    #[must_use]
    pub fn with_alternative(mut self, tag: impl Into<String>) -> Self {
        self.alternatives.push(tag.into());
        self
    }

    /// Tags to try, in order. `Revenues` expands to [`REVENUE_TAGS`].
    #[must_use]
    pub fn candidates(&self) -> Vec<&str> {
        if self.concept == "Revenues" && self.alternatives.is_empty() {
            return REVENUE_TAGS.to_vec();
        }
        std::iter::once(self.concept.as_str())
            .chain(self.alternatives.iter().map(String::as_str))
            .collect()
    }
}

/// One value found by [`find_period`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    /// Value as reported.
    pub value: f64,
    /// End of the reporting period.
    pub end_date: NaiveDate,
    /// Filing date, if known.
    pub filed: Option<NaiveDate>,
    /// Form type matched.
    pub form: String,
    /// Tag the value was found under.
    pub concept_used: String,
}

/// Finds the `offset`-th most recent USD value of the first candidate tag
/// that has one for the requested form type.
///
/// A tag with too few filings of that form is skipped in favour of the
/// next candidate.
#[must_use]
pub fn find_period(facts: &CompanyFacts, query: &PeriodQuery) -> Option<PeriodValue> {
    let form = query.period_type.form();

    query.candidates().into_iter().find_map(|tag| {
        let series = facts.usd_gaap_series(tag);
        let fact = most_recent_first(&series, query.period_type)
            .into_iter()
            .filter(|fact| fact.form == form)
            .nth(query.offset);

        match fact {
            Some(fact) => Some(PeriodValue {
                value: fact.value,
                end_date: fact.end,
                filed: fact.filed,
                form: form.to_string(),
                concept_used: tag.to_string(),
            }),
            None => {
                debug!(tag, form, offset = query.offset, "No matching period");
                None
            }
        }
    })
}

/// Facts by end date, most recent first. On a shared end date annual
/// queries take the longest span, so a 10-K's three-month fourth quarter
/// sorts after the full-year total.
fn most_recent_first(series: &ConceptSeries, period_type: PeriodType) -> Vec<&FactPoint> {
    let mut facts: Vec<&FactPoint> = series.iter().collect();
    match period_type {
        PeriodType::Annual => {
            facts.sort_by(|a, b| (b.end, duration_days(b)).cmp(&(a.end, duration_days(a))));
        }
        PeriodType::Quarterly => facts.sort_by(|a, b| b.end.cmp(&a.end)),
    }
    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarters_core::types::{US_GAAP, USD};
    use quarters_core::{FactPoint, FiscalPeriod};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> CompanyFacts {
        let mut facts = CompanyFacts::new();
        for (tag, value, end, fp, form) in [
            ("SalesRevenueNet", 200.0, date(2017, 12, 31), FiscalPeriod::FY, "10-K"),
            ("SalesRevenueNet", 180.0, date(2016, 12, 31), FiscalPeriod::FY, "10-K"),
            ("SalesRevenueNet", 50.0, date(2017, 9, 30), FiscalPeriod::Q3, "10-Q"),
            ("NetIncomeLoss", 20.0, date(2023, 12, 31), FiscalPeriod::FY, "10-K"),
            ("NetIncomeLoss", 6.0, date(2024, 3, 31), FiscalPeriod::Q1, "10-Q"),
            ("NetIncomeLoss", 5.0, date(2023, 9, 30), FiscalPeriod::Q3, "10-Q"),
        ] {
            facts.insert(
                US_GAAP,
                USD,
                FactPoint::new(tag, value, end, 2023, fp).with_form(form),
            );
        }
        facts
    }

    #[test]
    fn test_revenue_alternatives() {
        let facts = sample();
        let found = find_period(&facts, &PeriodQuery::new("Revenues")).unwrap();
        assert_eq!(found.concept_used, "SalesRevenueNet");
        assert_eq!(found.value, 200.0);
        assert_eq!(found.form, "10-K");

        let previous = find_period(&facts, &PeriodQuery::new("Revenues").with_offset(1)).unwrap();
        assert_eq!(previous.value, 180.0);
        assert!(find_period(&facts, &PeriodQuery::new("Revenues").with_offset(2)).is_none());
    }

    #[test]
    fn test_quarterly_offset() {
        let facts = sample();
        let query = PeriodQuery::new("NetIncomeLoss").with_period_type(PeriodType::Quarterly);

        assert_eq!(find_period(&facts, &query).unwrap().value, 6.0);
        let older = find_period(&facts, &query.clone().with_offset(1)).unwrap();
        assert_eq!(older.value, 5.0);
        assert_eq!(older.end_date, date(2023, 9, 30));
    }

    #[test]
    fn test_annual_total_sorts_before_fourth_quarter() {
        let end = date(2023, 12, 31);
        let fourth = FactPoint::new("Revenues", 28.0, end, 2023, FiscalPeriod::FY)
            .with_start(date(2023, 10, 1))
            .with_form("10-K");
        let annual = FactPoint::new("Revenues", 100.0, end, 2023, FiscalPeriod::FY)
            .with_start(date(2023, 1, 1))
            .with_form("10-K");

        let mut facts = CompanyFacts::new();
        facts.insert(US_GAAP, USD, fourth);
        facts.insert(US_GAAP, USD, annual);

        let found = find_period(&facts, &PeriodQuery::new("Revenues")).unwrap();
        assert_eq!(found.concept_used, "Revenues");
        assert_eq!(found.value, 100.0);
    }

    #[test]
    fn test_custom_alternatives() {
        let facts = sample();
        let query = PeriodQuery::new("ProfitLoss").with_alternative("NetIncomeLoss");
        assert_eq!(query.candidates(), vec!["ProfitLoss", "NetIncomeLoss"]);

        let found = find_period(&facts, &query).unwrap();
        assert_eq!(found.concept_used, "NetIncomeLoss");
        assert!(find_period(&facts, &PeriodQuery::new("ProfitLoss")).is_none());
    }

    #[test]
    fn test_period_type_parse() {
        assert_eq!("Quarterly".parse::<PeriodType>().unwrap(), PeriodType::Quarterly);
        assert_eq!(PeriodType::Annual.form(), "10-K");
        assert!("monthly".parse::<PeriodType>().is_err());
    }
}
