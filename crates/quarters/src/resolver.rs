//! Concept tag resolution.

use quarters_core::{CompanyFacts, ConceptSeries};
use tracing::trace;

/// Returns the series of the first candidate tag that has any facts.
///
/// Candidates are tried in order and never merged: once a tag yields data the
/// remaining ones are ignored, even if their coverage is wider. When no
/// candidate has data the result is an empty series named after the first
/// candidate.
pub fn resolve<'a, I, F>(candidates: I, mut fact_access: F) -> ConceptSeries
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str) -> ConceptSeries,
{
    let mut first = None;
    for tag in candidates {
        first.get_or_insert(tag);
        let series = fact_access(tag);
        if !series.is_empty() {
            trace!(tag, facts = series.len(), "Resolved concept");
            return series;
        }
        trace!(tag, "No facts for candidate tag");
    }
    ConceptSeries::empty(first.unwrap_or_default())
}

/// [`resolve`] against the US-GAAP, USD facts of one document.
pub fn resolve_in<'a, I>(candidates: I, facts: &CompanyFacts) -> ConceptSeries
where
    I: IntoIterator<Item = &'a str>,
{
    resolve(candidates, |tag| facts.usd_gaap_series(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quarters_core::types::{US_GAAP, USD};
    use quarters_core::{FactPoint, FiscalPeriod};

    fn fact(tag: &str, value: f64) -> FactPoint {
        FactPoint::new(
            tag,
            value,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            2023,
            FiscalPeriod::FY,
        )
    }

    #[test]
    fn test_falls_back_to_alternative() {
        let mut facts = CompanyFacts::new();
        facts.insert(US_GAAP, USD, fact("CostOfGoodsAndServicesSold", 5.0));
        facts.insert(US_GAAP, USD, fact("CostOfGoodsSold", 9.0));

        let series = resolve_in(
            ["CostOfRevenue", "CostOfGoodsAndServicesSold", "CostOfGoodsSold"],
            &facts,
        );
        assert_eq!(series.tag, "CostOfGoodsAndServicesSold");
        assert_eq!(series.facts, facts.usd_gaap_series("CostOfGoodsAndServicesSold").facts);
    }

    #[test]
    fn test_primary_wins_even_when_sparser() {
        let mut facts = CompanyFacts::new();
        facts.insert(US_GAAP, USD, fact("Revenues", 1.0));
        facts.insert(US_GAAP, USD, fact("SalesRevenueNet", 2.0));
        facts.insert(US_GAAP, USD, fact("SalesRevenueNet", 3.0));

        let series = resolve_in(["Revenues", "SalesRevenueNet"], &facts);
        assert_eq!(series.tag, "Revenues");
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_no_candidate_yields_empty_series() {
        let series = resolve_in(["InterestExpense"], &CompanyFacts::new());
        assert!(series.is_empty());
        assert_eq!(series.tag, "InterestExpense");

        let none = resolve(std::iter::empty(), |_| unreachable!());
        assert!(none.is_empty());
    }

    #[test]
    fn test_stops_at_first_hit() {
        let mut asked = Vec::new();
        let series = resolve(["A", "B", "C"], |tag| {
            asked.push(tag.to_string());
            if tag == "B" {
                ConceptSeries::new(tag, vec![fact(tag, 1.0)])
            } else {
                ConceptSeries::empty(tag)
            }
        });
        assert_eq!(series.tag, "B");
        assert_eq!(asked, vec!["A", "B"]);
    }
}
