//! Folding classified facts into one record per fiscal quarter.
//!
//! Each line item goes through the same steps: resolve its concept series,
//! classify every fact, keep the latest revision per period, write the
//! three-month facts straight into their quarter, and derive the fourth
//! quarters from annual and nine-month totals.
//!
//! Conflicts on one (quarter, line item) cell follow a single rule: a
//! reported value is never replaced by a derived one. Anything else is last
//! write wins.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use quarters_core::{
    ConceptSeries, FactPoint, PeriodClass, QuarterKey, classify, duration_days,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::line_items::LineItemSpec;
use crate::resolver::resolve;
use crate::synthesis::synthesize;

/// Where a cell's value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Disclosed directly as a three-month figure.
    Reported,
    /// Annual total less the nine-month figure.
    Derived,
}

/// One line item's value for one quarter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineValue {
    /// Value in the reported unit.
    pub value: f64,
    /// End date of the fact the value came from.
    pub period_end: NaiveDate,
    /// Reported or derived.
    pub origin: Origin,
}

/// All line item values for one fiscal quarter.
///
/// Line items with no value for the quarter are absent, never zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterRecord {
    /// Fiscal year and quarter.
    pub key: QuarterKey,
    /// End date of the fact that created the record.
    pub period_end: NaiveDate,
    /// Line item name to value.
    pub cells: BTreeMap<String, LineValue>,
}

impl QuarterRecord {
    fn new(key: QuarterKey, period_end: NaiveDate) -> Self {
        Self {
            key,
            period_end,
            cells: BTreeMap::new(),
        }
    }

    /// Value of a line item, if present.
    #[must_use]
    pub fn value(&self, line_item: &str) -> Option<f64> {
        self.cells.get(line_item).map(|cell| cell.value)
    }

    /// Full cell of a line item, if present.
    #[must_use]
    pub fn cell(&self, line_item: &str) -> Option<&LineValue> {
        self.cells.get(line_item)
    }

    /// Line items whose own period end differs from the record's.
    #[must_use]
    pub fn mismatched_dates(&self) -> Vec<&str> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.period_end != self.period_end)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Assembled quarters, ascending by key.
pub type QuarterMap = BTreeMap<QuarterKey, QuarterRecord>;

/// The facts of one series that survive classification and revision
/// de-duplication, one per slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedFacts {
    /// Full-year facts by fiscal year.
    pub annual: BTreeMap<i32, FactPoint>,
    /// Nine-month year-to-date facts by fiscal year.
    pub nine_month: BTreeMap<i32, FactPoint>,
    /// Three-month facts by quarter.
    pub quarterly: BTreeMap<QuarterKey, FactPoint>,
    /// Number of facts classified as other and dropped.
    pub discarded: usize,
}

impl ClassifiedFacts {
    /// Classifies every fact of a series.
    ///
    /// When several facts land in the same slot (the same period restated in
    /// later filings, or prior-year comparatives carrying the filing's fiscal
    /// year) the one with the latest end date wins, then the latest filed
    /// date. Remaining ties go to the longest span for annual slots and to
    /// the span nearest a nominal quarter or nine months otherwise, so a
    /// trailing-twelve-month fact labelled `Q1` or `Q3` never displaces the
    /// figure it sits next to.
    #[must_use]
    pub fn from_series(series: &ConceptSeries) -> Self {
        let mut classified = Self::default();
        for fact in series {
            match classify(fact) {
                PeriodClass::Annual => {
                    keep_latest(&mut classified.annual, fact.fiscal_year, fact, Span::Longest);
                }
                PeriodClass::NineMonth => keep_latest(
                    &mut classified.nine_month,
                    fact.fiscal_year,
                    fact,
                    Span::Nearest(NINE_MONTH_DAYS),
                ),
                PeriodClass::Quarterly => match fact.fiscal_period.quarter() {
                    Some(quarter) => keep_latest(
                        &mut classified.quarterly,
                        QuarterKey::new(fact.fiscal_year, quarter),
                        fact,
                        Span::Nearest(QUARTER_DAYS),
                    ),
                    None => classified.discarded += 1,
                },
                PeriodClass::Other => classified.discarded += 1,
            }
        }
        classified
    }
}

const QUARTER_DAYS: i64 = 91;
const NINE_MONTH_DAYS: i64 = 273;

/// Span preference for the last revision tie-break.
#[derive(Clone, Copy, Debug)]
enum Span {
    Longest,
    Nearest(i64),
}

impl Span {
    fn score(self, fact: &FactPoint) -> Option<i64> {
        duration_days(fact).map(|days| match self {
            Self::Longest => days,
            Self::Nearest(target) => -(days - target).abs(),
        })
    }
}

fn revision_rank(fact: &FactPoint, span: Span) -> (NaiveDate, Option<NaiveDate>, Option<i64>) {
    (fact.end, fact.filed, span.score(fact))
}

fn keep_latest<K: Ord>(slots: &mut BTreeMap<K, FactPoint>, key: K, fact: &FactPoint, span: Span) {
    match slots.get(&key) {
        Some(existing) if revision_rank(existing, span) >= revision_rank(fact, span) => {}
        _ => {
            slots.insert(key, fact.clone());
        }
    }
}

/// Builds [`QuarterRecord`]s one line item at a time.
#[derive(Debug, Default)]
pub struct PeriodAggregator {
    records: QuarterMap,
}

impl PeriodAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves, classifies and merges one line item.
    ///
    /// Returns the number of cells written.
    pub fn add_line_item<F>(&mut self, spec: &LineItemSpec, fact_access: F) -> usize
    where
        F: FnMut(&str) -> ConceptSeries,
    {
        let series = resolve(spec.candidates(), fact_access);
        if series.is_empty() {
            debug!(line_item = spec.name, "No facts for any candidate tag");
            return 0;
        }
        self.add_series(spec.name, &series)
    }

    /// Classifies and merges an already resolved series.
    ///
    /// Returns the number of cells written.
    pub fn add_series(&mut self, line_item: &str, series: &ConceptSeries) -> usize {
        let classified = ClassifiedFacts::from_series(series);
        let derived = synthesize(&classified.annual, &classified.nine_month);

        let mut written = 0;
        for (key, fact) in &classified.quarterly {
            written += usize::from(self.merge(line_item, *key, fact, Origin::Reported));
        }
        for fact in &derived {
            let key = QuarterKey::new(fact.fiscal_year, 4);
            written += usize::from(self.merge(line_item, key, fact, Origin::Derived));
        }

        debug!(
            line_item,
            tag = %series.tag,
            reported = classified.quarterly.len(),
            derived = derived.len(),
            discarded = classified.discarded,
            written,
            "Merged line item"
        );
        written
    }

    /// Writes one value into its quarter, creating the record if needed.
    ///
    /// A reported cell is kept when the incoming value is derived; every
    /// other collision overwrites. Returns whether the cell was written.
    pub fn merge(
        &mut self,
        line_item: &str,
        key: QuarterKey,
        fact: &FactPoint,
        origin: Origin,
    ) -> bool {
        let record = self
            .records
            .entry(key)
            .or_insert_with(|| QuarterRecord::new(key, fact.end));

        if let Some(existing) = record.cells.get(line_item) {
            if existing.origin == Origin::Reported && origin == Origin::Derived {
                debug!(line_item, %key, "Keeping reported value over derived one");
                return false;
            }
        }

        if fact.end != record.period_end {
            warn!(
                line_item,
                %key,
                record_end = %record.period_end,
                value_end = %fact.end,
                "Value period end differs from quarter period end"
            );
        }

        record.cells.insert(
            line_item.to_string(),
            LineValue {
                value: fact.value,
                period_end: fact.end,
                origin,
            },
        );
        true
    }

    /// Records built so far.
    #[must_use]
    pub const fn records(&self) -> &QuarterMap {
        &self.records
    }

    /// Consumes the aggregator.
    #[must_use]
    pub fn finish(self) -> QuarterMap {
        self.records
    }
}

/// Runs every line item through a fresh [`PeriodAggregator`].
///
/// `fact_access` maps a concept tag to its series and must return an empty
/// series for unknown tags.
pub fn aggregate<F>(line_items: &[LineItemSpec], mut fact_access: F) -> QuarterMap
where
    F: FnMut(&str) -> ConceptSeries,
{
    let mut aggregator = PeriodAggregator::new();
    for spec in line_items {
        aggregator.add_line_item(spec, &mut fact_access);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_items::INCOME_STATEMENT;
    use quarters_core::types::{US_GAAP, USD};
    use quarters_core::CompanyFacts;
    use quarters_core::FiscalPeriod::{self, FY, Q1, Q2, Q3, Q4};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn duration(
        tag: &str,
        value: f64,
        start: NaiveDate,
        end: NaiveDate,
        fy: i32,
        fp: FiscalPeriod,
    ) -> FactPoint {
        FactPoint::new(tag, value, end, fy, fp).with_start(start)
    }

    fn calendar_year(tag: &str, year: i32, quarters: [f64; 3], annual: f64) -> Vec<FactPoint> {
        vec![
            duration(tag, quarters[0], date(year, 1, 1), date(year, 3, 31), year, Q1),
            duration(tag, quarters[1], date(year, 4, 1), date(year, 6, 30), year, Q2),
            duration(tag, quarters[2], date(year, 7, 1), date(year, 9, 30), year, Q3),
            duration(tag, quarters.iter().sum(), date(year, 1, 1), date(year, 9, 30), year, Q3),
            duration(tag, annual, date(year, 1, 1), date(year, 12, 31), year, FY),
        ]
    }

    #[test]
    fn test_full_year_produces_four_quarters() {
        let facts = calendar_year("Revenues", 2023, [20.0, 25.0, 27.0], 100.0);
        let series = ConceptSeries::new("Revenues", facts);
        let mut aggregator = PeriodAggregator::new();
        assert_eq!(aggregator.add_series("Revenue", &series), 4);

        let records = aggregator.finish();
        assert_eq!(records.len(), 4);

        let q4 = &records[&QuarterKey::new(2023, 4)];
        assert_eq!(q4.value("Revenue"), Some(28.0));
        assert_eq!(q4.cell("Revenue").unwrap().origin, Origin::Derived);
        assert_eq!(q4.period_end, date(2023, 12, 31));

        let q3 = &records[&QuarterKey::new(2023, 3)];
        assert_eq!(q3.value("Revenue"), Some(27.0));
        assert_eq!(q3.cell("Revenue").unwrap().origin, Origin::Reported);
    }

    #[test]
    fn test_reported_beats_derived() {
        let mut aggregator = PeriodAggregator::new();
        let key = QuarterKey::new(2023, 4);
        let reported = duration("X", 30.0, date(2023, 10, 1), date(2023, 12, 31), 2023, Q4);
        let derived = FactPoint { value: 28.0, ..reported.clone() };

        assert!(aggregator.merge("Revenue", key, &reported, Origin::Reported));
        assert!(!aggregator.merge("Revenue", key, &derived, Origin::Derived));
        assert_eq!(aggregator.records()[&key].value("Revenue"), Some(30.0));
    }

    #[test]
    fn test_reported_replaces_derived() {
        let mut aggregator = PeriodAggregator::new();
        let key = QuarterKey::new(2023, 4);
        let derived = duration("X", 28.0, date(2023, 10, 1), date(2023, 12, 31), 2023, Q4);
        let reported = FactPoint { value: 30.0, ..derived.clone() };

        assert!(aggregator.merge("Revenue", key, &derived, Origin::Derived));
        assert!(aggregator.merge("Revenue", key, &reported, Origin::Reported));

        let cell = aggregator.records()[&key].cell("Revenue").copied().unwrap();
        assert_eq!(cell.value, 30.0);
        assert_eq!(cell.origin, Origin::Reported);
    }

    #[test]
    fn test_same_origin_is_last_write_wins() {
        let mut aggregator = PeriodAggregator::new();
        let key = QuarterKey::new(2022, 2);
        let first = duration("X", 1.0, date(2022, 4, 1), date(2022, 6, 30), 2022, Q2);
        let second = FactPoint { value: 2.0, ..first.clone() };

        aggregator.merge("Net Income", key, &first, Origin::Reported);
        aggregator.merge("Net Income", key, &second, Origin::Reported);

        let record = &aggregator.records()[&key];
        assert_eq!(record.value("Net Income"), Some(2.0));
        assert_eq!(record.cells.len(), 1);
    }

    #[test]
    fn test_record_date_comes_from_first_fact() {
        let mut aggregator = PeriodAggregator::new();
        let key = QuarterKey::new(2023, 1);
        let revenue = duration("A", 10.0, date(2023, 1, 1), date(2023, 4, 1), 2023, Q1);
        let tax = duration("B", 2.0, date(2023, 1, 1), date(2023, 3, 31), 2023, Q1);

        aggregator.merge("Revenue", key, &revenue, Origin::Reported);
        aggregator.merge("Income Tax", key, &tax, Origin::Reported);

        let record = &aggregator.records()[&key];
        assert_eq!(record.period_end, date(2023, 4, 1));
        assert_eq!(record.mismatched_dates(), vec!["Income Tax"]);
        assert_eq!(record.cell("Income Tax").unwrap().period_end, date(2023, 3, 31));
    }

    #[test]
    fn test_latest_revision_wins() {
        let original = duration("Revenues", 90.0, date(2023, 1, 1), date(2023, 12, 31), 2023, FY)
            .with_filed(date(2024, 2, 1));
        let amended = FactPoint {
            value: 95.0,
            filed: Some(date(2024, 6, 1)),
            ..original.clone()
        };
        // prior-year comparative reported in the FY2023 10-K
        let comparative =
            duration("Revenues", 80.0, date(2022, 1, 1), date(2022, 12, 31), 2023, FY)
                .with_filed(date(2024, 2, 1));

        let series = ConceptSeries::new("Revenues", vec![original, amended, comparative]);
        let classified = ClassifiedFacts::from_series(&series);

        assert_eq!(classified.annual.len(), 1);
        assert_eq!(classified.annual[&2023].value, 95.0);
    }

    #[rstest]
    #[case::quarter_first(false)]
    #[case::trailing_year_first(true)]
    fn test_quarterly_slot_prefers_three_month_span(#[case] reversed: bool) {
        let quarter = duration("Revenues", 20.0, date(2023, 1, 1), date(2023, 3, 31), 2023, Q1)
            .with_filed(date(2023, 5, 5));
        let trailing = duration("Revenues", 95.0, date(2022, 4, 1), date(2023, 3, 31), 2023, Q1)
            .with_filed(date(2023, 5, 5));
        let mut facts = vec![quarter, trailing];
        if reversed {
            facts.reverse();
        }

        let mut aggregator = PeriodAggregator::new();
        aggregator.add_series("Revenue", &ConceptSeries::new("Revenues", facts));
        let records = aggregator.finish();
        assert_eq!(records[&QuarterKey::new(2023, 1)].value("Revenue"), Some(20.0));
    }

    #[rstest]
    #[case::nine_months_first(false)]
    #[case::trailing_year_first(true)]
    fn test_nine_month_slot_prefers_nine_month_span(#[case] reversed: bool) {
        let mut facts = calendar_year("Revenues", 2023, [20.0, 25.0, 27.0], 100.0);
        // trailing twelve months to the end of Q3
        let trailing = duration("Revenues", 99.0, date(2022, 10, 1), date(2023, 9, 30), 2023, Q3);
        if reversed {
            facts.insert(0, trailing);
        } else {
            facts.push(trailing);
        }

        let series = ConceptSeries::new("Revenues", facts);
        let classified = ClassifiedFacts::from_series(&series);
        assert_eq!(classified.nine_month[&2023].value, 72.0);

        let mut aggregator = PeriodAggregator::new();
        aggregator.add_series("Revenue", &series);
        let records = aggregator.finish();
        assert_eq!(records[&QuarterKey::new(2023, 4)].value("Revenue"), Some(28.0));
    }

    #[rstest]
    #[case::annual_first(false)]
    #[case::fourth_quarter_first(true)]
    fn test_fy_labelled_fourth_quarter_keeps_annual_total(#[case] reversed: bool) {
        let filed = date(2024, 2, 1);
        let mut facts: Vec<FactPoint> = calendar_year("Revenues", 2023, [20.0, 25.0, 27.0], 100.0)
            .into_iter()
            .map(|fact| fact.with_filed(filed))
            .collect();
        // 10-Ks often tag the three-month fourth quarter with the annual label
        let fourth = duration("Revenues", 28.0, date(2023, 10, 1), date(2023, 12, 31), 2023, FY)
            .with_filed(filed);
        if reversed {
            facts.insert(0, fourth);
        } else {
            facts.push(fourth);
        }

        let series = ConceptSeries::new("Revenues", facts);
        let classified = ClassifiedFacts::from_series(&series);
        assert_eq!(classified.annual[&2023].value, 100.0);

        let mut aggregator = PeriodAggregator::new();
        aggregator.add_series("Revenue", &series);
        let records = aggregator.finish();
        let q4 = &records[&QuarterKey::new(2023, 4)];
        assert_eq!(q4.value("Revenue"), Some(100.0 - 72.0));
        assert_eq!(q4.cell("Revenue").unwrap().origin, Origin::Derived);
    }

    #[test]
    fn test_instants_and_half_years_are_discarded() {
        let instant = FactPoint::new("Assets", 5.0, date(2023, 6, 30), 2023, Q2);
        let half_year =
            duration("Revenues", 50.0, date(2023, 1, 1), date(2023, 6, 30), 2023, Q2);

        let series = ConceptSeries::new("Revenues", vec![instant, half_year]);
        let classified = ClassifiedFacts::from_series(&series);
        assert_eq!(classified.discarded, 2);
        assert!(classified.quarterly.is_empty());

        let mut aggregator = PeriodAggregator::new();
        assert_eq!(aggregator.add_series("Revenue", &series), 0);
        assert!(aggregator.records().is_empty());
    }

    #[test]
    fn test_aggregate_uses_fallback_tags() {
        let mut facts = CompanyFacts::new();
        for fact in calendar_year("CostOfGoodsAndServicesSold", 2023, [5.0, 6.0, 7.0], 25.0) {
            facts.insert(US_GAAP, USD, fact);
        }
        for fact in calendar_year("NetIncomeLoss", 2023, [1.0, 1.0, 1.0], 4.0) {
            facts.insert(US_GAAP, USD, fact);
        }

        let records = aggregate(&INCOME_STATEMENT, |tag| facts.usd_gaap_series(tag));
        let q4 = &records[&QuarterKey::new(2023, 4)];

        assert_eq!(q4.value("Cost of Revenue"), Some(7.0));
        assert_eq!(q4.value("Net Income"), Some(1.0));
        assert_eq!(q4.value("Revenue"), None);
        assert_eq!(q4.cells.len(), 2);
    }
}
