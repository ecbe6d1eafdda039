//! Period classification for disclosed facts.
//!
//! A fact's fiscal period label is not authoritative about its duration: a
//! `Q3` value may be the three months ended in September or the nine months
//! year-to-date. [`classify`] combines the label with the actual span between
//! start and end dates.

use serde::{Deserialize, Serialize};

use crate::types::{FactPoint, FiscalPeriod};

/// Shortest span, in days, accepted as a three-month quarter.
pub const QUARTER_MIN_DAYS: i64 = 80;

/// Longest span, in days, accepted as a three-month quarter.
pub const QUARTER_MAX_DAYS: i64 = 100;

/// Duration class of a fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodClass {
    /// Full fiscal year.
    Annual,
    /// Nine-month cumulative figure reported with the third quarter.
    NineMonth,
    /// A single three-month quarter.
    Quarterly,
    /// Anything else (instants, half years, stub periods).
    Other,
}

/// Days between a fact's start and end dates, `None` for instants.
#[must_use]
pub fn duration_days(fact: &FactPoint) -> Option<i64> {
    fact.start
        .map(|start| fact.end.signed_duration_since(start).num_days())
}

/// Classifies a fact by label and duration.
///
/// Rules, first match wins:
///
/// 1. No start date: [`PeriodClass::Other`].
/// 2. Label `FY`: [`PeriodClass::Annual`].
/// 3. Label `Q3` spanning more than [`QUARTER_MAX_DAYS`]: [`PeriodClass::NineMonth`].
/// 4. Span within `QUARTER_MIN_DAYS..=QUARTER_MAX_DAYS`, or label `Q1`:
///    [`PeriodClass::Quarterly`]. First quarters are year-to-date and
///    three-month at once, so 52/53-week filers with long opening quarters
///    are still accepted.
/// 5. Otherwise [`PeriodClass::Other`].
#[must_use]
pub fn classify(fact: &FactPoint) -> PeriodClass {
    let Some(days) = duration_days(fact) else {
        return PeriodClass::Other;
    };

    match fact.fiscal_period {
        FiscalPeriod::FY => PeriodClass::Annual,
        FiscalPeriod::Q3 if days > QUARTER_MAX_DAYS => PeriodClass::NineMonth,
        FiscalPeriod::Q1 => PeriodClass::Quarterly,
        _ if (QUARTER_MIN_DAYS..=QUARTER_MAX_DAYS).contains(&days) => PeriodClass::Quarterly,
        _ => PeriodClass::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fact(start: Option<NaiveDate>, end: NaiveDate, fp: FiscalPeriod) -> FactPoint {
        let fact = FactPoint::new("Revenues", 1.0, end, 2023, fp);
        match start {
            Some(start) => fact.with_start(start),
            None => fact,
        }
    }

    #[rstest]
    // Full year
    #[case(Some(date(2023, 1, 1)), date(2023, 12, 31), FiscalPeriod::FY, PeriodClass::Annual)]
    // FY label wins even on a short span
    #[case(Some(date(2023, 10, 1)), date(2023, 12, 31), FiscalPeriod::FY, PeriodClass::Annual)]
    // Nine months year-to-date
    #[case(Some(date(2023, 1, 1)), date(2023, 9, 30), FiscalPeriod::Q3, PeriodClass::NineMonth)]
    // Three months ended September
    #[case(Some(date(2023, 7, 1)), date(2023, 9, 30), FiscalPeriod::Q3, PeriodClass::Quarterly)]
    #[case(Some(date(2023, 4, 1)), date(2023, 6, 30), FiscalPeriod::Q2, PeriodClass::Quarterly)]
    // Six months year-to-date is noise
    #[case(Some(date(2023, 1, 1)), date(2023, 6, 30), FiscalPeriod::Q2, PeriodClass::Other)]
    // 16-week opening quarter
    #[case(Some(date(2023, 9, 4)), date(2023, 12, 24), FiscalPeriod::Q1, PeriodClass::Quarterly)]
    // Point-in-time facts never classify
    #[case(None, date(2023, 12, 31), FiscalPeriod::FY, PeriodClass::Other)]
    #[case(None, date(2023, 3, 31), FiscalPeriod::Q1, PeriodClass::Other)]
    fn test_classify(
        #[case] start: Option<NaiveDate>,
        #[case] end: NaiveDate,
        #[case] fp: FiscalPeriod,
        #[case] expected: PeriodClass,
    ) {
        assert_eq!(classify(&fact(start, end, fp)), expected);
    }

    #[rstest]
    #[case(79, PeriodClass::Other)]
    #[case(80, PeriodClass::Quarterly)]
    #[case(91, PeriodClass::Quarterly)]
    #[case(100, PeriodClass::Quarterly)]
    #[case(101, PeriodClass::Other)]
    fn test_quarter_band_edges(#[case] days: i64, #[case] expected: PeriodClass) {
        let end = date(2023, 6, 30);
        let start = end - chrono::Duration::days(days);
        assert_eq!(classify(&fact(Some(start), end, FiscalPeriod::Q2)), expected);
    }

    #[test]
    fn test_q3_at_band_edge_is_quarterly() {
        let end = date(2023, 9, 30);
        let start = end - chrono::Duration::days(QUARTER_MAX_DAYS);
        assert_eq!(
            classify(&fact(Some(start), end, FiscalPeriod::Q3)),
            PeriodClass::Quarterly
        );
    }

    #[test]
    fn test_duration_days() {
        let f = fact(Some(date(2023, 1, 1)), date(2023, 12, 31), FiscalPeriod::FY);
        assert_eq!(duration_days(&f), Some(364));
        assert_eq!(duration_days(&fact(None, date(2023, 12, 31), FiscalPeriod::FY)), None);
    }
}
