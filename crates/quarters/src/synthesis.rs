//! Fourth quarter derivation.
//!
//! Filers report three-month figures for Q1 to Q3 but never for Q4. The
//! fourth quarter is the annual total less the nine-month year-to-date
//! figure filed with Q3.

use std::collections::BTreeMap;

use quarters_core::{FactPoint, FiscalPeriod};
use tracing::trace;

/// Derives one Q4 fact for every fiscal year present in both maps.
///
/// The derived fact takes the annual fact's concept, end date, form and
/// filed date, and starts the day after the nine-month period ends. Years
/// with only one of the two figures produce nothing. Values are subtracted
/// in the unit they were reported in; for whole-dollar amounts
/// `nine_month.value + q4.value == annual.value` holds exactly.
#[must_use]
pub fn synthesize(
    annual: &BTreeMap<i32, FactPoint>,
    nine_month: &BTreeMap<i32, FactPoint>,
) -> Vec<FactPoint> {
    annual
        .iter()
        .filter_map(|(&year, annual)| {
            let nine_month = nine_month.get(&year)?;
            let value = annual.value - nine_month.value;
            trace!(
                concept = %annual.concept,
                year,
                annual = annual.value,
                nine_month = nine_month.value,
                value,
                "Derived fourth quarter"
            );

            Some(FactPoint {
                concept: annual.concept.clone(),
                value,
                start: nine_month.end.succ_opt(),
                end: annual.end,
                fiscal_year: year,
                fiscal_period: FiscalPeriod::Q4,
                form: annual.form.clone(),
                filed: annual.filed,
            })
        })
        .collect()
}
