//! Headline figures and margins for one quarter.

use serde::{Deserialize, Serialize};

use crate::aggregate::QuarterRecord;
use crate::line_items::{COST_OF_REVENUE, NET_INCOME, OPERATING_INCOME, REVENUE};
use quarters_core::QuarterKey;

/// Revenue, profit lines and margins (as percentages of revenue).
///
/// A figure is `None` when any of its inputs is missing, and every margin is
/// `None` when revenue is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    /// Quarter summarized.
    pub key: QuarterKey,
    /// Revenue.
    pub revenue: Option<f64>,
    /// Cost of revenue.
    pub cost_of_revenue: Option<f64>,
    /// Revenue less cost of revenue.
    pub gross_profit: Option<f64>,
    /// Gross profit over revenue.
    pub gross_margin: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Operating income over revenue.
    pub operating_margin: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Net income over revenue.
    pub net_margin: Option<f64>,
}

impl QuarterSummary {
    /// Summarizes a record.
    #[must_use]
    pub fn from_record(record: &QuarterRecord) -> Self {
        let revenue = record.value(REVENUE);
        let cost_of_revenue = record.value(COST_OF_REVENUE);
        let operating_income = record.value(OPERATING_INCOME);
        let net_income = record.value(NET_INCOME);

        let gross_profit = revenue.zip(cost_of_revenue).map(|(r, c)| r - c);

        Self {
            key: record.key,
            revenue,
            cost_of_revenue,
            gross_profit,
            gross_margin: margin(gross_profit, revenue),
            operating_income,
            operating_margin: margin(operating_income, revenue),
            net_income,
            net_margin: margin(net_income, revenue),
        }
    }
}

fn margin(numerator: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    match (numerator, revenue) {
        (Some(n), Some(r)) if r != 0.0 => Some(n / r * 100.0),
        _ => None,
    }
}
