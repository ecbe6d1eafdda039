//! Latest annual figures for a fixed set of concepts per statement.

use chrono::NaiveDate;
use quarters_core::types::{US_GAAP, USD};
use quarters_core::{CompanyFacts, duration_days};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Unit used when a concept has no USD facts.
pub const SHARES: &str = "shares";

/// Form type of an annual report.
pub const ANNUAL_FORM: &str = "10-K";

/// Form type of a quarterly report.
pub const QUARTERLY_FORM: &str = "10-Q";

/// Financial statement a concept belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Income statement.
    IncomeStatement,
    /// Balance sheet.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl Statement {
    /// All statements in display order.
    pub const ALL: [Self; 3] = [Self::IncomeStatement, Self::BalanceSheet, Self::CashFlow];

    /// Title for display.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow",
        }
    }

    /// Concept tags and descriptions, in display order.
    #[must_use]
    pub const fn concepts(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::IncomeStatement => &[
                ("Revenues", "Total revenue"),
                (
                    "RevenueFromContractWithCustomerExcludingAssessedTax",
                    "Revenue from customer contracts",
                ),
                ("SalesRevenueNet", "Net sales revenue"),
                ("CostOfRevenue", "Cost of goods/services sold"),
                ("GrossProfit", "Gross profit (Revenue - Cost of Revenue)"),
                ("ResearchAndDevelopmentExpense", "R&D expenses"),
                ("SellingGeneralAndAdministrativeExpense", "SG&A expenses"),
                ("SellingAndMarketingExpense", "Sales and marketing expenses"),
                ("GeneralAndAdministrativeExpense", "G&A expenses"),
                ("OperatingExpenses", "Total operating expenses"),
                ("OperatingIncomeLoss", "Operating income/loss"),
                ("InterestExpense", "Interest expense"),
                ("NetIncomeLoss", "Net income/loss"),
            ],
            Self::BalanceSheet => &[
                ("Assets", "Total assets"),
                ("AssetsCurrent", "Current assets"),
                ("CashAndCashEquivalentsAtCarryingValue", "Cash and equivalents"),
                ("AccountsReceivableNetCurrent", "Accounts receivable"),
                ("InventoryNet", "Net inventory"),
                ("Liabilities", "Total liabilities"),
                ("LiabilitiesCurrent", "Current liabilities"),
                ("AccountsPayableCurrent", "Accounts payable"),
                ("StockholdersEquity", "Stockholders equity"),
            ],
            Self::CashFlow => &[
                (
                    "NetCashProvidedByUsedInOperatingActivities",
                    "Net cash from operations",
                ),
                (
                    "NetCashProvidedByUsedInInvestingActivities",
                    "Net cash from investing",
                ),
                (
                    "NetCashProvidedByUsedInFinancingActivities",
                    "Net cash from financing",
                ),
            ],
        }
    }
}

/// The most recent annual-report value of one concept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Concept tag.
    pub concept: String,
    /// Human-readable description.
    pub description: String,
    /// Value as reported.
    pub value: f64,
    /// End of the reporting period.
    pub period_end: NaiveDate,
    /// Filing date, if known.
    pub filed: Option<NaiveDate>,
    /// Form type.
    pub form: String,
}

impl SnapshotEntry {
    /// Whether the value is a share count or per-share amount and should not
    /// be scaled.
    #[must_use]
    pub fn is_per_share(&self) -> bool {
        self.concept.contains("SharesOutstanding") || self.concept.contains("PerShare")
    }

    /// Value in millions, except share counts and per-share amounts.
    #[must_use]
    pub fn display_value(&self) -> f64 {
        if self.is_per_share() {
            self.value
        } else {
            self.value / 1_000_000.0
        }
    }
}

/// Latest annual values for every statement that has any.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualSnapshot {
    /// Statements with at least one entry, in display order.
    pub statements: Vec<(Statement, Vec<SnapshotEntry>)>,
}

impl AnnualSnapshot {
    /// Builds the snapshot from a facts document.
    #[must_use]
    pub fn from_facts(facts: &CompanyFacts) -> Self {
        let statements = Statement::ALL
            .into_iter()
            .filter_map(|statement| {
                let entries: Vec<_> = statement
                    .concepts()
                    .iter()
                    .filter_map(|&(concept, description)| {
                        latest_annual(facts, concept, description)
                    })
                    .collect();
                (!entries.is_empty()).then_some((statement, entries))
            })
            .collect();

        Self { statements }
    }

    /// Returns true if no statement has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Entries of one statement.
    #[must_use]
    pub fn entries(&self, statement: Statement) -> &[SnapshotEntry] {
        self.statements
            .iter()
            .find(|(s, _)| *s == statement)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }
}

fn latest_annual(facts: &CompanyFacts, concept: &str, description: &str) -> Option<SnapshotEntry> {
    if !facts.has_tag(US_GAAP, concept) {
        info!(concept, "Concept not found in company facts");
        return None;
    }

    let mut series = facts.series(US_GAAP, concept, USD);
    if series.is_empty() {
        series = facts.series(US_GAAP, concept, SHARES);
    }

    // a 10-K's three-month fourth quarter shares the annual total's end date
    let fact = series
        .iter()
        .filter(|fact| fact.form == ANNUAL_FORM)
        .max_by_key(|fact| (fact.end, duration_days(fact)))?;

    Some(SnapshotEntry {
        concept: concept.to_string(),
        description: description.to_string(),
        value: fact.value,
        period_end: fact.end,
        filed: fact.filed,
        form: fact.form.clone(),
    })
}
