//! The income statement lines and the concept tags each may be reported under.

/// Display name of the revenue line.
pub const REVENUE: &str = "Revenue";
/// Display name of the cost of revenue line.
pub const COST_OF_REVENUE: &str = "Cost of Revenue";
/// Display name of the operating income line.
pub const OPERATING_INCOME: &str = "Operating Income";
/// Display name of the net income line.
pub const NET_INCOME: &str = "Net Income";

/// One named row of the income statement.
///
/// `primary` is tried first, then `alternatives` in order. Issuers move
/// between taxonomy tags over time, so the order encodes which tag is the
/// most precise match for the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineItemSpec {
    /// Display name, also the column header.
    pub name: &'static str,
    /// Preferred US-GAAP concept tag.
    pub primary: &'static str,
    /// Fallback tags, most precise first.
    pub alternatives: &'static [&'static str],
}

impl LineItemSpec {
    /// Creates a line item.
    #[must_use]
    pub const fn new(
        name: &'static str,
        primary: &'static str,
        alternatives: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            primary,
            alternatives,
        }
    }

    /// Every candidate tag, primary first.
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.primary).chain(self.alternatives.iter().copied())
    }
}

/// The income statement, in display order.
pub const INCOME_STATEMENT: [LineItemSpec; 11] = [
    LineItemSpec::new(
        REVENUE,
        "RevenueFromContractWithCustomerExcludingAssessedTax",
        &[
            "RevenueFromContractWithCustomerIncludingAssessedTax",
            "Revenues",
            "SalesRevenueNet",
        ],
    ),
    LineItemSpec::new(
        COST_OF_REVENUE,
        "CostOfRevenue",
        &[
            "CostOfGoodsAndServicesSold",
            "CostOfGoodsAndServiceExcludingDepreciationDepletionAndAmortization",
            "CostOfGoodsSold",
        ],
    ),
    LineItemSpec::new(
        "Research and Development",
        "ResearchAndDevelopmentExpense",
        &[],
    ),
    LineItemSpec::new(
        "Selling and Marketing",
        "SellingAndMarketingExpense",
        &["SellingGeneralAndAdministrativeExpense"],
    ),
    LineItemSpec::new(
        "General and Administrative",
        "GeneralAndAdministrativeExpense",
        &[],
    ),
    LineItemSpec::new(OPERATING_INCOME, "OperatingIncomeLoss", &["OperatingIncome"]),
    LineItemSpec::new(
        "Other Income/Expense",
        "OtherNonoperatingIncomeExpense",
        &[],
    ),
    LineItemSpec::new(
        "Interest Income",
        "InterestAndDividendIncome",
        &["InvestmentIncomeInterest"],
    ),
    LineItemSpec::new("Interest Expense", "InterestExpense", &[]),
    LineItemSpec::new("Income Tax", "IncomeTaxExpenseBenefit", &[]),
    LineItemSpec::new(NET_INCOME, "NetIncomeLoss", &[]),
];
