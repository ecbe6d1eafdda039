//! Human-readable output.

use std::fmt::Write as _;

use quarters::table::format_amount;
use quarters::{AnnualSnapshot, CompanyIdentity, PeriodValue, QuarterSummary, Scale};

const RULE_WIDTH: usize = 100;

pub(crate) fn rule(c: char) -> String {
    std::iter::repeat_n(c, RULE_WIDTH).collect()
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
}

fn amount(value: Option<f64>, scale: Scale) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format_amount(scale.apply(v)))
}

/// The "Most Recent Quarter Details" block.
pub(crate) fn summary(summary: &QuarterSummary, scale: Scale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Most Recent Quarter Details ({})", summary.key);
    let _ = writeln!(out, "{}", rule('-'));

    let lines = [
        ("Revenue", amount(summary.revenue, scale)),
        ("Cost of Revenue", amount(summary.cost_of_revenue, scale)),
        ("Gross Profit", amount(summary.gross_profit, scale)),
        ("Gross Margin", percent(summary.gross_margin)),
        ("Operating Income", amount(summary.operating_income, scale)),
        ("Operating Margin", percent(summary.operating_margin)),
        ("Net Income", amount(summary.net_income, scale)),
        ("Net Margin", percent(summary.net_margin)),
    ];
    for (label, value) in lines {
        let _ = writeln!(out, "{label:40} {value:>16}");
    }
    out
}

pub(crate) fn snapshot(company: &CompanyIdentity, snapshot: &AnnualSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (CIK: {})", company.name, company.cik);

    for (statement, entries) in &snapshot.statements {
        let _ = writeln!(
            out,
            "\n{} (in millions USD, except per share amounts):",
            statement.title()
        );
        let _ = writeln!(out, "{}", rule('='));
        for entry in entries {
            let _ = writeln!(
                out,
                "{:<55} {:<45} {:>16}  {}",
                entry.concept,
                entry.description,
                format_amount(entry.display_value()),
                entry.period_end
            );
        }
    }
    out
}

pub(crate) fn lookup(company: &CompanyIdentity, concept: &str, value: &PeriodValue) -> String {
    let filed = value
        .filed
        .map_or_else(|| "N/A".to_string(), |date| date.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", company.name, concept);
    let _ = writeln!(out, "  value:        {}", format_amount(value.value));
    let _ = writeln!(out, "  period end:   {}", value.end_date);
    let _ = writeln!(out, "  filed:        {filed}");
    let _ = writeln!(out, "  form:         {}", value.form);
    let _ = writeln!(out, "  concept used: {}", value.concept_used);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarters::QuarterKey;

    #[test]
    fn test_summary_block() {
        let quarter = QuarterSummary {
            key: QuarterKey::new(2023, 4),
            revenue: Some(28_000_000.0),
            cost_of_revenue: Some(11_000_000.0),
            gross_profit: Some(17_000_000.0),
            gross_margin: Some(60.714),
            operating_income: None,
            operating_margin: None,
            net_income: Some(5_000_000.0),
            net_margin: Some(17.857),
        };

        let text = summary(&quarter, Scale::Millions);
        assert!(text.starts_with("Most Recent Quarter Details (Q4 2023)"));
        assert!(text.contains("60.71%"));
        assert!(text.contains("17.00"));
        assert!(text.contains("N/A"));
    }
}
