//! Clears hard-coded mock data constants left behind by the design export.

use regex::Captures;

use crate::error::FixResult;
use crate::rule::{FixKind, Rule, group};

pub const CLEAR_MOCK_CONSTANTS: &str = "clear-mock-constants";

/// Bracket nesting the literal matcher understands. Deeper literals are left
/// untouched.
const MAX_NESTING: usize = 6;

/// Mock constants exported by the generated tenant admin dashboard.
pub const DEFAULT_MOCK_CONSTANTS: &[&str] = &[
    "CRM_METRICS",
    "CRM_LEADS",
    "CRM_TASKS",
    "CRM_ENGAGEMENTS",
    "CRM_STATUS_META",
    "CRM_REMINDERS",
    "CRM_CUSTOMERS",
    "CRM_CHARTS_BASELINE",
    "CRM_BASELINE_SNAPSHOT",
    "FINANCE_TREND_BASELINE",
    "FINANCE_RECEIVABLES_BASELINE",
    "FINANCE_PAYABLES_BASELINE",
    "FINANCE_EXPENSES_BASELINE",
    "PAYMENT_RECORDS_BASELINE",
    "EXPENSE_CATEGORIES_BASELINE",
    "EXPENSE_RECORDS_BASELINE",
    "FINANCE_CASH_ACCOUNTS_BASELINE",
    "FINANCE_EXPENSE_BREAKDOWN_BASELINE",
    "FINANCE_BASELINE_SNAPSHOT",
    "MOCK_INVOICES",
    "INVOICE_QUEUE",
    "DEAL_PIPELINE",
    "APPROVAL_ROUTES",
    "ALERT_FEED",
    "KPI_METRICS",
    "LIVE_PANELS",
    "ACTIVITY_LOG",
];

/// `const NAME: Type = [ ... ];` becomes `const NAME = [];` (and `{ ... }`
/// becomes `{}`) for each name in `names`.
///
/// Returns `None` when `names` is empty; there is nothing to match.
pub fn clear_mock_constants(names: &[String]) -> FixResult<Option<Rule>> {
    if names.is_empty() {
        return Ok(None);
    }

    let alternatives = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let array = nested(r"\[", r"\]", r"[^\[\]]", MAX_NESTING);
    let object = nested(r"\{", r"\}", r"[^{}]", MAX_NESTING);
    let pattern = format!(
        r"(?m)^(?P<decl>[ \t]*(?:export\s+)?const\s+)(?P<name>{alternatives})\b\s*:(?:[^=;]|=>)+?=\s*(?:(?P<array>{array})|(?P<object>{object}))\s*;"
    );

    Rule::new(
        CLEAR_MOCK_CONSTANTS,
        "Replace typed mock data constants with empty literals",
        FixKind::Removal,
        &pattern,
        |caps: &Captures<'_>| -> Option<String> {
            let empty = if caps.name("array").is_some() { "[]" } else { "{}" };
            Some(format!(
                "{}{} = {empty};",
                group(caps, "decl"),
                group(caps, "name")
            ))
        },
    )
    .map(Some)
}

/// Pattern for a balanced `open ... close` literal up to `depth` levels deep.
fn nested(open: &str, close: &str, plain: &str, depth: usize) -> String {
    let mut pattern = format!("{open}{plain}*{close}");
    for _ in 0..depth {
        pattern = format!("{open}(?:{plain}|{pattern})*{close}");
    }
    pattern
}
