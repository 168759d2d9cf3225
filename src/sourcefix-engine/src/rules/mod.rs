//! Built-in rule catalogue.
//!
//! Order matters: the reordering fix runs before the insertion fix so that a
//! `load()` body with a late `.json()` parse is rewritten once, by the rule
//! that understands its full shape.

mod arrays;
mod fetch;
mod mock;

pub use arrays::{GUARD_JSX_MAP, GUARD_LENGTH_CHECK, guard_jsx_map, guard_length_check};
pub use fetch::{
    PARSE_BEFORE_STATUS_CHECK, REORDER_STATUS_CHECK, parse_before_status_check,
    reorder_status_check,
};
pub use mock::{CLEAR_MOCK_CONSTANTS, DEFAULT_MOCK_CONSTANTS, clear_mock_constants};

use crate::config::RulesConfig;
use crate::error::FixResult;
use crate::rule::Rule;

/// Names of every built-in rule, in application order.
pub const BUILTIN_RULES: &[&str] = &[
    REORDER_STATUS_CHECK,
    PARSE_BEFORE_STATUS_CHECK,
    GUARD_LENGTH_CHECK,
    GUARD_JSX_MAP,
    CLEAR_MOCK_CONSTANTS,
];

/// Build the built-in rules from configuration, in application order.
pub fn builtin(config: &RulesConfig) -> FixResult<Vec<Rule>> {
    let mut rules = vec![
        reorder_status_check(&config.fallback_setter, &config.error_setter)?,
        parse_before_status_check()?,
        guard_length_check()?,
        guard_jsx_map(&config.map_guard_skip)?,
    ];
    rules.extend(clear_mock_constants(&config.mock_constants)?);
    Ok(rules)
}
