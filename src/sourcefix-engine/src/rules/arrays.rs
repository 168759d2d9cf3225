//! Guards for state arrays that may still be `undefined` on first render.

use regex::Captures;

use crate::error::FixResult;
use crate::rule::{FixKind, Rule, group};

pub const GUARD_LENGTH_CHECK: &str = "guard-length-check";
pub const GUARD_JSX_MAP: &str = "guard-jsx-map";

/// `items.length === 0` becomes `(items ?? []).length === 0`.
///
/// Only bare identifiers are guarded; `a.b.length`, `x[0].length`,
/// `this.#items.length` and `this.length` are left alone.
pub fn guard_length_check() -> FixResult<Rule> {
    Rule::new(
        GUARD_LENGTH_CHECK,
        "Default possibly-undefined arrays to [] before an emptiness check",
        FixKind::Guard,
        r"(?m)(?P<lead>^|[^\w$.#])(?P<name>[A-Za-z_$][\w$]*)\.length === 0",
        |caps: &Captures<'_>| -> Option<String> {
            let name = group(caps, "name");
            if name == "this" {
                return None;
            }
            Some(format!(
                "{}({name} ?? []).length === 0",
                group(caps, "lead")
            ))
        },
    )
}

/// `{items.map((` in JSX becomes `{(items ?? []).map((`.
///
/// Names in `skip` are never guarded (e.g. the `prev` argument of a state
/// updater, which is always defined).
pub fn guard_jsx_map(skip: &[String]) -> FixResult<Rule> {
    let skip = skip.to_vec();
    Rule::new(
        GUARD_JSX_MAP,
        "Default possibly-undefined arrays to [] before mapping them in JSX",
        FixKind::Guard,
        r"\{(?P<space>\s*)(?P<name>[A-Za-z_$][\w$]*)\.map\(\(",
        move |caps: &Captures<'_>| -> Option<String> {
            let name = group(caps, "name");
            if name == "this" || skip.iter().any(|s| s == name) {
                return None;
            }
            Some(format!(
                "{{{}({name} ?? []).map((",
                group(caps, "space")
            ))
        },
    )
}
