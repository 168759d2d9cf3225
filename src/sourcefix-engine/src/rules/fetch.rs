//! Fixes for `load()` bodies that check `res.ok` without parsing the payload
//! first, so error responses surface their message instead of a bare throw.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::error::{FixError, FixResult};
use crate::rule::{FixKind, Rule, Template, group, line_ending};

pub const REORDER_STATUS_CHECK: &str = "reorder-status-check";
pub const PARSE_BEFORE_STATUS_CHECK: &str = "parse-before-status-check";

/// A statement starting a line that calls `fetch` or a `fetch*` helper,
/// optionally bound with `const`/`let` and awaited.
const FETCH_STATEMENT: &str =
    r"(?:(?:const|let)\s+[A-Za-z_$][\w$]*\s*=\s*)?(?:await\s+)?fetch[\w$]*\([^;]*\);";

const IDENT: &str = r"[A-Za-z_$][\w$]*";

/// Variable the insertion fix declares.
const PAYLOAD_VAR: &str = "payload";

/// Moves a `<res>.json()` parse that follows the status check in front of it,
/// and turns the throw into a fallback that reports the payload's error.
pub fn reorder_status_check(fallback_setter: &str, error_setter: &str) -> FixResult<Rule> {
    let pattern = format!(
        r"(?m)^(?P<indent>[ \t]*)(?P<fetch>{FETCH_STATEMENT})[ \t]*\r?\n[ \t]*if \(!(?P<res>{IDENT})\.ok\) throw new Error\((?P<message>[^;\n]*)\);[ \t]*\r?\n[ \t]*(?P<parse>(?P<decl>const|let)\s+(?P<var>{IDENT})\s*=\s*await\s+(?P<parse_res>{IDENT})\.json\(\)[^;\r\n]*;?)(?P<rest>[^\r\n]*)"
    );
    Rule::new(
        REORDER_STATUS_CHECK,
        "Parse the response payload before the status check and report its error",
        FixKind::Reordering,
        &pattern,
        ReorderTemplate {
            fallback_setter: fallback_setter.to_string(),
            error_setter: error_setter.to_string(),
        },
    )
}

struct ReorderTemplate {
    fallback_setter: String,
    error_setter: String,
}

impl Template for ReorderTemplate {
    fn render(&self, caps: &Captures<'_>) -> Option<String> {
        let res = group(caps, "res");
        // The parse must read the same response the status check looked at.
        if group(caps, "parse_res") != res {
            return None;
        }
        // The parse line gets commented out; anything sharing it would go too.
        if !group(caps, "rest").trim().is_empty() {
            return None;
        }

        let indent = group(caps, "indent");
        let decl = group(caps, "decl");
        let var = group(caps, "var");
        let nl = line_ending(&caps[0]);

        let mut out = String::new();
        out.push_str(indent);
        out.push_str(group(caps, "fetch"));
        out.push_str(nl);
        out.push_str(&format!(
            "{indent}{decl} {var} = await {res}.json().catch(() => ({{}}));{nl}"
        ));
        out.push_str(&format!("{indent}if (!{res}.ok) {{{nl}"));
        out.push_str(&format!("{indent}  {}([]);{nl}", self.fallback_setter));
        out.push_str(&format!(
            "{indent}  {}({var}?.error ?? {});{nl}",
            self.error_setter,
            group(caps, "message").trim()
        ));
        out.push_str(&format!("{indent}  return;{nl}"));
        out.push_str(&format!("{indent}}}{nl}"));
        out.push_str(&format!("{indent}// {}", group(caps, "parse")));
        Some(out)
    }
}

/// Inserts a defensive payload parse directly before a bare status check.
///
/// Fires at most once per block: it declines when the enclosing block already
/// declares `payload` or an earlier status check in that block is fixed by
/// this pass. It also declines when the throw is immediately followed by a
/// `.json()` parse; that shape belongs to [`reorder_status_check`].
pub fn parse_before_status_check() -> FixResult<Rule> {
    let pattern = format!(
        r"(?m)^(?P<head>[ \t]*{FETCH_STATEMENT}[ \t]*\r?\n)(?P<indent>[ \t]*)(?P<check>if \(!(?P<res>{IDENT})\.ok\) throw new Error[^;\n]*;)(?P<parse>[ \t]*\r?\n[ \t]*(?:const|let)\s+{IDENT}\s*=\s*await\s+{IDENT}\.json\(\))?"
    );
    let template = InsertTemplate {
        declared: compile(&format!(r"\b(?:const|let|var)\s+{PAYLOAD_VAR}\b"))?,
        status_check: compile(&format!(r"if \(!{IDENT}\.ok\) throw new Error"))?,
    };
    Rule::new(
        PARSE_BEFORE_STATUS_CHECK,
        "Insert a defensive payload parse before a bare status check",
        FixKind::Insertion,
        &pattern,
        template,
    )
}

fn compile(pattern: &str) -> FixResult<Regex> {
    Regex::new(pattern).map_err(|e| FixError::invalid_pattern(PARSE_BEFORE_STATUS_CHECK, e))
}

struct InsertTemplate {
    declared: Regex,
    status_check: Regex,
}

impl Template for InsertTemplate {
    fn render(&self, caps: &Captures<'_>) -> Option<String> {
        if caps.name("parse").is_some() {
            return None;
        }
        let head = group(caps, "head");
        let indent = group(caps, "indent");
        let nl = line_ending(head);
        Some(format!(
            "{head}{indent}const {PAYLOAD_VAR} = await {res}.json().catch(() => ({{}}));{nl}{indent}{check}",
            res = group(caps, "res"),
            check = group(caps, "check"),
        ))
    }

    fn render_in(&self, content: &str, caps: &Captures<'_>) -> Option<String> {
        let at = caps.get(0)?.start();
        let block = enclosing_block(content, at);
        if self.declared.is_match(&content[block.clone()])
            || self.status_check.is_match(&content[block.start..at])
        {
            return None;
        }
        self.render(caps)
    }
}

/// Byte range inside the innermost `{ ... }` around `at`, or the whole
/// content at top level. Braces in strings and comments are counted too.
fn enclosing_block(content: &str, at: usize) -> Range<usize> {
    let bytes = content.as_bytes();

    let mut start = 0;
    let mut depth = 0usize;
    for (i, &byte) in bytes[..at].iter().enumerate().rev() {
        match byte {
            b'}' => depth += 1,
            b'{' if depth == 0 => {
                start = i + 1;
                break;
            }
            b'{' => depth -= 1,
            _ => {}
        }
    }

    let mut end = content.len();
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(at) {
        match byte {
            b'{' => depth += 1,
            b'}' if depth == 0 => {
                end = i;
                break;
            }
            b'}' => depth -= 1,
            _ => {}
        }
    }

    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BARE_CHECK: &str = "fetchCall();\nif (!res.ok) throw new Error(\"x\");";
    const LATE_PARSE: &str =
        "fetchCall();\nif (!res.ok) throw new Error(\"x\");\nconst payload = await res.json();";

    fn reorder() -> Rule {
        reorder_status_check("setRoles", "setError").unwrap()
    }

    fn insert() -> Rule {
        parse_before_status_check().unwrap()
    }

    #[test]
    fn test_insertion_before_check() {
        let (out, count) = insert().apply(BARE_CHECK);
        assert_eq!(
            out,
            "fetchCall();\nconst payload = await res.json().catch(() => ({}));\nif (!res.ok) throw new Error(\"x\");"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_insertion_keeps_indentation_and_response_name() {
        let input = "    try {\n      const response = await fetch(`/api/roles`, { cache: \"no-store\" });\n      if (!response.ok) throw new Error(\"Failed to load roles\");\n      setRoles(await response.json());\n";
        let (out, _) = insert().apply(input);
        assert_eq!(
            out,
            "    try {\n      const response = await fetch(`/api/roles`, { cache: \"no-store\" });\n      const payload = await response.json().catch(() => ({}));\n      if (!response.ok) throw new Error(\"Failed to load roles\");\n      setRoles(await response.json());\n"
        );
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let (once, _) = insert().apply(BARE_CHECK);
        let (twice, count) = insert().apply(&once);
        assert_eq!(once, twice);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_insertion_declines_late_parse() {
        let (out, count) = insert().apply(LATE_PARSE);
        assert_eq!(out, LATE_PARSE);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reorder_moves_parse_before_check() {
        let (out, count) = reorder().apply(LATE_PARSE);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "fetchCall();\n\
             const payload = await res.json().catch(() => ({}));\n\
             if (!res.ok) {\n  \
             setRoles([]);\n  \
             setError(payload?.error ?? \"x\");\n  \
             return;\n\
             }\n\
             // const payload = await res.json();"
        );

        let parse_at = out.find("await res.json().catch").unwrap();
        let check_at = out.find("if (!res.ok)").unwrap();
        assert!(parse_at < check_at);
        assert_eq!(out.matches("\nconst payload").count(), 1);
    }

    #[test]
    fn test_reorder_uses_configured_setters_and_crlf() {
        let rule = reorder_status_check("setMembers", "setLoadError").unwrap();
        let input = "  const r = await fetch(url);\r\n  if (!r.ok) throw new Error(`status ${r.status}`);\r\n  const data = await r.json();\r\n  setMembers(data.items);\r\n";
        let (out, count) = rule.apply(input);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "  const r = await fetch(url);\r\n  const data = await r.json().catch(() => ({}));\r\n  if (!r.ok) {\r\n    setMembers([]);\r\n    setLoadError(data?.error ?? `status ${r.status}`);\r\n    return;\r\n  }\r\n  // const data = await r.json();\r\n  setMembers(data.items);\r\n"
        );
    }

    #[test]
    fn test_reorder_declines_mismatched_response() {
        let input = "fetchCall();\nif (!res.ok) throw new Error(\"x\");\nconst payload = await other.json();";
        let (out, count) = reorder().apply(input);
        assert_eq!(out, input);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reorder_is_idempotent_and_leaves_nothing_for_insertion() {
        let (once, _) = reorder().apply(LATE_PARSE);
        let (twice, count) = reorder().apply(&once);
        assert_eq!(once, twice);
        assert_eq!(count, 0);

        let (after_insert, count) = insert().apply(&once);
        assert_eq!(after_insert, once);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_unrelated_fetch_code_untouched() {
        let input = "const res = await fetch(url);\nconst payload = await res.json().catch(() => ({}));\nif (!res.ok) {\n  setError(payload?.error ?? \"Failed\");\n  return;\n}\nrefetch();\nif (!res.ok) throw new Error(\"x\");\n";
        for rule in [reorder(), insert()] {
            let (out, count) = rule.apply(input);
            assert_eq!(out, input, "{} changed clean code", rule.name());
            assert_eq!(count, 0);
        }
    }

    #[test]
    fn test_insertion_once_per_block() {
        let input = "async function load() {\n  try {\n    const res = await fetch(\"/a\");\n    if (!res.ok) throw new Error(\"a\");\n    const res2 = await fetch(\"/b\");\n    if (!res2.ok) throw new Error(\"b\");\n  } catch {}\n}\n";
        let (out, count) = insert().apply(input);
        assert_eq!(
            out,
            "async function load() {\n  try {\n    const res = await fetch(\"/a\");\n    const payload = await res.json().catch(() => ({}));\n    if (!res.ok) throw new Error(\"a\");\n    const res2 = await fetch(\"/b\");\n    if (!res2.ok) throw new Error(\"b\");\n  } catch {}\n}\n"
        );
        assert_eq!(count, 1);

        let (twice, count) = insert().apply(&out);
        assert_eq!(twice, out);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_insertion_fires_in_each_block() {
        let input = "function a() {\n  const r = await fetch(\"/a\");\n  if (!r.ok) throw new Error(\"a\");\n}\nfunction b() {\n  const r = await fetch(\"/b\");\n  if (!r.ok) throw new Error(\"b\");\n}\n";
        let (out, count) = insert().apply(input);
        assert_eq!(count, 2);
        assert_eq!(out.matches("const payload").count(), 2);
    }

    #[test]
    fn test_insertion_declines_when_payload_declared_later() {
        let input = "const res = await fetch(url);\nif (!res.ok) throw new Error(\"x\");\n// parse the body\nconst payload = await res.json();\n";
        let (out, count) = insert().apply(input);
        assert_eq!(out, input);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_enclosing_block() {
        let content = "a { b { c } d } e";
        let at = content.find('d').unwrap();
        assert_eq!(&content[enclosing_block(content, at)], " b { c } d ");
        assert_eq!(enclosing_block(content, content.find('e').unwrap()), 0..content.len());
    }

    #[test]
    fn test_reorder_keeps_let_binding() {
        let input = "const res = await fetch(url);\nif (!res.ok) throw new Error(\"x\");\nlet data = await res.json();\ndata = data.items;\n";
        let (out, count) = reorder().apply(input);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "const res = await fetch(url);\n\
             let data = await res.json().catch(() => ({}));\n\
             if (!res.ok) {\n  \
             setRoles([]);\n  \
             setError(data?.error ?? \"x\");\n  \
             return;\n\
             }\n\
             // let data = await res.json();\n\
             data = data.items;\n"
        );
    }

    #[test]
    fn test_reorder_declines_statement_sharing_parse_line() {
        let input = "fetchCall();\nif (!res.ok) throw new Error(\"x\");\nconst data = await res.json(); setRoles(data.roles);\n";
        let (out, count) = reorder().apply(input);
        assert_eq!(out, input);
        assert_eq!(count, 0);
    }
}
