//! Ordered rule registry and whole-content rewriting.

use crate::config::RulesConfig;
use crate::error::{FixError, FixResult};
use crate::report::RuleHit;
use crate::rule::Rule;
use crate::rules;

/// Result of applying a rule set to one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Rules that changed the content, in application order.
    pub hits: Vec<RuleHit>,
}

impl Rewrite {
    pub fn is_changed(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// An ordered, immutable collection of rules.
///
/// Each rule makes one left-to-right pass over the output of the rules before
/// it.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in catalogue, configured by `config`.
    pub fn builtin(config: &RulesConfig) -> FixResult<Self> {
        Ok(Self::new(rules::builtin(config)?))
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Keep only the named rules, preserving registry order.
    pub fn select<S: AsRef<str>>(self, names: &[S]) -> FixResult<Self> {
        self.check_names(names)?;
        Ok(Self::new(
            self.rules
                .into_iter()
                .filter(|rule| names.iter().any(|n| n.as_ref() == rule.name()))
                .collect(),
        ))
    }

    /// Drop the named rules.
    pub fn without<S: AsRef<str>>(self, names: &[S]) -> FixResult<Self> {
        self.check_names(names)?;
        Ok(Self::new(
            self.rules
                .into_iter()
                .filter(|rule| !names.iter().any(|n| n.as_ref() == rule.name()))
                .collect(),
        ))
    }

    fn check_names<S: AsRef<str>>(&self, names: &[S]) -> FixResult<()> {
        for name in names {
            let name = name.as_ref();
            if self.get(name).is_none() {
                return Err(FixError::UnknownRule(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order.
    pub fn apply(&self, content: &str) -> Rewrite {
        let mut working = content.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let (rewritten, count) = rule.apply(&working);
            if count == 0 {
                continue;
            }
            tracing::debug!("{} matched {} time(s)", rule.name(), count);
            working = rewritten.into_owned();
            hits.push(RuleHit {
                rule: rule.name().to_string(),
                count,
            });
        }

        Rewrite {
            content: working,
            hits,
        }
    }
}
