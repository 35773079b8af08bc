//! Declarative eligibility rules and the tiny `field op value` condition language.
//!
//! Conditions are parsed once, when a rule is constructed or deserialized, into a
//! tagged `Condition`. A condition that cannot be parsed is kept as
//! `Condition::Malformed` so the rule still participates in phrase matching but
//! can never confirm a hard conflict.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::precheck::profile::{ResolvedProfile, UNKNOWN};

/// Profile fields a condition may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    WorkStatus,
    NeedsSponsorship,
    CountryOfResidence,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::WorkStatus => "work_status",
            ProfileField::NeedsSponsorship => "needs_sponsorship",
            ProfileField::CountryOfResidence => "country_of_residence",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "work_status" => Some(ProfileField::WorkStatus),
            "needs_sponsorship" => Some(ProfileField::NeedsSponsorship),
            "country_of_residence" => Some(ProfileField::CountryOfResidence),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Neq,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Neq => "!=",
        }
    }
}

/// Result of evaluating a condition against a resolved profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOutcome {
    /// The conflict is confirmed by known profile data.
    HardTrue,
    HardFalse,
    /// The referenced field is unknown, or the condition could not be parsed.
    Indeterminate,
}

/// A parsed rule condition.
///
/// Serializes to and from its string form (`"needs_sponsorship == true"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Compare {
        field: ProfileField,
        op: Comparison,
        value: String,
    },
    Malformed(String),
}

impl Condition {
    /// Parses `<field> <op> <value>`. Never fails: anything unrecognised becomes
    /// `Condition::Malformed` carrying the raw text.
    pub fn parse(raw: &str) -> Self {
        let malformed = || Condition::Malformed(raw.to_string());

        let eq = raw.find("==").map(|idx| (idx, Comparison::Eq));
        let neq = raw.find("!=").map(|idx| (idx, Comparison::Neq));
        let (idx, op) = match (eq, neq) {
            (Some(a), Some(b)) => {
                if a.0 <= b.0 {
                    a
                } else {
                    b
                }
            }
            (Some(found), None) | (None, Some(found)) => found,
            (None, None) => return malformed(),
        };

        let field = raw[..idx].trim();
        let value = unquote(raw[idx + 2..].trim());

        let Some(field) = ProfileField::parse(field) else {
            return malformed();
        };
        if value.is_empty() || value.starts_with('=') || value.starts_with('!') {
            return malformed();
        }

        Condition::Compare {
            field,
            op,
            value: value.to_string(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Condition::Malformed(_))
    }

    /// Evaluates the condition. A field resolved to `"unknown"` is indeterminate
    /// regardless of the operator, so unknown data never confirms a conflict.
    pub fn evaluate(&self, profile: &ResolvedProfile<'_>) -> ConditionOutcome {
        match self {
            Condition::Compare { field, op, value } => {
                let actual = profile.value(*field);
                if actual == UNKNOWN {
                    return ConditionOutcome::Indeterminate;
                }
                let holds = match op {
                    Comparison::Eq => actual == value,
                    Comparison::Neq => actual != value,
                };
                if holds {
                    ConditionOutcome::HardTrue
                } else {
                    ConditionOutcome::HardFalse
                }
            }
            Condition::Malformed(_) => ConditionOutcome::Indeterminate,
        }
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { field, op, value } => {
                write!(f, "{} {} {}", field.as_str(), op.as_str(), value)
            }
            Condition::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for Condition {
    fn from(raw: String) -> Self {
        Condition::parse(&raw)
    }
}

impl From<&str> for Condition {
    fn from(raw: &str) -> Self {
        Condition::parse(raw)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.to_string()
    }
}

/// A declarative eligibility rule from a region pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(alias = "label")]
    pub title: String,
    #[serde(alias = "triggerPhrases")]
    pub trigger_phrases: Vec<String>,
    pub condition: Condition,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        trigger_phrases: &[&str],
        condition: &str,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            trigger_phrases: trigger_phrases.iter().map(|p| p.to_string()).collect(),
            condition: Condition::parse(condition),
        }
    }

    /// True when any trigger phrase is a substring of `haystack_lower`, which the
    /// caller must already have lower-cased. Blank phrases never match.
    pub fn is_phrase_triggered(&self, haystack_lower: &str) -> bool {
        self.trigger_phrases
            .iter()
            .filter(|phrase| !is_blank(phrase))
            .any(|phrase| haystack_lower.contains(&phrase.to_lowercase()))
    }
}

fn is_blank(phrase: &str) -> bool {
    phrase.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("duplicate rule id '{0}'")]
    DuplicateId(String),

    #[error("rule '{0}' has no trigger phrases")]
    NoTriggerPhrases(String),

    #[error("rule '{0}' has a blank trigger phrase")]
    BlankTriggerPhrase(String),
}

/// Checks the load-time invariants of a rule set: unique ids, and at least one
/// trigger phrase per rule with none of them blank.
pub fn validate_rules(rules: &[Rule]) -> Result<(), RuleSetError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(RuleSetError::DuplicateId(rule.id.clone()));
        }
        if rule.trigger_phrases.is_empty() {
            return Err(RuleSetError::NoTriggerPhrases(rule.id.clone()));
        }
        if rule.trigger_phrases.iter().any(|p| is_blank(p)) {
            return Err(RuleSetError::BlankTriggerPhrase(rule.id.clone()));
        }
    }
    Ok(())
}
