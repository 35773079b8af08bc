//! Eligibility Pre-Check — scans a job description for sponsorship, citizenship
//! and residency requirements that may rule the candidate out.
//!
//! Pure and total: no I/O, no shared state, never fails.
//!
//! Algorithm:
//! 1. Lower-case the JD once; a rule is phrase-triggered when any of its
//!    lower-cased trigger phrases is a substring (no word boundaries).
//! 2. Each triggered rule is listed in `triggered_rules`, in rule-set order.
//! 3. Its condition is evaluated against the resolved profile:
//!    hard-true escalates to `Conflict`, anything else caps at `Recommended`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::precheck::profile::{Profile, ResolvedProfile};
use crate::precheck::rules::{ConditionOutcome, Rule};

/// Tri-state verdict. Variant order is severity order: `None < Recommended < Conflict`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecheckStatus {
    #[default]
    None,
    Recommended,
    Conflict,
}

impl PrecheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecheckStatus::None => "none",
            PrecheckStatus::Recommended => "recommended",
            PrecheckStatus::Conflict => "conflict",
        }
    }
}

impl fmt::Display for PrecheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrecheckStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "none" => Ok(PrecheckStatus::None),
            "recommended" => Ok(PrecheckStatus::Recommended),
            "conflict" => Ok(PrecheckStatus::Conflict),
            other => Err(format!("unknown precheck status '{other}'")),
        }
    }
}

/// A rule whose trigger phrase matched the JD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredRule {
    pub rule_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecheckResult {
    pub status: PrecheckStatus,
    pub triggered_rules: Vec<TriggeredRule>,
}

/// Runs the pre-check of `jd_text` against `rules` for an optional profile.
pub fn run_eligibility_precheck(
    jd_text: &str,
    profile: Option<&Profile>,
    rules: &[Rule],
) -> PrecheckResult {
    if rules.is_empty() {
        return PrecheckResult::default();
    }

    let haystack = jd_text.to_lowercase();
    let resolved = ResolvedProfile::from_optional(profile);

    let mut status = PrecheckStatus::None;
    let mut triggered_rules = Vec::new();

    for rule in rules {
        if !rule.is_phrase_triggered(&haystack) {
            continue;
        }

        let severity = match rule.condition.evaluate(&resolved) {
            ConditionOutcome::HardTrue => PrecheckStatus::Conflict,
            ConditionOutcome::HardFalse | ConditionOutcome::Indeterminate => {
                PrecheckStatus::Recommended
            }
        };
        status = status.max(severity);

        triggered_rules.push(TriggeredRule {
            rule_id: rule.id.clone(),
            title: rule.title.clone(),
        });
    }

    PrecheckResult {
        status,
        triggered_rules,
    }
}
