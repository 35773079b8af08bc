use serde::{Deserialize, Deserializer, Serialize};

use crate::precheck::rules::ProfileField;

/// Sentinel every unresolved profile field collapses to.
pub const UNKNOWN: &str = "unknown";

/// Candidate profile as supplied by the caller. Every field is optional;
/// values are expected to be canonical lower-case tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, alias = "workStatus")]
    pub work_status: Option<String>,
    #[serde(
        default,
        alias = "needsSponsorship",
        deserialize_with = "deserialize_token"
    )]
    pub needs_sponsorship: Option<String>,
    #[serde(default, alias = "countryOfResidence")]
    pub country_of_residence: Option<String>,
}

/// Profile with every field resolved, borrowing from the source profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedProfile<'a> {
    pub work_status: &'a str,
    pub needs_sponsorship: &'a str,
    pub country_of_residence: &'a str,
}

impl Default for ResolvedProfile<'_> {
    fn default() -> Self {
        Self {
            work_status: UNKNOWN,
            needs_sponsorship: UNKNOWN,
            country_of_residence: UNKNOWN,
        }
    }
}

impl<'a> ResolvedProfile<'a> {
    /// Resolves an optional profile. `None` yields all-unknown.
    pub fn from_optional(profile: Option<&'a Profile>) -> Self {
        profile.map(Profile::resolve).unwrap_or_default()
    }

    pub fn value(&self, field: ProfileField) -> &'a str {
        match field {
            ProfileField::WorkStatus => self.work_status,
            ProfileField::NeedsSponsorship => self.needs_sponsorship,
            ProfileField::CountryOfResidence => self.country_of_residence,
        }
    }
}

impl Profile {
    /// Resolves each field independently; absent or blank values become `"unknown"`.
    pub fn resolve(&self) -> ResolvedProfile<'_> {
        ResolvedProfile {
            work_status: or_unknown(self.work_status.as_deref()),
            needs_sponsorship: or_unknown(self.needs_sponsorship.as_deref()),
            country_of_residence: or_unknown(self.country_of_residence.as_deref()),
        }
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN,
    }
}

/// Accepts `"true"`-style tokens as well as bare JSON booleans.
fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Token {
        Flag(bool),
        Text(String),
    }

    Ok(Option::<Token>::deserialize(deserializer)?.map(|token| match token {
        Token::Flag(flag) => flag.to_string(),
        Token::Text(text) => text,
    }))
}
