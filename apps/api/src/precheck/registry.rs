//! Region-pack registry — versioned, per-market bundles of eligibility rules.
//!
//! Built-in packs are embedded at compile time and validated once at startup.
//! The registry is read-only afterwards and shared behind an `Arc`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::precheck::rules::{validate_rules, Rule, RuleSetError};

/// Track every region is expected to provide; used as the first fallback.
pub const GENERAL_TRACK: &str = "general";

const BUILTIN_PACKS: &[(&str, &str)] = &[
    ("ca-general.json", include_str!("../../region_packs/ca-general.json")),
    ("uk-general.json", include_str!("../../region_packs/uk-general.json")),
    ("us-general.json", include_str!("../../region_packs/us-general.json")),
];

#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to parse region pack {source_name}: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("region pack {region}/{track} is invalid: {error}")]
    InvalidRules {
        region: String,
        track: String,
        #[source]
        error: RuleSetError,
    },

    #[error("region pack {region}/{track} is defined more than once")]
    DuplicatePack { region: String, track: String },

    #[error("default region pack {region}/{track} is not registered")]
    MissingDefault { region: String, track: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPack {
    pub region: String,
    pub track: String,
    pub version: String,
    pub rules: Vec<Rule>,
}

impl RegionPack {
    pub fn summary(&self) -> PackSummary {
        PackSummary {
            region: self.region.clone(),
            track: self.track.clone(),
            version: self.version.clone(),
            rule_count: self.rules.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSummary {
    pub region: String,
    pub track: String,
    pub version: String,
    pub rule_count: usize,
}

type PackKey = (String, String);

fn pack_key(region: &str, track: &str) -> PackKey {
    (
        region.trim().to_lowercase(),
        track.trim().to_lowercase(),
    )
}

#[derive(Debug, Clone)]
pub struct RegionPackRegistry {
    packs: BTreeMap<PackKey, RegionPack>,
    default_key: PackKey,
}

impl RegionPackRegistry {
    /// Loads the packs embedded in the binary.
    pub fn builtin(default_region: &str, default_track: &str) -> Result<Self, PackError> {
        Self::from_sources(BUILTIN_PACKS, default_region, default_track)
    }

    /// Parses and validates `(name, json)` pack sources.
    pub fn from_sources(
        sources: &[(&str, &str)],
        default_region: &str,
        default_track: &str,
    ) -> Result<Self, PackError> {
        let mut packs = BTreeMap::new();

        for (name, json) in sources {
            let mut pack: RegionPack =
                serde_json::from_str(json).map_err(|error| PackError::Parse {
                    source_name: name.to_string(),
                    error,
                })?;

            validate_rules(&pack.rules).map_err(|error| PackError::InvalidRules {
                region: pack.region.clone(),
                track: pack.track.clone(),
                error,
            })?;

            for rule in pack.rules.iter().filter(|r| r.condition.is_malformed()) {
                warn!(
                    region = %pack.region,
                    track = %pack.track,
                    rule_id = %rule.id,
                    condition = %rule.condition,
                    "malformed rule condition; rule can never confirm a conflict"
                );
            }

            let key = pack_key(&pack.region, &pack.track);
            pack.region = key.0.clone();
            pack.track = key.1.clone();
            if packs.contains_key(&key) {
                return Err(PackError::DuplicatePack {
                    region: key.0,
                    track: key.1,
                });
            }
            packs.insert(key, pack);
        }

        let default_key = pack_key(default_region, default_track);
        if !packs.contains_key(&default_key) {
            return Err(PackError::MissingDefault {
                region: default_key.0,
                track: default_key.1,
            });
        }

        info!(
            packs = packs.len(),
            default = %format!("{}/{}", default_key.0, default_key.1),
            "region packs loaded"
        );

        Ok(Self { packs, default_key })
    }

    pub fn get(&self, region: &str, track: &str) -> Option<&RegionPack> {
        self.packs.get(&pack_key(region, track))
    }

    /// Resolves the pack for a region/track pair: exact match, then the region's
    /// general track, then the configured default.
    pub fn resolve(&self, region: Option<&str>, track: Option<&str>) -> &RegionPack {
        if let Some(region) = region {
            let track = track.unwrap_or(GENERAL_TRACK);
            if let Some(pack) = self
                .get(region, track)
                .or_else(|| self.get(region, GENERAL_TRACK))
            {
                return pack;
            }
        }
        self.default_pack()
    }

    pub fn default_pack(&self) -> &RegionPack {
        // from_sources refuses to build a registry without its default pack
        &self.packs[&self.default_key]
    }

    pub fn packs(&self) -> impl Iterator<Item = &RegionPack> {
        self.packs.values()
    }

    pub fn list(&self) -> Vec<PackSummary> {
        self.packs().map(RegionPack::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK_A: &str = r#"{
        "region": "ZZ",
        "track": "General",
        "version": "1",
        "rules": [
            {"id": "a", "title": "A", "trigger_phrases": ["alpha"], "condition": "work_status == x"}
        ]
    }"#;

    const PACK_A_TECH: &str = r#"{
        "region": "zz",
        "track": "tech",
        "version": "2",
        "rules": [
            {"id": "b", "label": "B", "triggerPhrases": ["beta"], "condition": "bogus"}
        ]
    }"#;

    #[test]
    fn test_builtin_packs_load() {
        let registry = RegionPackRegistry::builtin("us", "general").unwrap();
        let summaries = registry.list();
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|s| s.rule_count > 0));
        for pack in registry.packs() {
            assert!(
                pack.rules.iter().all(|r| !r.condition.is_malformed()),
                "pack {}/{} ships a malformed condition",
                pack.region,
                pack.track
            );
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry =
            RegionPackRegistry::from_sources(&[("a", PACK_A)], "zz", "general").unwrap();
        let pack = registry.get(" ZZ ", "GENERAL").unwrap();
        assert_eq!(pack.region, "zz");
        assert_eq!(pack.track, "general");
    }

    #[test]
    fn test_resolve_falls_back_to_general_then_default() {
        let registry = RegionPackRegistry::from_sources(
            &[("a", PACK_A), ("b", PACK_A_TECH)],
            "zz",
            "general",
        )
        .unwrap();

        assert_eq!(registry.resolve(Some("zz"), Some("tech")).version, "2");
        assert_eq!(registry.resolve(Some("zz"), Some("finance")).version, "1");
        assert_eq!(registry.resolve(Some("zz"), None).version, "1");
        assert_eq!(registry.resolve(Some("mars"), Some("tech")).version, "1");
        assert_eq!(registry.resolve(None, Some("tech")).version, "1");
    }

    #[test]
    fn test_malformed_condition_is_not_a_load_error() {
        let registry = RegionPackRegistry::from_sources(
            &[("a", PACK_A), ("b", PACK_A_TECH)],
            "zz",
            "general",
        )
        .unwrap();
        let pack = registry.get("zz", "tech").unwrap();
        assert!(pack.rules[0].condition.is_malformed());
    }

    #[test]
    fn test_missing_default_is_rejected() {
        let err = RegionPackRegistry::from_sources(&[("a", PACK_A)], "us", "general").unwrap_err();
        assert!(matches!(err, PackError::MissingDefault { .. }));
    }

    #[test]
    fn test_duplicate_pack_is_rejected() {
        let err = RegionPackRegistry::from_sources(&[("a", PACK_A), ("a2", PACK_A)], "zz", "general")
            .unwrap_err();
        assert!(matches!(err, PackError::DuplicatePack { .. }));
    }

    #[test]
    fn test_duplicate_rule_ids_are_rejected() {
        let json = r#"{
            "region": "zz", "track": "general", "version": "1",
            "rules": [
                {"id": "a", "title": "A", "trigger_phrases": ["x"], "condition": "work_status == y"},
                {"id": "a", "title": "A", "trigger_phrases": ["z"], "condition": "work_status == y"}
            ]
        }"#;
        let err = RegionPackRegistry::from_sources(&[("dup", json)], "zz", "general").unwrap_err();
        assert!(matches!(
            err,
            PackError::InvalidRules {
                error: RuleSetError::DuplicateId(_),
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json_names_the_source() {
        let err = RegionPackRegistry::from_sources(&[("broken.json", "{")], "zz", "general")
            .unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
