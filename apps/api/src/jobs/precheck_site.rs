//! Shared pre-check step for the card and snapshot call sites.
//!
//! Pre-check is a best-effort hint: a profile that cannot be loaded is logged
//! and replaced with "no profile", never surfaced as an error.

use tracing::warn;
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::precheck::engine::{run_eligibility_precheck, PrecheckResult};
use crate::precheck::registry::RegionPack;
use crate::state::AppState;
use crate::store::ProfileStore;

/// Loads the user's profile, swallowing store failures.
pub async fn load_profile_or_none(profiles: &dyn ProfileStore, user_id: Uuid) -> Option<ProfileRow> {
    match profiles.fetch_profile(user_id).await {
        Ok(row) => row,
        Err(e) => {
            warn!(%user_id, error = %e, "profile unavailable; pre-check runs with unknown fields");
            None
        }
    }
}

/// Outcome of a call-site pre-check: the verdict and the pack it was computed with.
pub struct SitePrecheck<'a> {
    pub result: PrecheckResult,
    pub pack: &'a RegionPack,
}

/// Resolves the region pack (explicit request > profile > default) and runs
/// the engine for `jd_text`.
pub fn precheck_for<'a, 'b>(
    state: &'a AppState,
    profile: Option<&'b ProfileRow>,
    region: Option<&'b str>,
    track: Option<&'b str>,
    jd_text: &str,
) -> SitePrecheck<'a> {
    let region = region.or_else(|| profile.and_then(|p| p.region.as_deref()));
    let track = track.or_else(|| profile.and_then(|p| p.track.as_deref()));
    let pack = state.packs.resolve(region, track);

    let candidate = profile.map(ProfileRow::to_profile);
    let result = run_eligibility_precheck(jd_text, candidate.as_ref(), &pack.rules);

    SitePrecheck { result, pack }
}
