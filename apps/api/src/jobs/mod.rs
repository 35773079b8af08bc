// Job cards and JD snapshots: the two places a JD enters the system,
// and therefore the two call sites of the eligibility pre-check.

pub mod handlers;
pub mod precheck_site;
