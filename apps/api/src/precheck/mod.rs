// Eligibility Pre-Check
// Implements: rule model + condition DSL, profile resolution, the pure engine,
// the region-pack registry, and the stateless preview endpoints.
// The engine performs no I/O; call sites load profile and rules first.

pub mod engine;
pub mod handlers;
pub mod profile;
pub mod registry;
pub mod rules;
