pub mod job_card;
pub mod profile;
