//! Persisted key layout

pub const KEY_PROBLEMS: &str = "cvdp-problems";
pub const KEY_FILENAME: &str = "cvdp-filename";
pub const KEY_FINGERPRINT: &str = "cvdp-fingerprint";
pub const KEY_FAVORITES: &str = "cvdp-favorites";
pub const KEY_SOLVED: &str = "cvdp-solved";

pub const DRAFT_PREFIX: &str = "cvdp-draft-";
pub const SOLUTION_PREFIX: &str = "solution-";

/// cvdp-draft-<record id>
pub fn draft_key(record_id: &str) -> String {
    format!("{DRAFT_PREFIX}{record_id}")
}

/// solution-<record id>
pub fn solution_key(record_id: &str) -> String {
    format!("{SOLUTION_PREFIX}{record_id}")
}
