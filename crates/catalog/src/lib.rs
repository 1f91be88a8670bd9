//! CVDP problem catalog
//!
//! Turns raw benchmark JSON (agentic and non-agentic shapes) into a uniform
//! `ProblemRecord` whose supporting files are flat path → text mappings.

pub mod flatten;
pub mod schema;
pub mod normalize;
pub mod taxonomy;

pub use flatten::{flatten, FileMap, MAX_DEPTH};
pub use schema::{FileSection, ProblemRecord, RecordShape};
pub use normalize::{derive_title, normalize, NO_DESCRIPTION};
pub use taxonomy::{category_name, difficulty_label, KNOWN_CATEGORIES, KNOWN_DIFFICULTIES};
