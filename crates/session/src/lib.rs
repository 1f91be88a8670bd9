//! View state for one browsing session
//!
//! Selection, expansion and copy feedback are plain values moved through
//! transition functions; `Session` pairs them with a `DatasetStore` and
//! routes user edits to it.

pub mod expansion;
pub mod copied;
pub mod view;
pub mod controller;

pub use expansion::{is_draft_slot, ExpansionState};
pub use copied::{CopiedFiles, COPY_FEEDBACK};
pub use view::ViewState;
pub use controller::{CatalogCounts, Session};
