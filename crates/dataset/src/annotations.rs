use std::collections::HashMap;

use catalog::FileMap;
use indexmap::IndexSet;

/// Per-record user annotations, keyed by record id.
///
/// Ids are not guaranteed unique across datasets; annotations for a reused id
/// carry over to whichever record has it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotations {
    /// Favorited ids, in the order they were marked.
    pub favorites: IndexSet<String>,
    pub solved: IndexSet<String>,
    /// record id → filename → draft text
    pub draft_patches: HashMap<String, FileMap>,
}

impl Annotations {
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_solved(&self, id: &str) -> bool {
        self.solved.contains(id)
    }

    pub fn draft_patch(&self, id: &str) -> Option<&FileMap> {
        self.draft_patches.get(id)
    }
}
