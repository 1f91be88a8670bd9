use std::collections::BTreeSet;

use catalog::{FileSection, ProblemRecord};

/// A patch value that shipped empty and is meant to be filled in by the user:
/// empty, whitespace only, or exactly `null`.
pub fn is_draft_slot(value: &str) -> bool {
    value.trim().is_empty() || value == "null"
}

/// Expanded file keys per section of the selected record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub context: BTreeSet<String>,
    pub harness: BTreeSet<String>,
    pub patch: BTreeSet<String>,
}

impl ExpansionState {
    /// Fresh state for a newly selected record: everything collapsed except
    /// empty patch slots.
    pub fn for_record(record: &ProblemRecord) -> Self {
        let patch = record
            .patch_data
            .iter()
            .filter(|(_, v)| is_draft_slot(v))
            .map(|(k, _)| k.clone())
            .collect();

        Self { patch, ..Self::default() }
    }

    pub fn set(&self, section: FileSection) -> &BTreeSet<String> {
        match section {
            FileSection::Context => &self.context,
            FileSection::Harness => &self.harness,
            FileSection::Patch => &self.patch,
        }
    }

    fn set_mut(&mut self, section: FileSection) -> &mut BTreeSet<String> {
        match section {
            FileSection::Context => &mut self.context,
            FileSection::Harness => &mut self.harness,
            FileSection::Patch => &mut self.patch,
        }
    }

    pub fn is_expanded(&self, section: FileSection, key: &str) -> bool {
        self.set(section).contains(key)
    }

    /// Flip `key` in `section`.
    pub fn toggled(mut self, section: FileSection, key: &str) -> Self {
        let set = self.set_mut(section);
        if !set.remove(key) {
            set.insert(key.to_string());
        }
        self
    }
}
