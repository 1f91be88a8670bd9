use std::time::Instant;

use catalog::{FileSection, ProblemRecord};
use dataset::FilterState;

use crate::{CopiedFiles, ExpansionState};

/// Everything the presentation layer needs besides the records themselves.
/// Nothing here is persisted.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub filter: FilterState,
    pub selected: Option<String>,
    pub expansion: ExpansionState,
    pub copied: CopiedFiles,
    pub show_solution: bool,
    /// Free-text solution being edited for the selected record.
    pub user_solution: String,
}

impl ViewState {
    /// Select `record`: expansion recomputed, copy markers and the solution
    /// panel reset.
    pub fn select(self, record: &ProblemRecord, saved_solution: Option<&str>) -> Self {
        Self {
            filter: self.filter,
            selected: Some(record.id.clone()),
            expansion: ExpansionState::for_record(record),
            copied: CopiedFiles::default(),
            show_solution: false,
            user_solution: saved_solution.unwrap_or_default().to_string(),
        }
    }

    pub fn deselect(self) -> Self {
        Self { filter: self.filter, ..Self::default() }
    }

    pub fn toggle_expansion(self, section: FileSection, key: &str) -> Self {
        Self { expansion: self.expansion.toggled(section, key), ..self }
    }

    pub fn set_filter(self, filter: FilterState) -> Self {
        Self { filter, ..self }
    }

    pub fn toggle_solution(self) -> Self {
        Self { show_solution: !self.show_solution, ..self }
    }

    pub fn edit_solution(self, text: &str) -> Self {
        Self { user_solution: text.to_string(), ..self }
    }

    pub fn mark_copied(mut self, section: FileSection, key: &str, now: Instant) -> Self {
        self.copied.mark(&section.file_id(key), now);
        self
    }

    pub fn is_copied(&self, section: FileSection, key: &str, now: Instant) -> bool {
        self.copied.is_copied(&section.file_id(key), now)
    }
}
