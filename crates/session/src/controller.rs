use std::time::Instant;

use catalog::{FileSection, ProblemRecord};
use dataset::{DatasetStore, FilterState, UploadedDataset};
use kvstore::Storage;
use tracing::debug;

use crate::{is_draft_slot, ViewState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogCounts {
    pub shown: usize,
    pub total: usize,
}

/// A dataset store plus the view state of the one UI driving it.
pub struct Session<S: Storage> {
    store: DatasetStore<S>,
    view: ViewState,
}

impl<S: Storage> Session<S> {
    pub fn new(store: DatasetStore<S>) -> Self {
        Self { store, view: ViewState::default() }
    }

    pub fn store(&self) -> &DatasetStore<S> {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    fn update(&mut self, f: impl FnOnce(ViewState) -> ViewState) {
        let view = std::mem::take(&mut self.view);
        self.view = f(view);
    }

    pub fn selected(&self) -> Option<&ProblemRecord> {
        self.view.selected.as_deref().and_then(|id| self.store.find(id))
    }

    // ---------------- Dataset lifecycle ---------------- //

    /// Install a new upload; the previous selection no longer applies.
    pub fn install(&mut self, upload: UploadedDataset) {
        self.store.install(upload);
        self.update(ViewState::deselect);
    }

    pub fn reset_dataset(&mut self) {
        self.store.clear_dataset();
        self.update(ViewState::deselect);
    }

    // ---------------- Catalog ---------------- //

    pub fn set_filter(&mut self, filter: FilterState) {
        self.update(|v| v.set_filter(filter));
    }

    pub fn visible(&self) -> Vec<&ProblemRecord> {
        self.store.filter(&self.view.filter)
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            shown: self.visible().len(),
            total: self.store.records().len(),
        }
    }

    /// Select by id. Returns `false` (and changes nothing) for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(record) = self.store.find(id) else {
            debug!(id, "select: no such record");
            return false;
        };
        let next = std::mem::take(&mut self.view).select(record, self.store.load_solution(id));
        self.view = next;
        true
    }

    pub fn toggle_expansion(&mut self, section: FileSection, key: &str) {
        self.update(|v| v.toggle_expansion(section, key));
    }

    pub fn toggle_solution(&mut self) {
        self.update(ViewState::toggle_solution);
    }

    // ---------------- Edits routed to the store ---------------- //

    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let id = self.view.selected.clone()?;
        Some(self.store.toggle_favorite(&id))
    }

    pub fn toggle_solved(&mut self) -> Option<bool> {
        let id = self.view.selected.clone()?;
        Some(self.store.toggle_solved(&id))
    }

    /// Store draft text for an empty patch slot of the selected record.
    ///
    /// Returns `false` when nothing is selected or `filename` is not a draft slot.
    pub fn edit_draft(&mut self, filename: &str, content: &str) -> bool {
        let Some(record) = self.selected() else { return false };
        let is_slot = record.patch_data.get(filename).is_some_and(|v| is_draft_slot(v));
        if !is_slot {
            return false;
        }
        let id = record.id.clone();
        self.store.set_draft_patch_file(&id, filename, content);
        true
    }

    /// Patch text to display: the user's draft for draft slots, else the shipped value.
    pub fn patch_text(&self, filename: &str) -> Option<String> {
        let record = self.selected()?;
        let shipped = record.patch_data.get(filename)?;
        if is_draft_slot(shipped) {
            if let Some(draft) = self.store.draft_patch(&record.id).remove(filename) {
                return Some(draft);
            }
        }
        Some(shipped.clone())
    }

    pub fn edit_solution(&mut self, text: &str) {
        self.update(|v| v.edit_solution(text));
    }

    /// Persist the solution being edited; blank text is not saved.
    pub fn save_solution(&mut self) -> bool {
        let Some(id) = self.view.selected.clone() else { return false };
        self.store.save_solution(&id, &self.view.user_solution)
    }

    /// Mark a file of the selected record as copied and return its text.
    pub fn copy_file(&mut self, section: FileSection, key: &str, now: Instant) -> Option<String> {
        let text = match section {
            FileSection::Patch => self.patch_text(key)?,
            _ => self.selected()?.files(section).get(key)?.clone(),
        };
        self.update(|v| v.mark_copied(section, key, now));
        Some(text)
    }

    /// Clear copy markers whose feedback window has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        self.view.copied.expire(now)
    }
}
