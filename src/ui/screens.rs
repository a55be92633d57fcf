use crate::models::{Record, RecordId};
use crate::store::RecordStore;

/// Cursor over a list whose contents live elsewhere. Callers pass the current
/// length on every move so the cursor never points past the end.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) selected: usize,
}

impl Selection {
    pub(crate) fn move_by(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = len as isize - 1;
        let new = (self.selected as isize + offset).clamp(0, max);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Matches from the most recent name search. Records are tracked by id so
/// edits made from this screen keep them listed even if the name changes.
pub(crate) struct ResultsScreen {
    pub(crate) query: String,
    pub(crate) ids: Vec<RecordId>,
    pub(crate) selection: Selection,
}

impl ResultsScreen {
    pub(crate) fn new(query: String, matches: &[&Record]) -> Self {
        Self {
            query,
            ids: matches.iter().map(|record| record.id).collect(),
            selection: Selection::default(),
        }
    }

    /// Resolve the tracked ids against the store, skipping any that vanished.
    pub(crate) fn records<'a>(&self, store: &'a RecordStore) -> Vec<&'a Record> {
        self.ids.iter().filter_map(|id| store.get(*id)).collect()
    }

    pub(crate) fn current_id(&self) -> Option<RecordId> {
        self.ids.get(self.selection.selected).copied()
    }

    /// Stop tracking a deleted record.
    pub(crate) fn forget(&mut self, id: RecordId) {
        self.ids.retain(|tracked| *tracked != id);
        self.selection.ensure_in_bounds(self.ids.len());
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
