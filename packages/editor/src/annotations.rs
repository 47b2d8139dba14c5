//! # Annotation Deriver
//!
//! Translates the host's raw patch stream into deduplicated, classified
//! annotations anchored to stable cell ids, suitable for diff-style
//! rendering.
//!
//! ## Semantics
//!
//! - One annotation per (diff, cell id): a cell inserted and then further
//!   modified within the same patch batch yields a single `added` record.
//! - Index-level `del` resolves against the before snapshot (the cell no
//!   longer exists in the after snapshot).
//! - A content-level patch on a cell with no counterpart in the before
//!   snapshot falls back to `added` - the cell is effectively new.
//! - Deleting and reinserting the same id in one batch reports two
//!   independent records; the branches never cross-match ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use catnote_schema::{Cell, Document};

use crate::patch::{CellPath, Patch, PatchAction};

/// Derived record describing how one cell changed between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Added { added: Cell, anchor: Uuid },
    Deleted { deleted: Cell, anchor: Uuid },
    Changed { before: Cell, after: Cell, anchor: Uuid },
}

impl Annotation {
    /// The stable cell id this annotation is keyed to.
    pub fn anchor(&self) -> Uuid {
        match self {
            Annotation::Added { anchor, .. }
            | Annotation::Deleted { anchor, .. }
            | Annotation::Changed { anchor, .. } => *anchor,
        }
    }
}

/// Derive annotations for one committed change.
///
/// Pure function of the before/after snapshots and the patch list; output
/// order is patch-processing order. Patches outside the cells subtree are
/// skipped silently.
pub fn derive_annotations(
    before: &Document,
    after: &Document,
    patches: &[Patch],
) -> Vec<Annotation> {
    let mut deriver = Deriver {
        before,
        after,
        seen_added: HashSet::new(),
        seen_changed: HashSet::new(),
        annotations: Vec::new(),
    };

    for patch in patches {
        match patch.cell_path() {
            CellPath::Outside => {}
            CellPath::CellIndex(index) => match patch.action {
                PatchAction::Del => deriver.cell_deleted(index),
                PatchAction::Insert => deriver.cell_inserted(index),
                // Whole-cell replacement at index depth reads as a content change.
                PatchAction::Put | PatchAction::Splice => deriver.cell_content_changed(index),
            },
            CellPath::CellContent(index) => deriver.cell_content_changed(index),
        }
    }

    deriver.annotations
}

/// Dedupe state for one derive call.
struct Deriver<'a> {
    before: &'a Document,
    after: &'a Document,
    seen_added: HashSet<Uuid>,
    seen_changed: HashSet<Uuid>,
    annotations: Vec<Annotation>,
}

impl Deriver<'_> {
    fn cell_deleted(&mut self, index: usize) {
        let Some(cell) = self.before.notebook.cells.get(index) else {
            debug!(index, "del patch index out of range in before snapshot");
            return;
        };
        self.annotations.push(Annotation::Deleted {
            deleted: cell.clone(),
            anchor: cell.id(),
        });
    }

    fn cell_inserted(&mut self, index: usize) {
        let Some(cell) = self.after.notebook.cells.get(index) else {
            debug!(index, "insert patch index out of range in after snapshot");
            return;
        };
        if !self.seen_added.insert(cell.id()) {
            return;
        }
        self.annotations.push(Annotation::Added {
            added: cell.clone(),
            anchor: cell.id(),
        });
    }

    fn cell_content_changed(&mut self, index: usize) {
        let Some(after_cell) = self.after.notebook.cells.get(index) else {
            debug!(index, "content patch index out of range in after snapshot");
            return;
        };
        let anchor = after_cell.id();

        // Content changes to a brand-new cell are absorbed into its `added`.
        if self.seen_added.contains(&anchor) {
            return;
        }

        let Some(before_cell) = self.before.find_cell(anchor) else {
            // No counterpart in the before snapshot: the cell is effectively new.
            self.seen_added.insert(anchor);
            self.annotations.push(Annotation::Added {
                added: after_cell.clone(),
                anchor,
            });
            return;
        };

        if !self.seen_changed.insert(anchor) {
            return;
        }
        self.annotations.push(Annotation::Changed {
            before: before_cell.clone(),
            after: after_cell.clone(),
            anchor,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catnote_schema::ObType;

    fn cells_patch(action: PatchAction, index: usize) -> Patch {
        Patch::new(action, vec!["notebook".into(), "cells".into(), index.into()])
    }

    fn content_patch(action: PatchAction, index: usize) -> Patch {
        Patch::new(
            action,
            vec![
                "notebook".into(),
                "cells".into(),
                index.into(),
                "content".into(),
            ],
        )
    }

    fn doc_with(cells: Vec<Cell>) -> Document {
        let mut doc = Document::new("Test", "simple-olog");
        doc.notebook.cells = cells;
        doc
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let before = doc_with(vec![]);
        let after = doc_with(vec![]);

        let annotations = derive_annotations(
            &before,
            &after,
            &[
                cells_patch(PatchAction::Del, 5),
                cells_patch(PatchAction::Insert, 5),
                content_patch(PatchAction::Put, 5),
            ],
        );
        assert!(annotations.is_empty());
    }

    #[test]
    fn index_level_put_reads_as_change() {
        let cell = Cell::rich_text("old");
        let mut replaced = cell.clone();
        if let Cell::RichText { content, .. } = &mut replaced {
            *content = "new".to_string();
        }

        let before = doc_with(vec![cell.clone()]);
        let after = doc_with(vec![replaced.clone()]);

        let annotations =
            derive_annotations(&before, &after, &[cells_patch(PatchAction::Put, 0)]);
        assert_eq!(
            annotations,
            vec![Annotation::Changed {
                before: cell.clone(),
                after: replaced,
                anchor: cell.id(),
            }]
        );
    }

    #[test]
    fn insert_then_content_patch_collapses_to_added() {
        let cell = Cell::object("A", ObType::Basic("Object".to_string()));
        let before = doc_with(vec![]);
        let after = doc_with(vec![cell.clone()]);

        let annotations = derive_annotations(
            &before,
            &after,
            &[
                cells_patch(PatchAction::Insert, 0),
                content_patch(PatchAction::Splice, 0),
                content_patch(PatchAction::Put, 0),
            ],
        );
        assert_eq!(
            annotations,
            vec![Annotation::Added {
                added: cell.clone(),
                anchor: cell.id(),
            }]
        );
    }

    #[test]
    fn duplicate_insert_patches_dedupe() {
        let cell = Cell::rich_text("x");
        let before = doc_with(vec![]);
        let after = doc_with(vec![cell.clone()]);

        let annotations = derive_annotations(
            &before,
            &after,
            &[
                cells_patch(PatchAction::Insert, 0),
                cells_patch(PatchAction::Insert, 0),
            ],
        );
        assert_eq!(annotations.len(), 1);
    }
}
