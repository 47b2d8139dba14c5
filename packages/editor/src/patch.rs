//! Patch shapes consumed from the external document layer.
//!
//! The host CRDT reports every committed change as an ordered list of
//! structural patches. This module only mirrors that wire shape and
//! classifies patch paths; producing patches is the host's job.

use serde::{Deserialize, Serialize};

/// Structural delta action, as reported by the host document layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchAction {
    Insert,
    Del,
    Put,
    Splice,
}

/// One step of a patch path: a map key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A single structural delta within the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub action: PatchAction,
    pub path: Vec<PathSegment>,
}

/// Where a patch path lands relative to the `notebook.cells` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPath {
    /// Path does not start with `["notebook", "cells", <index>]`.
    Outside,
    /// Path addresses one cell in the sequence (exactly index depth).
    CellIndex(usize),
    /// Path addresses content inside the cell at the given index.
    CellContent(usize),
}

impl Patch {
    pub fn new(action: PatchAction, path: Vec<PathSegment>) -> Self {
        Self { action, path }
    }

    /// Classify this patch's path against the cells sequence.
    pub fn cell_path(&self) -> CellPath {
        let is_cells_prefix = matches!(
            (self.path.first(), self.path.get(1)),
            (Some(PathSegment::Key(root)), Some(PathSegment::Key(field)))
                if root == "notebook" && field == "cells"
        );
        if !is_cells_prefix {
            return CellPath::Outside;
        }

        match self.path.get(2) {
            Some(PathSegment::Index(index)) if self.path.len() == 3 => CellPath::CellIndex(*index),
            Some(PathSegment::Index(index)) => CellPath::CellContent(*index),
            _ => CellPath::Outside,
        }
    }
}

/// Whether a patch belongs to a user-facing change group: anything under
/// the notebook subtree does, metadata siblings do not.
pub fn include_patch_in_change_group(patch: &Patch) -> bool {
    matches!(patch.path.first(), Some(PathSegment::Key(root)) if root == "notebook")
}
