//! # Catnote Editor
//!
//! Diff annotations and positional batch editing for catnote documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: document tree + typed updates       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor:                                     │
//! │  - apply_batch: symbolic edits → splices    │
//! │  - derive_annotations: patches → diff view  │
//! │  - include_change_in_history: deny-list     │
//! └─────────────────────────────────────────────┘
//!                     ↕
//! ┌─────────────────────────────────────────────┐
//! │ host CRDT layer (external): change(),       │
//! │ patch stream, stable object handles         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **Snapshots in, annotations out**: `derive_annotations` is a pure
//!    function of (before, after, patches) and never mutates.
//! 2. **Id-anchored**: everything keys on stable cell ids, never indices.
//! 3. **Resilient batches**: edit scripts come from a best-effort
//!    automated source; bad reference targets degrade instead of failing.
//! 4. **The CRDT is external**: this crate consumes its patch shapes and
//!    handle resolver, nothing more.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catnote_editor::{apply_batch, derive_annotations, parse_edit_script};
//!
//! // Inside the host's atomic change transaction:
//! let operations = parse_edit_script(&model_response)?;
//! apply_batch(&mut doc, &operations)?;
//!
//! // After the commit, with the host-reported patches:
//! let annotations = derive_annotations(&before, &after, &patches);
//! ```

mod annotations;
mod batch;
mod errors;
mod history;
mod operations;
mod patch;

pub use annotations::{derive_annotations, Annotation};
pub use batch::apply_batch;
pub use errors::EditError;
pub use history::{include_change_in_history, ChangeOp, DecodedChange, ObjId, ObjectIdResolver};
pub use operations::{parse_edit_script, CellInit, EditOperation, Position, SEQUENCE_START};
pub use patch::{include_patch_in_change_group, CellPath, Patch, PatchAction, PathSegment};

// Re-export the schema types callers need alongside the editor API.
pub use catnote_schema::{
    fresh_id, Cell, CellUpdate, ContentUpdate, Document, Judgment, JudgmentUpdate, MorType,
    Notebook, Ob, ObType,
};
