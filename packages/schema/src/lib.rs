//! # Catnote Schema
//!
//! Shared data model for catnote documents.
//!
//! A document is an ordered sequence of uniquely-identified cells nested
//! inside a notebook. Cells are either rich text, a formal judgment
//! (an object or morphism declaration), or a placeholder stem. The JSON
//! layout of every type here matches the host application's document
//! schema, so snapshots round-trip through serde unchanged.
//!
//! The schema crate owns:
//! - the document tree ([`Document`], [`Notebook`], [`Cell`], [`Judgment`])
//! - fresh time-ordered id generation ([`fresh_id`])
//! - typed partial updates for edit-cell merges ([`CellUpdate`])
//!
//! Everything that *interprets* documents (diffing, batch editing) lives
//! in the editor crate.

mod ids;
mod model;
mod update;

pub use ids::fresh_id;
pub use model::{Cell, Document, Judgment, MorType, Notebook, Ob, ObType};
pub use update::{CellUpdate, ContentUpdate, JudgmentUpdate};
