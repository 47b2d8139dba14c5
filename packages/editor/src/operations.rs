//! # Edit Operations
//!
//! Wire types for batch edits. The JSON layout matches the edit scripts
//! the AI assistant emits inside `<edit>...</edit>` blocks, so a parsed
//! script deserializes directly into a `Vec<EditOperation>`:
//!
//! ```json
//! [
//!   {"type": "add-cell", "cellType": "object", "name": "Dead",
//!    "obType": {"tag": "Basic", "content": "Object"},
//!    "position": {"after": "_start"}},
//!   {"type": "edit-cell", "id": "...", "updates": {"content": "New text"}},
//!   {"type": "delete-cell", "id": "..."}
//! ]
//! ```
//!
//! Parsing and shape validation live here; applying operations is
//! [`apply_batch`](crate::apply_batch)'s job.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catnote_schema::{CellUpdate, MorType, ObType};

use crate::errors::EditError;

/// Sentinel position reference denoting the start of the cell sequence.
pub const SEQUENCE_START: &str = "_start";

/// One step of a batch edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EditOperation {
    /// Insert a single cell at a symbolic position.
    AddCell {
        #[serde(flatten)]
        cell: CellInit,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    /// Insert an ordered group of cells contiguously at one position.
    AddCells {
        cells: Vec<CellInit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    /// Merge a partial update into the cell with the given id.
    EditCell { id: Uuid, updates: CellUpdate },
    /// Remove the cell with the given id from the sequence.
    DeleteCell { id: Uuid },
}

/// Definition of a cell to create. Ids are assigned at apply time;
/// morphism `dom`/`cod` are symbolic references resolved against the
/// object name index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cellType", rename_all = "kebab-case")]
pub enum CellInit {
    RichText {
        content: String,
    },
    Object {
        name: String,
        #[serde(rename = "obType")]
        ob_type: ObType,
    },
    Morphism {
        name: String,
        dom: String,
        cod: String,
        #[serde(rename = "morType")]
        mor_type: MorType,
    },
}

/// Symbolic insertion point: immediately after or immediately before the
/// referenced cell. The reference is an existing cell id, the name of a
/// named entity (existing or created earlier in the same batch), or
/// [`SEQUENCE_START`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    After(String),
    Before(String),
}

impl Position {
    /// The symbolic reference this position anchors to.
    pub fn reference(&self) -> &str {
        match self {
            Position::After(reference) | Position::Before(reference) => reference,
        }
    }
}

/// Extract the `<edit>` block from a model response and parse it into an
/// operation list. Text outside the block is ignored.
pub fn parse_edit_script(response: &str) -> Result<Vec<EditOperation>, EditError> {
    let start = response
        .find("<edit>")
        .map(|at| at + "<edit>".len())
        .ok_or(EditError::MissingEditBlock)?;
    let end = response[start..]
        .find("</edit>")
        .map(|at| start + at)
        .ok_or(EditError::MissingEditBlock)?;

    Ok(serde_json::from_str(response[start..end].trim())?)
}
