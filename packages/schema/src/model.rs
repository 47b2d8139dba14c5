use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::fresh_id;

/// Object type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum ObType {
    Basic(String),
    Tabulator(Box<MorType>),
}

/// Morphism type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum MorType {
    Basic(String),
    Hom(Box<ObType>),
}

/// Reference to an object, as used in morphism domains and codomains.
///
/// The payload is an entity id in a well-formed document, but batch
/// editing lets an unresolved name pass through literally, so it stays
/// a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content")]
pub enum Ob {
    Basic(String),
    Tabulated(String),
}

/// Formal judgment: a typed declaration of an object or morphism.
///
/// The judgment's `id` identifies the declared entity and is distinct
/// from the id of the cell that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Judgment {
    Object {
        id: Uuid,
        name: String,
        #[serde(rename = "obType")]
        ob_type: ObType,
    },
    Morphism {
        id: Uuid,
        name: String,
        #[serde(rename = "morType")]
        mor_type: MorType,
        dom: Option<Ob>,
        cod: Option<Ob>,
    },
}

impl Judgment {
    /// Id of the declared entity.
    pub fn id(&self) -> Uuid {
        match self {
            Judgment::Object { id, .. } | Judgment::Morphism { id, .. } => *id,
        }
    }

    /// Declared name. May be empty (anonymous link morphisms).
    pub fn name(&self) -> &str {
        match self {
            Judgment::Object { name, .. } | Judgment::Morphism { name, .. } => name,
        }
    }
}

/// Atomic unit of notebook content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "kebab-case")]
pub enum Cell {
    RichText { id: Uuid, content: String },
    Formal { id: Uuid, content: Judgment },
    Stem { id: Uuid },
}

impl Cell {
    /// Stable cell id.
    pub fn id(&self) -> Uuid {
        match self {
            Cell::RichText { id, .. } | Cell::Formal { id, .. } | Cell::Stem { id } => *id,
        }
    }

    /// The cell's judgment, if it is a formal cell.
    pub fn judgment(&self) -> Option<&Judgment> {
        match self {
            Cell::Formal { content, .. } => Some(content),
            _ => None,
        }
    }

    /// New rich-text cell with a fresh id.
    pub fn rich_text(content: impl Into<String>) -> Self {
        Cell::RichText {
            id: fresh_id(),
            content: content.into(),
        }
    }

    /// New formal cell declaring an object. Cell and entity get fresh ids.
    pub fn object(name: impl Into<String>, ob_type: ObType) -> Self {
        Cell::Formal {
            id: fresh_id(),
            content: Judgment::Object {
                id: fresh_id(),
                name: name.into(),
                ob_type,
            },
        }
    }

    /// New formal cell declaring a morphism. Cell and entity get fresh ids.
    pub fn morphism(
        name: impl Into<String>,
        dom: Option<Ob>,
        cod: Option<Ob>,
        mor_type: MorType,
    ) -> Self {
        Cell::Formal {
            id: fresh_id(),
            content: Judgment::Morphism {
                id: fresh_id(),
                name: name.into(),
                mor_type,
                dom,
                cod,
            },
        }
    }
}

/// Ordered cell sequence. Order is semantically meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Index of the cell with the given id, if present.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id() == id)
    }
}

/// A notebook document: name, theory identifier, type discriminant, and
/// the cell sequence. Mutated only inside the host's atomic change
/// transactions; readers see before/after snapshots plus a patch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub theory: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub notebook: Notebook,
}

impl Document {
    /// New empty model document.
    pub fn new(name: impl Into<String>, theory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theory: theory.into(),
            doc_type: "model".to_string(),
            notebook: Notebook { cells: Vec::new() },
        }
    }

    /// Find a cell by id.
    pub fn find_cell(&self, id: Uuid) -> Option<&Cell> {
        self.notebook.cells.iter().find(|cell| cell.id() == id)
    }

    /// Find a cell by id, mutably.
    pub fn find_cell_mut(&mut self, id: Uuid) -> Option<&mut Cell> {
        self.notebook.cells.iter_mut().find(|cell| cell.id() == id)
    }
}
