//! # Positional Batch Editor
//!
//! Applies a list of edit operations against a document's cell sequence
//! as one logical transaction, resolving symbolic position references
//! (ids, names, forward names) to concrete indices.
//!
//! ## Phases
//!
//! 1. **Prepare**: materialize all cells to insert, assigning fresh ids
//!    and resolving morphism dom/cod against the object name index. The
//!    index reflects only operations already walked, so a morphism can
//!    reference an object added earlier in the same batch. No mutation
//!    happens yet; the only fatal check (missing position) fires here.
//! 2. **Insert**: splice each group into the sequence, one group at a
//!    time. Insertions shift subsequent indices, so every group's
//!    position is re-resolved freshly against the current sequence.
//! 3. **Edit/delete**: processed after all insertions, in input order.
//!
//! Unresolvable reference *targets* degrade gracefully (append at end,
//! no-op) rather than failing: edit scripts come from a best-effort
//! automated source and one bad reference must not sink the batch.

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use catnote_schema::{Cell, CellUpdate, Document, Judgment, Ob};

use crate::errors::EditError;
use crate::operations::{CellInit, EditOperation, Position, SEQUENCE_START};

/// Apply a batch of edit operations to the document.
///
/// Runs inside the host's atomic change transaction; on error the
/// document is untouched.
pub fn apply_batch(doc: &mut Document, operations: &[EditOperation]) -> Result<(), EditError> {
    let mut prep = Preparation::for_document(doc);
    let mut deferred: Vec<&EditOperation> = Vec::new();

    for operation in operations {
        match operation {
            EditOperation::AddCell { cell, position } => {
                let position = position.clone().ok_or(EditError::MissingPosition)?;
                let cells = vec![prep.prepare_cell(cell)];
                prep.groups.push(InsertGroup { cells, position });
            }
            EditOperation::AddCells { cells, position } => {
                let position = position.clone().ok_or(EditError::MissingPosition)?;
                let cells = cells.iter().map(|init| prep.prepare_cell(init)).collect();
                prep.groups.push(InsertGroup { cells, position });
            }
            EditOperation::EditCell { .. } | EditOperation::DeleteCell { .. } => {
                deferred.push(operation);
            }
        }
    }

    let Preparation {
        groups,
        new_cell_names,
        ..
    } = prep;

    for group in groups {
        let index = resolve_insert_index(doc, &group.position, &new_cell_names);
        debug!(index, count = group.cells.len(), "inserting cell group");
        drop(doc.notebook.cells.splice(index..index, group.cells));
    }

    for operation in deferred {
        match operation {
            EditOperation::EditCell { id, updates } => edit_cell(doc, *id, updates),
            EditOperation::DeleteCell { id } => delete_cell(doc, *id),
            _ => unreachable!("add operations are consumed in the insert phase"),
        }
    }

    Ok(())
}

/// Cells materialized for one add operation, inserted contiguously.
struct InsertGroup {
    cells: Vec<Cell>,
    position: Position,
}

/// Phase-1 state: the running name indices and the prepared groups.
struct Preparation {
    /// Object name -> entity id, for morphism dom/cod resolution.
    /// Seeded from existing cells, extended as object cells are prepared.
    object_names: HashMap<String, Uuid>,
    /// Name of an entity created in this batch -> its cell id, for
    /// position-reference resolution.
    new_cell_names: HashMap<String, Uuid>,
    groups: Vec<InsertGroup>,
}

impl Preparation {
    fn for_document(doc: &Document) -> Self {
        let object_names = doc
            .notebook
            .cells
            .iter()
            .filter_map(|cell| match cell.judgment() {
                Some(Judgment::Object { id, name, .. }) => Some((name.clone(), *id)),
                _ => None,
            })
            .collect();

        Self {
            object_names,
            new_cell_names: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn prepare_cell(&mut self, init: &CellInit) -> Cell {
        match init {
            CellInit::RichText { content } => Cell::rich_text(content.clone()),
            CellInit::Object { name, ob_type } => {
                let cell = Cell::object(name.clone(), ob_type.clone());
                if let Some(judgment) = cell.judgment() {
                    self.object_names.insert(name.clone(), judgment.id());
                }
                self.record_new_name(name, cell.id());
                cell
            }
            CellInit::Morphism {
                name,
                dom,
                cod,
                mor_type,
            } => {
                let dom = self.resolve_ob(dom);
                let cod = self.resolve_ob(cod);
                let cell = Cell::morphism(name.clone(), Some(dom), Some(cod), mor_type.clone());
                self.record_new_name(name, cell.id());
                cell
            }
        }
    }

    fn record_new_name(&mut self, name: &str, cell_id: Uuid) {
        // Anonymous morphisms (links) are not addressable by name.
        if !name.is_empty() {
            self.new_cell_names.insert(name.to_string(), cell_id);
        }
    }

    /// Resolve a symbolic dom/cod reference against the object name index
    /// as currently known. Unresolved names pass through literally.
    fn resolve_ob(&self, reference: &str) -> Ob {
        match self.object_names.get(reference) {
            Some(entity_id) => Ob::Basic(entity_id.to_string()),
            None => {
                debug!(reference, "dom/cod reference not in object index, passing through");
                Ob::Basic(reference.to_string())
            }
        }
    }
}

/// Resolve a position to a concrete insertion index in the current
/// sequence. Unresolvable targets fall back to the end of the sequence.
fn resolve_insert_index(
    doc: &Document,
    position: &Position,
    new_cell_names: &HashMap<String, Uuid>,
) -> usize {
    let reference = position.reference();
    if reference == SEQUENCE_START {
        return 0;
    }

    let resolved = resolve_reference(doc, reference, new_cell_names);
    match (position, resolved) {
        (Position::After(_), Some(index)) => index + 1,
        (Position::Before(_), Some(index)) => index,
        (_, None) => {
            warn!(reference, "position reference did not resolve, appending at end");
            doc.notebook.cells.len()
        }
    }
}

/// Locate the referenced cell in the sequence: exact cell id first, then
/// cells created earlier in this batch by name, then existing formal
/// cells by declared name. First match wins.
fn resolve_reference(
    doc: &Document,
    reference: &str,
    new_cell_names: &HashMap<String, Uuid>,
) -> Option<usize> {
    if let Ok(id) = reference.parse::<Uuid>() {
        if let Some(index) = doc.notebook.position_of(id) {
            return Some(index);
        }
    }

    if let Some(cell_id) = new_cell_names.get(reference) {
        if let Some(index) = doc.notebook.position_of(*cell_id) {
            return Some(index);
        }
    }

    doc.notebook
        .cells
        .iter()
        .position(|cell| matches!(cell.judgment(), Some(judgment) if judgment.name() == reference))
}

fn edit_cell(doc: &mut Document, id: Uuid, updates: &CellUpdate) {
    match doc.find_cell_mut(id) {
        Some(cell) => updates.apply_to(cell),
        None => warn!(%id, "edit-cell target not found, skipping"),
    }
}

fn delete_cell(doc: &mut Document, id: Uuid) {
    match doc.notebook.position_of(id) {
        Some(index) => {
            doc.notebook.cells.remove(index);
        }
        None => warn!(%id, "delete-cell target not found, skipping"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catnote_schema::ObType;

    fn object_init(name: &str) -> CellInit {
        CellInit::Object {
            name: name.to_string(),
            ob_type: ObType::Basic("Object".to_string()),
        }
    }

    #[test]
    fn missing_position_aborts_before_any_mutation() {
        let mut doc = Document::new("Test", "primitive-stock-flow");
        doc.notebook.cells.push(Cell::rich_text("intro"));
        let snapshot = doc.clone();

        let operations = vec![
            EditOperation::AddCell {
                cell: object_init("A"),
                position: Some(Position::After(SEQUENCE_START.to_string())),
            },
            EditOperation::AddCell {
                cell: object_init("B"),
                position: None,
            },
        ];

        let result = apply_batch(&mut doc, &operations);
        assert!(matches!(result, Err(EditError::MissingPosition)));
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn before_start_sentinel_resolves_to_index_zero() {
        let mut doc = Document::new("Test", "primitive-stock-flow");
        doc.notebook.cells.push(Cell::rich_text("existing"));

        apply_batch(
            &mut doc,
            &[EditOperation::AddCell {
                cell: object_init("A"),
                position: Some(Position::Before(SEQUENCE_START.to_string())),
            }],
        )
        .unwrap();

        assert_eq!(doc.notebook.cells.len(), 2);
        assert_eq!(doc.notebook.cells[0].judgment().unwrap().name(), "A");
    }

    #[test]
    fn anonymous_morphisms_are_not_registered_by_name() {
        let doc = Document::new("Test", "primitive-stock-flow");
        let mut prep = Preparation::for_document(&doc);

        prep.prepare_cell(&CellInit::Morphism {
            name: String::new(),
            dom: "A".to_string(),
            cod: "A".to_string(),
            mor_type: catnote_schema::MorType::Basic("Link".to_string()),
        });

        // An empty name must not become a position-reference anchor.
        assert!(prep.new_cell_names.is_empty());
    }
}
