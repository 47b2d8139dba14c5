//! Typed partial updates for edit-cell operations.
//!
//! Updates mirror the [`Cell`] sum type with every field optional, so a
//! merge is checked per variant instead of reflecting over arbitrary JSON
//! shapes. Merge semantics: nested update structures merge field by
//! field; scalar and enum-payload fields overwrite wholesale; an update
//! aimed at a different cell variant is a no-op.

use serde::{Deserialize, Serialize};

use crate::model::{Cell, Judgment, MorType, Ob, ObType};

/// Partial update merged into an existing cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentUpdate>,
}

/// Replacement or partial update of a cell's content, depending on the
/// cell variant it lands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentUpdate {
    /// Full replacement of a rich-text cell's content.
    Text(String),
    /// Field-wise merge into a formal cell's judgment.
    Judgment(JudgmentUpdate),
}

/// Partial update of a judgment. Fields absent from the update are left
/// untouched; present fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JudgmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ob_type: Option<ObType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mor_type: Option<MorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<Ob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod: Option<Ob>,
}

impl CellUpdate {
    /// Merge this update into `cell`. Mismatched variants are skipped.
    pub fn apply_to(&self, cell: &mut Cell) {
        match (&self.content, cell) {
            (Some(ContentUpdate::Text(text)), Cell::RichText { content, .. }) => {
                *content = text.clone();
            }
            (Some(ContentUpdate::Judgment(update)), Cell::Formal { content, .. }) => {
                update.apply_to(content);
            }
            _ => {}
        }
    }
}

impl JudgmentUpdate {
    /// Merge this update into `judgment`. Fields that do not exist on the
    /// target variant are skipped.
    pub fn apply_to(&self, judgment: &mut Judgment) {
        match judgment {
            Judgment::Object { name, ob_type, .. } => {
                if let Some(new_name) = &self.name {
                    *name = new_name.clone();
                }
                if let Some(new_type) = &self.ob_type {
                    *ob_type = new_type.clone();
                }
            }
            Judgment::Morphism {
                name,
                mor_type,
                dom,
                cod,
                ..
            } => {
                if let Some(new_name) = &self.name {
                    *name = new_name.clone();
                }
                if let Some(new_type) = &self.mor_type {
                    *mor_type = new_type.clone();
                }
                if let Some(new_dom) = &self.dom {
                    *dom = Some(new_dom.clone());
                }
                if let Some(new_cod) = &self.cod {
                    *cod = Some(new_cod.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_update(name: &str) -> CellUpdate {
        CellUpdate {
            content: Some(ContentUpdate::Judgment(JudgmentUpdate {
                name: Some(name.to_string()),
                ..Default::default()
            })),
        }
    }

    #[test]
    fn text_update_replaces_rich_text_content() {
        let mut cell = Cell::rich_text("old");
        let update = CellUpdate {
            content: Some(ContentUpdate::Text("new".to_string())),
        };

        update.apply_to(&mut cell);
        assert!(matches!(cell, Cell::RichText { content, .. } if content == "new"));
    }

    #[test]
    fn judgment_update_merges_field_wise() {
        let mut cell = Cell::morphism(
            "flow",
            Some(Ob::Basic("a".to_string())),
            Some(Ob::Basic("b".to_string())),
            MorType::Basic("Link".to_string()),
        );
        let original_id = cell.judgment().unwrap().id();

        let update = CellUpdate {
            content: Some(ContentUpdate::Judgment(JudgmentUpdate {
                name: Some("renamed".to_string()),
                dom: Some(Ob::Basic("c".to_string())),
                ..Default::default()
            })),
        };
        update.apply_to(&mut cell);

        let judgment = cell.judgment().unwrap();
        assert_eq!(judgment.name(), "renamed");
        assert_eq!(judgment.id(), original_id);
        match judgment {
            Judgment::Morphism { dom, cod, mor_type, .. } => {
                // dom overwritten wholesale, untouched fields preserved
                assert_eq!(dom, &Some(Ob::Basic("c".to_string())));
                assert_eq!(cod, &Some(Ob::Basic("b".to_string())));
                assert_eq!(mor_type, &MorType::Basic("Link".to_string()));
            }
            _ => panic!("expected morphism"),
        }
    }

    #[test]
    fn variant_mismatch_is_a_no_op() {
        let mut cell = Cell::rich_text("text");
        let before = cell.clone();

        object_update("renamed").apply_to(&mut cell);
        assert_eq!(cell, before);
    }

    #[test]
    fn update_deserializes_from_host_json() {
        let update: CellUpdate =
            serde_json::from_str(r#"{"content": {"name": "New Name"}}"#).unwrap();
        assert_eq!(update, object_update("New Name"));

        let text: CellUpdate = serde_json::from_str(r#"{"content": "New text"}"#).unwrap();
        assert_eq!(
            text.content,
            Some(ContentUpdate::Text("New text".to_string()))
        );

        let empty: CellUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CellUpdate::default());
    }
}
