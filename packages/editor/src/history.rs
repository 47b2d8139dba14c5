//! History filtering for committed change-sets.
//!
//! Decides whether a committed change should surface in the user-facing
//! history view. Metadata subtrees (branch metadata, tags, the diff-base
//! marker, change-group summaries) live at nested, varying paths, so the
//! filter matches them by stable object identity rather than path string.
//!
//! Deny-list rather than allow-list: precisely enumerating every
//! content-relevant path in a nested schema is too fragile.

use std::collections::HashSet;

/// Opaque, stable handle to a node in the host document tree.
///
/// Handles survive path renumbering; only the host document layer can
/// mint them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(u64);

impl ObjId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// The host document layer's "resolve path to stable handle" operation.
pub trait ObjectIdResolver {
    /// Handle for a top-level subtree, if it exists in the document.
    fn object_id(&self, path: &str) -> Option<ObjId>;
}

/// One low-level operation inside a decoded change.
#[derive(Debug, Clone)]
pub struct ChangeOp {
    /// Handle of the object the operation touched.
    pub obj: ObjId,
}

/// A committed change, decoded by the host into its operations.
#[derive(Debug, Clone)]
pub struct DecodedChange {
    pub ops: Vec<ChangeOp>,
}

const METADATA_SUBTREES: [&str; 4] = ["branchMetadata", "tags", "diffBase", "changeGroupSummaries"];

/// Build the history predicate for one document: a change is included
/// only if none of its operations touches a metadata subtree.
pub fn include_change_in_history<R: ObjectIdResolver>(
    resolver: &R,
) -> impl Fn(&DecodedChange) -> bool {
    let metadata: HashSet<ObjId> = METADATA_SUBTREES
        .iter()
        .filter_map(|path| resolver.object_id(path))
        .collect();

    move |change| change.ops.iter().all(|op| !metadata.contains(&op.obj))
}
