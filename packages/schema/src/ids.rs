use uuid::Uuid;

/// Generate a fresh time-ordered id (UUID v7) for new cells and entities.
///
/// Time ordering keeps ids roughly sortable by creation time, which the
/// host application relies on for stable anchor ordering.
pub fn fresh_id() -> Uuid {
    Uuid::now_v7()
}
