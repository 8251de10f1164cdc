//! Homepage section model (storefront read side).

use serde::Serialize;
use serde_json::Value;

use velvet_loom_core::{SectionId, SectionType};

/// A published homepage section element, ordered by `position`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Section {
    pub id: SectionId,
    pub section_type: SectionType,
    /// Flexible per-type JSON payload (validated on write by the admin).
    pub payload: Value,
    pub position: i32,
}
