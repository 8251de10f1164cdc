//! Homepage content models (admin view, including drafts).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use velvet_loom_core::{SectionId, SectionType};

/// A homepage section element, draft or published.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Section {
    pub id: SectionId,
    pub section_type: SectionType,
    pub payload: Value,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
