//! Framework DSL v1

use super::Metadata;
use crate::dsl::schema::{
    detect_version, ensure_non_empty, ensure_version, from_value, stamp_missing_version,
    validate_identity,
};
use crate::dsl::{defaults, DocumentKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// v1 の初期データは `version` を持たない可能性がある
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FrameworkDslV1 {
    pub version: u64,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default = "defaults::framework_content")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl FrameworkDslV1 {
    pub const VERSION: u64 = 1;

    /// v1 として検証する
    pub fn validate(value: Value) -> Result<Self> {
        let kind = DocumentKind::Framework;
        let value = stamp_missing_version(value, Self::VERSION);
        ensure_version(kind, detect_version(kind, &value)?, Self::VERSION)?;

        let doc: Self = from_value(kind, value)?;
        validate_identity(kind, &doc.id, doc.slug.as_deref())?;
        ensure_non_empty(kind, "name", &doc.name)?;
        Ok(doc)
    }
}
