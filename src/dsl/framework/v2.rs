//! Framework DSL v2

use super::{FrameworkDslV1, Metadata};
use crate::dsl::schema::{
    detect_version, ensure_non_empty, ensure_version, from_value, validate_identity,
};
use crate::dsl::{defaults, DocumentKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// フィールド宣言順がそのまま YAML 出力順になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FrameworkDslV2 {
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

impl FrameworkDslV2 {
    pub const VERSION: u64 = 2;

    /// 本文は既定値（空）で作成
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION,
            id: id.into(),
            slug: None,
            name: name.into(),
            content: defaults::framework_content(),
            metadata: None,
        }
    }

    /// 最新版として厳密に検証する（未知フィールドはエラー）
    pub fn validate(value: Value) -> Result<Self> {
        let kind = DocumentKind::Framework;
        ensure_version(kind, detect_version(kind, &value)?, Self::VERSION)?;

        let doc: Self = from_value(kind, value)?;
        doc.check()?;
        Ok(doc)
    }

    /// 構築済みドキュメントの不変条件検証
    pub fn check(&self) -> Result<()> {
        let kind = DocumentKind::Framework;
        ensure_version(kind, self.version, Self::VERSION)?;
        validate_identity(kind, &self.id, self.slug.as_deref())?;
        ensure_non_empty(kind, "name", &self.name)?;
        Ok(())
    }
}

impl From<FrameworkDslV1> for FrameworkDslV2 {
    fn from(v1: FrameworkDslV1) -> Self {
        Self {
            version: Self::VERSION,
            id: v1.id,
            slug: v1.slug,
            name: v1.name,
            content: v1.content,
            metadata: v1.metadata,
        }
    }
}

/// v1 → v2（フィールドは同一で版番号のみ更新）
pub(super) fn migrate_from_v1(value: Value) -> Result<Value> {
    let v1 = FrameworkDslV1::validate(value)?;
    Ok(serde_json::to_value(FrameworkDslV2::from(v1))?)
}
