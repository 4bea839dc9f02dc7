//! Prompt DSL v2

use super::types::{
    check_prompt_fields, EnumGroups, Labels, Metadata, ModelRef, PromptInput, PromptTest,
};
use super::PromptDslV1;
use crate::dsl::schema::{detect_version, ensure_version, from_value};
use crate::dsl::DocumentKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// フィールド宣言順がそのまま YAML 出力順になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PromptDslV2 {
    pub version: u64,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: String,
    #[serde(default)]
    pub inputs: Vec<PromptInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enums: Option<EnumGroups>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<PromptTest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policies: Option<Metadata>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 弱参照: 既定の Framework への関連付けのみに使い、存在は検証しない
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_ref: Option<String>,
}

impl PromptDslV2 {
    pub const VERSION: u64 = 2;

    /// 必須フィールドのみで最新版ドキュメントを作成
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION,
            id: id.into(),
            slug: None,
            name: None,
            template: template.into(),
            inputs: Vec::new(),
            model: None,
            enums: None,
            labels: None,
            metadata: None,
            tests: None,
            context: None,
            policies: None,
            tags: Vec::new(),
            framework_ref: None,
        }
    }

    /// 最新版として厳密に検証する（未知フィールドはエラー）
    pub fn validate(value: Value) -> Result<Self> {
        let kind = DocumentKind::Prompt;
        ensure_version(kind, detect_version(kind, &value)?, Self::VERSION)?;

        let doc: Self = from_value(kind, value)?;
        doc.check()?;
        Ok(doc)
    }

    /// 構築済みドキュメントの不変条件検証
    pub fn check(&self) -> Result<()> {
        ensure_version(DocumentKind::Prompt, self.version, Self::VERSION)?;
        check_prompt_fields(
            &self.id,
            self.slug.as_deref(),
            self.name.as_deref(),
            &self.template,
            &self.inputs,
            self.model.as_ref(),
            self.tests.as_deref(),
        )?;
        Ok(())
    }
}

impl From<PromptDslV1> for PromptDslV2 {
    fn from(v1: PromptDslV1) -> Self {
        Self {
            version: Self::VERSION,
            id: v1.id,
            slug: v1.slug,
            name: v1.name,
            template: v1.template,
            inputs: v1.inputs,
            model: v1.model,
            enums: v1.enums,
            labels: v1.labels,
            metadata: v1.metadata,
            tests: v1.tests,
            context: v1.context,
            policies: v1.policies,
            tags: v1.tags,
            framework_ref: v1.framework_ref,
        }
    }
}

/// v1 → v2（フィールドは同一で版番号のみ更新）
pub(super) fn migrate_from_v1(value: Value) -> Result<Value> {
    let v1 = PromptDslV1::validate(value)?;
    Ok(serde_json::to_value(PromptDslV2::from(v1))?)
}
