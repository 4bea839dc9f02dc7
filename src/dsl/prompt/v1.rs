//! Prompt DSL v1

use super::types::{
    check_prompt_fields, EnumGroups, Labels, Metadata, ModelRef, PromptInput, PromptTest,
};
use crate::dsl::schema::{detect_version, ensure_version, from_value, stamp_missing_version};
use crate::dsl::DocumentKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// v1 の初期データは `version` を持たない可能性がある
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PromptDslV1 {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_ref: Option<String>,
}

impl PromptDslV1 {
    pub const VERSION: u64 = 1;

    /// v1 として検証する
    pub fn validate(value: Value) -> Result<Self> {
        let kind = DocumentKind::Prompt;
        let value = stamp_missing_version(value, Self::VERSION);
        ensure_version(kind, detect_version(kind, &value)?, Self::VERSION)?;

        let doc: Self = from_value(kind, value)?;
        check_prompt_fields(
            &doc.id,
            doc.slug.as_deref(),
            doc.name.as_deref(),
            &doc.template,
            &doc.inputs,
            doc.model.as_ref(),
            doc.tests.as_deref(),
        )?;
        Ok(doc)
    }
}
