//! Prompt DSL の構成要素（v1 / v2 共通）

use crate::dsl::defaults;
use crate::dsl::schema::{ensure, ensure_non_empty};
use crate::dsl::DocumentKind;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const KIND: DocumentKind = DocumentKind::Prompt;

/// 任意の追加情報
pub type Metadata = BTreeMap<String, Value>;

/// 選択肢グループ: グループ名 → 値の一覧
pub type EnumGroups = BTreeMap<String, Vec<String>>;

/// ラベル: 値 → (ロケール → 表示名)
pub type Labels = BTreeMap<String, BTreeMap<String, String>>;

/// 入力値の型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// テンプレートが受け取る入力変数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default = "defaults::input_required")]
    pub required: bool,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PromptInput {
    /// 型・必須を指定して入力を作成
    pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            input_type,
            required: defaults::INPUT_REQUIRED,
            reference: None,
            description: None,
            default: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub(crate) fn check(&self) -> Result<(), SchemaError> {
        ensure_non_empty(KIND, "inputs[].name", &self.name)
    }
}

/// 利用するモデル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelRef {
    pub provider: String,
    pub name: String,
}

impl ModelRef {
    pub(crate) fn check(&self) -> Result<(), SchemaError> {
        ensure_non_empty(KIND, "model.provider", &self.provider)?;
        ensure_non_empty(KIND, "model.name", &self.name)
    }
}

/// テストケースの期待値
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TestAssert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_contains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
}

/// プロンプトのテストケース
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptTest {
    pub name: String,
    #[serde(default, rename = "with")]
    pub with_values: BTreeMap<String, Value>,
    #[serde(default)]
    pub assert: TestAssert,
}

impl PromptTest {
    pub(crate) fn check(&self) -> Result<(), SchemaError> {
        ensure_non_empty(KIND, "tests[].name", &self.name)?;
        if let Some(max) = self.assert.max_tokens {
            ensure(KIND, max > 0, || {
                format!("tests[].assert.maxTokens must be positive, got {}", max)
            })?;
        }
        Ok(())
    }
}

/// 版に依存しない Prompt 本体の不変条件
pub(crate) fn check_prompt_fields(
    id: &str,
    slug: Option<&str>,
    name: Option<&str>,
    template: &str,
    inputs: &[PromptInput],
    model: Option<&ModelRef>,
    tests: Option<&[PromptTest]>,
) -> Result<(), SchemaError> {
    crate::dsl::schema::validate_identity(KIND, id, slug)?;
    if let Some(name) = name {
        ensure_non_empty(KIND, "name", name)?;
    }
    ensure_non_empty(KIND, "template", template)?;
    for input in inputs {
        input.check()?;
    }
    if let Some(model) = model {
        model.check()?;
    }
    for test in tests.unwrap_or_default() {
        test.check()?;
    }
    Ok(())
}
