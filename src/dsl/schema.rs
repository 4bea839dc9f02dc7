//! スキーマ共通部品
//!
//! - 入力の正規化（文字列 / パース済み値）
//! - 版の検出とマイグレーションチェーン
//! - UUID・スラッグ・必須文字列の検証
//!
//! ## parse の状態遷移
//!
//! ```text
//! Start ─▶ DetectVersion ─┬─▶ ValidateCurrent ─▶ Done(Document)
//!                         │          ▲
//!                         └─▶ MigrateStep(v) ─▶ MigrateStep(v+1) ─▶ …
//!
//! 失敗時: Error(SchemaError | UnsupportedVersion)
//! ```

use super::defaults::LEGACY_VERSION;
use super::serializer::load_yaml;
use super::DocumentKind;
use crate::error::{PromptOpsError, Result, SchemaError};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use uuid::Uuid;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern is a valid regex")
});

/// `parse_*` への入力
///
/// 文字列は YAML（JSON 互換）として読み込み、値はそのまま扱う。
#[derive(Debug, Clone)]
pub enum DslInput<'a> {
    Text(&'a str),
    Value(Value),
}

impl<'a> From<&'a str> for DslInput<'a> {
    fn from(text: &'a str) -> Self {
        DslInput::Text(text)
    }
}

impl<'a> From<&'a String> for DslInput<'a> {
    fn from(text: &'a String) -> Self {
        DslInput::Text(text.as_str())
    }
}

impl From<Value> for DslInput<'_> {
    fn from(value: Value) -> Self {
        DslInput::Value(value)
    }
}

impl DslInput<'_> {
    /// 汎用値へ変換（文字列はここでデコード）
    pub fn into_value(self, kind: DocumentKind) -> std::result::Result<Value, SchemaError> {
        match self {
            DslInput::Text(text) => load_yaml(text)
                .map_err(|e| SchemaError::new(kind, format!("failed to decode YAML: {}", e))),
            DslInput::Value(value) => Ok(value),
        }
    }
}

/// 入力値から版番号を読み取る（`version` 欠落時は最古版）
pub fn detect_version(kind: DocumentKind, value: &Value) -> Result<u64> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::new(kind, "expected a mapping at the document root"))?;

    match object.get("version") {
        None => Ok(LEGACY_VERSION),
        Some(v) => v.as_u64().ok_or_else(|| {
            SchemaError::new(kind, format!("version must be a positive integer, got {}", v))
                .into()
        }),
    }
}

/// `version` が無ければ指定の版を付与する
pub fn stamp_missing_version(mut value: Value, version: u64) -> Value {
    if let Some(object) = value.as_object_mut() {
        object
            .entry("version")
            .or_insert_with(|| Value::from(version));
    }
    value
}

/// `version` を指定の版で上書きする
pub fn stamp_version(mut value: Value, version: u64) -> Value {
    if let Some(object) = value.as_object_mut() {
        object.insert("version".to_string(), Value::from(version));
    }
    value
}

/// 版 `from` から `from + 1` への変換
///
/// `apply` は版 `from` として妥当な値を受け取り、次の版の形を返す純関数。
pub struct MigrationStep {
    pub from: u64,
    pub apply: fn(Value) -> Result<Value>,
}

/// ドキュメント種別ごとのマイグレーションチェーン
pub struct MigrationChain {
    kind: DocumentKind,
    latest: u64,
    steps: &'static [MigrationStep],
}

impl MigrationChain {
    pub const fn new(kind: DocumentKind, latest: u64, steps: &'static [MigrationStep]) -> Self {
        Self {
            kind,
            latest,
            steps,
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// 入力を最新版の形まで引き上げる（最新版の検証は呼び出し側）
    pub fn upgrade(&self, value: Value) -> Result<Value> {
        let mut version = detect_version(self.kind, &value)?;
        if version > self.latest {
            return Err(self.unsupported(version));
        }

        let mut value = value;
        while version < self.latest {
            let step = self
                .steps
                .iter()
                .find(|s| s.from == version)
                .ok_or_else(|| self.unsupported(version))?;
            value = (step.apply)(value)?;
            version += 1;
        }

        Ok(value)
    }

    fn unsupported(&self, version: u64) -> PromptOpsError {
        PromptOpsError::UnsupportedVersion {
            kind: self.kind,
            version,
        }
    }
}

/// 値を型付きドキュメントへデシリアライズする
pub fn from_value<T: DeserializeOwned>(
    kind: DocumentKind,
    value: Value,
) -> std::result::Result<T, SchemaError> {
    serde_json::from_value(value).map_err(|e| SchemaError::new(kind, e.to_string()))
}

/// 版番号が期待値と一致するか
pub fn ensure_version(kind: DocumentKind, actual: u64, expected: u64) -> Result<()> {
    if actual != expected {
        return Err(PromptOpsError::UnsupportedVersion {
            kind,
            version: actual,
        });
    }
    Ok(())
}

/// 条件が偽なら SchemaError
pub fn ensure(
    kind: DocumentKind,
    condition: bool,
    message: impl FnOnce() -> String,
) -> std::result::Result<(), SchemaError> {
    if condition {
        Ok(())
    } else {
        Err(SchemaError::new(kind, message()))
    }
}

/// ハイフン区切りの UUID 文字列か
pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// スラッグ形式（`^[a-z0-9][a-z0-9_-]*$`）か
pub fn is_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// id / slug の共通検証
pub fn validate_identity(
    kind: DocumentKind,
    id: &str,
    slug: Option<&str>,
) -> std::result::Result<(), SchemaError> {
    ensure(kind, is_uuid(id), || format!("id must be a UUID, got '{}'", id))?;
    if let Some(slug) = slug {
        ensure(kind, is_slug(slug), || {
            format!("slug must match ^[a-z0-9][a-z0-9_-]*$, got '{}'", slug)
        })?;
    }
    Ok(())
}

/// 必須文字列が空でないか
pub fn ensure_non_empty(
    kind: DocumentKind,
    field: &str,
    value: &str,
) -> std::result::Result<(), SchemaError> {
    ensure(kind, !value.is_empty(), || format!("{} must not be empty", field))
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
