//! 保存データのエンベロープ
//!
//! Framework / Prompt の一覧と設定をまとめた `AppData`、
//! および選択状態の `SnapshotData`。
//! 未知のキーは読み書きで保持する。

use crate::dsl::{defaults, parse_framework, parse_prompt, FrameworkDsl, PromptDsl};
use chrono::{SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 初回起動時に作成される Framework の名前
pub const INITIAL_FRAMEWORK_NAME: &str = "デフォルトフレームワーク";

/// 選択状態のうち、インポート時に空にするフィールド（セクション, キー）
const SELECTION_FIELDS: [(&str, &str); 3] = [
    ("promptPlayground", "selectedPromptId"),
    ("promptImprovement", "selectedPromptId"),
    ("editPrompt", "id"),
];

/// 現在時刻（RFC 3339, ミリ秒, UTC）
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 保存済みの Framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_framework")]
    pub content: FrameworkDsl,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl FrameworkEntry {
    pub fn new(content: FrameworkDsl, order: i64, timestamp: &str) -> Self {
        Self {
            id: content.id.clone(),
            content,
            order,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }
}

/// 保存済みの Prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_prompt")]
    pub content: PromptDsl,
    pub order: i64,
    #[serde(default = "defaults::prompt_shared")]
    pub shared: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl PromptEntry {
    pub fn new(content: PromptDsl, order: i64, shared: bool, timestamp: &str) -> Self {
        Self {
            id: content.id.clone(),
            content,
            order,
            shared,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    /// 表示名（name が無ければ id）
    pub fn display_name(&self) -> &str {
        self.content.name.as_deref().unwrap_or(&self.id)
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub default_framework_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialized: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 保存されるコレクション全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub frameworks: Vec<FrameworkEntry>,
    #[serde(default)]
    pub prompts: Vec<PromptEntry>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppData {
    /// 初回起動時のデータ（空の既定 Framework を 1 件含む）
    pub fn initial() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let framework = FrameworkDsl::new(&id, INITIAL_FRAMEWORK_NAME);
        let timestamp = now_timestamp();

        Self {
            frameworks: vec![FrameworkEntry::new(framework, 1, &timestamp)],
            prompts: Vec::new(),
            settings: Settings {
                default_framework_id: id,
                version: env!("CARGO_PKG_VERSION").to_string(),
                initialized: Some(true),
                ..Settings::default()
            },
            extra: Map::new(),
        }
    }

    /// 既定の Framework（設定の id が見つからなければ先頭）
    pub fn default_framework(&self) -> Option<&FrameworkEntry> {
        self.frameworks
            .iter()
            .find(|f| f.id == self.settings.default_framework_id)
            .or_else(|| self.frameworks.first())
    }

    pub fn find_prompt(&self, id: &str) -> Option<&PromptEntry> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn contains_prompt(&self, id: &str) -> bool {
        self.find_prompt(id).is_some()
    }

    /// Prompt の order の最大値（空なら 0）
    pub fn max_prompt_order(&self) -> i64 {
        self.prompts.iter().map(|p| p.order).max().unwrap_or(0)
    }

    /// Framework を id で追加または更新する（追加なら true）
    ///
    /// 更新時は order と createdAt を保ち、updatedAt だけ進める。
    pub fn upsert_framework(&mut self, content: FrameworkDsl, timestamp: &str) -> bool {
        if let Some(entry) = self.frameworks.iter_mut().find(|f| f.id == content.id) {
            entry.content = content;
            entry.updated_at = timestamp.to_string();
            return false;
        }

        let order = self.frameworks.iter().map(|f| f.order).max().unwrap_or(0) + 1;
        self.frameworks.push(FrameworkEntry::new(content, order, timestamp));
        true
    }

    /// Prompt を id で追加または更新する（追加なら true）
    ///
    /// 新規は末尾（`max_prompt_order() + 1`）に共有ありで追加する。
    /// 更新時は order・shared・createdAt を保つ。
    pub fn upsert_prompt(&mut self, content: PromptDsl, timestamp: &str) -> bool {
        if !self.contains_prompt(&content.id) {
            let order = self.max_prompt_order() + 1;
            self.prompts.push(PromptEntry::new(
                content,
                order,
                defaults::PROMPT_SHARED,
                timestamp,
            ));
            return true;
        }

        if let Some(entry) = self.prompts.iter_mut().find(|p| p.id == content.id) {
            entry.content = content;
            entry.updated_at = timestamp.to_string();
        }
        false
    }

    /// Prompt を削除する（無ければ None）
    pub fn remove_prompt(&mut self, id: &str) -> Option<PromptEntry> {
        let index = self.prompts.iter().position(|p| p.id == id)?;
        Some(self.prompts.remove(index))
    }

    /// order 昇順（同順位は保存順）の Prompt 一覧
    pub fn prompts_by_order(&self) -> Vec<&PromptEntry> {
        let mut prompts: Vec<&PromptEntry> = self.prompts.iter().collect();
        prompts.sort_by_key(|p| p.order);
        prompts
    }

    /// order 昇順の Framework 一覧
    pub fn frameworks_by_order(&self) -> Vec<&FrameworkEntry> {
        let mut frameworks: Vec<&FrameworkEntry> = self.frameworks.iter().collect();
        frameworks.sort_by_key(|f| f.order);
        frameworks
    }
}

/// 画面の選択状態（スナップショット）
///
/// 構造は UI 側が決めるため汎用マップとして保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotData(pub Map<String, Value>);

impl SnapshotData {
    /// 選択中の Prompt を指すフィールドを空にする
    ///
    /// 変更があった場合のみ true を返す。
    pub fn clear_selection(&mut self) -> bool {
        let mut changed = false;
        for (section, key) in SELECTION_FIELDS {
            let Some(Value::Object(fields)) = self.0.get_mut(section) else {
                continue;
            };
            if let Some(value) = fields.get_mut(key) {
                if value.as_str() != Some("") {
                    *value = Value::String(String::new());
                    changed = true;
                }
            }
        }
        changed
    }

    /// 指定セクションの選択 id
    pub fn selected(&self, section: &str, key: &str) -> Option<&str> {
        self.0.get(section)?.get(key)?.as_str()
    }
}

fn deserialize_framework<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FrameworkDsl, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_framework(value).map_err(D::Error::custom)
}

fn deserialize_prompt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PromptDsl, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_prompt(value).map_err(D::Error::custom)
}

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
#[path = "collection_test.rs"]
mod tests;
