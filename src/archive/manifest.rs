//! 並び順・共有設定のマニフェスト

use crate::dsl::defaults;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// マニフェストの固定ファイル名
pub const MANIFEST_FILE: &str = "manifest.json";

/// Prompt 1 件分の並び順と共有フラグ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub order: i64,
    #[serde(default = "defaults::prompt_shared")]
    pub shared: bool,
}

impl ManifestEntry {
    pub fn new(id: impl Into<String>, order: i64, shared: bool) -> Self {
        Self {
            id: id.into(),
            order,
            shared,
        }
    }
}

/// JSON 配列として書き出す
pub fn encode_manifest(entries: &[ManifestEntry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

/// 読み込めなければ None（呼び出し側はファイル順にフォールバック）
pub fn decode_manifest(bytes: &[u8]) -> Option<Vec<ManifestEntry>> {
    match serde_json::from_slice(bytes) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::debug!(error = %e, "manifest could not be decoded");
            None
        }
    }
}
