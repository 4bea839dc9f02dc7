//! 永続化の抽象化
//!
//! コアは 4 つの操作以外でストレージに触れない。
//! テスト時は MockStorage を注入して保存回数を検証できる。
//! 本番コードでは FileStorage を使用する。

use crate::collection::{AppData, SnapshotData};
use crate::error::{PromptOpsError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// コレクションの保存キー
pub const APP_DATA_KEY: &str = "nexus/appData";

/// 選択状態の保存キー
pub const SNAPSHOT_KEY: &str = "nexus/snapshot";

/// キー・バリュー型の永続化バックエンド
///
/// 読み書きは常にコレクション全体単位。
pub trait Storage: Send + Sync {
    /// コレクションを取得（未初期化なら Err）
    fn get_collection(&self) -> Result<AppData>;

    /// コレクション全体を保存
    fn save_collection(&self, data: &AppData) -> Result<()>;

    /// 選択状態を取得（未保存なら None）
    fn get_selection_state(&self) -> Result<Option<SnapshotData>>;

    /// 選択状態を保存
    fn save_selection_state(&self, state: &SnapshotData) -> Result<()>;
}

/// データディレクトリ配下の JSON ファイルに保存する実装
///
/// キー `nexus/appData` は `<data_dir>/nexus/appData.json` に対応する。
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// キーに対応するファイルパス
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// コレクションが保存済みか
    pub fn has_collection(&self) -> bool {
        self.key_path(APP_DATA_KEY).is_file()
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PromptOpsError::Io(e)),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            PromptOpsError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        let parent = path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        // 同じディレクトリに一時ファイルを作成してからアトミックに置換
        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
            PromptOpsError::Storage(format!("Failed to create temp file: {}", e))
        })?;
        let content = serde_json::to_string_pretty(value)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&path).map_err(|e| {
            PromptOpsError::Storage(format!("Failed to persist {}: {}", path.display(), e))
        })?;

        tracing::debug!(key, path = %path.display(), "saved");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_collection(&self) -> Result<AppData> {
        self.read_key(APP_DATA_KEY)?.ok_or_else(|| {
            PromptOpsError::Storage(format!(
                "application data not found in {} (run `promptops init`)",
                self.data_dir.display()
            ))
        })
    }

    fn save_collection(&self, data: &AppData) -> Result<()> {
        self.write_key(APP_DATA_KEY, data)
    }

    fn get_selection_state(&self) -> Result<Option<SnapshotData>> {
        self.read_key(SNAPSHOT_KEY)
    }

    fn save_selection_state(&self, state: &SnapshotData) -> Result<()> {
        self.write_key(SNAPSHOT_KEY, state)
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
