//! 保存先の設定
//!
//! データディレクトリの優先順位: `--data-dir` > `PROMPTOPS_HOME` > `~/.promptops`

use crate::env::{EnvVar, HOME_VAR};
use crate::error::{PromptOpsError, Result};
use crate::storage::FileStorage;
use std::path::{Path, PathBuf};

/// 既定のデータディレクトリ名（ホーム直下）
pub const DEFAULT_DIR_NAME: &str = ".promptops";

/// ストレージの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 明示指定・環境変数・ホームの順に解決する
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(dir) = explicit {
            return Ok(Self::new(dir));
        }
        if let Some(dir) = EnvVar::get(HOME_VAR) {
            return Ok(Self::new(dir));
        }
        let home = EnvVar::get("HOME").ok_or_else(|| {
            PromptOpsError::Storage(format!(
                "HOME environment variable not set (set {} or pass --data-dir)",
                HOME_VAR
            ))
        })?;
        Ok(Self::new(PathBuf::from(home).join(DEFAULT_DIR_NAME)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
