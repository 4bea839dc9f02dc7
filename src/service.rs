//! インポート・エクスポートの直列化
//!
//! ストレージはコレクション全体の読み書きしか持たないため、
//! 同じコレクションに対する操作を同時に走らせると後勝ちで結果が失われる。
//! `ArchiveService` は 1 プロセス内で操作を 1 つずつ実行する。

use crate::archive::{export_archive, ExportScope};
use crate::error::{PromptOpsError, Result};
use crate::import::{import_archive, ImportMode, ImportReport};
use crate::quota::Plan;
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct ArchiveService {
    storage: Arc<dyn Storage>,
    queue: Mutex<()>,
}

impl ArchiveService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            queue: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// コレクションを zip に書き出す（`prompt_ids` 指定時は差分エクスポート）
    pub async fn export(&self, prompt_ids: &[String]) -> Result<Vec<u8>> {
        let _turn = self.queue.lock().await;
        let storage = self.storage.clone();
        let prompt_ids = prompt_ids.to_vec();
        run_blocking(move || {
            let data = storage.get_collection()?;
            let scope = if prompt_ids.is_empty() {
                ExportScope::Full
            } else {
                ExportScope::Prompts(&prompt_ids)
            };
            export_archive(&data, scope)
        })
        .await
    }

    /// アーカイブを取り込む
    pub async fn import(&self, bytes: &[u8], plan: Plan, mode: ImportMode) -> Result<ImportReport> {
        let _turn = self.queue.lock().await;
        let storage = self.storage.clone();
        let bytes = bytes.to_vec();
        run_blocking(move || import_archive(storage.as_ref(), &bytes, plan, mode)).await
    }
}

/// ストレージ I/O を伴う処理をブロッキング用スレッドで実行する
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PromptOpsError::Storage(format!("background task failed: {}", e)))?
}
