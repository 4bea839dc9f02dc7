//! テスト用モックストレージ

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// メモリ上に保持し、保存呼び出し回数を数える
pub struct MockStorage {
    collection: RwLock<Option<AppData>>,
    selection: RwLock<Option<SnapshotData>>,
    collection_saves: AtomicUsize,
    selection_saves: AtomicUsize,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(None),
            selection: RwLock::new(None),
            collection_saves: AtomicUsize::new(0),
            selection_saves: AtomicUsize::new(0),
        }
    }

    /// コレクションを保存済みの状態で作成
    pub fn with_collection(data: AppData) -> Self {
        let storage = Self::new();
        *storage.collection.write().unwrap() = Some(data);
        storage
    }

    /// 選択状態を設定（保存回数には含めない）
    pub fn set_selection(&self, state: SnapshotData) {
        *self.selection.write().unwrap() = Some(state);
    }

    pub fn collection(&self) -> Option<AppData> {
        self.collection.read().unwrap().clone()
    }

    pub fn selection(&self) -> Option<SnapshotData> {
        self.selection.read().unwrap().clone()
    }

    pub fn collection_saves(&self) -> usize {
        self.collection_saves.load(Ordering::SeqCst)
    }

    pub fn selection_saves(&self) -> usize {
        self.selection_saves.load(Ordering::SeqCst)
    }

    /// 全保存操作の合計
    pub fn total_saves(&self) -> usize {
        self.collection_saves() + self.selection_saves()
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MockStorage {
    fn get_collection(&self) -> Result<AppData> {
        self.collection
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| PromptOpsError::Storage("application data not found".to_string()))
    }

    fn save_collection(&self, data: &AppData) -> Result<()> {
        self.collection_saves.fetch_add(1, Ordering::SeqCst);
        *self.collection.write().unwrap() = Some(data.clone());
        Ok(())
    }

    fn get_selection_state(&self) -> Result<Option<SnapshotData>> {
        Ok(self.selection.read().unwrap().clone())
    }

    fn save_selection_state(&self, state: &SnapshotData) -> Result<()> {
        self.selection_saves.fetch_add(1, Ordering::SeqCst);
        *self.selection.write().unwrap() = Some(state.clone());
        Ok(())
    }
}
