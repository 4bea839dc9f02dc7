//! Archive packager
//!
//! ドキュメント 1 件を 1 ファイル（フロントマター形式）として zip にまとめ、
//! Prompt の並び順・共有設定をマニフェストに書き出す。
//!
//! ```text
//! <archive>.zip
//! ├── framework-<uuid>.md   (0..N)
//! ├── <uuid>.md             (0..N, prompt-<uuid>.md も可)
//! └── manifest.json         [{"id", "order", "shared"}]
//! ```

pub mod discovery;
pub mod manifest;

pub use discovery::{classify, natural_cmp, EntryKind};
pub use manifest::{ManifestEntry, MANIFEST_FILE};

use crate::collection::{AppData, PromptEntry};
use crate::dsl::DocumentKind;
use crate::error::{PromptOpsError, Result};
use crate::frontmatter::{to_text, BodyField};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// エクスポート対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope<'a> {
    /// 全 Framework・全 Prompt（order はそのまま）
    Full,
    /// 指定 Prompt のみ（Framework なし、order は 1..N に振り直し）
    Prompts(&'a [String]),
}

/// コレクションを zip バイト列に書き出す
pub fn export_archive(data: &AppData, scope: ExportScope<'_>) -> Result<Vec<u8>> {
    let mut writer = ArchiveWriter::new();

    let manifest = match scope {
        ExportScope::Full => {
            for framework in &data.frameworks {
                writer.add_document(&framework.content)?;
            }
            for prompt in &data.prompts {
                writer.add_document(&prompt.content)?;
            }
            data.prompts_by_order()
                .into_iter()
                .map(|p| ManifestEntry::new(&p.id, p.order, p.shared))
                .collect::<Vec<_>>()
        }
        ExportScope::Prompts(ids) => {
            let mut selected = select_prompts(data, ids)?;
            selected.sort_by_key(|p| p.order);
            for prompt in &selected {
                writer.add_document(&prompt.content)?;
            }
            selected
                .iter()
                .zip(1..)
                .map(|(p, order)| ManifestEntry::new(&p.id, order, p.shared))
                .collect()
        }
    };

    writer.add_file(MANIFEST_FILE, &manifest::encode_manifest(&manifest)?)?;
    let writer_counts = (writer.frameworks, writer.prompts);
    let bytes = writer.finish()?;

    tracing::info!(
        frameworks = writer_counts.0,
        prompts = writer_counts.1,
        bytes = bytes.len(),
        "archive exported"
    );
    Ok(bytes)
}

/// 指定 id の Prompt を取り出す（重複指定は 1 件にまとめる）
fn select_prompts<'a>(data: &'a AppData, ids: &[String]) -> Result<Vec<&'a PromptEntry>> {
    let mut selected: Vec<&PromptEntry> = Vec::with_capacity(ids.len());
    for id in ids {
        let prompt = data
            .find_prompt(id)
            .ok_or_else(|| PromptOpsError::NotFound(format!("prompt '{}'", id)))?;
        if !selected.iter().any(|p| p.id == prompt.id) {
            selected.push(prompt);
        }
    }
    Ok(selected)
}

struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    frameworks: usize,
    prompts: usize,
}

impl ArchiveWriter {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default(),
            frameworks: 0,
            prompts: 0,
        }
    }

    fn add_document<D: DocumentFile>(&mut self, doc: &D) -> Result<()> {
        let name = discovery::file_name(D::KIND, doc.id());
        self.add_file(&name, to_text(doc)?.as_bytes())?;
        match D::KIND {
            DocumentKind::Framework => self.frameworks += 1,
            DocumentKind::Prompt => self.prompts += 1,
        }
        Ok(())
    }

    fn add_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(content)?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

/// アーカイブに書けるドキュメント
trait DocumentFile: BodyField {
    fn id(&self) -> &str;
}

impl DocumentFile for crate::dsl::FrameworkDsl {
    fn id(&self) -> &str {
        &self.id
    }
}

impl DocumentFile for crate::dsl::PromptDsl {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 1 エントリとして読み込む最大バイト数
pub const MAX_ENTRY_BYTES: u64 = 8 * 1024 * 1024;

fn entry_too_large(name: &str, size: u64) -> PromptOpsError {
    PromptOpsError::ImportFormat(format!(
        "{} is too large ({} bytes, limit {})",
        name, size, MAX_ENTRY_BYTES
    ))
}

/// 読み込み用に開いたアーカイブ
pub struct ArchiveReader<'a> {
    zip: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ArchiveReader<'a> {
    /// zip として開けなければ ImportFormat エラー
    pub fn open(bytes: &'a [u8]) -> Result<Self> {
        let zip = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| PromptOpsError::ImportFormat(e.to_string()))?;
        Ok(Self { zip })
    }

    /// 全エントリ名（ディレクトリを除く）
    pub fn entry_names(&self) -> Vec<String> {
        self.zip
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// 指定種別の候補ファイル名を降順（自然順）で返す
    pub fn candidates(&self, kind: DocumentKind) -> Vec<String> {
        let mut names: Vec<String> = self
            .entry_names()
            .into_iter()
            .filter(|name| {
                matches!(classify(name), EntryKind::Document { kind: k, .. } if k == kind)
            })
            .collect();
        discovery::sort_descending(&mut names);
        names
    }

    /// エントリを UTF-8 テキストとして読む
    pub fn read_text(&mut self, name: &str) -> Result<String> {
        let bytes = self.read_bytes(name)?;
        String::from_utf8(bytes).map_err(|e| {
            PromptOpsError::ImportFormat(format!("{} is not valid UTF-8: {}", name, e))
        })
    }

    /// エントリを読む
    ///
    /// ヘッダのサイズは信用せず、[`MAX_ENTRY_BYTES`] を超えるものは ImportFormat エラー。
    pub fn read_bytes(&mut self, name: &str) -> Result<Vec<u8>> {
        let file = self.zip.by_name(name)?;
        let declared = file.size();
        if declared > MAX_ENTRY_BYTES {
            return Err(entry_too_large(name, declared));
        }

        let mut buf = Vec::new();
        file.take(MAX_ENTRY_BYTES + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_ENTRY_BYTES {
            return Err(entry_too_large(name, buf.len() as u64));
        }
        Ok(buf)
    }

    /// マニフェストを読む（無い・読めない場合は None）
    pub fn manifest(&mut self) -> Option<Vec<ManifestEntry>> {
        let name = self
            .entry_names()
            .into_iter()
            .find(|name| classify(name) == EntryKind::Manifest)?;
        match self.read_bytes(&name) {
            Ok(bytes) => manifest::decode_manifest(&bytes),
            Err(e) => {
                tracing::debug!(file = %name, error = %e, "manifest could not be read");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "archive_test.rs"]
mod tests;
