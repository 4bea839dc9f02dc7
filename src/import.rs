//! Import merge engine
//!
//! zip アーカイブを読み込み、現在のコレクションに取り込む。
//!
//! - 全置換（[`ImportMode::Full`]）: Framework（1 件以上あれば）と Prompt を丸ごと置き換える
//! - 差分（[`ImportMode::Diff`]）: 既存に無い Prompt だけを追加する
//!
//! アーカイブ単位の失敗（zip として開けない・クォータ超過）は保存前に中断する。
//! ファイル単位の失敗はログに残してそのファイルだけ読み飛ばす。

mod ordering;

pub use ordering::Placement;

use crate::archive::{ArchiveReader, ManifestEntry};
use crate::collection::{now_timestamp, AppData, FrameworkEntry, PromptEntry};
use crate::dsl::{parse_framework, parse_prompt, DocumentKind, FrameworkDsl, PromptDsl};
use crate::error::{ErrorCode, PromptOpsError, Result, SchemaError};
use crate::frontmatter::from_text;
use crate::quota::{check_quota, Plan};
use crate::storage::Storage;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// 取り込み方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Full,
    Diff,
}

/// 読み飛ばしたファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub code: &'static str,
    pub reason: String,
}

/// 取り込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub mode: ImportMode,
    pub frameworks_imported: usize,
    pub prompts_imported: usize,
    /// 同じ id が先に取り込まれていたファイル
    pub duplicates: usize,
    /// 差分モードで既存 id のため追加しなかった件数
    pub existing: usize,
    pub skipped: Vec<SkippedFile>,
    pub default_framework_id: Option<String>,
    pub manifest_used: bool,
    pub selection_cleared: bool,
}

/// アーカイブを取り込み、結果をストレージに保存する
pub fn import_archive(
    storage: &dyn Storage,
    bytes: &[u8],
    plan: Plan,
    mode: ImportMode,
) -> Result<ImportReport> {
    let mut reader = ArchiveReader::open(bytes)?;
    let mut report = ImportReport {
        mode,
        ..ImportReport::default()
    };

    let prompt_files = reader.candidates(DocumentKind::Prompt);
    let distinct: BTreeSet<&str> = prompt_files.iter().map(String::as_str).collect();
    check_quota(plan, distinct.len())?;

    let current = storage.get_collection()?;

    let frameworks = match mode {
        ImportMode::Full => collect_frameworks(&mut reader, &mut report),
        ImportMode::Diff => Vec::new(),
    };
    let new_default = frameworks.last().map(|f| f.id.clone());
    let framework_ref = new_default
        .clone()
        .or_else(|| Some(current.settings.default_framework_id.clone()))
        .filter(|id| !id.is_empty());

    let existing: HashSet<&str> = match mode {
        ImportMode::Full => HashSet::new(),
        ImportMode::Diff => current.prompts.iter().map(|p| p.id.as_str()).collect(),
    };
    let prompts = collect_prompts(
        &mut reader,
        &prompt_files,
        framework_ref.as_deref(),
        &existing,
        &mut report,
    );

    let manifest = reader.manifest();
    report.manifest_used = manifest.is_some();
    if manifest.is_none() {
        tracing::debug!("no usable manifest, falling back to file order");
    }

    let next = merge(current, frameworks, prompts, manifest.as_deref(), mode);
    report.frameworks_imported = next.frameworks_imported;
    report.prompts_imported = next.prompts_imported;
    report.default_framework_id = new_default;

    if mode == ImportMode::Full || report.prompts_imported > 0 {
        storage.save_collection(&next.data)?;
    }

    // 全置換では選択中の Prompt が消えている可能性がある
    if mode == ImportMode::Full {
        if let Some(mut snapshot) = storage.get_selection_state()? {
            if snapshot.clear_selection() {
                storage.save_selection_state(&snapshot)?;
                report.selection_cleared = true;
            }
        }
    }

    tracing::info!(
        mode = ?mode,
        frameworks = report.frameworks_imported,
        prompts = report.prompts_imported,
        duplicates = report.duplicates,
        existing = report.existing,
        skipped = report.skipped.len(),
        "import finished"
    );
    Ok(report)
}

fn collect_frameworks(
    reader: &mut ArchiveReader<'_>,
    report: &mut ImportReport,
) -> Vec<FrameworkDsl> {
    let mut seen = HashSet::new();
    let mut frameworks = Vec::new();

    for file in reader.candidates(DocumentKind::Framework) {
        let parsed =
            read_raw(reader, &file, DocumentKind::Framework, None).and_then(parse_framework);
        match parsed {
            Ok(doc) if seen.insert(doc.id.clone()) => frameworks.push(doc),
            Ok(doc) => {
                tracing::debug!(file = %file, id = %doc.id, "duplicate framework id");
                report.duplicates += 1;
            }
            Err(e) => skip(report, file, e),
        }
    }
    frameworks
}

fn collect_prompts(
    reader: &mut ArchiveReader<'_>,
    files: &[String],
    framework_ref: Option<&str>,
    existing: &HashSet<&str>,
    report: &mut ImportReport,
) -> Vec<PromptDsl> {
    let mut seen = HashSet::new();
    let mut prompts = Vec::new();

    for file in files {
        let parsed =
            read_raw(reader, file, DocumentKind::Prompt, framework_ref).and_then(parse_prompt);
        match parsed {
            Ok(doc) if existing.contains(doc.id.as_str()) => {
                tracing::debug!(file = %file, id = %doc.id, "prompt already exists");
                report.existing += 1;
            }
            Ok(doc) if seen.insert(doc.id.clone()) => prompts.push(doc),
            Ok(doc) => {
                tracing::debug!(file = %file, id = %doc.id, "duplicate prompt id");
                report.duplicates += 1;
            }
            Err(e) => skip(report, file.clone(), e),
        }
    }
    prompts
}

/// ファイルを読み、フロントマターと本文を 1 つの値にまとめる
fn read_raw(
    reader: &mut ArchiveReader<'_>,
    file: &str,
    kind: DocumentKind,
    framework_ref: Option<&str>,
) -> Result<Value> {
    let text = reader.read_text(file)?;
    let front_matter =
        from_text(&text).ok_or_else(|| SchemaError::new(kind, "missing front matter"))?;

    let mut raw = front_matter.into_raw(kind);
    if let (Some(reference), Some(object)) = (framework_ref, raw.as_object_mut()) {
        object.insert("frameworkRef".to_string(), Value::from(reference));
    }
    Ok(raw)
}

fn skip(report: &mut ImportReport, file: String, error: PromptOpsError) {
    tracing::warn!(file = %file, error = %error, "skipping unreadable document");
    let code = if error.is_per_document() {
        error.code()
    } else {
        ErrorCode::Imp001
    };
    report.skipped.push(SkippedFile {
        file,
        code: code.as_str(),
        reason: error.to_string(),
    });
}

struct Merged {
    data: AppData,
    frameworks_imported: usize,
    prompts_imported: usize,
}

fn merge(
    mut data: AppData,
    frameworks: Vec<FrameworkDsl>,
    prompts: Vec<PromptDsl>,
    manifest: Option<&[ManifestEntry]>,
    mode: ImportMode,
) -> Merged {
    let timestamp = now_timestamp();
    let ids: Vec<&str> = prompts.iter().map(|p| p.id.as_str()).collect();
    let placements = match mode {
        ImportMode::Full => ordering::full_placements(&ids, manifest),
        ImportMode::Diff => ordering::diff_placements(&ids, manifest, data.max_prompt_order()),
    };

    let frameworks_imported = frameworks.len();
    let prompts_imported = prompts.len();
    let entries: Vec<PromptEntry> = prompts
        .into_iter()
        .zip(placements)
        .map(|(doc, p)| PromptEntry::new(doc, p.order, p.shared, &timestamp))
        .collect();

    match mode {
        ImportMode::Full => {
            if let Some(last) = frameworks.last() {
                data.settings.default_framework_id = last.id.clone();
            }
            if !frameworks.is_empty() {
                data.frameworks = frameworks
                    .into_iter()
                    .zip(1..)
                    .map(|(doc, order)| FrameworkEntry::new(doc, order, &timestamp))
                    .collect();
            }
            data.prompts = entries;
        }
        ImportMode::Diff => data.prompts.extend(entries),
    }

    Merged {
        data,
        frameworks_imported,
        prompts_imported,
    }
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
