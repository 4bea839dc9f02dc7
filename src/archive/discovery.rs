//! アーカイブ内ファイルの判別と並べ替え
//!
//! 判別はファイル名（ディレクトリ部分を除いた basename）のみで行う。

use super::manifest::MANIFEST_FILE;
use crate::dsl::schema::is_uuid;
use crate::dsl::DocumentKind;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

const UUID_PATTERN: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

static FRAMEWORK_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^framework-({})\.md$", UUID_PATTERN))
        .expect("framework file pattern is a valid regex")
});

static PROMPT_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:prompt-)?({})\.md$", UUID_PATTERN))
        .expect("prompt file pattern is a valid regex")
});

/// アーカイブ内エントリの種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Document { kind: DocumentKind, id: String },
    Manifest,
    Other,
}

/// パス区切り（`/` と `\`）を除いたファイル名
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// エントリ名を判別する
pub fn classify(path: &str) -> EntryKind {
    let name = basename(path);
    if name == MANIFEST_FILE {
        return EntryKind::Manifest;
    }

    if let Some(id) = capture_uuid(&FRAMEWORK_FILE_RE, name) {
        return EntryKind::Document {
            kind: DocumentKind::Framework,
            id,
        };
    }
    if let Some(id) = capture_uuid(&PROMPT_FILE_RE, name) {
        return EntryKind::Document {
            kind: DocumentKind::Prompt,
            id,
        };
    }
    EntryKind::Other
}

fn capture_uuid(re: &Regex, name: &str) -> Option<String> {
    let id = re.captures(name)?.get(1)?.as_str();
    is_uuid(id).then(|| id.to_string())
}

/// エクスポート時のファイル名
pub fn file_name(kind: DocumentKind, id: &str) -> String {
    match kind {
        DocumentKind::Framework => format!("framework-{}.md", id),
        DocumentKind::Prompt => format!("{}.md", id),
    }
}

/// 数値を考慮した大文字小文字を区別しない比較
///
/// `file2` < `file10`。同値の場合はバイト順で決める。
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => compare_digits(x, y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(y.chars().flat_map(char::to_lowercase)),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// 降順に並べ替える（重複排除の「先勝ち」はこの順序に従う）
pub fn sort_descending(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(basename(b), basename(a)).then_with(|| b.cmp(a)));
}

fn compare_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
