//! テスト用のデータ生成ヘルパー

use super::*;
use std::io::Write;

pub const TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// 連番から決定的な UUID を作る
pub fn uuid(n: u128) -> String {
    ::uuid::Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0000 + n).to_string()
}

pub fn framework_entry(id: &str, name: &str, content: &str, order: i64) -> FrameworkEntry {
    let mut doc = FrameworkDsl::new(id, name);
    doc.content = content.to_string();
    FrameworkEntry::new(doc, order, TIMESTAMP)
}

pub fn prompt_entry(id: &str, template: &str, order: i64, shared: bool) -> PromptEntry {
    PromptEntry::new(PromptDsl::new(id, template), order, shared, TIMESTAMP)
}

pub fn app_data(frameworks: Vec<FrameworkEntry>, prompts: Vec<PromptEntry>) -> AppData {
    let default_framework_id = frameworks.first().map(|f| f.id.clone()).unwrap_or_default();
    AppData {
        frameworks,
        prompts,
        settings: Settings {
            default_framework_id,
            version: "1.0.0".to_string(),
            ..Settings::default()
        },
        extra: Map::new(),
    }
}

/// 任意のエントリから zip を作る
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        for (path, content) in entries {
            zip.start_file(*path, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

/// Framework ファイルの本文
pub fn framework_file(id: &str, name: &str, content: &str) -> String {
    format!("---\nversion: 2\nid: {}\nname: {}\n---\n{}", id, name, content)
}

/// Prompt ファイルの本文
pub fn prompt_file(id: &str, template: &str) -> String {
    format!("---\nversion: 2\nid: {}\n---\n{}", id, template)
}

/// 型の混在したエントリから zip を組み立てる
#[derive(Debug, Default)]
pub struct ZipBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((name.into(), content.as_ref().to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            for (name, content) in &self.entries {
                zip.start_file(name.as_str(), options).unwrap();
                zip.write_all(content).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }
}

/// 中央ディレクトリ上の `name` の展開後サイズを書き換える
///
/// 実データはそのままなので、ヘッダだけが大きなサイズを主張する zip になる。
pub fn declare_size(mut bytes: Vec<u8>, name: &str, size: u32) -> Vec<u8> {
    const CENTRAL_HEADER: &[u8] = b"PK\x01\x02";
    let mut at = 0;
    while let Some(pos) = bytes[at..]
        .windows(CENTRAL_HEADER.len())
        .position(|w| w == CENTRAL_HEADER)
    {
        let start = at + pos;
        let name_len = u16::from_le_bytes([bytes[start + 28], bytes[start + 29]]) as usize;
        if &bytes[start + 46..start + 46 + name_len] == name.as_bytes() {
            bytes[start + 24..start + 28].copy_from_slice(&size.to_le_bytes());
            return bytes;
        }
        at = start + CENTRAL_HEADER.len();
    }
    panic!("no central directory entry named {}", name);
}
