//! Framework / Prompt DSL モジュール
//!
//! 2 種類のドキュメントをバージョン付きスキーマで扱う。
//! `parse_*` は YAML/JSON 文字列またはパース済みの値を受け取り、
//! マイグレーションチェーンを辿って常に最新版のドキュメントを返す。

pub mod compiler;
pub mod defaults;
pub mod framework;
pub mod prompt;
pub mod schema;
pub mod serializer;

pub use framework::{
    dump_framework, latest_framework_version, parse_framework, FrameworkDsl,
};
pub use prompt::{dump_prompt, latest_prompt_version, parse_prompt, PromptDsl};
pub use schema::DslInput;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ドキュメント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Framework,
    Prompt,
}

impl DocumentKind {
    /// フロントマター形式で本文として扱うフィールド名
    pub fn body_field(&self) -> &'static str {
        match self {
            DocumentKind::Framework => "content",
            DocumentKind::Prompt => "template",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Framework => "framework",
            DocumentKind::Prompt => "prompt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
