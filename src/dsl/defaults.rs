//! スキーマ既定値テーブル
//!
//! 省略可能なフィールドの既定値はすべてここで定義し、
//! serde の `default = "..."` から参照する。

/// `version` フィールドを持たないドキュメントの版
pub const LEGACY_VERSION: u64 = 1;

/// Framework の本文（`content`）省略時
pub const FRAMEWORK_CONTENT: &str = "";

/// Prompt 入力の `required` 省略時
pub const INPUT_REQUIRED: bool = false;

/// コレクション上の Prompt の `shared` 省略時（マニフェスト非記載を含む）
pub const PROMPT_SHARED: bool = true;

pub fn framework_content() -> String {
    FRAMEWORK_CONTENT.to_string()
}

pub fn input_required() -> bool {
    INPUT_REQUIRED
}

pub fn prompt_shared() -> bool {
    PROMPT_SHARED
}
