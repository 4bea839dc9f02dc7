mod code;
mod formatter;

pub use code::{ErrorCode, Language};
pub use formatter::ErrorFormatter;

use crate::dsl::DocumentKind;
use crate::quota::Plan;
use thiserror::Error;

/// 単一ドキュメントの構造・型検証エラー
///
/// インポート時はファイル単位でスキップされるため、
/// 他のエラー種別とは独立した型として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} document: {message}")]
pub struct SchemaError {
    pub kind: DocumentKind,
    pub message: String,
}

impl SchemaError {
    pub fn new(kind: DocumentKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// promptops 統一エラー型
#[derive(Debug, Error)]
pub enum PromptOpsError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Unsupported {kind} version: {version}")]
    UnsupportedVersion { kind: DocumentKind, version: u64 },

    #[error("Invalid import archive: {0}")]
    ImportFormat(String),

    #[error("Import limit exceeded for plan '{plan}': {requested} prompts (limit {limit})")]
    QuotaExceeded {
        plan: Plan,
        limit: usize,
        requested: usize,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, PromptOpsError>;

impl PromptOpsError {
    /// エラー種別に対応するコード
    pub fn code(&self) -> ErrorCode {
        match self {
            PromptOpsError::Schema(_) => ErrorCode::Sch001,
            PromptOpsError::UnsupportedVersion { .. } => ErrorCode::Ver001,
            PromptOpsError::ImportFormat(_) => ErrorCode::Imp001,
            PromptOpsError::Zip(_) => ErrorCode::Imp001,
            PromptOpsError::QuotaExceeded { .. } => ErrorCode::Qta001,
            PromptOpsError::Storage(_) => ErrorCode::Sto001,
            PromptOpsError::Json(_) | PromptOpsError::Yaml(_) => ErrorCode::Sto001,
            PromptOpsError::Io(_) => ErrorCode::Io001,
            PromptOpsError::NotFound(_) | PromptOpsError::InvalidArgument(_) => ErrorCode::Int001,
        }
    }

    /// ファイル単位でスキップしてよいエラーか
    ///
    /// ドキュメント単体の不正は許容し、アーカイブ全体・クォータは中断する。
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            PromptOpsError::Schema(_) | PromptOpsError::UnsupportedVersion { .. }
        )
    }
}
