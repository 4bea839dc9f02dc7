/// Error codes with category prefix
///
/// Categories:
/// - SCH: Document schema validation
/// - VER: Document version / migration
/// - IMP: Import archive format
/// - QTA: Plan quota
/// - STO: Persistence backend
/// - IO: File system operations
/// - INT: Unexpected internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Schema errors (SCH001-SCH099)
    /// Document failed structural validation
    Sch001,

    // Version errors (VER001-VER099)
    /// Document version outside the migration range
    Ver001,

    // Import errors (IMP001-IMP099)
    /// Archive could not be opened
    Imp001,

    // Quota errors (QTA001-QTA099)
    /// Plan import limit exceeded
    Qta001,

    // Storage errors (STO001-STO099)
    /// Stored data unreadable or unwritable
    Sto001,

    // I/O errors (IO001-IO099)
    /// File system failure
    Io001,

    // Internal errors (INT001-INT099)
    /// Unexpected internal error
    Int001,
}

/// ユーザー向けメッセージの表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    /// 設定値（"ja" / "en" など）から言語を決定する。未知の値は既定の ja。
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v.starts_with("en") => Language::En,
            _ => Language::Ja,
        }
    }
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::Sch001,
        ErrorCode::Ver001,
        ErrorCode::Imp001,
        ErrorCode::Qta001,
        ErrorCode::Sto001,
        ErrorCode::Io001,
        ErrorCode::Int001,
    ];

    /// Returns the error code string (e.g., "IMP001")
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Sch001 => "SCH001",
            ErrorCode::Ver001 => "VER001",
            ErrorCode::Imp001 => "IMP001",
            ErrorCode::Qta001 => "QTA001",
            ErrorCode::Sto001 => "STO001",
            ErrorCode::Io001 => "IO001",
            ErrorCode::Int001 => "INT001",
        }
    }

    /// Short user-facing message for the error kind
    pub fn message(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (ErrorCode::Sch001, Language::Ja) => "ドキュメントの形式が正しくありません。",
            (ErrorCode::Sch001, Language::En) => "The document is not valid.",
            (ErrorCode::Ver001, Language::Ja) => "対応していないバージョンのドキュメントです。",
            (ErrorCode::Ver001, Language::En) => "The document version is not supported.",
            (ErrorCode::Imp001, Language::Ja) => "インポートファイルの形式が正しくありません。",
            (ErrorCode::Imp001, Language::En) => "The import file format is invalid.",
            (ErrorCode::Qta001, Language::Ja) => {
                "無料プランでインポートできるプロンプトは20個までです。"
            }
            (ErrorCode::Qta001, Language::En) => {
                "The free plan can import up to 20 prompts at a time."
            }
            (ErrorCode::Sto001, Language::Ja) => "データの読み書きに失敗しました。",
            (ErrorCode::Sto001, Language::En) => "Failed to read or write the stored data.",
            (ErrorCode::Io001, Language::Ja) => "ファイル操作に失敗しました。",
            (ErrorCode::Io001, Language::En) => "A file operation failed.",
            (ErrorCode::Int001, Language::Ja) => "予期しないエラーが発生しました。",
            (ErrorCode::Int001, Language::En) => "An unexpected error occurred.",
        }
    }

    /// Returns remediation steps
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorCode::Sch001 => "1. Check required fields (id, name, template/content)\n2. Ensure id is a UUID and slug matches ^[a-z0-9][a-z0-9_-]*$\n3. Remove fields the schema does not define",
            ErrorCode::Ver001 => "1. Check the document's version field\n2. Update promptops to a release that knows this version",
            ErrorCode::Imp001 => "1. Verify the file is a zip archive produced by 'promptops export'\n2. Re-export the archive if it was truncated",
            ErrorCode::Qta001 => "1. Split the archive into batches of 20 prompts or fewer\n2. Use a paid plan for larger imports",
            ErrorCode::Sto001 => "1. Check the data directory permissions\n2. Restore the data file from a backup if corrupted\n3. Run 'promptops init' to create fresh data",
            ErrorCode::Io001 => "1. Verify the file path is correct\n2. Check file permissions",
            ErrorCode::Int001 => "1. Try the operation again\n2. Report the issue with debug logs (--verbose)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_error_codes_have_valid_string() {
        for code in ErrorCode::ALL {
            let s = code.as_str();
            assert!(
                s.len() >= 5 && s.len() <= 6,
                "Error code string should be 5-6 characters: {}",
                s
            );
        }
    }

    #[test]
    fn all_error_codes_have_messages_in_every_language() {
        for code in ErrorCode::ALL {
            assert!(!code.message(Language::Ja).is_empty(), "{:?}", code);
            assert!(!code.message(Language::En).is_empty(), "{:?}", code);
            assert!(!code.remediation().is_empty(), "{:?}", code);
        }
    }

    #[test]
    fn language_from_setting() {
        assert_eq!(Language::from_setting(Some("en")), Language::En);
        assert_eq!(Language::from_setting(Some("en-US")), Language::En);
        assert_eq!(Language::from_setting(Some("ja")), Language::Ja);
        assert_eq!(Language::from_setting(Some("fr")), Language::Ja);
        assert_eq!(Language::from_setting(None), Language::Ja);
    }
}
