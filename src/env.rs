//! 環境変数ユーティリティ

/// データディレクトリを上書きする環境変数
pub const HOME_VAR: &str = "PROMPTOPS_HOME";

/// ログフィルタの環境変数（EnvFilter 形式）
pub const LOG_VAR: &str = "PROMPTOPS_LOG";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod tests;
