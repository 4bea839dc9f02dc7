//! YAML シリアライザ
//!
//! YAML は JSON のスーパーセットなので、読み込みは YAML ローダ一本で両方に対応する。
//! 書き出しは構造体のフィールド宣言順とソート済みマップに依存するため、
//! 等しいドキュメントは常にバイト単位で同じ YAML になる。

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// YAML / JSON 文字列を汎用値として読み込む
pub fn load_yaml(text: &str) -> std::result::Result<Value, serde_yaml::Error> {
    // 空文字列は空ドキュメント扱い（null）
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text)
}

/// 安定したキー順で YAML を出力する（末尾は改行で終わる）
pub fn dump_yaml_stable<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
