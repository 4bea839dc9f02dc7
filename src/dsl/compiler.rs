//! テンプレートのコンパイル
//!
//! `{{ key }}` 形式のプレースホルダを値で置換する。
//! 値の優先順位: 呼び出し側の指定 > 入力定義の `default`。
//! どちらにも無いキーはそのまま残す。

use super::prompt::{PromptDsl, PromptInput};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z0-9_.-]+)\s*\}\}").expect("placeholder pattern is a valid regex")
});

/// 連番サフィックスの上限
const MAX_NAME_SUFFIX: u32 = 100;

/// プロンプトを文字列にレンダリングする
///
/// 変数が 1 つも渡されなければテンプレートをそのまま返す（既定値も適用しない）。
pub fn compile_prompt(prompt: &PromptDsl, variables: &BTreeMap<String, Value>) -> String {
    if variables.is_empty() {
        return prompt.template.clone();
    }

    let defaults: BTreeMap<&str, &Value> = prompt
        .inputs
        .iter()
        .filter_map(|input| input.default.as_ref().map(|d| (input.name.as_str(), d)))
        .collect();

    PLACEHOLDER_RE
        .replace_all(&prompt.template, |caps: &Captures<'_>| {
            let key = &caps[1];
            match variables.get(key).or_else(|| defaults.get(key).copied()) {
                Some(value) => render_value(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// テンプレート中のプレースホルダ名（初出順・重複なし）
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| {
            let name = caps[1].to_string();
            seen.insert(name.clone()).then_some(name)
        })
        .collect()
}

/// 既存の入力名・プレースホルダと衝突しない入力名を返す
///
/// `base` が使用済みなら `base2`, `base3`, ... を試す。
/// 上限に達した場合は最後の候補をそのまま返す。
pub fn unique_input_name(base: &str, existing: &[PromptInput], template: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        return String::new();
    }

    let used = placeholders(template);
    let is_taken = |candidate: &str| {
        existing.iter().any(|input| input.name == candidate) || used.iter().any(|p| p == candidate)
    };

    if !is_taken(base) {
        return base.to_string();
    }

    let mut suffix = 2;
    let mut candidate = format!("{}{}", base, suffix);
    while is_taken(&candidate) && suffix <= MAX_NAME_SUFFIX {
        suffix += 1;
        candidate = format!("{}{}", base, suffix);
    }
    candidate
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // 配列・オブジェクトはコンパクトな JSON
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
