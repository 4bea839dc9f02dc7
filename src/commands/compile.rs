//! promptops compile コマンド
//!
//! 保存済みの Prompt に変数を埋め込んで表示する。

use clap::Parser;
use promptops::config::StoreConfig;
use promptops::dsl::compiler::compile_prompt;
use promptops::error::{PromptOpsError, Result};
use promptops::storage::Storage;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Parser)]
pub struct Args {
    /// Prompt id
    pub id: String,

    /// Template variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let data = config.storage().get_collection()?;
    let prompt = data
        .find_prompt(&args.id)
        .ok_or_else(|| PromptOpsError::NotFound(format!("prompt '{}'", args.id)))?;

    let variables = parse_vars(&args.vars)?;
    println!("{}", compile_prompt(&prompt.content, &variables));
    Ok(())
}

/// `KEY=VALUE` の並びを変数表にする（値は文字列のまま）
fn parse_vars(vars: &[String]) -> Result<BTreeMap<String, Value>> {
    vars.iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                PromptOpsError::InvalidArgument(format!("expected KEY=VALUE, got '{}'", pair))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(PromptOpsError::InvalidArgument(format!(
                    "empty variable name in '{}'",
                    pair
                )));
            }
            Ok((key.to_string(), Value::String(value.to_string())))
        })
        .collect()
}
