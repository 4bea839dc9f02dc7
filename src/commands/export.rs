//! promptops export コマンド
//!
//! `--prompt` 指定時は選択した Prompt だけを差分アーカイブとして書き出す。

use clap::Parser;
use owo_colors::OwoColorize;
use promptops::config::StoreConfig;
use promptops::error::Result;
use promptops::service::ArchiveService;
use std::path::PathBuf;
use std::sync::Arc;

/// 出力先の既定ファイル名
pub const DEFAULT_OUTPUT: &str = "promptops-export.zip";

#[derive(Debug, Parser)]
pub struct Args {
    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Export only these prompt ids (diff archive)
    #[arg(long = "prompt", value_name = "ID")]
    pub prompts: Vec<String>,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let service = ArchiveService::new(Arc::new(config.storage()));
    let bytes = service.export(&args.prompts).await?;
    tokio::fs::write(&args.output, &bytes).await?;

    let scope = if args.prompts.is_empty() {
        "full".to_string()
    } else {
        format!("{} prompt(s)", args.prompts.len())
    };
    println!(
        "{} Exported {} archive to {} ({} bytes)",
        "✓".green(),
        scope,
        args.output.display(),
        bytes.len()
    );
    Ok(())
}
