//! promptops init コマンド
//!
//! 初回用のコレクション（空の既定 Framework を 1 件）を作成する。

use clap::Parser;
use owo_colors::OwoColorize;
use promptops::collection::AppData;
use promptops::config::StoreConfig;
use promptops::error::Result;
use promptops::storage::Storage;

#[derive(Debug, Parser)]
pub struct Args {
    /// Overwrite existing data
    #[arg(long)]
    pub force: bool,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let storage = config.storage();
    if storage.has_collection() && !args.force {
        println!(
            "{} Already initialized: {}",
            "•".yellow(),
            config.data_dir().display()
        );
        return Ok(());
    }

    let data = AppData::initial();
    storage.save_collection(&data)?;
    println!(
        "{} Initialized {} (default framework {})",
        "✓".green(),
        config.data_dir().display(),
        data.settings.default_framework_id
    );
    Ok(())
}
