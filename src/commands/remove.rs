//! promptops remove コマンド

use clap::Parser;
use owo_colors::OwoColorize;
use promptops::config::StoreConfig;
use promptops::error::{PromptOpsError, Result};
use promptops::storage::Storage;

#[derive(Debug, Parser)]
pub struct Args {
    /// Prompt id
    pub id: String,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let storage = config.storage();
    let mut data = storage.get_collection()?;
    let removed = data
        .remove_prompt(&args.id)
        .ok_or_else(|| PromptOpsError::NotFound(format!("prompt '{}'", args.id)))?;
    storage.save_collection(&data)?;

    tracing::info!(id = %removed.id, "prompt removed");
    println!("{} Removed prompt {}", "✓".green(), removed.display_name());
    Ok(())
}
