//! promptops import コマンド

use crate::output::{import_details, CommandSummary};
use clap::Parser;
use promptops::config::StoreConfig;
use promptops::error::Result;
use promptops::import::ImportMode;
use promptops::quota::Plan;
use promptops::service::ArchiveService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct Args {
    /// Archive file (zip)
    pub file: PathBuf,

    /// Plan tier used for the import limit
    #[arg(long, value_enum, default_value_t = Plan::Free)]
    pub plan: Plan,

    /// Only add prompts whose ids are not stored yet
    #[arg(long)]
    pub diff: bool,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let bytes = tokio::fs::read(&args.file).await?;
    let mode = if args.diff {
        ImportMode::Diff
    } else {
        ImportMode::Full
    };

    let service = ArchiveService::new(Arc::new(config.storage()));
    let report = service.import(&bytes, args.plan, mode).await?;

    CommandSummary::for_import(&report).print();
    for line in import_details(&report) {
        println!("{}", line);
    }
    Ok(())
}
