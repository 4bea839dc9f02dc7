//! promptops save コマンド
//!
//! ファイルのドキュメントをコレクションへ追加、または同じ id のものを更新する。

use super::validate::{parse_document, ParsedDocument};
use clap::Parser;
use owo_colors::OwoColorize;
use promptops::collection::now_timestamp;
use promptops::config::StoreConfig;
use promptops::dsl::DocumentKind;
use promptops::error::Result;
use promptops::storage::Storage;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// Document file (.yaml, .json or front-matter .md)
    pub file: PathBuf,

    /// Document kind
    #[arg(long, value_enum)]
    pub kind: DocumentKind,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.file).await?;
    let (document, _) = parse_document(&text, args.kind)?;

    let storage = config.storage();
    let mut data = storage.get_collection()?;
    let timestamp = now_timestamp();
    let (id, inserted) = match document {
        ParsedDocument::Framework(doc) => {
            let id = doc.id.clone();
            (id, data.upsert_framework(doc, &timestamp))
        }
        ParsedDocument::Prompt(doc) => {
            let id = doc.id.clone();
            (id, data.upsert_prompt(doc, &timestamp))
        }
    };
    storage.save_collection(&data)?;

    tracing::info!(kind = %args.kind, id = %id, inserted, "document saved");
    let action = if inserted { "Added" } else { "Updated" };
    println!("{} {} {} {}", "✓".green(), action, args.kind, id);
    Ok(())
}
