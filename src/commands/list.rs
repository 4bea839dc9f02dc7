//! promptops list コマンド
//!
//! 保存済みの Framework と Prompt を order 順に表示する。

use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use promptops::collection::AppData;
use promptops::config::StoreConfig;
use promptops::error::Result;
use promptops::storage::Storage;
use serde::Serialize;

#[derive(Debug, Parser)]
pub struct Args {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListedDocument<'a> {
    kind: &'static str,
    id: &'a str,
    name: &'a str,
    order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<bool>,
}

pub async fn run(args: Args, config: &StoreConfig) -> Result<()> {
    let data = config.storage().get_collection()?;
    let rows = collect_rows(&data);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }
    Ok(())
}

fn collect_rows(data: &AppData) -> Vec<ListedDocument<'_>> {
    let default_id = data.default_framework().map(|f| f.id.as_str());
    let frameworks = data.frameworks_by_order().into_iter().map(|f| ListedDocument {
        kind: "framework",
        id: &f.id,
        name: &f.content.name,
        order: f.order,
        shared: None,
        default: Some(Some(f.id.as_str()) == default_id),
    });
    let prompts = data.prompts_by_order().into_iter().map(|p| ListedDocument {
        kind: "prompt",
        id: &p.id,
        name: p.display_name(),
        order: p.order,
        shared: Some(p.shared),
        default: None,
    });
    frameworks.chain(prompts).collect()
}

fn print_table(rows: &[ListedDocument<'_>]) {
    if rows.is_empty() {
        println!("No documents stored");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Order", "Name", "ID", "Flags"]);

    for row in rows {
        let mut flags = Vec::new();
        if row.default == Some(true) {
            flags.push("default");
        }
        if row.shared == Some(true) {
            flags.push("shared");
        }
        table.add_row(vec![
            row.kind.to_string(),
            row.order.to_string(),
            row.name.to_string(),
            row.id.to_string(),
            flags.join(", "),
        ]);
    }

    println!("{table}");
}
