use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{compile, export, import, init, list, remove, save, validate};

#[derive(Debug, Parser)]
#[command(name = "promptops")]
#[command(about = "Framework / Prompt document archive CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides PROMPTOPS_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show debug logs and detailed errors
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 初期データの作成
    Init(init::Args),

    /// 保存済みの Framework / Prompt 一覧
    List(list::Args),

    /// コレクションを zip に書き出す
    Export(export::Args),

    /// zip アーカイブを取り込む
    Import(import::Args),

    /// ドキュメントを検証して正準 YAML を表示
    Validate(validate::Args),

    /// ドキュメントを追加・更新
    Save(save::Args),

    /// Prompt を削除
    Remove(remove::Args),

    /// Prompt をレンダリング
    Compile(compile::Args),
}
