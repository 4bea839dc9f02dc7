use crate::cli::{Cli, Command};
use promptops::config::StoreConfig;
use promptops::error::{Language, Result};
use promptops::storage::Storage;

pub mod compile;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod remove;
pub mod save;
pub mod validate;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Command::Init(args) => init::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::List(args) => list::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::Export(args) => export::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::Import(args) => import::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::Save(args) => save::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::Remove(args) => remove::run(args, &StoreConfig::resolve(data_dir)?).await,
        Command::Compile(args) => compile::run(args, &StoreConfig::resolve(data_dir)?).await,
        // ファイル単体の検証はデータディレクトリ不要
        Command::Validate(args) => validate::run(args).await,
    }
}

/// エラー表示の言語（保存済み設定に従い、読めなければ既定）
pub fn display_language(cli_data_dir: Option<&std::path::Path>) -> Language {
    let language = StoreConfig::resolve(cli_data_dir)
        .ok()
        .and_then(|config| config.storage().get_collection().ok())
        .and_then(|data| data.settings.language);
    Language::from_setting(language.as_deref())
}
