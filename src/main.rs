mod cli;
mod commands;
mod output;

use clap::Parser;
use promptops::env::{EnvVar, LOG_VAR};
use promptops::error::ErrorFormatter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let verbose = cli.verbose;
    let data_dir = cli.data_dir.clone();
    if let Err(err) = commands::dispatch(cli).await {
        let language = commands::display_language(data_dir.as_deref());
        eprintln!("{}", ErrorFormatter::new(verbose, language).format(&err));
        std::process::exit(1);
    }
}

/// ログは stderr へ（stdout はコマンド出力専用）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "promptops=debug" } else { "promptops=info" };
    let filter = EnvVar::get(LOG_VAR)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
