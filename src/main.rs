use std::path::PathBuf;

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use tidal2deezer::{cli, config, error, info, success, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    /// Newline-delimited file naming which Tidal playlists to migrate.
    /// Without it, all playlists are processed.
    namefilter: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment: {}", e);
    }

    let cli = Cli::parse();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Killed by user.");
        }
        result = cli::run(cli.namefilter) => match result {
            Ok(()) => success!("Done!"),
            Err(e) => error!("Migration aborted: {}", e),
        },
    }
}
