//! A small demo CLI over [`medialib_core::MediaLibrary`] (§6A). Not a
//! feature-complete player frontend — enough to initialize a library, scan
//! a root, list media and search, matching the scope the ambient CLI
//! surface is meant to cover.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medialib_core::query::QueryParameters;
use medialib_core::{Config, MediaLibrary};

#[derive(Parser)]
#[command(name = "medialib", version, about = "Media library CLI")]
struct Cli {
    #[arg(long, env = "MEDIALIB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Creates a default config file if one doesn't exist yet.
    Init,
    /// Scans a root path into the library.
    Scan { root_mrl: String },
    /// Lists known media, sorted by title.
    Ls,
    /// Searches media titles.
    Search { term: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| dirs::config_dir().unwrap_or_default().join("medialib/config.toml"));
    let config = Config::load(&config_path)?;
    let _guard = medialib_core::config::init_tracing(&config)?;

    match cli.command {
        Command::Init => {
            config.save(&config_path)?;
            println!("wrote config to {}", config_path.display());
        }
        Command::Scan { root_mrl } => {
            let (library, outcome) = MediaLibrary::initialize(config, Vec::new(), None).await?;
            tracing::info!(?outcome, "opened library");
            let visited = library.discover(&root_mrl).await?;
            println!("visited {visited} entries under {root_mrl}");
            library.shutdown().await;
        }
        Command::Ls => {
            let (library, _) = MediaLibrary::initialize(config, Vec::new(), None).await?;
            let rows = library.media(QueryParameters::default()).all().await?;
            for row in rows {
                println!("{:>6}  {}", row.id, row.title);
            }
            library.shutdown().await;
        }
        Command::Search { term } => {
            let (library, _) = MediaLibrary::initialize(config, Vec::new(), None).await?;
            let rows = library.search_media(&term, QueryParameters::default()).await?;
            for row in rows {
                println!("{:>6}  {}", row.id, row.title);
            }
            library.shutdown().await;
        }
    }

    Ok(())
}
