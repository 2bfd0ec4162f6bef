//! On-disk configuration, loaded from TOML via `serde`, following the
//! teacher's `NodeConfig`/`AppConfig` pattern: a serde-derived struct with a
//! documented format and a tolerant loader that falls back to defaults for
//! any field absent from an older file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub log_dir: PathBuf,
    pub verbosity: String,
    pub parser_retry_cap: u32,
    pub worker_counts: WorkerCounts,
    pub global_cache_quota_bytes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerCounts {
    pub metadata_extraction: usize,
    pub metadata_analysis: usize,
    pub linking: usize,
}

impl Default for WorkerCounts {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);
        Self {
            metadata_extraction: parallelism,
            metadata_analysis: parallelism,
            linking: 1,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medialib");
        Self {
            db_path: base.join("library.db"),
            thumbnail_dir: base.join("thumbnails"),
            log_dir: base.join("logs"),
            verbosity: "info".to_string(),
            parser_retry_cap: 3,
            worker_counts: WorkerCounts::default(),
            global_cache_quota_bytes: -1,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Wires a stderr layer plus a `tracing-appender` rolling file sink under
/// `config.log_dir`, matching the teacher's use of `tracing-appender` for
/// durable logs alongside interactive stderr output. Returns the appender
/// guard; it must be kept alive for the process lifetime.
pub fn init_tracing(config: &Config) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "medialib.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.verbosity).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.and(std::io::stderr))
        .init();

    Ok(guard)
}
