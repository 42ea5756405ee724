use crate::config::toml_config::TomlConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "csv-page-creator")]
#[command(about = "Create draft pages from a CSV file with title and description columns")]
pub struct CliConfig {
    /// CSV file to import
    #[arg(long)]
    pub csv: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Author id the pages are attributed to
    #[arg(long)]
    pub author: Option<u64>,

    /// Page store: jsonl, rest or dry-run
    #[arg(long)]
    pub store: Option<String>,

    /// Output file for the jsonl store
    #[arg(long)]
    pub output: Option<String>,

    /// Declared content type of the file, as an upload form would send it
    #[arg(long, default_value = "text/csv")]
    pub content_type: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(author) = self.author {
            config.import.author_id = author;
        }
        if let Some(store) = &self.store {
            config.store.r#type = store.clone();
        }
        if let Some(output) = &self.output {
            config.store.output_path = output.clone();
        }
    }
}
