//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use finscan_core::models::config::FinscanConfig;

/// Options shared by every subcommand.
pub struct GlobalOptions {
    pub config: Option<String>,
    pub tesseract: Option<String>,
}

impl GlobalOptions {
    /// Resolve configuration: an explicit `--config` file, else the user
    /// config file when present, else defaults. `--tesseract` overrides the
    /// configured binary.
    pub fn load_config(&self) -> anyhow::Result<FinscanConfig> {
        let mut config = match &self.config {
            Some(path) => FinscanConfig::from_file(Path::new(path))?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    debug!("Loading config from {}", path.display());
                    FinscanConfig::from_file(&path)?
                } else {
                    FinscanConfig::default()
                }
            }
        };

        if let Some(tesseract) = &self.tesseract {
            config.ocr.tesseract_path = Some(PathBuf::from(tesseract));
        }

        Ok(config)
    }
}

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finscan")
        .join("config.json")
}
