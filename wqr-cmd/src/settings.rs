//! Global options shared by every subcommand.

use anyhow::Context;
use clap::Args;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wqr_core::client::HttpSampleRepository;
use wqr_core::config::{ClientConfig, DEFAULT_API_URL};
use wqr_data::charts::CategoryPalette;
use wqr_report::capture::{CaptureConfig, DirectoryCapture, ReportCapture};
use wqr_report::delivery::DirectorySink;
use wqr_report::notify::LogNotifier;
use wqr_report::view::Services;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Base URL of the analysis service
    #[arg(long, env = "WQR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "WQR_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Milliseconds to wait for rendering to settle before capturing charts
    #[arg(long, default_value_t = 300, global = true)]
    pub settle_ms: u64,

    /// JSON file with category colors ({"safe": ..., "moderate": ..., "unsafe": ...})
    #[arg(long, global = true)]
    pub palette: Option<PathBuf>,
}

impl Settings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::new(self.api_url.as_str())
        }
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            settle_delay: Duration::from_millis(self.settle_ms),
        }
    }

    pub fn load_palette(&self) -> anyhow::Result<CategoryPalette> {
        match &self.palette {
            None => Ok(CategoryPalette::default()),
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read palette {}", path.display()))?;
                CategoryPalette::from_json(&json)
                    .with_context(|| format!("Failed to parse palette {}", path.display()))
            }
        }
    }

    /// Wire the HTTP repository, snapshot capture and directory sink.
    ///
    /// Commands that never capture or save pass the working directory.
    pub fn services(&self, out_dir: &Path, snapshots: &Path) -> anyhow::Result<Services> {
        let config = self.client_config();
        debug!("Using analysis service at {}", config.base_url);
        let repository = HttpSampleRepository::new(config)
            .context("Failed to build HTTP client")?;
        Ok(Services {
            repository: Arc::new(repository),
            capture: ReportCapture::new(
                Arc::new(DirectoryCapture::new(snapshots)),
                self.capture_config(),
            ),
            sink: Arc::new(DirectorySink::new(out_dir)),
            notifier: Arc::new(LogNotifier),
            palette: self.load_palette()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings(palette: Option<PathBuf>) -> Settings {
        Settings {
            api_url: "http://analysis.local:8080/".to_string(),
            timeout_secs: 5,
            settle_ms: 0,
            palette,
        }
    }

    #[test]
    fn client_config_takes_url_and_timeout() {
        let config = settings(None).client_config();
        assert_eq!(config.endpoint("/api/samples"), "http://analysis.local:8080/api/samples");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.submit_timeout, ClientConfig::default().submit_timeout);
    }

    #[test]
    fn palette_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{"unsafe": "#d00"}}"##).unwrap();
        let palette = settings(Some(file.path().to_path_buf()))
            .load_palette()
            .unwrap();
        assert_eq!(palette.high_risk, "#d00");
        assert_eq!(palette.safe, CategoryPalette::default().safe);
    }

    #[test]
    fn missing_palette_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = settings(Some(dir.path().join("nope.json"))).load_palette();
        assert!(result.unwrap_err().to_string().contains("nope.json"));
    }
}
