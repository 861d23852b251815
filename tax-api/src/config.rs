//! Service configuration read from an optional TOML file.
//!
//! Every key is optional; missing keys take the defaults below. Command-line
//! flags override `host` and `port` after loading.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! max_upload_bytes = 5242880
//! slab_table = "tax-data/test-data/slabs.csv"
//!
//! [engine]
//! cess_rate = "0.04"
//! default_assessment_year = "2024-25"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_core::{DeductionLimits, EngineConfig};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_CONTENT_TYPES: [&str; 6] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/png",
    "text/plain",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,

    /// Media types accepted by the upload endpoint.
    pub allowed_content_types: Vec<String>,

    /// Slab schedule CSV; the built-in tables are used when unset.
    pub slab_table: Option<PathBuf>,

    pub engine: EngineConfig,
    pub limits: DeductionLimits,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_content_types: DEFAULT_CONTENT_TYPES.iter().map(|t| t.to_string()).collect(),
            slab_table: None,
            engine: EngineConfig::default(),
            limits: DeductionLimits::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input, path)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `content_type` is on the allow-list, ignoring parameters and case.
    pub fn accepts_content_type(
        &self,
        content_type: &str,
    ) -> bool {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
    }
}
