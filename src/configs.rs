use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SvStatusConfig {
    #[serde(default = "default_service_dir")]
    pub service_dir: PathBuf,
    #[serde(default = "default_log")]
    pub log: String,
}

fn default_service_dir() -> PathBuf {
    svstatus::SERVICE_DIR.into()
}

fn default_log() -> String {
    "warn".into()
}

impl Default for SvStatusConfig {
    fn default() -> Self {
        Self {
            service_dir: default_service_dir(),
            log: default_log(),
        }
    }
}

impl SvStatusConfig {
    /// Loads `path`. When `required` is false a missing file yields the defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("Failed to open {}", path.display()))
            }
        };
        serde_yaml::from_reader(file).wrap_err("Failed to read config!")
    }
}
