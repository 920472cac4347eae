//! coachcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoachCalError, CoachCalResult};
use crate::source::{FileSource, RestSource, SessionSource};

static DEFAULT_STORE_PATH: &str = "~/.local/share/coachcal/sessions.json";
static ENV_PREFIX: &str = "COACHCAL";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Where groups and sessions are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Hosted database reached over its REST interface.
    Rest {
        url: String,
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
    /// Local JSON file.
    File {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: default_store_path(),
        }
    }
}

impl SourceConfig {
    pub fn open(&self) -> CoachCalResult<Box<dyn SessionSource>> {
        match self {
            SourceConfig::Rest {
                url,
                api_key,
                timeout_secs,
            } => {
                let timeout = timeout_secs.map(Duration::from_secs);
                Ok(Box::new(RestSource::new(url, api_key, timeout)?))
            }
            SourceConfig::File { path } => {
                let expanded = expand_path(path);
                debug!(path = %expanded.display(), "Using local session store");
                Ok(Box::new(FileSource::new(expanded)))
            }
        }
    }

    /// Local store path with `~` expanded, for the file source.
    pub fn store_path(&self) -> Option<PathBuf> {
        match self {
            SourceConfig::File { path } => Some(expand_path(path)),
            SourceConfig::Rest { .. } => None,
        }
    }
}

/// Configuration at ~/.config/coachcal/config.toml, overridable with
/// `COACHCAL_*` environment variables (`COACHCAL_SOURCE__API_KEY`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachCalConfig {
    /// Coach whose groups are shown when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<String>,

    /// IANA zone that session times are in. Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub source: SourceConfig,
}

impl CoachCalConfig {
    pub fn config_path() -> CoachCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CoachCalError::Config("Could not determine config directory".into()))?
            .join("coachcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented-out default on first run.
    pub fn load() -> CoachCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CoachCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CoachCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoachCalError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoachCalResult<()> {
        let contents = format!(
            "\
# coachcal configuration

# Coach whose groups are shown by default:
# coach_id = \"...\"

# Time zone of session start times (defaults to the system zone):
# timezone = \"Europe/Zagreb\"

# Log level when RUST_LOG is not set:
# log_level = \"warn\"

# Local JSON store (default):
# [source]
# kind = \"file\"
# path = \"{}\"

# Hosted database:
# [source]
# kind = \"rest\"
# url = \"https://your-project.example.com\"
# api_key = \"...\"
# timeout_secs = 10
",
            DEFAULT_STORE_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoachCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CoachCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Zone used to place session times: configured, else system, else UTC.
    pub fn timezone(&self) -> CoachCalResult<Tz> {
        if let Some(name) = &self.timezone {
            return name
                .parse()
                .map_err(|_| CoachCalError::Config(format!("Unknown time zone '{name}'")));
        }

        let system = iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok());
        Ok(system.unwrap_or(chrono_tz::UTC))
    }

    /// Copy safe to print: secrets replaced.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let SourceConfig::Rest { api_key, .. } = &mut config.source {
            *api_key = "<redacted>".to_string();
        }
        config
    }
}
