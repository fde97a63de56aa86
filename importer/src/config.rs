//! Run configuration: backend credentials from the environment plus the
//! workbook locations and years chosen on the command line.

use std::env;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};

use crate::error::{ConfigError, ConfigResult};

pub const URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

pub const DEFAULT_ENV_FILE: &str = ".env.local";
pub const DEFAULT_DATA_DIR: &str = "c2a data";
pub const DEFAULT_TARGET_YEAR: i32 = 2026;

pub const TAM_FILE: &str = "C2A_2026_TAM_Master.xlsx";
pub const GOALS_FILE: &str = "2026 Company goals.xlsx";
pub const PIPELINE_FILE: &str = "C2A Security Pipeline Projections 2026 01012026 Final.xlsx";

/// Supabase project URL and anon key.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub credentials: Credentials,
}

impl Config {
    /// Load `env_file` if it exists, then read the process environment.
    ///
    /// Variables already set in the environment win over the file.
    pub fn from_env_file(env_file: &Path) -> ConfigResult<Self> {
        if env_file.exists() {
            dotenvy::from_path(env_file).map_err(|e| ConfigError::InvalidVar {
                name: "env file",
                message: format!("{}: {}", env_file.display(), e),
            })?;
        }
        Self::from_env()
    }

    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let url = read(URL_VAR)?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidVar {
                name: URL_VAR,
                message: format!("'{}' is not an http(s) URL", url),
            });
        }

        Ok(Self {
            credentials: Credentials {
                url,
                key: read(KEY_VAR)?,
            },
        })
    }
}

/// Paths of the three source workbooks.
///
/// Each path may also be a directory of `<sheet>.csv` exports.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFiles {
    pub tam: PathBuf,
    pub goals: PathBuf,
    pub pipeline: PathBuf,
}

impl SourceFiles {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            tam: dir.join(TAM_FILE),
            goals: dir.join(GOALS_FILE),
            pipeline: dir.join(PIPELINE_FILE),
        }
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    pub sources: SourceFiles,
    /// Year stamped on every imported goal
    pub target_year: i32,
    /// Year used for close quarters that name none
    pub fallback_quarter_year: i32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            sources: SourceFiles::default(),
            target_year: DEFAULT_TARGET_YEAR,
            fallback_quarter_year: Local::now().year(),
        }
    }
}
