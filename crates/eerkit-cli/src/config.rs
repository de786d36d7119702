//! Locating the configuration file.
//!
//! The first of these that applies is used:
//!
//! 1. the `--config` path,
//! 2. the path in the `EERKIT_CONFIG` environment variable,
//! 3. `eerkit.toml` in the working directory,
//! 4. `config.toml` in the user's eerkit configuration directory.
//!
//! A path named by the flag or the variable must exist. The other two are
//! only used when present, and without any file the defaults apply.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use eerkit::{
    EerError,
    config::{AppConfig, ConfigError},
};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "EERKIT_CONFIG";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "eerkit.toml";

/// How a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Flag,
    Environment,
    WorkingDirectory,
    UserDirectory,
}

impl Origin {
    /// Whether the user asked for this file by name.
    fn is_explicit(self) -> bool {
        matches!(self, Origin::Flag | Origin::Environment)
    }
}

/// The places a configuration file may come from, in priority order.
#[derive(Debug, Default)]
struct Search {
    candidates: Vec<(PathBuf, Origin)>,
}

impl Search {
    fn new(
        flag: Option<&str>,
        environment: Option<PathBuf>,
        working_dir: &Path,
        user_dir: Option<PathBuf>,
    ) -> Self {
        let candidates = [
            flag.map(|path| (PathBuf::from(path), Origin::Flag)),
            environment.map(|path| (path, Origin::Environment)),
            Some((working_dir.join(LOCAL_CONFIG), Origin::WorkingDirectory)),
            user_dir.map(|dir| (dir.join("config.toml"), Origin::UserDirectory)),
        ];
        Self {
            candidates: candidates.into_iter().flatten().collect(),
        }
    }

    /// Returns the file to load, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the first explicit candidate
    /// does not exist.
    fn locate(&self) -> Result<Option<(&Path, Origin)>, ConfigError> {
        for (path, origin) in &self.candidates {
            if path.is_file() {
                return Ok(Some((path, *origin)));
            }
            if origin.is_explicit() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            debug!(path = path.display().to_string(), origin:?; "No configuration file");
        }
        Ok(None)
    }
}

/// Loads the configuration for this run.
///
/// `flag` is the value of `--config`.
///
/// # Errors
///
/// Returns [`EerError::Config`] if an explicitly named file is missing, or
/// the chosen file cannot be read or parsed.
pub fn load_config(flag: Option<&str>) -> Result<AppConfig, EerError> {
    let working_dir = env::current_dir()?;
    let user_dir = ProjectDirs::from("", "", "eerkit").map(|dirs| dirs.config_dir().to_path_buf());
    let search = Search::new(
        flag,
        env::var_os(CONFIG_ENV).map(PathBuf::from),
        &working_dir,
        user_dir,
    );

    let Some((path, origin)) = search.locate()? else {
        debug!("No configuration file found, using defaults");
        return Ok(AppConfig::default());
    };

    info!(path = path.display().to_string(), origin:?; "Loading configuration");
    Ok(read_config(path)?)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml(path, src)
}
