//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Locate the store file and log directory under the XDG data directory.
//! - Carry the resolved values explicitly into every operation.
//!
//! # Invariants
//! - A non-empty `XDG_DATA_HOME` always wins over the home-directory fallback.
//! - The store file name and application directory name are fixed.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Directory created under the XDG data directory.
pub const APP_DIR_NAME: &str = "go-notes";
/// Store file name inside `APP_DIR_NAME`.
pub const STORE_FILE_NAME: &str = "notes.json";
/// Log directory name inside `APP_DIR_NAME`.
pub const LOG_DIR_NAME: &str = "logs";
/// Environment variable overriding the XDG data directory base.
pub const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";
/// Environment variable selecting the file log level (`off` disables logs).
pub const LOG_LEVEL_ENV: &str = "GO_NOTES_LOG";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    /// Neither `XDG_DATA_HOME` nor a home directory is available.
    HomeDirUnavailable,
    /// Data directory could not be created.
    CreateDir { path: PathBuf, source: std::io::Error },
    /// `GO_NOTES_LOG` holds an unknown level.
    LogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => {
                write!(f, "cannot resolve home directory and {XDG_DATA_HOME_ENV} is not set")
            }
            Self::CreateDir { path, source } => {
                write!(f, "failed to create directory `{}`: {source}", path.display())
            }
            Self::LogLevel(err) => write!(f, "{LOG_LEVEL_ENV}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HomeDirUnavailable => None,
            Self::CreateDir { source, .. } => Some(source),
            Self::LogLevel(err) => Some(err),
        }
    }
}

/// Resolved locations and settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// `<data home>/go-notes`.
    pub data_dir: PathBuf,
    /// `<data dir>/notes.json`.
    pub store_path: PathBuf,
    /// `<data dir>/logs`.
    pub log_dir: PathBuf,
    /// Normalized log level, or `off`.
    pub log_level: &'static str,
}

impl NotesConfig {
    /// Resolves configuration from the current process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let xdg_data_home = std::env::var(XDG_DATA_HOME_ENV).ok();
        let log_level = std::env::var(LOG_LEVEL_ENV).ok();
        Self::resolve(
            xdg_data_home.as_deref(),
            dirs::home_dir(),
            log_level.as_deref(),
        )
    }

    /// Resolves configuration from explicit inputs.
    ///
    /// Empty `xdg_data_home` is treated as unset; empty `log_level` selects
    /// the build-mode default.
    pub fn resolve(
        xdg_data_home: Option<&str>,
        home_dir: Option<PathBuf>,
        log_level: Option<&str>,
    ) -> ConfigResult<Self> {
        let base = match xdg_data_home.filter(|value| !value.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => home_dir
                .ok_or(ConfigError::HomeDirUnavailable)?
                .join(".local")
                .join("share"),
        };
        let log_level = match log_level.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => normalize_level(value).map_err(ConfigError::LogLevel)?,
            None => default_log_level(),
        };
        Ok(Self::for_data_dir(base.join(APP_DIR_NAME), log_level))
    }

    /// Builds a configuration rooted at an explicit data directory.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>, log_level: &'static str) -> Self {
        let data_dir = data_dir.into();
        Self {
            store_path: data_dir.join(STORE_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            log_level,
        }
    }

    /// Creates the data directory and its parents when absent.
    ///
    /// On Unix the directories are created user-private (`0700`).
    pub fn ensure_data_dir(&self) -> ConfigResult<()> {
        create_private_dir_all(&self.data_dir).map_err(|source| ConfigError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })
    }

    /// Whether file logging is enabled.
    pub fn logging_enabled(&self) -> bool {
        self.log_level != "off"
    }
}

#[cfg(unix)]
fn create_private_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir_all(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotesConfig};
    use std::path::PathBuf;

    #[test]
    fn xdg_data_home_takes_precedence() {
        let config = NotesConfig::resolve(Some("/xdg"), Some(PathBuf::from("/home/u")), None)
            .expect("config should resolve");
        assert_eq!(config.store_path, PathBuf::from("/xdg/go-notes/notes.json"));
        assert_eq!(config.log_dir, PathBuf::from("/xdg/go-notes/logs"));
    }

    #[test]
    fn empty_xdg_data_home_falls_back_to_home() {
        let config = NotesConfig::resolve(Some(""), Some(PathBuf::from("/home/u")), None)
            .expect("config should resolve");
        assert_eq!(
            config.store_path,
            PathBuf::from("/home/u/.local/share/go-notes/notes.json")
        );
    }

    #[test]
    fn missing_home_without_xdg_is_an_error() {
        let err = NotesConfig::resolve(None, None, None).expect_err("no base directory");
        assert!(matches!(err, ConfigError::HomeDirUnavailable));
    }

    #[test]
    fn log_level_is_normalized_and_validated() {
        let config = NotesConfig::resolve(Some("/xdg"), None, Some(" WARNING "))
            .expect("config should resolve");
        assert_eq!(config.log_level, "warn");

        let off = NotesConfig::resolve(Some("/xdg"), None, Some("off")).unwrap();
        assert!(!off.logging_enabled());

        let err = NotesConfig::resolve(Some("/xdg"), None, Some("loud")).expect_err("bad level");
        assert!(err.to_string().contains("GO_NOTES_LOG"));
    }

    #[test]
    fn ensure_data_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = NotesConfig::for_data_dir(temp.path().join("a/b/go-notes"), "info");
        config.ensure_data_dir().expect("dir should be created");
        config.ensure_data_dir().expect("second call is a no-op");
        assert!(config.data_dir.is_dir());
    }
}
