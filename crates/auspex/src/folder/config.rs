//! Base directory and limits for style folder discovery.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Most folders a single scan registers.
pub const MAX_FOLDERS: usize = 100;

/// Metadata file that marks a directory as a style folder.
pub const METADATA_FILE: &str = "style.conf";

const STYLES_DIR: &str = "styles";

#[cfg(windows)]
const HOME_VAR: &str = "USERPROFILE";
#[cfg(not(windows))]
const HOME_VAR: &str = "HOME";

#[cfg(windows)]
const HOME_FALLBACK: &str = "C:\\";
#[cfg(not(windows))]
const HOME_FALLBACK: &str = "/tmp";

/// Where interpretation style folders live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderConfig {
    base_path: PathBuf,
}

impl FolderConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolves `<home>/.astrolog/interpretations` from the environment.
    ///
    /// Home is `$HOME` (`%USERPROFILE%` on Windows); when unset, `/tmp`
    /// (`C:\`) stands in.
    pub fn from_env() -> Self {
        Self::from_home(env::var_os(HOME_VAR))
    }

    fn from_home(home: Option<OsString>) -> Self {
        let home = home
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(HOME_FALLBACK));
        Self::new(home.join(".astrolog").join("interpretations"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// `<base>/styles`, the directory scanned for style folders.
    pub fn styles_dir(&self) -> PathBuf {
        self.base_path.join(STYLES_DIR)
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
