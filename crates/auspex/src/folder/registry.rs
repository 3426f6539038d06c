//! The registry of discovered style folders.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::config::{FolderConfig, MAX_FOLDERS, METADATA_FILE};
use super::marker::{default_marker, ActiveMarker};
use super::metadata::{load_folder_metadata, Folder};
use crate::error::{Error, Result};

/// Discovered style folders and the one that is active.
#[derive(Debug)]
pub struct FolderRegistry {
    config: FolderConfig,
    marker: Box<dyn ActiveMarker>,
    folders: Vec<Folder>,
    active: Option<usize>,
    active_path: Option<PathBuf>,
}

impl FolderRegistry {
    /// A registry using the platform's active marker. Nothing is scanned yet.
    pub fn new(config: FolderConfig) -> Self {
        Self::with_marker(config, default_marker())
    }

    pub fn with_marker(config: FolderConfig, marker: Box<dyn ActiveMarker>) -> Self {
        Self {
            config,
            marker,
            folders: Vec::new(),
            active: None,
            active_path: None,
        }
    }

    pub fn config(&self) -> &FolderConfig {
        &self.config
    }

    /// Rediscovers style folders, replacing any earlier scan.
    ///
    /// A directory under `<base>/styles` is a style folder when it is not
    /// hidden, is not a symlink and holds a regular `style.conf` file whose
    /// metadata can be read. Folders are kept sorted by directory name, up to
    /// [`MAX_FOLDERS`]. The active marker is then resolved against the
    /// directory names, ignoring ASCII case.
    ///
    /// Returns the number of folders found. A missing styles directory is
    /// not an error and yields zero.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the styles directory exists but cannot be listed.
    pub fn scan(&mut self) -> Result<usize> {
        self.folders.clear();
        self.active = None;
        self.active_path = None;

        let styles_dir = self.config.styles_dir();
        let entries = match fs::read_dir(&styles_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %styles_dir.display(), "no styles directory");
                return Ok(0);
            }
            Err(source) => {
                return Err(Error::Io {
                    path: styles_dir,
                    source,
                })
            }
        };

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(
                        path = %styles_dir.display(),
                        error = %err,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type().map(|t| t.is_symlink()).unwrap_or(true) {
                continue;
            }
            let path = entry.path();
            if path.join(METADATA_FILE).is_file() {
                candidates.push((name, path));
            }
        }
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path) in candidates {
            if self.folders.len() >= MAX_FOLDERS {
                tracing::warn!(max = MAX_FOLDERS, "too many style folders; the rest are ignored");
                break;
            }
            let mut folder = Folder::new(name, &path);
            match load_folder_metadata(&mut folder, path.join(METADATA_FILE)) {
                Ok(()) => self.folders.push(folder),
                Err(err) => tracing::warn!(error = %err, "skipping style folder"),
            }
        }

        self.resolve_marker(&styles_dir);

        tracing::info!(
            path = %styles_dir.display(),
            folders = self.folders.len(),
            active = self.active().map(|f| f.name.as_str()),
            "scanned style folders"
        );
        Ok(self.folders.len())
    }

    fn resolve_marker(&mut self, styles_dir: &Path) {
        let Some(marked) = self.marker.read(styles_dir) else {
            return;
        };
        match self
            .folders
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(&marked))
        {
            Some(index) => self.set_active(index),
            None => tracing::debug!(marker = %marked, "active marker names no known folder"),
        }
    }

    /// Marks the folder at `index` active, clearing any other.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.folders.len() {
            return;
        }
        for (i, folder) in self.folders.iter_mut().enumerate() {
            folder.active = i == index;
        }
        self.active = Some(index);
        self.active_path = Some(self.folders[index].path.clone());
    }

    /// Index of the folder whose directory name or display name is `name`,
    /// ignoring ASCII case. Earlier folders win.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.matches(name))
    }

    pub fn get(&self, index: usize) -> Option<&Folder> {
        self.folders.get(index)
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn active(&self) -> Option<&Folder> {
        self.active.and_then(|i| self.folders.get(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Directory of the active folder.
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::PointerFileMarker;
    use tempfile::TempDir;

    fn add_folder(styles: &Path, dir: &str, conf: &str) {
        let path = styles.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(METADATA_FILE), conf).unwrap();
    }

    fn registry(base: &Path) -> FolderRegistry {
        FolderRegistry::with_marker(FolderConfig::new(base), Box::new(PointerFileMarker))
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    #[test]
    fn test_scan_missing_styles_dir() {
        let base = TempDir::new().unwrap();
        let mut folders = registry(base.path());
        assert_eq!(folders.scan().unwrap(), 0);
        assert!(folders.is_empty());
        assert!(folders.active().is_none());
    }

    #[test]
    fn test_scan_finds_folders_sorted() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "modern", "[metadata]\nname: Modern\n");
        add_folder(&styles, "classic", "[metadata]\nauthor: Lilly\n");

        let mut folders = registry(base.path());
        assert_eq!(folders.scan().unwrap(), 2);
        let names: Vec<&str> = folders.folders().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["classic", "modern"]);
        assert!(folders.folders().iter().all(|f| f.loaded));
    }

    #[test]
    fn test_scan_skips_hidden_and_incomplete() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, ".cache", "[metadata]\n");
        fs::create_dir_all(styles.join("empty")).unwrap();
        fs::create_dir_all(styles.join("odd").join(METADATA_FILE)).unwrap();
        fs::write(styles.join("loose.conf"), "[metadata]\n").unwrap();
        add_folder(&styles, "real", "");

        let mut folders = registry(base.path());
        assert_eq!(folders.scan().unwrap(), 1);
        assert_eq!(folders.folders()[0].name, "real");
        assert_eq!(folders.folders()[0].display_name, "real");
    }

    #[test]
    fn test_rescan_replaces_folders() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "one", "");

        let mut folders = registry(base.path());
        assert_eq!(folders.scan().unwrap(), 1);
        add_folder(&styles, "two", "");
        assert_eq!(folders.scan().unwrap(), 2);
    }

    #[test]
    fn test_scan_caps_folder_count() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        for n in 0..MAX_FOLDERS + 3 {
            add_folder(&styles, &format!("style{n:03}"), "");
        }

        let mut folders = registry(base.path());
        assert_eq!(folders.scan().unwrap(), MAX_FOLDERS);
    }

    // =========================================================================
    // Active marker
    // =========================================================================

    #[test]
    fn test_pointer_marker_activates_folder() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "classic", "");
        add_folder(&styles, "modern", "");
        fs::write(styles.join("active.txt"), "MODERN\n").unwrap();

        let mut folders = registry(base.path());
        folders.scan().unwrap();
        let active = folders.active().unwrap();
        assert_eq!(active.name, "modern");
        assert!(active.active);
        assert_eq!(folders.active_path(), Some(styles.join("modern").as_path()));
        assert!(!folders.folders()[0].active);
    }

    #[test]
    fn test_marker_for_unknown_folder() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "classic", "");
        fs::write(styles.join("active.txt"), "vanished\n").unwrap();

        let mut folders = registry(base.path());
        folders.scan().unwrap();
        assert!(folders.active().is_none());
        assert!(folders.active_path().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_marker_is_not_a_folder() {
        use crate::folder::SymlinkMarker;

        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "modern", "");
        std::os::unix::fs::symlink(styles.join("modern"), styles.join("active")).unwrap();

        let mut folders =
            FolderRegistry::with_marker(FolderConfig::new(base.path()), Box::new(SymlinkMarker));
        assert_eq!(folders.scan().unwrap(), 1);
        assert_eq!(folders.active().map(|f| f.name.as_str()), Some("modern"));
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[test]
    fn test_find_by_either_name_and_set_active() {
        let base = TempDir::new().unwrap();
        let styles = base.path().join("styles");
        add_folder(&styles, "classic", "[metadata]\nname: Traditional\n");
        add_folder(&styles, "modern", "");
        fs::write(styles.join("active.txt"), "modern\n").unwrap();

        let mut folders = registry(base.path());
        folders.scan().unwrap();
        let index = folders.find("traditional").unwrap();
        assert_eq!(folders.find("CLASSIC"), Some(index));
        assert_eq!(folders.find("nothing"), None);

        folders.set_active(index);
        let active: Vec<&str> = folders
            .folders()
            .iter()
            .filter(|f| f.active)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(active, ["classic"]);
    }
}
