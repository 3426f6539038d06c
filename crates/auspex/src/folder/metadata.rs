//! Style folder records and their `style.conf` metadata.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::format::{Directive, Directives, Section};

/// One discovered style folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    /// Directory name; the identity used by the active marker.
    pub name: String,
    pub display_name: String,
    pub author: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub path: PathBuf,
    /// Metadata was read successfully.
    pub loaded: bool,
    pub active: bool,
}

impl Folder {
    /// A folder with no metadata yet. The display name starts as the
    /// directory name.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            author: None,
            version: None,
            description: None,
            path: path.into(),
            loaded: false,
            active: false,
        }
    }

    /// True if `name` matches the directory name or display name, ignoring
    /// ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.display_name.eq_ignore_ascii_case(name)
    }
}

/// Reads a folder's `style.conf` into `folder`.
///
/// Only keys inside a `[metadata]` section are honored: `name` sets the
/// display name, and `author`, `version` and `description` are copied. The
/// display name falls back to the directory name when the file sets none.
///
/// # Errors
///
/// [`Error::FileNotFound`] if the file cannot be opened, [`Error::Io`] if
/// reading fails.
pub fn load_folder_metadata(folder: &mut Folder, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    read_metadata(folder, BufReader::new(file), path)?;
    folder.loaded = true;
    Ok(())
}

fn read_metadata<R: BufRead>(folder: &mut Folder, reader: R, path: &Path) -> Result<()> {
    let mut display_name = None;
    let mut in_metadata = false;

    for directive in Directives::new(reader) {
        let directive = directive.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match directive {
            Directive::Section(name) => {
                in_metadata = Section::from_name(&name) == Some(Section::Metadata);
            }
            Directive::Pair { key, value, .. } if in_metadata => {
                match key.to_ascii_lowercase().as_str() {
                    "name" => display_name = Some(value),
                    "author" => folder.author = Some(value),
                    "version" => folder.version = Some(value),
                    "description" => folder.description = Some(value),
                    _ => {}
                }
            }
            Directive::Pair { .. } => {}
        }
    }

    folder.display_name = display_name.unwrap_or_else(|| folder.name.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Folder {
        let mut folder = Folder::new("modern-v2", "/styles/modern-v2");
        read_metadata(&mut folder, text.as_bytes(), Path::new("style.conf")).unwrap();
        folder
    }

    #[test]
    fn test_metadata_fields() {
        let folder = read("[metadata]\nname: Modern\nauthor: Jane\n");
        assert_eq!(folder.display_name, "Modern");
        assert_eq!(folder.author.as_deref(), Some("Jane"));
        assert_eq!(folder.version, None);
        assert_eq!(folder.description, None);
    }

    #[test]
    fn test_display_name_defaults_to_directory() {
        let folder = read("[metadata]\nauthor: Jane\nversion: 1.2\n");
        assert_eq!(folder.display_name, "modern-v2");
        assert_eq!(folder.version.as_deref(), Some("1.2"));
    }

    #[test]
    fn test_other_sections_ignored() {
        let folder = read(
            "name: Orphan\n[planet_meanings]\nname: Wrong\n[Metadata]\nName: Right\n\
             [combinations]\ndescription: Wrong\n",
        );
        assert_eq!(folder.display_name, "Right");
        assert_eq!(folder.description, None);
    }

    #[test]
    fn test_matches_either_name() {
        let folder = read("[metadata]\nname: Modern\n");
        assert!(folder.matches("MODERN-V2"));
        assert!(folder.matches("modern"));
        assert!(!folder.matches("classic"));
    }

    #[test]
    fn test_folder_serializes_for_listing() {
        let mut folder = read("[metadata]\nname: Modern\nauthor: Jane\n");
        folder.active = true;

        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(value["name"], "modern-v2");
        assert_eq!(value["display_name"], "Modern");
        assert_eq!(value["author"], "Jane");
        assert!(value["version"].is_null());
        assert_eq!(value["path"], "/styles/modern-v2");
        assert_eq!(value["active"], true);
    }

    #[test]
    fn test_missing_file() {
        let mut folder = Folder::new("gone", "/nowhere/gone");
        let err = load_folder_metadata(&mut folder, "/nowhere/gone/style.conf").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert!(!folder.loaded);
    }
}
