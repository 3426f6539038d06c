//! The caller-owned context tying styles and folders together.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::{Aspect, House, Object, Sign};
use crate::error::{Error, Result};
use crate::folder::{Folder, FolderConfig, FolderRegistry};
use crate::load::{load_style_file, merge_object_file};
use crate::store::{StoreLimits, Style, StyleRegistry};

/// Subdirectory of a style folder holding per-object data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectFileKind {
    Signs,
    Aspects,
    Midpoints,
}

impl ObjectFileKind {
    pub const ALL: [ObjectFileKind; 3] = [Self::Signs, Self::Aspects, Self::Midpoints];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Signs => "signs",
            Self::Aspects => "aspects",
            Self::Midpoints => "midpoints",
        }
    }
}

impl fmt::Display for ObjectFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Returned when text names no [`ObjectFileKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown object file kind '{0}' (expected signs, aspects or midpoints)")]
pub struct UnknownKind(pub String);

impl FromStr for ObjectFileKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.dir_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Loaded styles, discovered folders and the current selection.
///
/// Queries always run against the current style and return `None` when no
/// loaded style is current or an id is out of range.
///
/// ```rust,no_run
/// use auspex::Interpreter;
///
/// let mut interp = Interpreter::from_env();
/// interp.activate_style("modern").unwrap();
/// if let Some(text) = interp.resolve_combo(1, 1, 10) {
///     println!("{text}");
/// }
/// ```
#[derive(Debug)]
pub struct Interpreter {
    styles: StyleRegistry,
    folders: FolderRegistry,
}

impl Interpreter {
    pub fn new(config: FolderConfig) -> Self {
        Self::with_folders(FolderRegistry::new(config))
    }

    /// Uses the default `~/.astrolog/interpretations` location.
    pub fn from_env() -> Self {
        Self::new(FolderConfig::from_env())
    }

    pub fn with_folders(folders: FolderRegistry) -> Self {
        Self {
            styles: StyleRegistry::new(),
            folders,
        }
    }

    /// Loads one self-contained style file and makes it current.
    ///
    /// # Errors
    ///
    /// Anything [`load_style_file`] reports, or [`Error::TooManyStyles`].
    /// The current style is unchanged on error.
    pub fn load_style_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let style = load_style_file(path)?;
        self.styles.register_current(style)
    }

    /// Rescans the styles directory. See [`FolderRegistry::scan`].
    pub fn scan_folders(&mut self) -> Result<usize> {
        self.folders.scan()
    }

    /// Activates the folder named `name` (directory or display name, any
    /// case) and makes a style merged from its per-object files current.
    ///
    /// Scans first if no folders are known. Every planetary body's
    /// `signs/<Name>.ais` that exists as a regular file is merged; missing
    /// files are skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::StyleNotFound`] if no folder matches; nothing changes
    /// - [`Error::TooManyStyles`] if the style registry is full; nothing
    ///   changes
    /// - [`Error::OutOfMemory`] if merging cannot grow a list; the partial
    ///   style is dropped and nothing changes
    pub fn activate_style(&mut self, name: &str) -> Result<usize> {
        if self.folders.is_empty() {
            self.folders.scan()?;
        }
        let index = self.folders.find(name).ok_or_else(|| Error::StyleNotFound {
            name: name.to_string(),
        })?;

        let style = build_folder_style(&self.folders.folders()[index])?;
        let slot = self.styles.register_current(style)?;
        self.folders.set_active(index);
        Ok(slot)
    }

    /// Meaning of `object` in `sign` in `house` under the current style.
    pub fn resolve_combo(&self, object: u32, sign: u32, house: u32) -> Option<&str> {
        let style = self.current_style()?;
        style.resolve_combo(Object::new(object)?, Sign::new(sign)?, House::new(house)?)
    }

    /// Meaning of `first` in `aspect` to `second` under the current style.
    pub fn resolve_aspect_combo(&self, first: u32, second: u32, aspect: u32) -> Option<&str> {
        let style = self.current_style()?;
        style.resolve_aspect_combo(Object::new(first)?, Object::new(second)?, Aspect::new(aspect)?)
    }

    /// General meaning of `aspect` under the current style.
    pub fn resolve_aspect(&self, aspect: u32, orb: i32) -> Option<&str> {
        self.current_style()?.resolve_aspect(Aspect::new(aspect)?, orb)
    }

    /// Style folders found by the last scan, for presentation.
    pub fn available_styles(&self) -> &[Folder] {
        self.folders.folders()
    }

    /// `<active folder>/<kind>/<ObjectName>.ais`, or `None` when no folder is
    /// active.
    pub fn object_file_path(&self, kind: ObjectFileKind, object: Object) -> Option<PathBuf> {
        let active = self.folders.active_path()?;
        Some(
            active
                .join(kind.dir_name())
                .join(format!("{}.ais", object.name())),
        )
    }

    /// Loads one per-object file of the active folder as a self-contained
    /// style and makes it current. Returns `Ok(None)` when no folder is
    /// active.
    ///
    /// # Errors
    ///
    /// Same as [`Interpreter::load_style_file`].
    pub fn load_object_file(
        &mut self,
        kind: ObjectFileKind,
        object: Object,
    ) -> Result<Option<usize>> {
        match self.object_file_path(kind, object) {
            Some(path) => self.load_style_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// The current style, only if it finished loading.
    pub fn current_style(&self) -> Option<&Style> {
        self.styles.current_loaded()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn folders(&self) -> &FolderRegistry {
        &self.folders
    }
}

fn build_folder_style(folder: &Folder) -> Result<Style> {
    let mut style = Style::new(folder.display_name.clone(), StoreLimits::FOLDER);
    style.set_name(folder.display_name.clone());
    if let Some(author) = &folder.author {
        style.set_author(author.clone());
    }
    if let Some(version) = &folder.version {
        style.set_version(version.clone());
    }
    if let Some(description) = &folder.description {
        style.set_description(description.clone());
    }

    let signs = folder.path.join(ObjectFileKind::Signs.dir_name());
    let mut merged = 0;
    for object in Object::bodies() {
        let path = signs.join(format!("{}.ais", object.name()));
        if path.is_file() && merge_object_file(&mut style, &path)? {
            merged += 1;
        }
    }
    style.mark_loaded();

    tracing::info!(
        folder = %folder.name,
        files = merged,
        combos = style.combos().len(),
        aspect_combos = style.aspect_combos().len(),
        "activated interpretation style"
    );
    Ok(style)
}
