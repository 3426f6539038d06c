//! Strategies for reading which folder is active.

use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the name of the active folder from a styles directory.
///
/// Implementations return `None` when no marker is present or it cannot be
/// read; a missing marker only means no folder starts out active.
pub trait ActiveMarker: fmt::Debug + Send + Sync {
    fn read(&self, styles_dir: &Path) -> Option<String>;
}

/// `<styles>/active` symlink; the final component of its target names the
/// folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymlinkMarker;

impl SymlinkMarker {
    pub const FILE_NAME: &'static str = "active";
}

impl ActiveMarker for SymlinkMarker {
    fn read(&self, styles_dir: &Path) -> Option<String> {
        let target = fs::read_link(styles_dir.join(Self::FILE_NAME)).ok()?;
        let name = target.file_name()?.to_string_lossy().into_owned();
        (!name.is_empty()).then_some(name)
    }
}

/// `<styles>/active.txt`; its first line names the folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerFileMarker;

impl PointerFileMarker {
    pub const FILE_NAME: &'static str = "active.txt";
}

impl ActiveMarker for PointerFileMarker {
    fn read(&self, styles_dir: &Path) -> Option<String> {
        let file = fs::File::open(styles_dir.join(Self::FILE_NAME)).ok()?;
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line).ok()?;
        let name = line.trim_end_matches(['\r', '\n']);
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// The marker strategy for the current platform.
pub fn default_marker() -> Box<dyn ActiveMarker> {
    if cfg!(unix) {
        Box::new(SymlinkMarker)
    } else {
        Box::new(PointerFileMarker)
    }
}
