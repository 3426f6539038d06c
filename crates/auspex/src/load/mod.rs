//! Loading style text into a [`Style`](crate::store::Style).
//!
//! There are two loaders, sharing the [`Directives`](crate::format::Directives)
//! reader and its continuation rules:
//!
//! - [`load_style_file`] reads one self-contained style file. Every section is
//!   recognized, keys are resolved with the full key codec (names, ids and
//!   wildcards), and combination entries are stored under their canonical
//!   numeric encoding.
//! - [`merge_object_file`] merges one per-object data file into a style being
//!   assembled from a folder. Keys are bare integers, composite keys are
//!   scanned as `int+int+int`, and entries keep their raw key text. Names and
//!   wildcards are not resolved on this path.

mod merge;
mod single;

pub use merge::merge_object_file;
pub use single::{load_style_file, read_style};

use crate::format::Section;

/// Logs the start of a section that will be ignored.
fn note_section(name: &str, section: Option<Section>) {
    if section.is_none() {
        tracing::debug!(section = name, "ignoring keys until the next recognized section");
    }
}
