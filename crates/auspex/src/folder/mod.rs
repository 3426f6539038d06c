//! Style folder discovery and activation bookkeeping.
//!
//! A style folder is a directory under `<base>/styles/` that carries a
//! `style.conf` metadata file. Per-object data files live beside it:
//!
//! ```text
//! <base>/styles/
//! ├── active -> modern        (symlink marker, or active.txt elsewhere)
//! ├── modern/
//! │   ├── style.conf
//! │   └── signs/
//! │       ├── Sun.ais
//! │       └── Moon.ais
//! └── classic/
//!     └── style.conf
//! ```
//!
//! [`FolderRegistry::scan`] discovers folders and resolves the active marker.
//! Merging the per-object files into a style happens in
//! [`Interpreter::activate_style`](crate::Interpreter::activate_style).

mod config;
mod marker;
mod metadata;
mod registry;

pub use config::{FolderConfig, MAX_FOLDERS, METADATA_FILE};
pub use marker::{default_marker, ActiveMarker, PointerFileMarker, SymlinkMarker};
pub use metadata::{load_folder_metadata, Folder};
pub use registry::FolderRegistry;
