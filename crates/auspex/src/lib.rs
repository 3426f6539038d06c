//! # Auspex - interpretation styles and specificity-ordered lookups
//!
//! Auspex reads interpretation text written in a small sectioned key/value
//! format, assembles it into a [`Style`](store::Style), and answers queries
//! such as "what does the Sun in Aries in the 10th house mean?" by walking a
//! fixed chain of candidate keys from most to least specific.
//!
//! Styles come from two places:
//!
//! - a single self-contained file, via [`Interpreter::load_style_file`]
//! - a style folder under `~/.astrolog/interpretations/styles/`, via
//!   [`Interpreter::activate_style`], which merges one data file per
//!   planetary body
//!
//! ## The text format
//!
//! ```text
//! [metadata]
//! name: Modern
//! author: Jane
//!
//! # composite keys are object+sign+house, `*` is a wildcard
//! [combinations]
//! Sun+Aries+*: Pioneering spirit, eager to lead \
//!              and quick to act.
//! 1+1+10: A career built on initiative.
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use auspex::Interpreter;
//!
//! let mut interp = Interpreter::from_env();
//! interp.load_style_file("classic.ais")?;
//!
//! // Sun (1) in Aries (1) in the 10th house
//! assert_eq!(interp.resolve_combo(1, 1, 10), Some("A career built on initiative."));
//! assert_eq!(interp.resolve_combo(1, 1, 4), Some("Pioneering spirit, eager to lead and quick to act."));
//! # Ok::<(), auspex::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`format`]: line grammar and the continuation-aware reader
//! - [`key`]: composite key codec
//! - [`domain`]: validated object, sign, house and aspect ids
//! - [`store`]: styles, growable entry lists and the style registry
//! - [`load`]: single-file and per-object loaders
//! - [`resolve`]: candidate chains and lookups
//! - [`folder`]: style folder discovery and the active marker

pub mod domain;
mod error;
pub mod folder;
pub mod format;
mod interpreter;
pub mod key;
pub mod load;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
pub use folder::{Folder, FolderConfig, FolderRegistry};
pub use interpreter::{Interpreter, ObjectFileKind, UnknownKind};
pub use store::{Style, StyleRegistry};
