//! In-memory interpretation styles.
//!
//! - [`AppendList`]: growable, append-only list with a fixed growth step and
//!   an optional hard ceiling
//! - [`Style`]: every text loaded for one interpretation style
//! - [`StyleRegistry`]: the loaded styles plus the current selection

mod append;
mod registry;
mod style;

pub use append::{AppendList, Appended};
pub use registry::{StyleRegistry, MAX_STYLES};
pub use style::{ComboEntry, StoreLimits, Style};
