//! The interpretation text format.
//!
//! Style files and folder metadata share one line-oriented grammar:
//!
//! ```text
//! [section_name]
//! key: value            # or ';' comment
//! key: value \
//!      continued value
//! ```
//!
//! - [`parse_line`] tokenizes a single physical line into a key/value pair.
//! - [`section_header`] and [`Section`] recognize `[section]` lines.
//! - [`Directives`] joins continuation lines and yields one [`Directive`] per
//!   logical entry, which is what the loaders consume.
//!
//! Comment characters are never quoted: a `#` or `;` anywhere on a line ends
//! the content of that line.

mod line;
mod reader;

pub use line::{parse_line, section_header, Entry, Section};
pub use reader::{Directive, Directives};
