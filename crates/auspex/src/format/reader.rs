//! Logical-line reading with continuation joining.

use std::io::{self, BufRead};

use super::line::{parse_line, section_header};

/// One logical element of a style file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A `[name]` header. The name is not validated here.
    Section(String),
    /// A key/value pair, with continuation lines already joined.
    Pair {
        key: String,
        value: String,
        /// Physical line number (1-based) where the pair starts.
        line: usize,
    },
}

/// Iterator of [`Directive`]s over a buffered reader.
///
/// A value ending in `\` is held and the following physical lines are
/// appended to it, each trimmed and separated by a single space, until a line
/// without a trailing backslash closes the value. Headers, blank lines and
/// comments are only recognized while no continuation is open.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
///
/// ```rust
/// use auspex::format::{Directive, Directives};
///
/// let text = "[templates]\ndefault_location: a \\\n  b \\\n  c\n";
/// let items: Vec<Directive> = Directives::new(text.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(items[0], Directive::Section("templates".into()));
/// assert_eq!(
///     items[1],
///     Directive::Pair { key: "default_location".into(), value: "a b c".into(), line: 2 }
/// );
/// ```
pub struct Directives<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

struct Held {
    key: String,
    value: String,
    line: usize,
}

impl<R: BufRead> Directives<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for Directives<R> {
    type Item = io::Result<Directive>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut held: Option<Held> = None;

        loop {
            let raw = match self.next_line() {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    if let Some(held) = held {
                        tracing::warn!(
                            key = %held.key,
                            line = held.line,
                            "input ended inside a continued value; entry dropped"
                        );
                    }
                    return None;
                }
                Err(err) => return Some(Err(err)),
            };

            if let Some(mut open) = held.take() {
                let piece = raw.trim();
                let (piece, more) = match piece.strip_suffix('\\') {
                    Some(rest) => (rest.trim_end(), true),
                    None => (piece, false),
                };
                if !open.value.is_empty() {
                    open.value.push(' ');
                }
                open.value.push_str(piece);

                if more {
                    held = Some(open);
                    continue;
                }
                let value = open.value.trim_end().to_string();
                return Some(Ok(Directive::Pair {
                    key: open.key,
                    value,
                    line: open.line,
                }));
            }

            if let Some(name) = section_header(&raw) {
                return Some(Ok(Directive::Section(name.to_string())));
            }

            let Some(entry) = parse_line(&raw) else {
                continue;
            };

            if entry.continued {
                held = Some(Held {
                    key: entry.key.to_string(),
                    value: entry.value.to_string(),
                    line: self.line_no,
                });
                continue;
            }

            return Some(Ok(Directive::Pair {
                key: entry.key.to_string(),
                value: entry.value.to_string(),
                line: self.line_no,
            }));
        }
    }
}
