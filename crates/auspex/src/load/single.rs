//! Self-contained style files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::note_section;
use crate::domain::{Aspect, House, Object, Sign};
use crate::error::{Error, Result};
use crate::format::{Directive, Directives, Section};
use crate::key::{AspectComboKey, ComboKey};
use crate::store::{Appended, StoreLimits, Style};

/// Loads a complete style from one file.
///
/// The returned style is marked loaded. Entries with malformed keys, keys in
/// unrecognized sections and unknown metadata keys are skipped.
///
/// # Errors
///
/// - [`Error::FileNotFound`] if the file cannot be opened
/// - [`Error::Io`] if reading fails part way
/// - [`Error::OutOfMemory`] if a combination list cannot grow; the partially
///   built style is dropped
pub fn load_style_file(path: impl AsRef<Path>) -> Result<Style> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut style = Style::new(path.display().to_string(), StoreLimits::SINGLE_FILE);
    read_style(BufReader::new(file), &mut style)?;
    style.mark_loaded();

    tracing::info!(
        path = %path.display(),
        combos = style.combos().len(),
        aspect_combos = style.aspect_combos().len(),
        "loaded interpretation style"
    );
    Ok(style)
}

/// Reads style text from any buffered reader into `style`.
///
/// This is the body of [`load_style_file`]; it does not mark the style
/// loaded.
///
/// ```rust
/// use auspex::domain::{House, Object, Sign};
/// use auspex::load::read_style;
/// use auspex::store::{StoreLimits, Style};
///
/// let text = "[combinations]\nSun+Aries+*: Pioneering spirit\n";
/// let mut style = Style::new("inline", StoreLimits::SINGLE_FILE);
/// read_style(text.as_bytes(), &mut style).unwrap();
///
/// let found = style.resolve_combo(
///     Object::new(1).unwrap(),
///     Sign::new(1).unwrap(),
///     House::new(4).unwrap(),
/// );
/// assert_eq!(found, Some("Pioneering spirit"));
/// ```
pub fn read_style<R: BufRead>(reader: R, style: &mut Style) -> Result<()> {
    let mut section = None;

    for directive in Directives::new(reader) {
        let directive = directive.map_err(|source| Error::Io {
            path: PathBuf::from(style.filename()),
            source,
        })?;

        match directive {
            Directive::Section(name) => {
                section = Section::from_name(&name);
                note_section(&name, section);
            }
            Directive::Pair { key, value, line } => {
                if let Some(section) = section {
                    apply(style, section, &key, value, line)?;
                }
            }
        }
    }

    Ok(())
}

fn apply(style: &mut Style, section: Section, key: &str, value: String, line: usize) -> Result<()> {
    match section {
        Section::Metadata => {
            if key.eq_ignore_ascii_case("name") {
                style.set_name(value);
            } else if key.eq_ignore_ascii_case("author") {
                style.set_author(value);
            } else if key.eq_ignore_ascii_case("version") {
                style.set_version(value);
            } else if key.eq_ignore_ascii_case("description") {
                style.set_description(value);
            }
        }
        Section::PlanetMeanings => match Object::parse(key) {
            Some(object) => style.set_planet_meaning(object, value),
            None => skipped(key, line, "unknown object"),
        },
        Section::SignDescriptions => match Sign::parse(key) {
            Some(sign) => {
                style.set_sign_desire(sign, value.clone());
                style.set_sign_desc(sign, value);
            }
            None => skipped(key, line, "unknown sign"),
        },
        Section::HouseAreas => match House::parse(key) {
            Some(house) => style.set_house_area(house, value),
            None => skipped(key, line, "house must be 1-12"),
        },
        Section::Aspects => match Aspect::parse(key) {
            Some(aspect) => style.set_aspect_interact(aspect, value),
            None => skipped(key, line, "unknown aspect"),
        },
        Section::Combinations => match ComboKey::decode(key) {
            Ok(combo) => {
                if style.append_combo(combo.encode(), value)? == Appended::Dropped {
                    skipped(key, line, "combination list is full");
                }
            }
            Err(err) => skipped(key, line, &err.to_string()),
        },
        Section::AspectCombinations => match AspectComboKey::decode(key) {
            Ok(combo) => {
                if style.append_aspect_combo(combo.encode(), value)? == Appended::Dropped {
                    skipped(key, line, "aspect combination list is full");
                }
            }
            Err(err) => skipped(key, line, &err.to_string()),
        },
        Section::Templates => {
            if key.eq_ignore_ascii_case("default_location") {
                style.set_default_location(value);
            } else if key.eq_ignore_ascii_case("default_aspect") {
                style.set_default_aspect(value);
            }
        }
    }
    Ok(())
}

fn skipped(key: &str, line: usize, reason: &str) {
    tracing::debug!(key, line, reason, "skipping entry");
}
