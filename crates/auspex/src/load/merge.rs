//! Per-object data files merged into a folder style.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::note_section;
use crate::domain::{House, Object, Sign};
use crate::error::Result;
use crate::format::{Directive, Directives, Section};
use crate::key::{leading_int, scan_numeric_triple};
use crate::store::{Appended, Style};

/// Sections a per-object file may contribute to. `metadata` is recognized
/// but carries nothing to merge.
fn mergeable(section: Section) -> Option<Section> {
    match section {
        Section::Aspects | Section::Templates => None,
        other => Some(other),
    }
}

/// Merges one per-object `.ais` file into `style`.
///
/// Returns `Ok(false)` when the file cannot be opened; a missing optional file
/// is expected and not an error. A read failure part way through keeps the
/// entries merged so far.
///
/// # Errors
///
/// Returns [`Error::OutOfMemory`](crate::Error::OutOfMemory) if a
/// combination list cannot grow.
pub fn merge_object_file(style: &mut Style, path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                error = %err,
                "object file not readable; skipped"
            );
            return Ok(false);
        }
    };

    merge_reader(style, BufReader::new(file), path)?;
    Ok(true)
}

fn merge_reader<R: BufRead>(style: &mut Style, reader: R, path: &Path) -> Result<()> {
    let mut section = None;

    for directive in Directives::new(reader) {
        let directive = match directive {
            Ok(directive) => directive,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "stopped reading object file");
                break;
            }
        };

        match directive {
            Directive::Section(name) => {
                section = Section::from_name(&name).and_then(mergeable);
                note_section(&name, section);
            }
            Directive::Pair { key, value, .. } => {
                if let Some(section) = section {
                    apply(style, section, key, value)?;
                }
            }
        }
    }

    Ok(())
}

fn id_in<T>(value: i64, make: impl FnOnce(u32) -> Option<T>) -> Option<T> {
    u32::try_from(value).ok().and_then(make)
}

fn apply(style: &mut Style, section: Section, key: String, value: String) -> Result<()> {
    match section {
        Section::PlanetMeanings => {
            let object = id_in(leading_int(&key), Object::new).filter(|o| o.id() >= 1);
            if let Some(object) = object {
                style.set_planet_meaning(object, value);
            }
        }
        Section::SignDescriptions => {
            if let Some(sign) = id_in(leading_int(&key), Sign::new) {
                style.set_sign_desc(sign, value);
            }
        }
        Section::HouseAreas => {
            if let Some(house) = id_in(leading_int(&key), House::new) {
                style.set_house_area(house, value);
            }
        }
        Section::Combinations => {
            let [object, sign, house] = scan_numeric_triple(&key);
            if object > 0 && sign > 0 && house > 0 {
                let outcome = style.append_combo(key.as_str(), value)?;
                if outcome == Appended::Dropped {
                    tracing::trace!(key = %key, "combination ceiling reached; entry dropped");
                }
            }
        }
        Section::AspectCombinations => {
            let [first, second, _] = scan_numeric_triple(&key);
            if first > 0 && second > 0 {
                let outcome = style.append_aspect_combo(key.as_str(), value)?;
                if outcome == Appended::Dropped {
                    tracing::trace!(
                        key = %key,
                        "aspect combination ceiling reached; entry dropped"
                    );
                }
            }
        }
        Section::Metadata | Section::Aspects | Section::Templates => {}
    }
    Ok(())
}
