//! The per-style text store.

use std::collections::HashMap;

use serde::Serialize;

use super::append::{AppendList, Appended};
use crate::domain::{Aspect, House, Object, Sign};
use crate::error::{Error, Result};

/// A composite-key entry: the stored key text and its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboEntry {
    pub key: String,
    pub value: String,
}

impl ComboEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Growth steps and ceilings for a style's combination lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub combo_increment: usize,
    pub combo_ceiling: Option<usize>,
    pub aspect_combo_increment: usize,
    pub aspect_combo_ceiling: Option<usize>,
}

impl StoreLimits {
    /// Limits for styles loaded from a single file: steps of 64, unbounded.
    pub const SINGLE_FILE: StoreLimits = StoreLimits {
        combo_increment: 64,
        combo_ceiling: None,
        aspect_combo_increment: 64,
        aspect_combo_ceiling: None,
    };

    /// Limits for styles merged from a folder: 2000 combos, 1000 aspect combos.
    pub const FOLDER: StoreLimits = StoreLimits {
        combo_increment: 500,
        combo_ceiling: Some(2000),
        aspect_combo_increment: 250,
        aspect_combo_ceiling: Some(1000),
    };

    fn list<T>(increment: usize, ceiling: Option<usize>) -> AppendList<T> {
        match ceiling {
            Some(ceiling) => AppendList::with_ceiling(increment, ceiling),
            None => AppendList::new(increment),
        }
    }
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self::SINGLE_FILE
    }
}

/// One complete set of interpretation text.
///
/// A style owns every text it holds. Direct tables are keyed by validated
/// domain ids and hold at most one text per slot (a later assignment
/// replaces an earlier one). The two combination lists are append-only.
/// Dropping the style releases everything.
#[derive(Debug, Clone)]
pub struct Style {
    filename: String,
    name: Option<String>,
    author: Option<String>,
    version: Option<String>,
    description: Option<String>,
    loaded: bool,

    planet_meaning: HashMap<Object, String>,
    sign_desc: HashMap<Sign, String>,
    sign_desire: HashMap<Sign, String>,
    house_area: HashMap<House, String>,
    aspect_interact: HashMap<Aspect, String>,
    aspect_therefore: HashMap<Aspect, String>,

    combos: AppendList<ComboEntry>,
    aspect_combos: AppendList<ComboEntry>,

    default_location: Option<String>,
    default_aspect: Option<String>,
}

impl Style {
    /// Allocates an empty, not yet loaded style.
    pub fn new(filename: impl Into<String>, limits: StoreLimits) -> Self {
        Self {
            filename: filename.into(),
            name: None,
            author: None,
            version: None,
            description: None,
            loaded: false,
            planet_meaning: HashMap::new(),
            sign_desc: HashMap::new(),
            sign_desire: HashMap::new(),
            house_area: HashMap::new(),
            aspect_interact: HashMap::new(),
            aspect_therefore: HashMap::new(),
            combos: StoreLimits::list(limits.combo_increment, limits.combo_ceiling),
            aspect_combos: StoreLimits::list(
                limits.aspect_combo_increment,
                limits.aspect_combo_ceiling,
            ),
            default_location: None,
            default_aspect: None,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Source of the style: a file path, or a folder's display name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = Some(author.into());
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Whether loading completed. Lookups through the
    /// [`Interpreter`](crate::Interpreter) ignore styles that are not loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    // =========================================================================
    // Direct tables
    // =========================================================================

    pub fn planet_meaning(&self, object: Object) -> Option<&str> {
        self.planet_meaning.get(&object).map(String::as_str)
    }

    pub fn set_planet_meaning(&mut self, object: Object, text: impl Into<String>) {
        self.planet_meaning.insert(object, text.into());
    }

    pub fn sign_desc(&self, sign: Sign) -> Option<&str> {
        self.sign_desc.get(&sign).map(String::as_str)
    }

    pub fn set_sign_desc(&mut self, sign: Sign, text: impl Into<String>) {
        self.sign_desc.insert(sign, text.into());
    }

    pub fn sign_desire(&self, sign: Sign) -> Option<&str> {
        self.sign_desire.get(&sign).map(String::as_str)
    }

    pub fn set_sign_desire(&mut self, sign: Sign, text: impl Into<String>) {
        self.sign_desire.insert(sign, text.into());
    }

    pub fn house_area(&self, house: House) -> Option<&str> {
        self.house_area.get(&house).map(String::as_str)
    }

    pub fn set_house_area(&mut self, house: House, text: impl Into<String>) {
        self.house_area.insert(house, text.into());
    }

    pub fn aspect_interact(&self, aspect: Aspect) -> Option<&str> {
        self.aspect_interact.get(&aspect).map(String::as_str)
    }

    pub fn set_aspect_interact(&mut self, aspect: Aspect, text: impl Into<String>) {
        self.aspect_interact.insert(aspect, text.into());
    }

    pub fn aspect_therefore(&self, aspect: Aspect) -> Option<&str> {
        self.aspect_therefore.get(&aspect).map(String::as_str)
    }

    pub fn set_aspect_therefore(&mut self, aspect: Aspect, text: impl Into<String>) {
        self.aspect_therefore.insert(aspect, text.into());
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Fallback text for combination lookups that match nothing.
    pub fn default_location(&self) -> Option<&str> {
        self.default_location.as_deref()
    }

    pub fn set_default_location(&mut self, text: impl Into<String>) {
        self.default_location = Some(text.into());
    }

    pub fn default_aspect(&self) -> Option<&str> {
        self.default_aspect.as_deref()
    }

    pub fn set_default_aspect(&mut self, text: impl Into<String>) {
        self.default_aspect = Some(text.into());
    }

    // =========================================================================
    // Combination lists
    // =========================================================================

    /// Appends an `object+sign+house` entry under the given key text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the list cannot grow. Reaching the
    /// ceiling is not an error: the entry is dropped and
    /// [`Appended::Dropped`] is returned.
    pub fn append_combo(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Appended> {
        self.combos
            .push(ComboEntry::new(key, value))
            .map_err(|source| Error::OutOfMemory {
                what: "combinations",
                source,
            })
    }

    /// Appends an `object1+object2+aspect` entry under the given key text.
    ///
    /// # Errors
    ///
    /// Same as [`Style::append_combo`].
    pub fn append_aspect_combo(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Appended> {
        self.aspect_combos
            .push(ComboEntry::new(key, value))
            .map_err(|source| Error::OutOfMemory {
                what: "aspect combinations",
                source,
            })
    }

    pub fn combos(&self) -> &AppendList<ComboEntry> {
        &self.combos
    }

    pub fn aspect_combos(&self) -> &AppendList<ComboEntry> {
        &self.aspect_combos
    }
}
