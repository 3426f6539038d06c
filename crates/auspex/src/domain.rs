//! Validated domain ids for objects, signs, houses and aspects.
//!
//! Every id in this module is a newtype that can only be constructed through a
//! range check, so a value of type [`Object`] or [`Aspect`] is always a valid
//! index into its domain. Names resolve case-insensitively through lazily
//! built lookup tables.
//!
//! | Domain | Ids | Names |
//! |--------|-----|-------|
//! | [`Object`] | `0..=33` | `Earth`, `Sun`, ... `12th Cusp` |
//! | [`Sign`] | `1..=12` | `Aries` ... `Pisces` |
//! | [`House`] | `1..=12` | (numeric only) |
//! | [`Aspect`] | `1..=18` | `Conjunct` ... `Quadnovile` |

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Object names indexed by id.
pub const OBJECT_NAMES: &[&str] = &[
    "Earth",
    "Sun",
    "Moon",
    "Mercury",
    "Venus",
    "Mars",
    "Jupiter",
    "Saturn",
    "Uranus",
    "Neptune",
    "Pluto",
    "Chiron",
    "Ceres",
    "Pallas",
    "Juno",
    "Vesta",
    "North Node",
    "South Node",
    "Lilith",
    "Fortune",
    "Vertex",
    "East Point",
    "Ascendant",
    "2nd Cusp",
    "3rd Cusp",
    "Nadir",
    "5th Cusp",
    "6th Cusp",
    "Descendant",
    "8th Cusp",
    "9th Cusp",
    "Midheaven",
    "11th Cusp",
    "12th Cusp",
];

/// Sign names indexed by `id - 1`.
pub const SIGN_NAMES: &[&str] = &[
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Aspect names indexed by `id - 1`.
pub const ASPECT_NAMES: &[&str] = &[
    "Conjunct",
    "Opposite",
    "Square",
    "Trine",
    "Sextile",
    "Inconjunct",
    "Semisextile",
    "Semisquare",
    "Sesquiquadrate",
    "Quintile",
    "Biquintile",
    "Semiquintile",
    "Septile",
    "Biseptile",
    "Triseptile",
    "Novile",
    "Binovile",
    "Quadnovile",
];

/// Highest planetary body id. Bodies `1..=LAST_BODY` own per-object data files.
pub const LAST_BODY: u32 = 21;

/// Number of houses (and signs).
pub const HOUSE_COUNT: u32 = 12;

fn parse_token<T>(
    token: &str,
    by_id: impl FnOnce(u32) -> Option<T>,
    by_name: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let token = token.trim();
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        token.parse().ok().and_then(by_id)
    } else {
        by_name(token)
    }
}

fn name_index(names: &[&'static str], first_id: u32) -> HashMap<String, u32> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_ascii_lowercase(), first_id + i as u32))
        .collect()
}

static OBJECT_INDEX: Lazy<HashMap<String, u32>> = Lazy::new(|| name_index(OBJECT_NAMES, 0));
static SIGN_INDEX: Lazy<HashMap<String, u32>> = Lazy::new(|| name_index(SIGN_NAMES, 1));
static ASPECT_INDEX: Lazy<HashMap<String, u32>> = Lazy::new(|| name_index(ASPECT_NAMES, 1));

/// A chart object: planet, node, point or house cusp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Object(u32);

impl Object {
    /// Returns the object with the given id, if it is in range.
    pub fn new(id: u32) -> Option<Self> {
        ((id as usize) < OBJECT_NAMES.len()).then_some(Self(id))
    }

    /// Resolves an object by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        OBJECT_INDEX
            .get(&name.to_ascii_lowercase())
            .copied()
            .map(Self)
    }

    /// Parses a numeric id or a name.
    pub fn parse(token: &str) -> Option<Self> {
        parse_token(token, Self::new, Self::from_name)
    }

    /// Iterates the planetary bodies that own per-object data files.
    pub fn bodies() -> impl Iterator<Item = Object> {
        (1..=LAST_BODY).map(Self)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        OBJECT_NAMES[self.0 as usize]
    }
}

/// A zodiac sign, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Sign(u32);

impl Sign {
    pub fn new(id: u32) -> Option<Self> {
        (1..=HOUSE_COUNT).contains(&id).then_some(Self(id))
    }

    /// Resolves a sign by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        SIGN_INDEX.get(&name.to_ascii_lowercase()).copied().map(Self)
    }

    /// Parses a numeric id or a name.
    pub fn parse(token: &str) -> Option<Self> {
        parse_token(token, Self::new, Self::from_name)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.0 as usize - 1]
    }
}

/// A house, `1..=12`. Houses have no names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct House(u32);

impl House {
    pub fn new(id: u32) -> Option<Self> {
        (1..=HOUSE_COUNT).contains(&id).then_some(Self(id))
    }

    /// Parses a numeric id.
    pub fn parse(token: &str) -> Option<Self> {
        token.trim().parse().ok().and_then(Self::new)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// An aspect between two objects, `1..=18`.
///
/// Id `0` names no aspect and is rejected, so keys such as `1+2+0` do not
/// decode and query id `0` resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Aspect(u32);

impl Aspect {
    pub fn new(id: u32) -> Option<Self> {
        (1..=ASPECT_NAMES.len() as u32).contains(&id).then_some(Self(id))
    }

    /// Resolves an aspect by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        ASPECT_INDEX
            .get(&name.to_ascii_lowercase())
            .copied()
            .map(Self)
    }

    /// Parses a numeric id or a name.
    pub fn parse(token: &str) -> Option<Self> {
        parse_token(token, Self::new, Self::from_name)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        ASPECT_NAMES[self.0 as usize - 1]
    }
}

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_id!(Object, Sign, House, Aspect);
