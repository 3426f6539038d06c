//! Composite key codec.
//!
//! Combination entries are addressed by `+`-delimited keys with exactly three
//! fields:
//!
//! - [`ComboKey`]: `object+sign+house`, e.g. `Sun+Aries+1`, `1+1+*`
//! - [`AspectComboKey`]: `object1+object2+aspect`, e.g. `Sun+Venus+Trine`, `1+*+4`
//!
//! Each field is a numeric id, a case-insensitive name, or `*` where the
//! grammar allows a wildcard. Decoding validates every id against its domain;
//! encoding always produces the canonical numeric form, so `Sun+Aries+*` and
//! `1+1+*` encode to the same string. Lookup queries are built by encoding
//! keys whose fields are deliberately left as [`Field::Any`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{Aspect, House, Object, Sign};

/// Error from decoding a composite key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key does not contain three `+`-separated fields.
    #[error("key '{key}' needs three '+'-separated fields")]
    MissingSeparator { key: String },

    /// A field is neither a number, a known name nor an allowed wildcard.
    #[error("unknown {kind} '{token}'")]
    Unresolved { kind: &'static str, token: String },

    /// A numeric field is outside its domain.
    #[error("{kind} id {id} is out of range")]
    OutOfRange { kind: &'static str, id: u32 },
}

/// One key field: a concrete value or the `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Any,
    Is(T),
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Any => f.write_str("*"),
            Field::Is(value) => value.fmt(f),
        }
    }
}

/// An `object+sign+house` key.
///
/// ```rust
/// use auspex::key::{ComboKey, Field};
///
/// let key: ComboKey = "sun+ARIES+*".parse().unwrap();
/// assert_eq!(key.house, Field::Any);
/// assert_eq!(key.to_string(), "1+1+*");
///
/// assert!("*+1+1".parse::<ComboKey>().is_err()); // object is never a wildcard in text
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComboKey {
    pub object: Field<Object>,
    pub sign: Field<Sign>,
    pub house: Field<House>,
}

impl ComboKey {
    pub fn new(object: Field<Object>, sign: Field<Sign>, house: Field<House>) -> Self {
        Self {
            object,
            sign,
            house,
        }
    }

    /// A key with every field set.
    pub fn exact(object: Object, sign: Sign, house: House) -> Self {
        Self::new(Field::Is(object), Field::Is(sign), Field::Is(house))
    }

    /// Decodes a textual key.
    pub fn decode(text: &str) -> Result<Self, KeyError> {
        let [object, sign, house] = split_fields(text)?;
        Ok(Self {
            object: Field::Is(object_token(object)?),
            sign: wildcard(sign, sign_token)?,
            house: wildcard(house, house_token)?,
        })
    }

    /// Encodes the key in canonical numeric form.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}+{}", self.object, self.sign, self.house)
    }
}

impl FromStr for ComboKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// An `object1+object2+aspect` key.
///
/// ```rust
/// use auspex::key::AspectComboKey;
///
/// let key: AspectComboKey = "Sun+*+trine".parse().unwrap();
/// assert_eq!(key.to_string(), "1+*+4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectComboKey {
    pub first: Field<Object>,
    pub second: Field<Object>,
    pub aspect: Field<Aspect>,
}

impl AspectComboKey {
    pub fn new(first: Field<Object>, second: Field<Object>, aspect: Field<Aspect>) -> Self {
        Self {
            first,
            second,
            aspect,
        }
    }

    /// A key with every field set.
    pub fn exact(first: Object, second: Object, aspect: Aspect) -> Self {
        Self::new(Field::Is(first), Field::Is(second), Field::Is(aspect))
    }

    /// Decodes a textual key. Only the second object may be a wildcard.
    pub fn decode(text: &str) -> Result<Self, KeyError> {
        let [first, second, aspect] = split_fields(text)?;
        Ok(Self {
            first: Field::Is(object_token(first)?),
            second: wildcard(second, object_token)?,
            aspect: Field::Is(aspect_token(aspect)?),
        })
    }

    /// Encodes the key in canonical numeric form.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AspectComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}+{}", self.first, self.second, self.aspect)
    }
}

impl FromStr for AspectComboKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

fn split_fields(text: &str) -> Result<[&str; 3], KeyError> {
    let mut parts = text.splitn(3, '+').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(KeyError::MissingSeparator {
            key: text.to_string(),
        }),
    }
}

fn wildcard<T>(
    token: &str,
    resolve: impl FnOnce(&str) -> Result<T, KeyError>,
) -> Result<Field<T>, KeyError> {
    if token == "*" {
        Ok(Field::Any)
    } else {
        resolve(token).map(Field::Is)
    }
}

fn is_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

fn numeric_id(kind: &'static str, token: &str) -> Result<u32, KeyError> {
    token.parse().map_err(|_| KeyError::Unresolved {
        kind,
        token: token.to_string(),
    })
}

fn resolve_token<T>(
    kind: &'static str,
    token: &str,
    by_id: impl FnOnce(u32) -> Option<T>,
    by_name: impl FnOnce(&str) -> Option<T>,
) -> Result<T, KeyError> {
    if is_numeric(token) {
        let id = numeric_id(kind, token)?;
        by_id(id).ok_or(KeyError::OutOfRange { kind, id })
    } else {
        by_name(token).ok_or_else(|| KeyError::Unresolved {
            kind,
            token: token.to_string(),
        })
    }
}

fn object_token(token: &str) -> Result<Object, KeyError> {
    resolve_token("object", token, Object::new, Object::from_name)
}

fn sign_token(token: &str) -> Result<Sign, KeyError> {
    resolve_token("sign", token, Sign::new, Sign::from_name)
}

fn house_token(token: &str) -> Result<House, KeyError> {
    let id = numeric_id("house", token)?;
    House::new(id).ok_or(KeyError::OutOfRange { kind: "house", id })
}

fn aspect_token(token: &str) -> Result<Aspect, KeyError> {
    resolve_token("aspect", token, Aspect::new, Aspect::from_name)
}

/// Scans `int+int+int` the way a `%d+%d+%d` format would.
///
/// Scanning stops at the first field that does not parse; that field and all
/// later ones stay `0`. This is the lenient tuple parser used when merging
/// per-object data files, which never resolves names or wildcards.
///
/// ```rust
/// use auspex::key::scan_numeric_triple;
///
/// assert_eq!(scan_numeric_triple("3+5+10"), [3, 5, 10]);
/// assert_eq!(scan_numeric_triple("3+5+*"), [3, 5, 0]);
/// assert_eq!(scan_numeric_triple("Sun+5+10"), [0, 0, 0]);
/// ```
pub fn scan_numeric_triple(text: &str) -> [i64; 3] {
    let mut fields = [0i64; 3];
    let mut rest = text;

    for (i, slot) in fields.iter_mut().enumerate() {
        if i > 0 {
            match rest.strip_prefix('+') {
                Some(after) => rest = after,
                None => break,
            }
        }
        match scan_int(rest) {
            Some((value, after)) => {
                *slot = value;
                rest = after;
            }
            None => break,
        }
    }

    fields
}

/// Parses the leading integer of `text`, or `0` when there is none.
pub fn leading_int(text: &str) -> i64 {
    scan_int(text).map_or(0, |(value, _)| value)
}

fn scan_int(text: &str) -> Option<(i64, &str)> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let end = sign_len + digits;
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}
