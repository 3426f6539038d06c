//! Specificity-ordered lookups over a [`Style`].
//!
//! Each query builds a fixed list of candidate keys, most specific first,
//! and returns the first entry whose stored key equals a candidate exactly.
//! Wildcards are the literal `*` on both sides; there is no pattern matching.
//!
//! | Query | Candidates, in order | Fallback |
//! |-------|----------------------|----------|
//! | combo `(o, s, h)` | `o+s+h`, `o+s+*`, `o+*+h`, `*+s+*` | `default_location` |
//! | aspect combo `(a, b, x)` | `a+b+x`, `a+b+*`, `*+*+x` | none |
//! | aspect `(x, orb)` | direct `aspect_interact[x]` | none |
//!
//! A more specific candidate always wins regardless of insertion order.
//! Among duplicate keys the earliest inserted entry wins.

use crate::domain::{Aspect, House, Object, Sign};
use crate::key::{AspectComboKey, ComboKey, Field};
use crate::store::{ComboEntry, Style};

/// Candidate keys for a combo query, most specific first.
pub fn combo_candidates(object: Object, sign: Sign, house: House) -> [ComboKey; 4] {
    let (o, s, h) = (Field::Is(object), Field::Is(sign), Field::Is(house));
    [
        ComboKey::new(o, s, h),
        ComboKey::new(o, s, Field::Any),
        ComboKey::new(o, Field::Any, h),
        ComboKey::new(Field::Any, s, Field::Any),
    ]
}

/// Candidate keys for an aspect-combo query, most specific first.
pub fn aspect_combo_candidates(
    first: Object,
    second: Object,
    aspect: Aspect,
) -> [AspectComboKey; 3] {
    let (a, b, x) = (Field::Is(first), Field::Is(second), Field::Is(aspect));
    [
        AspectComboKey::new(a, b, x),
        AspectComboKey::new(a, b, Field::Any),
        AspectComboKey::new(Field::Any, Field::Any, x),
    ]
}

fn find<'a>(entries: impl IntoIterator<Item = &'a ComboEntry>, key: &str) -> Option<&'a str> {
    entries
        .into_iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.value.as_str())
}

impl Style {
    /// First combo entry stored under exactly `key`.
    pub fn find_combo(&self, key: &str) -> Option<&str> {
        find(self.combos(), key)
    }

    /// First aspect-combo entry stored under exactly `key`.
    pub fn find_aspect_combo(&self, key: &str) -> Option<&str> {
        find(self.aspect_combos(), key)
    }

    /// Resolves "what does `object` in `sign` in `house` mean?".
    ///
    /// Falls back to the style's `default_location` when no candidate
    /// matches.
    ///
    /// ```rust
    /// use auspex::domain::{House, Object, Sign};
    /// use auspex::store::{StoreLimits, Style};
    ///
    /// let mut style = Style::new("inline", StoreLimits::default());
    /// let _ = style.append_combo("0+1+*", "B").unwrap();
    /// let _ = style.append_combo("0+1+1", "A").unwrap();
    ///
    /// let (earth, aries) = (Object::new(0).unwrap(), Sign::new(1).unwrap());
    /// assert_eq!(style.resolve_combo(earth, aries, House::new(1).unwrap()), Some("A"));
    /// assert_eq!(style.resolve_combo(earth, aries, House::new(2).unwrap()), Some("B"));
    /// ```
    pub fn resolve_combo(&self, object: Object, sign: Sign, house: House) -> Option<&str> {
        combo_candidates(object, sign, house)
            .iter()
            .find_map(|key| self.find_combo(&key.encode()))
            .or_else(|| self.default_location())
    }

    /// Resolves "what does `first` in `aspect` to `second` mean?".
    ///
    /// There is no style-level fallback for this query.
    pub fn resolve_aspect_combo(
        &self,
        first: Object,
        second: Object,
        aspect: Aspect,
    ) -> Option<&str> {
        aspect_combo_candidates(first, second, aspect)
            .iter()
            .find_map(|key| self.find_aspect_combo(&key.encode()))
    }

    /// Resolves the general meaning of an aspect. The orb does not affect
    /// the result.
    pub fn resolve_aspect(&self, aspect: Aspect, _orb: i32) -> Option<&str> {
        self.aspect_interact(aspect)
    }
}
