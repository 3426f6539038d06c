//! Loaded styles and the current selection.

use super::style::Style;
use crate::error::{Error, Result};

/// Maximum number of styles a registry holds.
pub const MAX_STYLES: usize = 32;

/// Ordered list of loaded styles plus the index of the current one.
///
/// Styles are only ever added; they live until the registry is dropped.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: Vec<Style>,
    current: Option<usize>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyStyles`] when the registry already holds
    /// [`MAX_STYLES`] styles. The style is dropped in that case.
    pub fn register(&mut self, style: Style) -> Result<usize> {
        if self.styles.len() >= MAX_STYLES {
            return Err(Error::TooManyStyles { max: MAX_STYLES });
        }
        self.styles.push(style);
        Ok(self.styles.len() - 1)
    }

    /// Adds a style and makes it current.
    pub fn register_current(&mut self, style: Style) -> Result<usize> {
        let index = self.register(style)?;
        self.current = Some(index);
        Ok(index)
    }

    /// Selects the current style. Returns `false` if `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.styles.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current style, if one is selected.
    pub fn current(&self) -> Option<&Style> {
        self.current.and_then(|index| self.styles.get(index))
    }

    /// The current style, only if it finished loading.
    pub fn current_loaded(&self) -> Option<&Style> {
        self.current().filter(|style| style.is_loaded())
    }

    pub fn get(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreLimits;

    fn loaded(name: &str) -> Style {
        let mut style = Style::new(name, StoreLimits::default());
        style.mark_loaded();
        style
    }

    #[test]
    fn test_register_does_not_select() {
        let mut registry = StyleRegistry::new();
        let index = registry.register(loaded("a")).unwrap();
        assert_eq!(index, 0);
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_register_current_selects() {
        let mut registry = StyleRegistry::new();
        registry.register_current(loaded("a")).unwrap();
        registry.register_current(loaded("b")).unwrap();
        assert_eq!(registry.current().map(Style::filename), Some("b"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_set_current_out_of_range() {
        let mut registry = StyleRegistry::new();
        registry.register(loaded("a")).unwrap();
        assert!(registry.set_current(0));
        assert!(!registry.set_current(1));
        assert_eq!(registry.current_index(), Some(0));
    }

    #[test]
    fn test_current_loaded_skips_unfinished() {
        let mut registry = StyleRegistry::new();
        registry
            .register_current(Style::new("partial", StoreLimits::default()))
            .unwrap();
        assert!(registry.current().is_some());
        assert!(registry.current_loaded().is_none());
    }

    #[test]
    fn test_registry_is_bounded() {
        let mut registry = StyleRegistry::new();
        for n in 0..MAX_STYLES {
            registry.register(loaded(&n.to_string())).unwrap();
        }
        let result = registry.register(loaded("overflow"));
        assert!(matches!(result, Err(Error::TooManyStyles { .. })));
        assert_eq!(registry.len(), MAX_STYLES);
    }
}
