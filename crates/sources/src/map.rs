//! crates/sources/src/map.rs
//! Mappings supplied from code.

use std::sync::{Mutex, PoisonError};

use rules::{RawMapping, SourceKind};

use crate::error::SourceError;
use crate::provider::SourceProvider;

/// A mapping held in memory and replaceable at runtime.
///
/// Share it through an `Arc` to call [`replace`](Self::replace) after
/// registration; the new mapping takes effect at the next reload.
///
/// # Examples
///
/// ```
/// use rules::RawMapping;
/// use sources::{MapSource, SourceProvider};
///
/// let source = MapSource::new(RawMapping::pattern_to_level().with_entry("/a", "INFO"));
/// source.replace(RawMapping::pattern_to_level().with_entry("/a", "DEBUG"));
/// assert_eq!(source.acquire().unwrap().entries()[0].1, "DEBUG");
/// ```
#[derive(Debug, Default)]
pub struct MapSource {
    label: String,
    mapping: Mutex<RawMapping>,
}

impl MapSource {
    /// Creates a source labelled `code`.
    #[must_use]
    pub fn new(mapping: RawMapping) -> Self {
        Self::with_label("code", mapping)
    }

    /// Creates a source with a custom diagnostic label.
    #[must_use]
    pub fn with_label(label: impl Into<String>, mapping: RawMapping) -> Self {
        Self {
            label: label.into(),
            mapping: Mutex::new(mapping),
        }
    }

    /// Swaps in a new mapping and returns the previous one.
    pub fn replace(&self, mapping: RawMapping) -> RawMapping {
        let mut guard = self.mapping.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, mapping)
    }
}

impl SourceProvider for MapSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Code
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        Ok(self
            .mapping
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn replace_returns_previous_mapping() {
        let source = MapSource::new(RawMapping::level_to_patterns().with_entry("INFO", "/a"));
        let previous = source.replace(RawMapping::default());
        assert_eq!(previous.len(), 1);
        assert!(source.acquire().unwrap().is_empty());
    }

    #[test]
    fn shared_handle_sees_replacement() {
        let source = Arc::new(MapSource::with_label("overrides", RawMapping::default()));
        let registered: Box<dyn SourceProvider> = Box::new(Arc::clone(&source));
        source.replace(RawMapping::pattern_to_level().with_entry("/x", "OFF"));
        assert_eq!(registered.acquire().unwrap().len(), 1);
        assert_eq!(registered.label(), "overrides");
    }
}
