//! crates/sources/src/provider.rs
//! The provider seam between configuration origins and the merge.

use std::sync::Arc;

use rules::{RawMapping, SourceKind};

use crate::error::SourceError;

/// A place configuration comes from.
///
/// `acquire` is called once per reload and must return the source's
/// current mapping. Providers are shared with the reload thread, hence the
/// `Send + Sync` bound.
pub trait SourceProvider: Send + Sync {
    /// Short description used in diagnostics, such as a file path.
    fn label(&self) -> &str;

    /// What kind of origin this is.
    fn kind(&self) -> SourceKind;

    /// Reads the current mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source exists but cannot be read or
    /// parsed.
    fn acquire(&self) -> Result<RawMapping, SourceError>;
}

impl<P: SourceProvider + ?Sized> SourceProvider for Arc<P> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        (**self).acquire()
    }
}

impl<P: SourceProvider + ?Sized> SourceProvider for Box<P> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        (**self).acquire()
    }
}
