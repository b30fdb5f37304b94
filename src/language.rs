//! Language resource capability consumed by the factory.
//!
//! Loading and looking up translation strings belongs to the resource
//! implementation; the factory only builds and caches instances.

/// A per-locale resource the factory can build on demand.
///
/// Construction must not fail. Implementations that do I/O do it here,
/// once per identifier.
pub trait LanguageResource: Send + Sync + 'static {
    /// Build the resource for `identifier` (e.g. `en-GB`).
    fn create(identifier: &str, debug: bool) -> Self;
}

/// Default language resource: records the identifier and debug mode it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    identifier: String,
    debug: bool,
}

impl Language {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Debug mode at construction time. Later requests never change it.
    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

impl LanguageResource for Language {
    fn create(identifier: &str, debug: bool) -> Self {
        Self {
            identifier: identifier.to_string(),
            debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_records_arguments() {
        let lang = Language::create("fr-FR", true);
        assert_eq!(lang.identifier(), "fr-FR");
        assert!(lang.is_debug());
    }
}
