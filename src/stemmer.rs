//! Stemmer capability and the name-to-constructor registry.
//!
//! Adapter names resolve to class names by a fixed convention:
//! trim, upper-case the first character, prefix [`STEMMER_NAMESPACE`].
//! `" porter "` and `"porter"` both resolve to `language::stemmer::Porter`.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Namespace prefix of every resolved stemmer class name.
pub const STEMMER_NAMESPACE: &str = "language::stemmer";

/// Reduces words to their stem.
pub trait Stemmer: Send + Sync {
    /// Stem `token` according to the rules for `lang`.
    fn stem(&self, token: &str, lang: &str) -> String;
}

/// Zero-argument stemmer constructor.
pub type StemmerConstructor = fn() -> Box<dyn Stemmer>;

/// Resolve an adapter name to its fully qualified class name.
///
/// Only an ASCII first character is upper-cased; the rest of the name and
/// any non-ASCII first character are kept as given, so `"PORTER"` and
/// `"porter"` stay distinct and `"élan"` keeps its accent.
pub fn resolve_stemmer_class(adapter: &str) -> String {
    let trimmed = adapter.trim();
    let mut chars = trimmed.chars();
    let name: String = match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase()).chain(chars).collect(),
        None => String::new(),
    };
    format!("{STEMMER_NAMESPACE}::{name}")
}

/// Registry of stemmer constructors keyed by resolved class name.
///
/// Populated at startup or at any later point; lookups always see the
/// current registrations.
#[derive(Default)]
pub struct StemmerRegistry {
    constructors: RwLock<HashMap<String, StemmerConstructor>>,
}

impl StemmerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `constructor` under the class name resolved from `adapter`.
    ///
    /// Returns `true` if an earlier registration was replaced.
    pub fn register(&self, adapter: &str, constructor: StemmerConstructor) -> bool {
        let class = resolve_stemmer_class(adapter);
        tracing::debug!(target: "factory", "registered stemmer {class}");
        self.constructors.write().insert(class, constructor).is_some()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(self, adapter: &str, constructor: StemmerConstructor) -> Self {
        self.register(adapter, constructor);
        self
    }

    /// Whether a constructor exists for an already resolved class name.
    pub fn contains(&self, class: &str) -> bool {
        self.constructors.read().contains_key(class)
    }

    /// Instantiate the stemmer registered under `class`, if any.
    pub fn create(&self, class: &str) -> Option<Box<dyn Stemmer>> {
        let constructor = *self.constructors.read().get(class)?;
        Some(constructor())
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered class names.
    pub fn len(&self) -> usize {
        self.constructors.read().len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.constructors.read().is_empty()
    }
}

impl std::fmt::Debug for StemmerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemmerRegistry")
            .field("classes", &self.class_names())
            .finish()
    }
}
