//! Language factory: lazily built, cached language resources and stemmers.
//!
//! Both caches are keyed by string and only ever grow. The first instance
//! built for a key is the one every later caller receives.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{FactoryError, FactoryResult};
use crate::language::{Language, LanguageResource};
use crate::stemmer::{Stemmer, StemmerConstructor, StemmerRegistry, resolve_stemmer_class};

/// Factory that creates language resources and stemmers on first request
/// and hands out shared handles afterwards.
///
/// Construct one per application and share it (`&LanguageFactory` or
/// `Arc<LanguageFactory>`); each factory has its own caches.
///
/// Resource and stemmer constructors run while the cache shard for their key
/// is locked, so they must not call back into the same factory.
pub struct LanguageFactory<L: LanguageResource = Language> {
    default_language: RwLock<String>,
    language_directory: PathBuf,
    debug: bool,
    languages: DashMap<String, Arc<L>>,
    stemmers: DashMap<String, Arc<dyn Stemmer>>,
    registry: StemmerRegistry,
}

impl LanguageFactory {
    /// Factory with default settings and no stemmers registered.
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    /// Factory configured from `settings`, with no stemmers registered.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_registry(settings, StemmerRegistry::new())
    }
}

impl Default for LanguageFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LanguageResource> LanguageFactory<L> {
    /// Factory configured from `settings` using a pre-populated stemmer registry.
    pub fn with_registry(settings: &Settings, registry: StemmerRegistry) -> Self {
        Self {
            default_language: RwLock::new(settings.default_language.clone()),
            language_directory: settings.language_directory.clone(),
            debug: settings.debug,
            languages: DashMap::new(),
            stemmers: DashMap::new(),
            registry,
        }
    }

    /// The language used when callers do not name one.
    pub fn default_language(&self) -> String {
        self.default_language.read().clone()
    }

    /// Replace the default language. No validation is done.
    ///
    /// Returns `self` so calls can be chained.
    pub fn set_default_language(&self, language: impl Into<String>) -> &Self {
        *self.default_language.write() = language.into();
        self
    }

    /// Base directory of the language folders, as configured.
    pub fn language_directory(&self) -> &Path {
        &self.language_directory
    }

    /// Get the language resource for `language`, building it on first request.
    ///
    /// `None` means the current default language. The path argument is reserved
    /// and ignored. The cache key is the language alone: once built, a resource
    /// is returned unchanged regardless of the `debug_mode` of later calls.
    pub fn get_language(
        &self,
        language: Option<&str>,
        _path: Option<&Path>,
        debug_mode: bool,
    ) -> Arc<L> {
        let language = match language {
            Some(language) => language.to_string(),
            None => self.default_language(),
        };

        if let Some(cached) = self.languages.get(&language) {
            return cached.value().clone();
        }

        match self.languages.entry(language) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                tracing::debug!(
                    target: "factory",
                    "creating language {} (debug={})",
                    entry.key(),
                    debug_mode
                );
                let resource = Arc::new(L::create(entry.key(), debug_mode));
                entry.insert(resource.clone());
                resource
            }
        }
    }

    /// Default language resource, built with the configured debug flag.
    pub fn language(&self) -> Arc<L> {
        self.get_language(None, None, self.debug)
    }

    /// Get the stemmer for `adapter`, building it on first request.
    ///
    /// The adapter name is resolved with [`resolve_stemmer_class`], so
    /// `" porter "` and `"porter"` share one instance. Fails with
    /// [`FactoryError::UnknownStemmer`] when nothing is registered under the
    /// resolved name; failures are not cached.
    pub fn get_stemmer(&self, adapter: &str) -> FactoryResult<Arc<dyn Stemmer>> {
        let class = resolve_stemmer_class(adapter);

        if let Some(cached) = self.stemmers.get(&class) {
            return Ok(cached.value().clone());
        }

        match self.stemmers.entry(class) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let Some(stemmer) = self.registry.create(entry.key()) else {
                    tracing::warn!(target: "factory", "no stemmer registered as {}", entry.key());
                    return Err(FactoryError::UnknownStemmer {
                        class: entry.into_key(),
                    });
                };
                tracing::debug!(target: "factory", "creating stemmer {}", entry.key());
                let stemmer: Arc<dyn Stemmer> = Arc::from(stemmer);
                entry.insert(stemmer.clone());
                Ok(stemmer)
            }
        }
    }

    /// Register a stemmer constructor with this factory's registry.
    ///
    /// Returns `true` if an earlier registration was replaced. Instances
    /// already handed out stay cached.
    pub fn register_stemmer(&self, adapter: &str, constructor: StemmerConstructor) -> bool {
        self.registry.register(adapter, constructor)
    }

    /// Registry consulted on stemmer cache misses.
    pub fn stemmer_registry(&self) -> &StemmerRegistry {
        &self.registry
    }

    /// Languages built so far, sorted.
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.languages.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Stemmer class names built so far, sorted.
    pub fn loaded_stemmers(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.stemmers.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl<L: LanguageResource> std::fmt::Debug for LanguageFactory<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageFactory")
            .field("default_language", &self.default_language())
            .field("language_directory", &self.language_directory)
            .field("languages", &self.loaded_languages())
            .field("stemmers", &self.loaded_stemmers())
            .finish()
    }
}
