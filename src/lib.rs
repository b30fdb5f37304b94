//! Lazily instantiated, cached language resources and stemmers.
//!
//! A [`LanguageFactory`] builds a language resource or stemmer the first time
//! its identifier is requested and returns the same shared instance from then
//! on, including under concurrent first requests.
//!
//! ```rust,ignore
//! use language_factory::{LanguageFactory, Settings};
//!
//! let factory = LanguageFactory::from_settings(&Settings::load()?);
//! factory.register_stemmer("porter", || Box::new(MyPorter));
//!
//! let english = factory.get_language(None, None, false);
//! let porter = factory.get_stemmer(" porter ")?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod language;
pub mod logging;
pub mod stemmer;

pub use config::{LoggingConfig, Settings};
pub use error::{FactoryError, FactoryResult};
pub use factory::LanguageFactory;
pub use language::{Language, LanguageResource};
pub use stemmer::{
    STEMMER_NAMESPACE, Stemmer, StemmerConstructor, StemmerRegistry, resolve_stemmer_class,
};
