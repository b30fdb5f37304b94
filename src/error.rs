//! Error types for the language factory.

use thiserror::Error;

/// Errors produced by [`LanguageFactory`](crate::LanguageFactory) lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// No stemmer is registered under the resolved class name.
    #[error("Invalid stemmer type {class}")]
    UnknownStemmer { class: String },
}

pub type FactoryResult<T> = Result<T, FactoryError>;
