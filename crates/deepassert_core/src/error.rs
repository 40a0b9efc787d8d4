//! Error types.

use thiserror::Error;

use crate::FieldPath;

/// Errors raised while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An ignored-field pattern is not a valid regular expression.
    #[error("Invalid ignored field regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An options document could not be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl ConfigError {
    /// Creates an options error.
    pub fn options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }
}

/// Failure reported by a recursive assertion.
#[derive(Debug, Error)]
pub enum RecursiveAssertionError {
    /// One or more fields did not satisfy the predicate.
    #[error(
        "The following fields did not satisfy the predicate:\n  <{}>\nThe recursive assertion was performed with this configuration:\n{configuration}",
        join_paths(.fields)
    )]
    FieldsFailed {
        fields: Vec<FieldPath>,
        /// Description of the configuration in effect.
        configuration: String,
    },
}

impl RecursiveAssertionError {
    /// Returns the paths that failed the predicate.
    pub fn failed_fields(&self) -> &[FieldPath] {
        match self {
            Self::FieldsFailed { fields, .. } => fields,
        }
    }
}

fn join_paths(fields: &[FieldPath]) -> String {
    fields
        .iter()
        .map(FieldPath::render)
        .collect::<Vec<_>>()
        .join(", ")
}
