//! Errors for this crate.

use crate::types::{ConfigTable, Lookup, StorageConfigurationId};

#[derive(thiserror::Error, Debug)]
pub enum InvalidS3Uri {
    #[error("Given URI does not start with \"s3://\": {0}")]
    Scheme(String),

    #[error("Given URI has no bucket name: {0}")]
    MissingBucket(String),
}

aliri_braid::from_infallible!(InvalidS3Uri);

#[derive(thiserror::Error, Debug)]
pub enum InvalidIcav2Uri {
    #[error("Given URI does not start with \"icav2://\": {0}")]
    Scheme(String),

    #[error("Given URI has no project id or name: {0}")]
    MissingProject(String),
}

aliri_braid::from_infallible!(InvalidIcav2Uri);

/// Errors which happen while loading the BYOB configuration tables.
///
/// None of these are recoverable: without all three tables there is
/// nothing to resolve against.
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    /// The environment variable naming a table file is not set.
    #[error("{0} is not set, bring-your-own-bucket resolution is not configured")]
    NotConfigured(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is not YAML, or does not have the shape of the table.
    #[error("could not parse {table} from {origin}: {source}")]
    Parse {
        table: ConfigTable,
        origin: String,
        source: serde_yaml::Error,
    },

    /// The file parsed but an entry has an unusable value.
    #[error("invalid entry in {table}: {reason}")]
    Invalid { table: ConfigTable, reason: String },

    #[error("storage configuration id \"{0}\" appears more than once")]
    DuplicateId(StorageConfigurationId),
}

/// Errors from resolving a project, path, or URI against the loaded tables.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// Nothing in the tables matches. For projects and buckets this usually
    /// just means BYOB is not configured for them.
    #[error("{kind} not found for \"{key}\"")]
    NotFound { kind: Lookup, key: String },

    /// Two or more entries match with equally long prefixes.
    #[error("\"{key}\" matches more than one {kind}: {}", .candidates.join(", "))]
    AmbiguousMatch {
        kind: Lookup,
        key: String,
        candidates: Vec<String>,
    },

    #[error(transparent)]
    InvalidS3Uri(#[from] InvalidS3Uri),

    #[error(transparent)]
    InvalidIcav2Uri(#[from] InvalidIcav2Uri),

    #[error("\"{0}\" is not a valid project-relative path")]
    InvalidPath(String),
}

impl ResolveError {
    pub(crate) fn not_found(kind: Lookup, key: impl ToString) -> Self {
        ResolveError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Whether this error means "not configured for BYOB" rather than
    /// something being wrong.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}
