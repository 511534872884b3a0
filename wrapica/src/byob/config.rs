//! Loading of the three BYOB tables.
//!
//! Each table is a YAML list, in a file named by an environment variable:
//!
//! - [STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR]
//! - [PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR]
//! - [STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR]
//!
//! Loading is all or nothing.

use crate::constants::*;
use crate::errors::ConfigurationError;
use crate::models::{ProjectStorageMapping, StorageConfiguration, StorageCredential};
use crate::types::ConfigTable;
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// Locations of the three table files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByobConfigPaths {
    pub storage_configurations: Utf8PathBuf,
    pub project_mappings: Utf8PathBuf,
    pub storage_credentials: Utf8PathBuf,
}

impl ByobConfigPaths {
    /// Get the table locations from environment variables.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Ok(Self {
            storage_configurations: env_path(STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR)?,
            project_mappings: env_path(PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR)?,
            storage_credentials: env_path(STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR)?,
        })
    }
}

fn env_path(var: &'static str) -> Result<Utf8PathBuf, ConfigurationError> {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => Ok(Utf8PathBuf::from(v)),
        _ => Err(ConfigurationError::NotConfigured(var)),
    }
}

/// The three BYOB tables, as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByobConfig {
    pub storage_configurations: Vec<StorageConfiguration>,
    pub project_mappings: Vec<ProjectStorageMapping>,
    pub storage_credentials: Vec<StorageCredential>,
}

impl ByobConfig {
    /// Read and validate all three tables from files.
    pub fn load(paths: &ByobConfigPaths) -> Result<Self, ConfigurationError> {
        let config = Self {
            storage_configurations: read_table(
                &paths.storage_configurations,
                ConfigTable::StorageConfigurations,
            )?,
            project_mappings: read_table(&paths.project_mappings, ConfigTable::ProjectMappings)?,
            storage_credentials: read_table(
                &paths.storage_credentials,
                ConfigTable::StorageCredentials,
            )?,
        };
        config.validate()
    }

    /// Read and validate the files named by the environment variables.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::load(&ByobConfigPaths::from_env()?)
    }

    /// Parse and validate all three tables from YAML documents already in memory.
    pub fn from_yaml_strs(
        storage_configurations: &str,
        project_mappings: &str,
        storage_credentials: &str,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            storage_configurations: parse_table(
                storage_configurations,
                "<string>",
                ConfigTable::StorageConfigurations,
            )?,
            project_mappings: parse_table(
                project_mappings,
                "<string>",
                ConfigTable::ProjectMappings,
            )?,
            storage_credentials: parse_table(
                storage_credentials,
                "<string>",
                ConfigTable::StorageCredentials,
            )?,
        };
        config.validate()
    }

    /// Check for values which deserialize fine but cannot be used.
    ///
    /// Dangling `storageConfigurationId` references are not checked here,
    /// they fail when the project is looked up.
    fn validate(self) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for c in &self.storage_configurations {
            require(!c.id.as_str().is_empty(), ConfigTable::StorageConfigurations, || {
                "empty id".to_string()
            })?;
            require(
                !c.bucket_name.as_str().is_empty(),
                ConfigTable::StorageConfigurations,
                || format!("storage configuration \"{}\" has an empty bucketName", c.id),
            )?;
            if !seen.insert(&c.id) {
                return Err(ConfigurationError::DuplicateId(c.id.clone()));
            }
        }
        for m in &self.project_mappings {
            require(!m.project_id.as_str().is_empty(), ConfigTable::ProjectMappings, || {
                "empty projectId".to_string()
            })?;
            require(
                !m.storage_configuration_id.as_str().is_empty(),
                ConfigTable::ProjectMappings,
                || format!("project \"{}\" has an empty storageConfigurationId", m.project_id),
            )?;
        }
        for c in &self.storage_credentials {
            require(!c.id.as_str().is_empty(), ConfigTable::StorageCredentials, || {
                "empty id".to_string()
            })?;
            for grant in &c.s3_uri_list {
                require(
                    !grant.bucket_name.as_str().is_empty(),
                    ConfigTable::StorageCredentials,
                    || format!("storage credential \"{}\" has an empty bucketName", c.id),
                )?;
            }
        }
        log::debug!(
            "Loaded {} storage configurations, {} project mappings, {} storage credentials",
            self.storage_configurations.len(),
            self.project_mappings.len(),
            self.storage_credentials.len()
        );
        Ok(self)
    }
}

fn require(
    ok: bool,
    table: ConfigTable,
    reason: impl FnOnce() -> String,
) -> Result<(), ConfigurationError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigurationError::Invalid {
            table,
            reason: reason(),
        })
    }
}

fn read_table<T: DeserializeOwned>(
    path: &Utf8Path,
    table: ConfigTable,
) -> Result<Vec<T>, ConfigurationError> {
    log::debug!("Reading {} from {}", table, path);
    let content = fs_err::read_to_string(path)?;
    parse_table(&content, path.as_str(), table)
}

fn parse_table<T: DeserializeOwned>(
    content: &str,
    origin: &str,
    table: ConfigTable,
) -> Result<Vec<T>, ConfigurationError> {
    serde_yaml::from_str(content).map_err(|source| ConfigurationError::Parse {
        table,
        origin: origin.to_string(),
        source,
    })
}
