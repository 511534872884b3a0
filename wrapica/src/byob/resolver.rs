use super::config::ByobConfig;
use super::project_mapping::ProjectMappingIndex;
use super::storage_configuration::StorageConfigurationIndex;
use super::storage_credential::StorageCredentialIndex;
use crate::errors::{ConfigurationError, ResolveError};
use crate::keys::{join_prefixes, normalize_relative_path, strip_dir_prefix};
use crate::models::{ProjectStorageMapping, StorageConfiguration, StorageCredential};
use crate::types::*;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// A location inside a project: the project ID and a path relative to the
/// project root. The path has no leading `/`, ends with `/` for folders, and
/// is empty for the project root itself.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct ProjectRelativePath {
    pub project_id: ProjectId,
    pub path: String,
}

impl ProjectRelativePath {
    pub fn data_type(&self) -> DataType {
        DataType::of(&self.path)
    }

    /// Express this location as an `icav2://` URI.
    pub fn to_icav2_uri(&self) -> Result<Icav2Uri, ResolveError> {
        Icav2Uri::from_parts(self.project_id.as_str(), &self.path).map_err(ResolveError::from)
    }
}

/// Where a mapped project's data starts in S3.
#[derive(Debug)]
struct ProjectLocation {
    project_id: ProjectId,
    /// Storage configuration key prefix joined with the mapping's prefix, in directory form.
    prefix: String,
}

/// Translates between project paths and S3 URIs using the BYOB tables.
///
/// A [ByobResolver] is immutable after construction. Share it by reference
/// (or in an `Arc`) between threads; to pick up new configuration, build a
/// new one and replace the old one as a whole.
#[derive(Debug)]
pub struct ByobResolver {
    storage_configurations: StorageConfigurationIndex,
    project_mappings: ProjectMappingIndex,
    storage_credentials: StorageCredentialIndex,
    locations: HashMap<BucketName, Vec<ProjectLocation>>,
}

impl ByobResolver {
    pub fn new(config: ByobConfig) -> Self {
        let ByobConfig {
            storage_configurations,
            project_mappings,
            storage_credentials,
        } = config;
        let storage_configurations = StorageConfigurationIndex::new(storage_configurations);
        let project_mappings = ProjectMappingIndex::new(project_mappings);
        let storage_credentials = StorageCredentialIndex::new(storage_credentials);
        let locations = project_locations(&storage_configurations, &project_mappings);
        Self {
            storage_configurations,
            project_mappings,
            storage_credentials,
            locations,
        }
    }

    /// Load the tables named by the environment variables and index them.
    ///
    /// Returns [ConfigurationError::NotConfigured] if any of the variables is unset.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        ByobConfig::from_env().map(Self::new)
    }

    pub fn storage_configurations(&self) -> &StorageConfigurationIndex {
        &self.storage_configurations
    }

    pub fn project_mappings(&self) -> &ProjectMappingIndex {
        &self.project_mappings
    }

    pub fn storage_credentials(&self) -> &StorageCredentialIndex {
        &self.storage_credentials
    }

    pub fn lookup_storage_configuration(
        &self,
        id: &StorageConfigurationIdRef,
    ) -> Result<&StorageConfiguration, ResolveError> {
        self.storage_configurations.lookup(id)
    }

    pub fn lookup_project_mapping(
        &self,
        project_id: &ProjectIdRef,
    ) -> Result<&ProjectStorageMapping, ResolveError> {
        self.project_mappings.lookup(project_id)
    }

    pub fn storage_configurations_for_bucket<'a>(
        &'a self,
        bucket: &'a BucketNameRef,
    ) -> impl Iterator<Item = &'a StorageConfiguration> + 'a {
        self.storage_configurations.on_bucket(bucket)
    }

    pub fn project_id_from_name(&self, name: &ProjectNameRef) -> Result<&ProjectIdRef, ResolveError> {
        self.project_mappings.project_id_from_name(name)
    }

    pub fn lookup_credential(
        &self,
        id: &StorageCredentialIdRef,
    ) -> Result<&StorageCredential, ResolveError> {
        self.storage_credentials.lookup(id)
    }

    /// See [StorageCredentialIndex::find_for_uri].
    pub fn find_credential_for_uri(
        &self,
        bucket: &BucketNameRef,
        key: &str,
    ) -> Result<&StorageCredential, ResolveError> {
        self.storage_credentials.find_for_uri(bucket, key)
    }

    /// See [ProjectMappingIndex::coerce_project_id].
    pub fn coerce_project_id(&self, id_or_name: &str) -> Result<ProjectId, ResolveError> {
        self.project_mappings.coerce_project_id(id_or_name)
    }

    /// The S3 URI of a project's root folder. Always ends with `/`.
    pub fn project_s3_prefix(&self, project_id: &ProjectIdRef) -> Result<S3Uri, ResolveError> {
        self.to_s3_uri(project_id, "")
    }

    /// Get the S3 URI of a path inside a project.
    ///
    /// Repeated separators and `.` components are dropped, a trailing `/` is kept.
    pub fn to_s3_uri(
        &self,
        project_id: &ProjectIdRef,
        relative_path: &str,
    ) -> Result<S3Uri, ResolveError> {
        let path = normalize_relative_path(relative_path)?;
        let mapping = self.project_mappings.lookup(project_id)?;
        let storage_configuration = self
            .storage_configurations
            .lookup(&mapping.storage_configuration_id)?;
        let prefix = project_prefix(storage_configuration, mapping);
        let uri = S3Uri::from_parts(
            &storage_configuration.bucket_name,
            &format!("{}{}", prefix, path),
        )?;
        Ok(uri)
    }

    /// Find which project an S3 URI belongs to, and the path inside that project.
    ///
    /// When projects are nested inside each other's prefixes, the project with
    /// the longest prefix wins. Two projects with the same prefix is a
    /// [ResolveError::AmbiguousMatch]. A key with a `..` component is a
    /// [ResolveError::InvalidPath].
    pub fn to_project_relative_path(
        &self,
        uri: &S3UriRef,
    ) -> Result<ProjectRelativePath, ResolveError> {
        let key = normalize_relative_path(uri.key())?;
        let not_found = || ResolveError::not_found(Lookup::ProjectMapping, uri);
        let locations = self.locations.get(uri.bucket()).ok_or_else(not_found)?;
        let candidates = locations
            .iter()
            .filter_map(|l| strip_dir_prefix(&key, &l.prefix).map(|path| (l, path)))
            .max_set_by_key(|(l, _)| l.prefix.len());
        match candidates.as_slice() {
            [] => Err(not_found()),
            [(location, path)] => Ok(ProjectRelativePath {
                project_id: location.project_id.clone(),
                path: path.to_string(),
            }),
            _ => Err(ResolveError::AmbiguousMatch {
                kind: Lookup::ProjectMapping,
                key: uri.to_string(),
                candidates: candidates
                    .iter()
                    .map(|(l, _)| l.project_id.to_string())
                    .sorted()
                    .collect(),
            }),
        }
    }

    /// Find the storage credential which grants access to an S3 URI.
    pub fn resolve_credential(&self, uri: &S3UriRef) -> Result<&StorageCredential, ResolveError> {
        self.storage_credentials.find_for_uri(uri.bucket(), uri.key())
    }

    /// See [StorageCredentialIndex::relative_path].
    pub fn relative_path_from_credential(
        &self,
        credential_id: &StorageCredentialIdRef,
        uri: &S3UriRef,
    ) -> Result<String, ResolveError> {
        self.storage_credentials.relative_path(credential_id, uri)
    }

    /// Convert an `s3://` URI into an `icav2://project-id/path` URI.
    pub fn s3_uri_to_icav2_uri(&self, uri: &S3UriRef) -> Result<Icav2Uri, ResolveError> {
        self.to_project_relative_path(uri)?.to_icav2_uri()
    }

    /// Convert an `icav2://` URI into an `s3://` URI. The project part of the
    /// URI may be a project ID or a project name.
    pub fn icav2_uri_to_s3_uri(&self, uri: &Icav2UriRef) -> Result<S3Uri, ResolveError> {
        let project_id = self.coerce_project_id(uri.project())?;
        self.to_s3_uri(&project_id, uri.path())
    }
}

fn project_prefix(
    storage_configuration: &StorageConfiguration,
    mapping: &ProjectStorageMapping,
) -> String {
    join_prefixes([
        storage_configuration.key_prefix.as_deref(),
        mapping.prefix.as_deref(),
    ])
}

/// Resolve every mapped project to a bucket and prefix. Mappings to unknown
/// storage configurations are left out: they cannot match any S3 URI.
fn project_locations(
    storage_configurations: &StorageConfigurationIndex,
    project_mappings: &ProjectMappingIndex,
) -> HashMap<BucketName, Vec<ProjectLocation>> {
    let mut locations: HashMap<BucketName, Vec<ProjectLocation>> = HashMap::new();
    for mapping in project_mappings.iter() {
        match storage_configurations.lookup(&mapping.storage_configuration_id) {
            Ok(storage_configuration) => {
                locations
                    .entry(storage_configuration.bucket_name.clone())
                    .or_default()
                    .push(ProjectLocation {
                        project_id: mapping.project_id.clone(),
                        prefix: project_prefix(storage_configuration, mapping),
                    });
            }
            Err(e) => log::debug!("Project \"{}\" is skipped: {}", mapping.project_id, e),
        }
    }
    locations
}
