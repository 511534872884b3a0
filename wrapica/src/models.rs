//! Records of the three bring-your-own-bucket configuration tables.
//!
//! Field names follow the camelCase keys of the ICAv2 API, so a table can be
//! produced by dumping API responses to YAML.

use crate::keys::dir_prefix;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// A bucket and key prefix registered with ICAv2.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfiguration {
    pub id: StorageConfigurationId,
    pub bucket_name: BucketName,
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl StorageConfiguration {
    /// The key prefix in directory form, e.g. `ref/`, or `""` for the whole bucket.
    pub fn prefix(&self) -> String {
        dir_prefix(self.key_prefix.as_deref())
    }
}

/// Which storage configuration a project is mounted on, and where.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStorageMapping {
    pub project_id: ProjectId,
    pub storage_configuration_id: StorageConfigurationId,
    /// Sub-prefix of the project under the storage configuration's key prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub project_name: Option<ProjectName>,
}

/// One bucket and prefix which a storage credential grants access to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct S3Grant {
    pub bucket_name: BucketName,
    /// Absent means the whole bucket.
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl S3Grant {
    pub fn prefix(&self) -> String {
        dir_prefix(self.key_prefix.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StorageCredential {
    pub id: StorageCredentialId,
    pub name: String,
    pub s3_uri_list: Vec<S3Grant>,
}
