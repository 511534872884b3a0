//! Bring-your-own-bucket (BYOB) resolution.
//!
//! A [ByobConfig] holds the three tables, loaded once from YAML. A
//! [ByobResolver] indexes them and answers every question: where does a
//! project's data live in S3, which project does an S3 URI belong to, and
//! which storage credential grants access to it.

mod config;
mod project_mapping;
mod resolver;
mod storage_configuration;
mod storage_credential;

pub use config::{ByobConfig, ByobConfigPaths};
pub use project_mapping::ProjectMappingIndex;
pub use resolver::{ByobResolver, ProjectRelativePath};
pub use storage_configuration::StorageConfigurationIndex;
pub use storage_credential::StorageCredentialIndex;
