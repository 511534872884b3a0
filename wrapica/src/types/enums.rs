use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a path refers to a file or a folder. Folders are written with a trailing `/`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    File,
    Folder,
}

impl DataType {
    pub fn of(path: &str) -> Self {
        if path.is_empty() || path.ends_with('/') {
            DataType::Folder
        } else {
            DataType::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::File => "FILE",
            DataType::Folder => "FOLDER",
        }
    }
}

/// The three configuration tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigTable {
    StorageConfigurations,
    ProjectMappings,
    StorageCredentials,
}

impl fmt::Display for ConfigTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigTable::StorageConfigurations => "storage configuration list",
            ConfigTable::ProjectMappings => "project mapping list",
            ConfigTable::StorageCredentials => "storage credential list",
        };
        f.write_str(s)
    }
}

/// What was being looked up when a [crate::errors::ResolveError] happened.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lookup {
    StorageConfiguration,
    ProjectMapping,
    ProjectName,
    StorageCredential,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lookup::StorageConfiguration => "storage configuration",
            Lookup::ProjectMapping => "project mapping",
            Lookup::ProjectName => "project name",
            Lookup::StorageCredential => "storage credential",
        };
        f.write_str(s)
    }
}
