//! Locations of the BYOB tables, from command-line options or environment variables.

use camino::Utf8PathBuf;
use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use wrapica::errors::ConfigurationError;
use wrapica::{
    ByobConfig, ByobConfigPaths, ByobResolver, PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR,
    STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR, STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR,
};

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML list of storage configurations
    #[clap(long, global = true, env = STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR)]
    pub storage_configurations: Option<Utf8PathBuf>,

    /// YAML list of project to storage configuration mappings
    #[clap(long, global = true, env = PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR)]
    pub project_mappings: Option<Utf8PathBuf>,

    /// YAML list of storage credentials
    #[clap(long, global = true, env = STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR)]
    pub storage_credentials: Option<Utf8PathBuf>,
}

impl ConfigArgs {
    /// All three locations must be given.
    pub fn into_paths(self) -> Result<ByobConfigPaths, ConfigurationError> {
        Ok(ByobConfigPaths {
            storage_configurations: self
                .storage_configurations
                .ok_or(ConfigurationError::NotConfigured(STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR))?,
            project_mappings: self.project_mappings.ok_or(
                ConfigurationError::NotConfigured(PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR),
            )?,
            storage_credentials: self
                .storage_credentials
                .ok_or(ConfigurationError::NotConfigured(STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR))?,
        })
    }

    pub fn load_resolver(self) -> Result<ByobResolver> {
        let paths = self.into_paths()?;
        log::debug!("BYOB configuration: {:?}", paths);
        let config = ByobConfig::load(&paths).wrap_err("Could not load BYOB configuration")?;
        Ok(ByobResolver::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn some(path: &str) -> Option<Utf8PathBuf> {
        Some(Utf8PathBuf::from(path))
    }

    #[rstest]
    #[case(None, some("b.yaml"), some("c.yaml"), STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR)]
    #[case(
        some("a.yaml"),
        None,
        some("c.yaml"),
        PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR
    )]
    #[case(some("a.yaml"), some("b.yaml"), None, STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR)]
    fn test_missing_location_is_not_configured(
        #[case] storage_configurations: Option<Utf8PathBuf>,
        #[case] project_mappings: Option<Utf8PathBuf>,
        #[case] storage_credentials: Option<Utf8PathBuf>,
        #[case] expected: &str,
    ) {
        let args = ConfigArgs {
            storage_configurations,
            project_mappings,
            storage_credentials,
        };
        match args.into_paths().unwrap_err() {
            ConfigurationError::NotConfigured(name) => assert_eq!(name, expected),
            other => panic!("expected NotConfigured, got {:?}", other),
        }
    }

    #[test]
    fn test_into_paths() {
        let args = ConfigArgs {
            storage_configurations: some("a.yaml"),
            project_mappings: some("b.yaml"),
            storage_credentials: some("c.yaml"),
        };
        let paths = args.into_paths().unwrap();
        assert_eq!(paths.project_mappings.as_str(), "b.yaml");
    }
}
