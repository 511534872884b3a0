/// Environment variable naming the YAML list of storage configurations.
pub const STORAGE_CONFIGURATION_LIST_FILE_ENV_VAR: &str = "ICAV2_STORAGE_CONFIGURATION_LIST_FILE";

/// Environment variable naming the YAML list of project to storage configuration mappings.
pub const PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE_ENV_VAR: &str =
    "ICAV2_PROJECT_TO_STORAGE_CONFIGURATION_MAPPING_LIST_FILE";

/// Environment variable naming the YAML list of storage credentials.
pub const STORAGE_CREDENTIAL_LIST_FILE_ENV_VAR: &str = "ICAV2_STORAGE_CREDENTIAL_LIST_FILE";

pub(crate) const S3_URI_SCHEME: &str = "s3://";
pub(crate) const ICAV2_URI_SCHEME: &str = "icav2://";
