use super::enums::DataType;
use aliri_braid::braid;

/// ICAv2 project ID, a UUID e.g. `b3c7dd2f-4ea0-4bd7-a3e9-3ec2a7e8d9c4`
#[braid(serde)]
pub struct ProjectId;

/// ICAv2 project name
#[braid(serde)]
pub struct ProjectName;

/// ID of a storage configuration registered with ICAv2
#[braid(serde)]
pub struct StorageConfigurationId;

/// ID of a storage credential registered with ICAv2
#[braid(serde)]
pub struct StorageCredentialId;

/// S3 bucket name
#[braid(serde)]
pub struct BucketName;

/// Does this string look like a project ID?
pub fn is_uuid_format(s: &str) -> bool {
    uuid::Uuid::try_parse(s).is_ok()
}

/// The [DataType] of an ICAv2 data ID, e.g. `fil.8f2e4a` is a file and
/// `fol.c10b77` is a folder. `None` if the string is not a data ID.
pub fn data_id_type(s: &str) -> Option<DataType> {
    let (kind, rest) = s.split_once('.')?;
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    match kind {
        "fil" => Some(DataType::File),
        "fol" => Some(DataType::Folder),
        _ => None,
    }
}
