use crate::errors::ResolveError;
use crate::models::StorageConfiguration;
use crate::types::{BucketNameRef, Lookup, StorageConfigurationId, StorageConfigurationIdRef};
use std::collections::HashMap;

/// Storage configurations by ID.
#[derive(Debug, Default)]
pub struct StorageConfigurationIndex {
    by_id: HashMap<StorageConfigurationId, StorageConfiguration>,
}

impl StorageConfigurationIndex {
    /// IDs are expected to be unique, see [crate::ByobConfig::load].
    pub fn new(storage_configurations: Vec<StorageConfiguration>) -> Self {
        let by_id = storage_configurations
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self { by_id }
    }

    pub fn lookup(
        &self,
        id: &StorageConfigurationIdRef,
    ) -> Result<&StorageConfiguration, ResolveError> {
        self.by_id
            .get(id)
            .ok_or_else(|| ResolveError::not_found(Lookup::StorageConfiguration, id))
    }

    /// Storage configurations on the given bucket, in no particular order.
    pub fn on_bucket<'a>(
        &'a self,
        bucket: &'a BucketNameRef,
    ) -> impl Iterator<Item = &'a StorageConfiguration> + 'a {
        self.by_id
            .values()
            .filter(move |c| c.bucket_name.as_str() == bucket.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BucketName;

    fn index() -> StorageConfigurationIndex {
        let yaml = r#"
- id: S1
  bucketName: refbkt
  keyPrefix: ref/
- id: S2
  bucketName: refbkt
  keyPrefix: scratch
- id: S3
  bucketName: otherbkt
"#;
        StorageConfigurationIndex::new(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_lookup() {
        let index = index();
        assert_eq!(index.len(), 3);
        for id in ["S1", "S2", "S3"] {
            let id = StorageConfigurationId::from(id);
            assert_eq!(index.lookup(&id).unwrap().id, id);
        }
        let found = index.lookup(&StorageConfigurationId::from("S2")).unwrap();
        assert_eq!(found.bucket_name.as_str(), "refbkt");
        assert_eq!(found.prefix(), "scratch/");
    }

    #[test]
    fn test_lookup_unknown_id() {
        let err = index()
            .lookup(&StorageConfigurationId::from("S404"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotFound {
                kind: Lookup::StorageConfiguration,
                ..
            }
        ));
    }

    #[test]
    fn test_on_bucket() {
        let index = index();
        let bucket = BucketName::from("refbkt");
        let mut ids: Vec<&str> = index.on_bucket(&bucket).map(|c| c.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert_eq!(index.on_bucket(&BucketName::from("nobkt")).count(), 0);
    }
}
