use crate::errors::ResolveError;
use crate::keys::{is_under, normalize_relative_path, strip_dir_prefix};
use crate::models::StorageCredential;
use crate::types::{
    BucketName, BucketNameRef, Lookup, S3UriRef, StorageCredentialId, StorageCredentialIdRef,
};
use itertools::Itertools;
use std::collections::HashMap;

/// Storage credentials, with their grants indexed by bucket.
#[derive(Debug, Default)]
pub struct StorageCredentialIndex {
    credentials: Vec<StorageCredential>,
    by_id: HashMap<StorageCredentialId, usize>,
    grants: HashMap<BucketName, Vec<Grant>>,
}

/// A key prefix (in directory form) and the index of the credential granting it.
#[derive(Debug)]
struct Grant {
    credential: usize,
    prefix: String,
}

impl StorageCredentialIndex {
    pub fn new(credentials: Vec<StorageCredential>) -> Self {
        let mut by_id = HashMap::new();
        let mut grants: HashMap<BucketName, Vec<Grant>> = HashMap::new();
        for (i, credential) in credentials.iter().enumerate() {
            if by_id.insert(credential.id.clone(), i).is_some() {
                log::warn!(
                    "Storage credential \"{}\" is listed more than once",
                    credential.id
                );
            }
            for grant in &credential.s3_uri_list {
                grants
                    .entry(grant.bucket_name.clone())
                    .or_default()
                    .push(Grant {
                        credential: i,
                        prefix: grant.prefix(),
                    });
            }
        }
        Self {
            credentials,
            by_id,
            grants,
        }
    }

    pub fn lookup(&self, id: &StorageCredentialIdRef) -> Result<&StorageCredential, ResolveError> {
        self.by_id
            .get(id)
            .map(|i| &self.credentials[*i])
            .ok_or_else(|| ResolveError::not_found(Lookup::StorageCredential, id))
    }

    /// Find the credential which grants access to `key` in `bucket`.
    ///
    /// When grants overlap, the one with the longest prefix is chosen. Two different
    /// credentials granting the same longest prefix is a [ResolveError::AmbiguousMatch].
    /// A key with a `..` component is a [ResolveError::InvalidPath].
    pub fn find_for_uri(
        &self,
        bucket: &BucketNameRef,
        key: &str,
    ) -> Result<&StorageCredential, ResolveError> {
        let key = normalize_relative_path(key)?;
        let uri = format!("s3://{}/{}", bucket, key);
        let not_found = || ResolveError::not_found(Lookup::StorageCredential, &uri);
        let grants = self.grants.get(bucket).ok_or_else(not_found)?;
        let candidates: Vec<usize> = grants
            .iter()
            .filter(|g| is_under(&key, &g.prefix))
            .max_set_by_key(|g| g.prefix.len())
            .into_iter()
            .map(|g| g.credential)
            .unique()
            .collect();
        match candidates.as_slice() {
            [] => Err(not_found()),
            [only] => Ok(&self.credentials[*only]),
            _ => Err(ResolveError::AmbiguousMatch {
                kind: Lookup::StorageCredential,
                key: uri.clone(),
                candidates: candidates
                    .iter()
                    .map(|i| self.credentials[*i].id.to_string())
                    .sorted()
                    .collect(),
            }),
        }
    }

    /// Get the path of `uri` relative to the prefix granted by the credential,
    /// e.g. for deciding where external data is mounted in an analysis.
    /// A trailing `/` is kept.
    pub fn relative_path(
        &self,
        id: &StorageCredentialIdRef,
        uri: &S3UriRef,
    ) -> Result<String, ResolveError> {
        let credential = self.lookup(id)?;
        let key = normalize_relative_path(uri.key())?;
        credential
            .s3_uri_list
            .iter()
            .filter(|g| g.bucket_name.as_str() == uri.bucket().as_str())
            .map(|g| g.prefix())
            .filter(|prefix| is_under(&key, prefix))
            .max_by_key(|prefix| prefix.len())
            .and_then(|prefix| strip_dir_prefix(&key, &prefix).map(String::from))
            .ok_or_else(|| ResolveError::not_found(Lookup::StorageCredential, uri))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StorageCredential> {
        self.credentials.iter()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::S3Uri;
    use rstest::*;

    #[fixture]
    fn index() -> StorageCredentialIndex {
        let yaml = r#"
- id: C-A
  name: x-a
  s3UriList:
    - bucketName: X
      keyPrefix: a/
- id: C-AB
  name: x-a-b
  s3UriList:
    - bucketName: X
      keyPrefix: a/b/
    - bucketName: Y
      keyPrefix: shared
- id: C-Y
  name: y-whole-bucket
  s3UriList:
    - bucketName: Y
"#;
        StorageCredentialIndex::new(serde_yaml::from_str(yaml).unwrap())
    }

    #[rstest]
    #[case("X", "a/b/c.txt", "C-AB")]
    #[case("X", "a/c.txt", "C-A")]
    #[case("X", "a/bc.txt", "C-A")]
    #[case("X", "a/b", "C-AB")]
    #[case("X", "/a//b/c.txt", "C-AB")]
    #[case("Y", "shared/data.bam", "C-AB")]
    #[case("Y", "other/data.bam", "C-Y")]
    #[case("Y", "", "C-Y")]
    fn test_longest_prefix_match(
        index: StorageCredentialIndex,
        #[case] bucket: &str,
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        let found = index.find_for_uri(&BucketName::from(bucket), key).unwrap();
        assert_eq!(found.id.as_str(), expected)
    }

    #[rstest]
    #[case("Z", "a/b/c.txt")]
    #[case("X", "b/c.txt")]
    #[case("X", "")]
    fn test_no_match(index: StorageCredentialIndex, #[case] bucket: &str, #[case] key: &str) {
        let err = index
            .find_for_uri(&BucketName::from(bucket), key)
            .unwrap_err();
        assert!(err.is_not_found())
    }

    #[test]
    fn test_tie_between_credentials() {
        let yaml = r#"
- id: C2
  name: two
  s3UriList:
    - bucketName: X
      keyPrefix: /a
- id: C1
  name: one
  s3UriList:
    - bucketName: X
      keyPrefix: a/
"#;
        let index = StorageCredentialIndex::new(serde_yaml::from_str(yaml).unwrap());
        let err = index
            .find_for_uri(&BucketName::from("X"), "a/b.txt")
            .unwrap_err();
        match err {
            ResolveError::AmbiguousMatch { candidates, .. } => {
                assert_eq!(candidates, vec!["C1".to_string(), "C2".to_string()])
            }
            other => panic!("expected AmbiguousMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_same_credential_listed_twice_is_not_ambiguous() {
        let yaml = r#"
- id: C1
  name: one
  s3UriList:
    - bucketName: X
      keyPrefix: a/
    - bucketName: X
      keyPrefix: a
"#;
        let index = StorageCredentialIndex::new(serde_yaml::from_str(yaml).unwrap());
        let found = index.find_for_uri(&BucketName::from("X"), "a/b.txt").unwrap();
        assert_eq!(found.id.as_str(), "C1");
    }

    #[rstest]
    #[case("C-AB", "s3://X/a/b/c/d.txt", "c/d.txt")]
    #[case("C-AB", "s3://X/a/b/c/", "c/")]
    #[case("C-AB", "s3://Y/shared/x.bam", "x.bam")]
    #[case("C-A", "s3://X/a/b/c/d.txt", "b/c/d.txt")]
    #[case("C-Y", "s3://Y/shared/x.bam", "shared/x.bam")]
    fn test_relative_path(
        index: StorageCredentialIndex,
        #[case] id: &str,
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        let uri = S3Uri::try_from(uri).unwrap();
        let actual = index
            .relative_path(&StorageCredentialId::from(id), &uri)
            .unwrap();
        assert_eq!(actual, expected)
    }

    #[rstest]
    fn test_parent_component_is_invalid(index: StorageCredentialIndex) {
        let err = index
            .find_for_uri(&BucketName::from("X"), "a/b/../../c.txt")
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath(_)));
        let uri = S3Uri::try_from("s3://X/a/b/../c.txt").unwrap();
        let err = index
            .relative_path(&StorageCredentialId::from("C-AB"), &uri)
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath(_)));
    }

    #[rstest]
    fn test_relative_path_outside_grants(index: StorageCredentialIndex) {
        let uri = S3Uri::try_from("s3://Y/shared/x.bam").unwrap();
        let err = index
            .relative_path(&StorageCredentialId::from("C-A"), &uri)
            .unwrap_err();
        assert!(err.is_not_found());
        let err = index
            .relative_path(&StorageCredentialId::from("C-404"), &uri)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
