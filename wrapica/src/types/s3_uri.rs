//! NewType for `s3://` URIs.

use super::{BucketName, BucketNameRef};
use crate::constants::S3_URI_SCHEME;
use crate::errors::InvalidS3Uri;
use aliri_braid::braid;

/// An [S3Uri] locates an object or prefix in S3, e.g.
/// `s3://refbkt/ref/proj1/sample.fastq`
///
/// The key may be empty (`s3://refbkt` or `s3://refbkt/`), which means the whole bucket.
#[braid(validator, serde)]
pub struct S3Uri(String);

impl aliri_braid::Validator for S3Uri {
    type Error = InvalidS3Uri;

    fn validate(s: &str) -> Result<(), Self::Error> {
        let rest = s
            .strip_prefix(S3_URI_SCHEME)
            .ok_or_else(|| InvalidS3Uri::Scheme(s.to_string()))?;
        if rest.split('/').next().unwrap_or_default().is_empty() {
            Err(InvalidS3Uri::MissingBucket(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl S3Uri {
    /// Create an [S3Uri] from a bucket name and a key. A leading `/` on the key is dropped.
    pub fn from_parts(bucket: &BucketNameRef, key: &str) -> Result<Self, InvalidS3Uri> {
        S3Uri::new(format!(
            "{}{}/{}",
            S3_URI_SCHEME,
            bucket,
            key.trim_start_matches('/')
        ))
    }
}

impl S3UriRef {
    /// Bucket name, i.e. the host part of the URI.
    pub fn bucket(&self) -> &BucketNameRef {
        BucketNameRef::from_str(self.split().0)
    }

    /// Object key or key prefix, without a leading `/`.
    pub fn key(&self) -> &str {
        self.split().1
    }

    /// Owned copy of [S3UriRef::bucket].
    pub fn bucket_name(&self) -> BucketName {
        self.bucket().to_owned()
    }

    fn split(&self) -> (&str, &str) {
        let rest = &self.as_str()[S3_URI_SCHEME.len()..];
        rest.split_once('/').unwrap_or((rest, ""))
    }
}
