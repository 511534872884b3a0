//! NewType for `icav2://` URIs.

use super::DataType;
use crate::constants::ICAV2_URI_SCHEME;
use crate::errors::InvalidIcav2Uri;
use aliri_braid::braid;

/// An [Icav2Uri] locates data inside an ICAv2 project, e.g.
/// `icav2://my-project/path/to/data/`
///
/// The host part is either a project ID or a project name. A trailing `/`
/// means the URI refers to a folder.
#[braid(validator, serde)]
pub struct Icav2Uri(String);

impl aliri_braid::Validator for Icav2Uri {
    type Error = InvalidIcav2Uri;

    fn validate(s: &str) -> Result<(), Self::Error> {
        let rest = s
            .strip_prefix(ICAV2_URI_SCHEME)
            .ok_or_else(|| InvalidIcav2Uri::Scheme(s.to_string()))?;
        if rest.split('/').next().unwrap_or_default().is_empty() {
            Err(InvalidIcav2Uri::MissingProject(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Icav2Uri {
    pub fn from_parts(project: &str, path: &str) -> Result<Self, InvalidIcav2Uri> {
        Icav2Uri::new(format!(
            "{}{}/{}",
            ICAV2_URI_SCHEME,
            project,
            path.trim_start_matches('/')
        ))
    }
}

impl Icav2UriRef {
    /// Project ID or project name.
    pub fn project(&self) -> &str {
        self.split().0
    }

    /// Path inside the project, without a leading `/`.
    pub fn path(&self) -> &str {
        self.split().1.trim_start_matches('/')
    }

    pub fn data_type(&self) -> DataType {
        DataType::of(self.path())
    }

    fn split(&self) -> (&str, &str) {
        let rest = &self.as_str()[ICAV2_URI_SCHEME.len()..];
        rest.split_once('/').unwrap_or((rest, ""))
    }
}
