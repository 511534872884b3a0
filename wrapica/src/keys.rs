//! Manipulation of S3 keys and key prefixes.
//!
//! Prefixes are kept in "directory form": no leading `/`, and exactly one
//! trailing `/` unless the prefix is empty (the whole bucket). Matching a
//! key against a directory-form prefix therefore never splits a path
//! component, e.g. `ref/` is not a prefix of `reference/a.txt`.

use crate::errors::ResolveError;
use itertools::Itertools;

/// Collapse repeated separators and drop any leading `/`.
/// A trailing `/` is kept.
pub(crate) fn normalize_key(key: &str) -> String {
    let joined = key.split('/').filter(|s| !s.is_empty()).join("/");
    if key.ends_with('/') && !joined.is_empty() {
        format!("{}/", joined)
    } else {
        joined
    }
}

/// Convert a possibly absent or unnormalized prefix to directory form.
pub(crate) fn dir_prefix(prefix: Option<&str>) -> String {
    let key = normalize_key(prefix.unwrap_or_default());
    if key.is_empty() || key.ends_with('/') {
        key
    } else {
        format!("{}/", key)
    }
}

/// Join prefixes into one directory-form prefix. Absent and empty parts are skipped.
pub(crate) fn join_prefixes<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts.into_iter().map(dir_prefix).collect()
}

/// Validate and normalize a path relative to a project root.
///
/// `.` components and repeated separators are dropped. `..` is refused
/// because it could escape the project's prefix.
pub(crate) fn normalize_relative_path(path: &str) -> Result<String, ResolveError> {
    let components: Vec<&str> = path
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();
    if components.iter().any(|c| *c == "..") {
        return Err(ResolveError::InvalidPath(path.to_string()));
    }
    let joined = components.join("/");
    if path.ends_with('/') && !joined.is_empty() {
        Ok(format!("{}/", joined))
    } else {
        Ok(joined)
    }
}

/// Whether `key` is at or under the directory-form `prefix`.
/// The folder itself written without its trailing `/` counts as under.
pub(crate) fn is_under(key: &str, prefix: &str) -> bool {
    prefix.is_empty() || key.starts_with(prefix) || Some(key) == prefix.strip_suffix('/')
}

/// Remove a directory-form `prefix` from `key`. See [is_under].
pub(crate) fn strip_dir_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    if !is_under(key, prefix) {
        return None;
    }
    Some(key.strip_prefix(prefix).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("a/b/c.txt", "a/b/c.txt")]
    #[case("/a//b/c.txt", "a/b/c.txt")]
    #[case("a/b//", "a/b/")]
    #[case("/", "")]
    #[case("", "")]
    fn test_normalize_key(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(key), expected)
    }

    #[rstest]
    #[case(Some("ref/"), "ref/")]
    #[case(Some("ref"), "ref/")]
    #[case(Some("/ref//sub"), "ref/sub/")]
    #[case(Some(""), "")]
    #[case(Some("/"), "")]
    #[case(None, "")]
    fn test_dir_prefix(#[case] prefix: Option<&str>, #[case] expected: &str) {
        assert_eq!(dir_prefix(prefix), expected)
    }

    #[rstest]
    #[case(vec![Some("ref/"), Some("proj1/")], "ref/proj1/")]
    #[case(vec![Some("ref"), None], "ref/")]
    #[case(vec![Some(""), Some("proj1")], "proj1/")]
    #[case(vec![None, None], "")]
    fn test_join_prefixes(#[case] parts: Vec<Option<&str>>, #[case] expected: &str) {
        assert_eq!(join_prefixes(parts), expected)
    }

    #[rstest]
    #[case("sample.fastq", "sample.fastq")]
    #[case("/a/b.txt", "a/b.txt")]
    #[case("./a//./b/", "a/b/")]
    #[case("/", "")]
    #[case("", "")]
    fn test_normalize_relative_path(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(normalize_relative_path(path).unwrap(), expected)
    }

    #[rstest]
    #[case("..")]
    #[case("a/../../b")]
    #[case("/../secret.txt")]
    fn test_reject_parent_components(#[case] path: &str) {
        assert!(matches!(
            normalize_relative_path(path).unwrap_err(),
            ResolveError::InvalidPath(_)
        ))
    }

    #[rstest]
    #[case("a/b/c.txt", "a/", true)]
    #[case("a/b/c.txt", "", true)]
    #[case("a/b", "a/b/", true)]
    #[case("ab/c.txt", "a/", false)]
    #[case("a", "a/b/", false)]
    fn test_is_under(#[case] key: &str, #[case] prefix: &str, #[case] expected: bool) {
        assert_eq!(is_under(key, prefix), expected)
    }

    #[rstest]
    #[case("a/b/c.txt", "a/", Some("b/c.txt"))]
    #[case("a/b/", "a/b/", Some(""))]
    #[case("a/b", "a/b/", Some(""))]
    #[case("x/y", "a/", None)]
    fn test_strip_dir_prefix(
        #[case] key: &str,
        #[case] prefix: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(strip_dir_prefix(key, prefix), expected)
    }
}
