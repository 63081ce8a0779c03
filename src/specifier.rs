// src/specifier.rs

//! Dependency and provides specifier normalization
//!
//! Arch metadata qualifies names with version constraints (`glibc>=2.31`,
//! `libfoo=1.2`, `python<3.13`). Graph nodes are keyed by the bare name, so
//! every specifier goes through [`normalize`] before it is used as an identity.

/// Strip the version/comparator suffix from a specifier
///
/// Cuts at the first `<`, then at the first `>` of what remains, then at the
/// first `=`. A specifier without any of those characters is returned as-is.
pub fn normalize(spec: &str) -> &str {
    let spec = cut_at(spec, '<');
    let spec = cut_at(spec, '>');
    cut_at(spec, '=')
}

/// Normalize a dependency specifier, returning `None` for blank entries
///
/// An entry is blank when it normalizes to the empty string once surrounding
/// whitespace is trimmed (`""`, `"  "`, `">=1.0"`). Trimming only decides
/// whether the entry is skipped; the identity itself is `normalize(raw)`.
pub fn canonical_identity(raw: &str) -> Option<&str> {
    if normalize(raw.trim()).is_empty() {
        None
    } else {
        Some(normalize(raw))
    }
}

fn cut_at(s: &str, delimiter: char) -> &str {
    match s.find(delimiter) {
        Some(pos) => &s[..pos],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_version_constraints() {
        assert_eq!(normalize("glibc>=2.31"), "glibc");
        assert_eq!(normalize("python<3.13"), "python");
        assert_eq!(normalize("libfoo=1.2"), "libfoo");
        assert_eq!(normalize("openssl>1.1"), "openssl");
        assert_eq!(normalize("bash<=5.2"), "bash");
    }

    #[test]
    fn test_normalize_plain_name_unchanged() {
        assert_eq!(normalize("zlib"), "zlib");
        assert_eq!(normalize("lib32-gcc-libs"), "lib32-gcc-libs");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_leading_comparator() {
        assert_eq!(normalize(">=1.0"), "");
        assert_eq!(normalize("=1.0"), "");
    }

    #[test]
    fn test_normalize_so_provides() {
        // soname provides keep everything before the version
        assert_eq!(normalize("libcurl.so=4-64"), "libcurl.so");
    }

    #[test]
    fn test_canonical_identity_skips_blank() {
        assert_eq!(canonical_identity(""), None);
        assert_eq!(canonical_identity("   "), None);
        assert_eq!(canonical_identity("\t\n"), None);
        assert_eq!(canonical_identity(">=2.0"), None);
        assert_eq!(canonical_identity(" >=2.0"), None);
    }

    #[test]
    fn test_canonical_identity_keeps_whitespace() {
        assert_eq!(canonical_identity("bar"), Some("bar"));
        assert_eq!(canonical_identity(" bar "), Some(" bar "));
        assert_eq!(canonical_identity("glibc >= 2.31"), Some("glibc "));
        assert_eq!(canonical_identity("glibc>=2.31"), Some(normalize("glibc>=2.31")));
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(once), once);
        }

        #[test]
        fn test_normalize_is_prefix(s in ".*") {
            prop_assert!(s.starts_with(normalize(&s)));
        }

        #[test]
        fn test_canonical_identity_is_normalize(s in ".*") {
            if let Some(identity) = canonical_identity(&s) {
                prop_assert_eq!(identity, normalize(&s));
            }
        }

        #[test]
        fn test_normalize_has_no_comparators(s in "[a-z<>=0-9.]{0,24}") {
            let out = normalize(&s);
            prop_assert!(!out.contains(['<', '>', '=']));
        }
    }
}
