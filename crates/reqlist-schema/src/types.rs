//! Newtype wrappers for string identifiers, providing compile-time type safety.
//!
//! All newtypes serialize/deserialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for String {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Package name exactly as written in the manifest.
    PackageName
);

string_newtype!(
    /// Full 64-character hex identifier of a manifest's active requirement set.
    ManifestId
);

string_newtype!(
    /// Truncated 12-character prefix of a [`ManifestId`], used for display.
    ShortId
);

impl PackageName {
    /// PEP 503 canonical form: lowercase, runs of `-`, `_` and `.` collapsed to `-`.
    pub fn canonical(&self) -> String {
        canonicalize_name(&self.0)
    }

    /// Whether two names refer to the same package after canonicalization.
    pub fn same_package(&self, other: &str) -> bool {
        self.canonical() == canonicalize_name(other)
    }
}

pub fn canonicalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_display_and_as_ref() {
        let name = PackageName::new("opencv-python");
        assert_eq!(name.to_string(), "opencv-python");
        assert_eq!(name.as_str(), "opencv-python");
        assert_eq!(AsRef::<str>::as_ref(&name), "opencv-python");
    }

    #[test]
    fn package_name_serializes_as_plain_string() {
        let name = PackageName::new("rich");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"rich\"");
        let back: PackageName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn canonical_name_collapses_separators() {
        assert_eq!(canonicalize_name("hydra_colorlog"), "hydra-colorlog");
        assert_eq!(canonicalize_name("tensorboardX"), "tensorboardx");
        assert_eq!(canonicalize_name("Foo.__Bar"), "foo-bar");
    }

    #[test]
    fn names_match_across_spellings() {
        let name = PackageName::new("cython_bbox");
        assert!(name.same_package("Cython-BBox"));
        assert!(!name.same_package("cython"));
    }

    #[test]
    fn short_id_into_inner() {
        let sid = ShortId::from("abc123def456");
        assert_eq!(sid.into_inner(), "abc123def456");
    }

    #[test]
    fn manifest_id_equality() {
        let a = ManifestId::new("same");
        let b = ManifestId::new("same");
        let c = ManifestId::new("diff");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
