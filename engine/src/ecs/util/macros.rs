/// Define an opaque, string backed identifier type.
///
/// Identifiers share their backing string, so cloning one is a reference count bump. Ordering is
/// lexicographic on the backing string, which gives every map keyed by an identifier a stable
/// iteration order. Debug output prints the identifier keyword style (`:name`).
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(std::sync::Arc<str>);

        impl $name {
            /// Construct an identifier from any string-like value.
            #[inline]
            pub fn new(value: impl AsRef<str>) -> Self {
                Self(std::sync::Arc::from(value.as_ref()))
            }

            /// Get the backing string of this identifier.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(std::sync::Arc::from(value))
            }
        }

        impl From<&$name> for $name {
            #[inline]
            fn from(value: &$name) -> Self {
                value.clone()
            }
        }

        impl std::borrow::Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, ":{}", self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    crate::define_id!(TestId);

    #[test]
    fn ids_compare_by_backing_string() {
        // Given
        let a = TestId::from("alpha");
        let b = TestId::new(String::from("beta"));

        // Then
        assert!(a < b);
        assert_eq!(a, TestId::from(&a));
        assert_eq!(a.as_str(), "alpha");
    }

    #[test]
    fn ids_can_be_looked_up_by_str() {
        // Given
        let mut map = BTreeMap::new();
        map.insert(TestId::from("moveable"), 1);

        // Then
        assert_eq!(map.get("moveable"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn debug_prints_keyword_style() {
        assert_eq!(format!("{:?}", TestId::from("player")), ":player");
        assert_eq!(format!("{}", TestId::from("player")), "player");
    }
}
