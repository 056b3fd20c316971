use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified resource name: `(package, type, name)`.
///
/// Equality and hashing are structural; the canonical textual form is
/// `package:type/name` and is unique within a loaded resource set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResName {
    pub package_name: String,
    pub type_name: String,
    pub name: String,
}

impl ResName {
    pub fn new(
        package_name: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Parse a possibly-qualified reference like `textColor`, `attr/textColor`
    /// or `android:attr/textColor`, filling in missing parts from the defaults.
    ///
    /// Returns `None` when no type is present and no default type is supplied,
    /// since a name without a type cannot be looked up.
    pub fn qualify(
        possibly_qualified: &str,
        default_package: &str,
        default_type: Option<&str>,
    ) -> Option<Self> {
        let trimmed = possibly_qualified
            .trim_start_matches('@')
            .trim_start_matches('?')
            .trim_start_matches('+');

        let (package, rest) = match trimmed.split_once(':') {
            Some((pkg, rest)) => (pkg, rest),
            None => (default_package, trimmed),
        };

        let (type_name, name) = match rest.split_once('/') {
            Some((type_name, name)) => (type_name, name),
            None => (default_type?, rest),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self::new(package, type_name, name))
    }

    /// Qualify a reference found inside another resource, inheriting the
    /// referencing resource's package when the reference carries none.
    pub fn qualify_from(reference: &str, context: &ResName) -> Option<Self> {
        Self::qualify(reference, &context.package_name, Some(&context.type_name))
    }

    /// `package:type/name` form used in error messages and logs.
    pub fn full_name(&self) -> String {
        format!("{}:{}/{}", self.package_name, self.type_name, self.name)
    }
}

impl fmt::Display for ResName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.package_name, self.type_name, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_bare_name() {
        let res_name = ResName::qualify("textColor", "android", Some("attr")).unwrap();
        assert_eq!(res_name, ResName::new("android", "attr", "textColor"));
    }

    #[test]
    fn test_qualify_with_type() {
        let res_name = ResName::qualify("color/foo", "com.example", None).unwrap();
        assert_eq!(res_name, ResName::new("com.example", "color", "foo"));
    }

    #[test]
    fn test_qualify_fully_qualified() {
        let res_name = ResName::qualify("android:style/Theme", "com.example", None).unwrap();
        assert_eq!(res_name, ResName::new("android", "style", "Theme"));
    }

    #[test]
    fn test_qualify_strips_reference_markers() {
        let res_name = ResName::qualify("@+id/button", "com.example", None).unwrap();
        assert_eq!(res_name, ResName::new("com.example", "id", "button"));

        let res_name = ResName::qualify("?attr/colorPrimary", "com.example", None).unwrap();
        assert_eq!(res_name, ResName::new("com.example", "attr", "colorPrimary"));
    }

    #[test]
    fn test_qualify_without_type_or_default() {
        assert!(ResName::qualify("foo", "com.example", None).is_none());
    }

    #[test]
    fn test_full_name() {
        let res_name = ResName::new("android", "attr", "windowBackground");
        assert_eq!(res_name.full_name(), "android:attr/windowBackground");
        assert_eq!(res_name.to_string(), "android:attr/windowBackground");
    }
}
