//! Type identifiers for graph nodes.

use std::borrow::Cow;
use std::fmt;

/// Path prefixes of the types shipped with the Rust standard library.
const LIBRARY_PREFIXES: [&str; 3] = ["std::", "core::", "alloc::"];

/// A fully-qualified type name, as produced by [`std::any::type_name`].
///
/// Two names are equal when their text is equal; no structural type
/// information is carried.
///
/// # Example
///
/// ```rust
/// use deepassert_reflect::TypeName;
///
/// let name = TypeName::of::<Vec<i32>>();
/// assert_eq!(name.as_str(), "alloc::vec::Vec<i32>");
/// assert_eq!(name.short_name(), "Vec<i32>");
/// assert!(name.is_library());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// Returns the name of `T`.
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// Creates a name from its textual form.
    ///
    /// Used when types are referenced by name, e.g. from an options file.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the fully-qualified name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment, keeping generic arguments intact.
    pub fn short_name(&self) -> &str {
        let name = self.as_str();
        let generics_start = name.find('<').unwrap_or(name.len());
        match name[..generics_start].rfind("::") {
            Some(separator) => &name[separator + 2..],
            None => name,
        }
    }

    /// Returns true if the type lives in `std`, `core` or `alloc`.
    pub fn is_library(&self) -> bool {
        LIBRARY_PREFIXES
            .iter()
            .any(|prefix| self.0.starts_with(prefix))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LocalType;

    #[test]
    fn test_of_uses_fully_qualified_name() {
        assert_eq!(TypeName::of::<String>().as_str(), "alloc::string::String");
        assert_eq!(TypeName::of::<i32>().as_str(), "i32");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(TypeName::of::<String>().short_name(), "String");
        assert_eq!(TypeName::of::<i64>().short_name(), "i64");
        assert_eq!(
            TypeName::of::<Vec<String>>().short_name(),
            "Vec<alloc::string::String>"
        );
        assert_eq!(TypeName::of::<LocalType>().short_name(), "LocalType");
    }

    #[test]
    fn test_is_library() {
        assert!(TypeName::of::<String>().is_library());
        assert!(TypeName::of::<Option<u8>>().is_library());
        assert!(TypeName::of::<std::collections::HashMap<u8, u8>>().is_library());
        assert!(!TypeName::of::<LocalType>().is_library());
        assert!(!TypeName::of::<u8>().is_library());
    }

    #[test]
    fn test_user_generic_over_library_type_is_not_library() {
        struct Wrapper<T>(T);
        let name = TypeName::of::<Wrapper<String>>();
        assert!(!name.is_library());
        let _ = Wrapper(String::new()).0;
    }

    #[test]
    fn test_named_equals_of() {
        assert_eq!(
            TypeName::named("alloc::string::String"),
            TypeName::of::<String>()
        );
        assert_ne!(TypeName::named("String"), TypeName::of::<String>());
    }
}
