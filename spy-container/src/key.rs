//! Injection identifiers.
//!
//! [`Identifier`] is the string key a factory is registered under.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Names an injection within a [`Container`](crate::container::Container).
///
/// Built from a `&'static str` without allocating, or from an owned
/// `String`. Lookups take a plain `&str`, so callers never need to build
/// an `Identifier` just to query the container.
///
/// # Examples
/// ```
/// use spy_container::key::Identifier;
///
/// let id = Identifier::from("logger");
/// assert_eq!(id.as_str(), "logger");
///
/// let owned = Identifier::from(format!("db.{}", "replica"));
/// assert_eq!(owned, "db.replica");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    /// Creates an identifier from a static string.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl From<&'static str> for Identifier {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Identifier {
    #[inline]
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&Identifier> for Identifier {
    #[inline]
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

// Hash and Eq agree with `str`, which keeps map lookups by `&str` sound.
impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", self.as_str())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn static_and_owned_are_equal() {
        assert_eq!(Identifier::from("logger"), Identifier::from(String::from("logger")));
    }

    #[test]
    fn different_names_differ() {
        assert_ne!(Identifier::from("logger"), Identifier::from("mailer"));
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Identifier::from(String::from("logger")), 1);
        assert_eq!(map.get("logger"), Some(&1));
        assert_eq!(map.get("mailer"), None);
    }

    #[test]
    fn display_is_bare_name() {
        assert_eq!(Identifier::from("db.primary").to_string(), "db.primary");
        assert_eq!(format!("{:?}", Identifier::from("db")), "Identifier(\"db\")");
    }

    #[test]
    fn into_string_round_trips() {
        assert_eq!(Identifier::from("cache").into_string(), "cache");
    }
}
