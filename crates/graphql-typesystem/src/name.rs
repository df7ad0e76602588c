use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Create a [`Name`] from a string literal or identifier,
/// checking validity at compile time:
///
/// ```
/// use graphql_typesystem::name;
///
/// let computed_field = name!("cost");
/// let cost = name!(cost);
/// assert_eq!(computed_field, cost);
/// ```
#[macro_export]
macro_rules! name {
    ($value: ident) => {
        $crate::name!(stringify!($value))
    };
    ($value: expr) => {{
        const _: () = { assert!($crate::Name::valid_syntax($value)) };
        $crate::Name::new_unchecked($value)
    }};
}

/// A GraphQL identifier, in valid
/// [name syntax](https://spec.graphql.org/October2021/#sec-Names).
///
/// Cheap to clone: the string value is an atomically reference-counted
/// `Arc<str>` shared between clones.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Name(Arc<str>);

/// Refers to the name of a GraphQL type defined elsewhere
pub type NamedType = Name;

/// Tried to create a [`Name`] from a string that is not in valid
/// GraphQL name syntax.
#[derive(Clone, Eq, PartialEq, thiserror::Error)]
#[error("`{0}` is not a valid GraphQL name")]
pub struct InvalidNameError(pub String);

impl Name {
    /// Create a new `Name`, checking validity
    pub fn new(value: &str) -> Result<Self, InvalidNameError> {
        if Self::valid_syntax(value) {
            Ok(Self::new_unchecked(value))
        } else {
            Err(InvalidNameError(value.to_owned()))
        }
    }

    /// Create a new `Name` without validity checking.
    ///
    /// An invalid name may cause invalid document serialization
    /// but no memory-safety issues.
    pub fn new_unchecked(value: &str) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the given string is in valid GraphQL name syntax:
    /// `/[_A-Za-z][_0-9A-Za-z]*/`
    pub const fn valid_syntax(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return false;
        }
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            let valid = matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_') || (i != 0 && b.is_ascii_digit());
            if !valid {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl std::ops::Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&'_ str> for Name {
    fn eq(&self, other: &&'_ str) -> bool {
        self.as_str() == *other
    }
}

impl From<&'_ Self> for Name {
    fn from(name: &'_ Self) -> Self {
        name.clone()
    }
}

impl TryFrom<&'_ str> for Name {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Name {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl serde::Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(&value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for InvalidNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvalidNameError({:?})", self.0)
    }
}
