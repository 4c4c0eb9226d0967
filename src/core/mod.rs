pub mod value;

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a UI control (a form container or a submit trigger).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(String);

impl ControlId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for ControlId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ControlId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for ControlId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ControlId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&String> for ControlId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl PartialEq<str> for ControlId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ControlId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
