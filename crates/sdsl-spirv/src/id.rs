//! Result ids.

use core::fmt;

/// A result id in a module.
///
/// Every type, constant, variable, function, parameter and label gets one.
/// Ids are allocated from a single counter per module and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl Id {
    /// Create an id with the given raw value.
    pub fn new(raw: u32) -> Self {
        Id(raw)
    }

    /// Get the raw value of this id.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
