//! Source locations for diagnostics.

use std::fmt;
use std::sync::Arc;

/// Where a node came from: the resource (template) name and a 1-based line.
///
/// The resource name is shared between every node of one template, so cloning
/// a `Location` is a reference-count bump.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    resource: Arc<str>,
    line: u32,
}

impl Location {
    pub fn new(resource: Arc<str>, line: u32) -> Self {
        Location { resource, line }
    }

    /// Name of the template this location belongs to.
    #[inline]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.line)
    }
}
