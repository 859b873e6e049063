//! Module ID: a dense, copyable module handle.

/// A stable handle for a module in a [`ModuleGraph`](crate::registry::ModuleGraph).
///
/// Handles are dense indices into the graph's module arena, assigned once
/// at build time in first-encounter order. They are never reused or
/// renumbered, so a handle is valid for the lifetime of its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleId(usize);

impl ModuleId {
    /// Create a module ID from a raw arena index.
    #[inline]
    pub fn new(index: usize) -> Self {
        ModuleId(index)
    }

    /// Return the underlying arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{}", self.0)
    }
}
