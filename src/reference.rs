use std::fmt::{Display, Formatter};

/// Handle to a state owned by a [`States`][crate::states::States] manager.
///
/// Handles are plain indices: cheap to copy, and only meaningful for the
/// manager that issued them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StateRef(u32);

impl StateRef {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the arena index of the reference.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for StateRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
