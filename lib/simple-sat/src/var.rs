use std::fmt::{Display, Formatter};

/// Internal 0-based variable. Externally, variables are 1-based (DIMACS-style).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Var(pub(crate) u32);

impl Var {
    pub const fn new(var: u32) -> Self {
        Self(var)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a 1-based external variable index into [`Var`].
    pub const fn from_external(var: u32) -> Self {
        debug_assert!(var > 0, "external variables are 1-based");
        Self(var - 1)
    }

    pub const fn to_external(self) -> u32 {
        self.0 + 1
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // display Var as 1-based integer:
        write!(f, "{}", self.to_external())
    }
}
