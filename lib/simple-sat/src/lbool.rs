use std::ops::{BitXor, Not};

/// Lifted boolean: a truth value that may be undefined.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum LBool {
    False = 0,
    True = 1,
    Undef = 2,
}

impl LBool {
    #[inline]
    pub const fn is_undef(self) -> bool {
        matches!(self, LBool::Undef)
    }

    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, LBool::True)
    }

    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, LBool::False)
    }
}

impl Default for LBool {
    fn default() -> Self {
        LBool::Undef
    }
}

impl From<bool> for LBool {
    fn from(b: bool) -> Self {
        if b {
            LBool::True
        } else {
            LBool::False
        }
    }
}

// !LBool
impl Not for LBool {
    type Output = LBool;

    fn not(self) -> Self::Output {
        match self {
            LBool::False => LBool::True,
            LBool::True => LBool::False,
            LBool::Undef => LBool::Undef,
        }
    }
}

// LBool ^ bool
impl BitXor<bool> for LBool {
    type Output = LBool;

    fn bitxor(self, rhs: bool) -> Self::Output {
        if rhs {
            !self
        } else {
            self
        }
    }
}
