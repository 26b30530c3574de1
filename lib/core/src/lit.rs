use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::ops::Neg;

use snafu::ensure;

use crate::error::{LiteralOutOfRangeSnafu, Result, ZeroLiteralSnafu};

/// Signed DIMACS-style literal: the magnitude is the variable (starting at 1),
/// the sign is the polarity.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    /// Unchecked constructor for literals known to be valid.
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0, "literal must not be zero");
        debug_assert!(val != i32::MIN, "literal must be negatable");
        Lit(val)
    }

    /// Checked constructor for caller-provided integers.
    pub fn try_new(val: i32) -> Result<Self> {
        ensure!(val != 0, ZeroLiteralSnafu { clause: vec![val] });
        ensure!(val != i32::MIN, LiteralOutOfRangeSnafu { value: val });
        Ok(Lit(val))
    }

    /// Positive literal of the given (1-based) variable.
    pub fn from_var(var: u32) -> Self {
        debug_assert!(var > 0 && var <= i32::MAX as u32);
        Lit(var as i32)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    pub const fn sign(self) -> i32 {
        self.get().signum()
    }

    pub const fn is_negative(self) -> bool {
        self.get() < 0
    }
}

/// Validate a whole sequence of raw literals.
///
/// A zero anywhere reports the entire offending sequence.
pub fn try_lits<I>(raw: I) -> Result<Vec<Lit>>
where
    I: IntoIterator,
    I::Item: Borrow<i32>,
{
    let raw: Vec<i32> = raw.into_iter().map(|x| *x.borrow()).collect();
    ensure!(!raw.contains(&0), ZeroLiteralSnafu { clause: raw.clone() });
    raw.into_iter().map(Lit::try_new).collect()
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl TryFrom<i32> for Lit {
    type Error = crate::error::Error;

    fn try_from(val: i32) -> Result<Self> {
        Lit::try_new(val)
    }
}

// Into<i32>
impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}
