use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::error::Result;
use crate::lit::{try_lits, Lit};

/// Disjunction of literals. Duplicates, tautologies and the empty clause are all legal.
#[derive(Debug, Clone, Default)]
pub struct Clause {
    pub lits: Vec<Lit>,
}

impl Clause {
    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Largest variable index mentioned by the clause, 0 for the empty clause.
    pub fn max_var(&self) -> u32 {
        self.lits.iter().map(|lit| lit.var()).max().unwrap_or(0)
    }
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        Clause { lits }
    }

    /// Build a clause from raw integers, rejecting zero and unrepresentable literals.
    pub fn try_from_ints<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<i32>,
    {
        try_lits(raw).map(Self::new)
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        if self.lits.len() != other.lits.len() {
            return false;
        }
        let lhs = self.lits.iter().copied().sorted_unstable();
        let rhs = other.lits.iter().copied().sorted_unstable();
        itertools::equal(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_eq_ignores_order() {
        let a = Clause::from([Lit::new(1), Lit::new(-2)]);
        let b = Clause::from([Lit::new(-2), Lit::new(1)]);
        assert_eq!(a, b);
        assert_ne!(a, Clause::from([Lit::new(1)]));
    }

    #[test]
    fn test_clause_from_ints() -> color_eyre::Result<()> {
        let clause = Clause::try_from_ints([3, -1, 3])?;
        assert_eq!(clause.len(), 3);
        assert_eq!(clause.max_var(), 3);
        assert_eq!(format!("{}", clause), "[3, -1, 3]");

        let empty = Clause::try_from_ints(Vec::<i32>::new())?;
        assert!(empty.is_empty());
        assert_eq!(empty.max_var(), 0);

        assert!(Clause::try_from_ints([1, 0]).is_err());
        Ok(())
    }
}
