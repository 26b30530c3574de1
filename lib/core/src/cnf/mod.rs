use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::slice::Iter;

use clause::Clause;

use crate::error::Result;

pub mod clause;

#[derive(Debug, Clone)]
pub struct Cnf {
    pub max_var: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Cnf {
    pub fn new() -> Self {
        Self {
            max_var: 0,
            clauses: Vec::new(),
        }
    }

    /// Build a CNF from nested sequences of raw integers.
    ///
    /// The whole input is validated before anything is returned.
    pub fn try_from_ints<I, C>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Borrow<i32>,
    {
        let clauses = raw
            .into_iter()
            .map(Clause::try_from_ints)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from(clauses))
    }
}

impl Default for Cnf {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> From<I> for Cnf
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        let mut cnf = Self::new();
        for clause in iter.into_iter() {
            cnf.add_clause(clause)
        }
        cnf
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}

impl Cnf {
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        self.max_var = self.max_var.max(clause.max_var() as usize);
        self.clauses.push(clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnf_from_ints() -> color_eyre::Result<()> {
        let cnf = Cnf::try_from_ints(vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]])?;
        assert_eq!(cnf.len(), 3);
        assert_eq!(cnf.max_var, 5);
        assert_eq!(format!("{}", cnf), "[[1, -5, 4], [-1, 5, 3, 4], [-3, -4]]");
        Ok(())
    }

    #[test]
    fn test_cnf_with_empty_clause() -> color_eyre::Result<()> {
        let cnf = Cnf::try_from_ints([vec![], vec![2]])?;
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.max_var, 2);
        Ok(())
    }

    #[test]
    fn test_cnf_rejects_zero() {
        assert!(Cnf::try_from_ints([[1, 2], [0, 3]]).is_err());
    }
}
