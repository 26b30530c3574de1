use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::model::Assignment;
use crate::solver::SolveResponse;

/// Result of a single `solve` call. `Unsatisfiable` and `Unknown` are
/// ordinary outcomes here, not errors.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Satisfiable(Assignment),
    Unsatisfiable,
    Unknown,
}

impl Outcome {
    pub fn response(&self) -> SolveResponse {
        match self {
            Outcome::Satisfiable(_) => SolveResponse::Sat,
            Outcome::Unsatisfiable => SolveResponse::Unsat,
            Outcome::Unknown => SolveResponse::Unknown,
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, Outcome::Satisfiable(_))
    }
    pub fn is_unsat(&self) -> bool {
        matches!(self, Outcome::Unsatisfiable)
    }
    pub fn is_unknown(&self) -> bool {
        matches!(self, Outcome::Unknown)
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Outcome::Satisfiable(assignment) => Some(assignment),
            _ => None,
        }
    }

    /// Map to the error channel; `limit` is the effort limit the solve ran under.
    pub fn into_result(self, limit: Option<u64>) -> Result<Assignment> {
        match self {
            Outcome::Satisfiable(assignment) => Ok(assignment),
            Outcome::Unsatisfiable => Err(Error::Unsatisfiable),
            Outcome::Unknown => Err(Error::Unknown { limit }),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.response())
    }
}

#[cfg(test)]
mod tests {
    use crate::lit::Lit;

    use super::*;

    #[test]
    fn test_outcome_into_result() {
        let assignment = Assignment::new(vec![Lit::new(-1)]);
        let outcome = Outcome::Satisfiable(assignment.clone());
        assert!(outcome.is_sat());
        assert_eq!(outcome.assignment(), Some(&assignment));
        assert_eq!(format!("{}", outcome), "SAT");
        assert_eq!(outcome.into_result(None).ok(), Some(assignment));

        assert!(matches!(Outcome::Unsatisfiable.into_result(None), Err(Error::Unsatisfiable)));
        assert!(matches!(
            Outcome::Unknown.into_result(Some(7)),
            Err(Error::Unknown { limit: Some(7) })
        ));
    }
}
