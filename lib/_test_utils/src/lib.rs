use std::fmt::Display;

use itertools::Itertools;
use quickcheck::{Arbitrary, Gen};

use satyrn_core::cnf::Cnf;
use satyrn_core::eval::Eval;
use satyrn_core::lit::Lit;
use satyrn_core::model::Assignment;
use satyrn_core::solver::*;

/// Largest formula `brute_force_count` is willing to enumerate.
pub const MAX_BRUTE_FORCE_VARS: usize = 20;

pub fn run_test_1<S>(mut solver: S) -> color_eyre::Result<()>
where
    S: Solver + Display,
{
    println!("Solver signature: {}", solver.signature());
    println!("solver = {}", solver);

    let lit = Lit::new;
    solver.add_clause([lit(1), lit(2)]);
    solver.add_clause(vec![lit(3), lit(4)]);
    solver.add_clause([lit(-1), lit(-2)]);
    solver.add_clause(vec![lit(-3), lit(-4)]);
    solver.add_unit(lit(5));
    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Sat));

    solver.assume(lit(1));
    solver.assume(lit(2));
    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Unsat));

    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Sat));

    for i in 1..=5 {
        println!("solver.val({}) = {:?}", i, solver.value(lit(i)));
    }
    assert!(matches!(solver.value(lit(5)), LitValue::True));

    Ok(())
}

/// Check that the assignment covers every variable of the formula and satisfies every clause.
pub fn check_solution(cnf: &Cnf, assignment: &Assignment) -> bool {
    assignment.num_vars() >= cnf.max_var && cnf.eval(assignment)
}

/// All assignments over variables `1..=num_vars`.
pub fn all_assignments(num_vars: usize) -> impl Iterator<Item = Assignment> {
    assert!(num_vars <= MAX_BRUTE_FORCE_VARS, "too many variables to brute force");
    (0u32..1 << num_vars).map(move |bits| {
        let lits = (1..=num_vars as u32)
            .map(|v| {
                let lit = Lit::from_var(v);
                if bits >> (v - 1) & 1 == 1 {
                    lit
                } else {
                    -lit
                }
            })
            .collect_vec();
        Assignment::new(lits)
    })
}

/// Number of models of the formula over variables `1..=cnf.max_var`.
pub fn brute_force_count(cnf: &Cnf) -> usize {
    all_assignments(cnf.max_var).filter(|a| cnf.eval(a)).count()
}

pub fn brute_force_sat(cnf: &Cnf) -> bool {
    all_assignments(cnf.max_var).any(|a| cnf.eval(&a))
}

/// Small random CNF over at most 6 variables, for property tests.
#[derive(Debug, Clone)]
pub struct SmallCnf(pub Vec<Vec<i32>>);

impl SmallCnf {
    pub fn to_cnf(&self) -> Cnf {
        Cnf::try_from_ints(&self.0).expect("SmallCnf never contains zero")
    }
}

impl Arbitrary for SmallCnf {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vars = 1 + usize::arbitrary(g) % 6;
        let num_clauses = usize::arbitrary(g) % 10;
        let clauses = (0..num_clauses)
            .map(|_| {
                let len = 1 + usize::arbitrary(g) % 3;
                (0..len)
                    .map(|_| {
                        let var = 1 + (usize::arbitrary(g) % num_vars) as i32;
                        if bool::arbitrary(g) {
                            var
                        } else {
                            -var
                        }
                    })
                    .collect_vec()
            })
            .collect_vec();
        SmallCnf(clauses)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .filter(|clauses| clauses.iter().flatten().all(|&x| x != 0))
                .map(SmallCnf),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brute_force_count() -> color_eyre::Result<()> {
        // x1 xor x2
        let cnf = Cnf::try_from_ints([vec![1, 2], vec![-1, -2]])?;
        assert_eq!(brute_force_count(&cnf), 2);
        assert!(brute_force_sat(&cnf));

        let cnf = Cnf::try_from_ints([vec![1], vec![-1]])?;
        assert_eq!(brute_force_count(&cnf), 0);
        assert!(!brute_force_sat(&cnf));

        // The empty formula has exactly one (empty) model:
        assert_eq!(brute_force_count(&Cnf::new()), 1);
        Ok(())
    }

    #[test]
    fn test_check_solution() -> color_eyre::Result<()> {
        let cnf = Cnf::try_from_ints([vec![1, -3]])?;
        let good = Assignment::new(vec![Lit::new(1), Lit::new(-2), Lit::new(3)]);
        let short = Assignment::new(vec![Lit::new(1)]);
        assert!(check_solution(&cnf, &good));
        assert!(!check_solution(&cnf, &short));
        Ok(())
    }
}
