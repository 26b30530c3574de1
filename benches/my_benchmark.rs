use criterion::{criterion_group, criterion_main, Criterion};

use satyrn::core::config::Config;
use satyrn::core::session::Session;
use satyrn::wrappers::SimpleSatSolver;
use simple_sat::lit::Lit;
use simple_sat::solver::Solver as SimpleSat;

/// Pigeonhole principle: `n + 1` pigeons into `n` holes.
fn pigeonhole(n: i32) -> Vec<Vec<i32>> {
    let var = |p: i32, h: i32| p * n + h + 1;
    let mut clauses = Vec::new();
    for p in 0..=n {
        clauses.push((0..n).map(|h| var(p, h)).collect());
    }
    for h in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    clauses
}

fn simple_sat_solve(clauses: &[Vec<i32>]) {
    let mut solver = SimpleSat::new();
    for clause in clauses {
        let lits: Vec<Lit> = clause.iter().map(|&x| Lit::from_external(x)).collect();
        solver.add_clause(&lits);
    }
    solver.solve();
}

fn session_enumerate(clauses: &[Vec<i32>]) -> usize {
    let session = Session::<SimpleSatSolver>::create(clauses, &Config::default()).unwrap();
    session.solutions().count()
}

fn my_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");

    let php = pigeonhole(5);
    group.bench_with_input("simple-sat PHP(6,5)", &php, |b, php| b.iter(|| simple_sat_solve(php)));

    let free = vec![vec![8, -8]];
    group.bench_with_input("session enumerate 2^8", &free, |b, free| b.iter(|| session_enumerate(free)));

    group.finish();
}

criterion_group!(benches, my_benches);
criterion_main!(benches);
