use satyrn::core::config::Config;
use satyrn::core::error::Error;
use satyrn::core::model::Assignment;
use satyrn::open_session;

#[test]
fn all_solutions_5vars() -> color_eyre::Result<()> {
    // Note: the tautology `(5 or -5)` makes the solver allocate all 5 variables.
    let solutions: Vec<Assignment> = open_session([[5, -5]], &Config::default())?.collect::<Result<_, _>>()?;
    assert_eq!(solutions.len(), 32);

    let mut distinct = solutions.clone();
    distinct.sort_by_key(|a| a.to_vec());
    distinct.dedup();
    assert_eq!(distinct.len(), 32);
    Ok(())
}

#[test]
fn all_solutions_assumed_2of5vars() -> color_eyre::Result<()> {
    let mut iter = open_session([[5, -5]], &Config::default())?;

    let mut num_solutions = 0;
    loop {
        // Assumptions only hold for a single solve, so renew them every time.
        iter.assume([1, -2])?;
        match iter.next() {
            Some(solution) => {
                let solution = solution?;
                assert_eq!(solution.value(1), Some(true));
                assert_eq!(solution.value(2), Some(false));
                num_solutions += 1;
            }
            None => break,
        }
    }
    assert_eq!(num_solutions, 8);
    Ok(())
}

#[test]
fn all_solutions_of_xor() -> color_eyre::Result<()> {
    let iter = open_session([[1, 2], [-1, -2]], &Config::default())?;
    let mut solutions = iter.map(|s| s.map(|a| a.to_vec())).collect::<Result<Vec<_>, Error>>()?;
    solutions.sort();
    assert_eq!(solutions, vec![vec![-1, 2], vec![1, -2]]);
    Ok(())
}
