pub mod cnf;
pub mod config;
pub mod error;
pub mod eval;
pub mod lit;
pub mod model;
pub mod op;
pub mod session;
pub mod solver;

pub mod prelude {
    pub use crate::cnf::Cnf;
    pub use crate::config::{Config, Initialization};
    pub use crate::error::{Error, Result};
    pub use crate::lit::Lit;
    pub use crate::model::Assignment;
    pub use crate::op::allsat::SolutionIter;
    pub use crate::session::{Outcome, Session};
    pub use crate::solver::{LitValue, SolveResponse, Solver};
}
