#[path = "wrap_simple-sat.rs"]
pub mod simplesat;

pub use simplesat::SimpleSatSolver;
