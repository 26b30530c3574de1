use std::fmt::{Display, Formatter};

/// How the initial phase of an undecided variable is chosen.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PhaseInit {
    /// Jeroslow-Wang: prefer the polarity occurring in more (and shorter) clauses.
    #[default]
    JeroslowWang,
    /// Draw the phase from the seeded random generator.
    Random,
}

impl Display for PhaseInit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseInit::JeroslowWang => write!(f, "jeroslow-wang"),
            PhaseInit::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    // Search:
    pub seed: u64,
    pub phase_init: PhaseInit,
    pub propagation_limit: Option<u64>,
    // Restart:
    pub is_luby: bool,
    pub restart_init: usize,
    pub restart_inc: f64,
    // ReduceDB:
    pub min_learnts_limit: usize,
    pub learntsize_factor: f64,
    pub learntsize_inc: f64,
    pub learntsize_adjust_start: f64,
    pub learntsize_adjust_inc: f64,
}

pub const DEFAULT_OPTIONS: Options = Options {
    // Search:
    seed: 0,
    phase_init: PhaseInit::JeroslowWang,
    propagation_limit: None,
    // Restart:
    is_luby: true,
    restart_init: 100,
    restart_inc: 2.0,
    // ReduceDB:
    min_learnts_limit: 0,
    learntsize_factor: 1.0 / 3.0,
    learntsize_inc: 1.1,
    learntsize_adjust_start: 100.0,
    learntsize_adjust_inc: 1.5,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
