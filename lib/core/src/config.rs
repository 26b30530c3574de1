use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::error::{Error, Result};

/// Initial phase of the decision variables.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, EnumString, StrumDisplay, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Initialization {
    /// Solver's own heuristic (Jeroslow-Wang score).
    #[default]
    Default,
    /// Phases drawn from the seeded random generator.
    Random,
}

/// Session configuration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Config {
    pub seed: i64,
    pub initialization: Initialization,
    /// Maximum number of propagations per `solve` call, unlimited when unset.
    pub effort_limit: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    pub fn with_effort_limit(mut self, effort_limit: Option<u64>) -> Self {
        self.effort_limit = effort_limit;
        self
    }
}

impl Config {
    /// Parse a configuration from `(name, value)` pairs.
    ///
    /// Recognized names are `seed`, `initialization` and `effort_limit`.
    /// `prop_limit` is accepted as an alias of `effort_limit` where `0` means unset.
    pub fn from_options<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in options {
            let (name, value) = (name.as_ref().trim(), value.as_ref().trim());
            debug!("option {} = {}", name, value);
            match name {
                "seed" => {
                    config.seed = value
                        .parse()
                        .map_err(|_| Error::configuration(name, value, "expected an integer"))?;
                }
                "initialization" => {
                    config.initialization = Initialization::from_str(value)
                        .map_err(|_| Error::configuration(name, value, "expected 'default' or 'random'"))?;
                }
                "effort_limit" => {
                    let limit: u64 = value
                        .parse()
                        .map_err(|_| Error::configuration(name, value, "expected a positive integer"))?;
                    config.effort_limit = Some(limit);
                }
                "prop_limit" => {
                    let limit: u64 = value
                        .parse()
                        .map_err(|_| Error::configuration(name, value, "expected a non-negative integer"))?;
                    config.effort_limit = Some(limit).filter(|&x| x > 0);
                }
                _ => return Err(Error::configuration(name, value, "unrecognized option")),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that every option is within the domain accepted by the solver.
    pub fn validate(&self) -> Result<()> {
        self.core_seed()?;
        validate_effort_limit(self.effort_limit)
    }

    /// The seed as accepted by the solver: an unsigned 32-bit integer.
    pub fn core_seed(&self) -> Result<u32> {
        u32::try_from(self.seed).map_err(|_| Error::configuration("seed", self.seed, "must fit an unsigned 32-bit integer"))
    }
}

pub(crate) fn validate_effort_limit(limit: Option<u64>) -> Result<()> {
    match limit {
        Some(0) => Err(Error::configuration("effort_limit", 0, "must be positive")),
        _ => Ok(()),
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config(seed={}, initialization={}", self.seed, self.initialization)?;
        match self.effort_limit {
            Some(limit) => write!(f, ", effort_limit={})", limit),
            None => write!(f, ")"),
        }
    }
}
