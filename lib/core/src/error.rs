use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Invalid value '{}' for option '{}': {}", value, option, reason))]
    Configuration {
        option: String,
        value: String,
        reason: String,
    },

    #[snafu(display("Literal must be non-zero, found in clause {:?}", clause))]
    ZeroLiteral { clause: Vec<i32> },

    #[snafu(display("Literal {} is out of range", value))]
    LiteralOutOfRange { value: i32 },

    #[snafu(display("Formula is unsatisfiable"))]
    Unsatisfiable,

    #[snafu(display("Solver gave up after exhausting the effort limit ({:?})", limit))]
    Unknown { limit: Option<u64> },
}

impl Error {
    pub fn configuration(option: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Error::Configuration {
            option: option.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
