use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: budget {0} is negative")]
    NegativeBudget(f64),

    #[error("invalid input: action {name} has a negative cost ({cost})")]
    NegativeCost { name: String, cost: f64 },

    #[error("invalid input: action {name} has a malformed return rate ({rate})")]
    MalformedRate { name: String, rate: f64 },

    #[error("invalid input: amount {0} cannot be represented in minor units")]
    AmountOutOfRange(f64),

    #[error("invalid input: the total {0} of the actions overflows minor units")]
    TotalOutOfRange(&'static str),

    #[error("a table of {cells} cells exceeds the limit of {limit}")]
    TableTooLarge { cells: u64, limit: u64 },

    #[error("exhaustive search over {items} actions exceeds the limit of {limit}")]
    SearchTooLarge { items: usize, limit: usize },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unrecognised header: {0}")]
    UnknownSchema(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the errors raised while validating a portfolio, before any
    /// engine runs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::NegativeBudget(_)
                | Error::NegativeCost { .. }
                | Error::MalformedRate { .. }
                | Error::AmountOutOfRange(_)
                | Error::TotalOutOfRange(_)
        )
    }
}
