#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the probability/logit pair is not exactly one of the two.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// Returned when two shapes cannot be broadcast or a tensor has the wrong rank.
    #[error("shape error: {reason} (lhs {lhs:?}, rhs {rhs:?})")]
    Shape {
        /// The reason for the failure.
        reason: &'static str,
        /// The first shape involved.
        lhs: Vec<i64>,
        /// The second shape involved.
        rhs: Vec<i64>,
    },

    /// Returned when argument validation rejects the distribution parameters.
    #[error("malformed parameter: {0}")]
    MalformedParameter(String),

    /// Returned when construction options cannot be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// Any failure raised by libtorch.
    #[error(transparent)]
    Tensor(#[from] tch::TchError),
}

pub type Result<T> = core::result::Result<T, Error>;
