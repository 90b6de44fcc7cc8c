/// Alias for `Result<T, OracleError>`.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors raised by the pure oracle rules.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The catalog holds fewer distinct items than a draw needs.
    ///
    /// This is a configuration problem: more items must be seeded.
    #[error("insufficient catalog: a draw needs {required} items but only {available} exist")]
    InsufficientCatalog {
        /// Number of candidates a draw presents.
        required: usize,
        /// Number of distinct items in the catalog.
        available: usize,
    },

    /// A subscription plan name was not recognized.
    #[error("unknown subscription plan: \"{0}\"")]
    UnknownPlan(String),

    /// A subscription expiry could not be computed from the given instant.
    #[error("subscription expiry out of range")]
    ExpiryOutOfRange,

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
