/// Errors that can occur when configuring or building a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The shard count is invalid (must be greater than 0).
    InvalidShardCount,
    /// A sharding option was requested for a variant that has no shards.
    UnsupportedOption {
        /// Display name of the variant.
        variant: &'static str,
        /// The option that does not apply.
        option: &'static str,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidShardCount => write!(f, "shard count must be greater than 0"),
            Error::UnsupportedOption { variant, option } => {
                write!(f, "option `{}` does not apply to {}", option, variant)
            }
        }
    }
}

impl std::error::Error for Error {}
