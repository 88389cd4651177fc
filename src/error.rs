/// Convenience alias used by every fallible table operation.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by [`HashTable`](crate::HashTable) operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The table could not be constructed with the requested parameters.
    #[error("invalid table configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// The key is not present in the table.
    #[error("key not found")]
    KeyNotFound,
}

/// The reason a [`TableConfig`](crate::TableConfig) was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Capacity must hold at least one slot.
    #[error("capacity must be a positive integer")]
    ZeroCapacity,
    /// The load factor threshold must lie in `(0, 1]`.
    #[error("load factor threshold must be in (0, 1], got {0}")]
    LoadFactorThreshold(f64),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn config_error_converts_into_invalid_configuration() {
        let err: Error = ConfigError::LoadFactorThreshold(1.5).into();
        assert_eq!(
            err,
            Error::InvalidConfiguration(ConfigError::LoadFactorThreshold(1.5))
        );
        assert_eq!(
            err.to_string(),
            "invalid table configuration: load factor threshold must be in (0, 1], got 1.5"
        );
    }

    #[test]
    fn key_not_found_message() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
    }
}
