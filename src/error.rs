use thiserror::Error;

/// Main error type for the Rusty CSV crate.
/// Aggregates errors from the standard library, dependencies and internal modules.
///
/// The pure pipeline (parse, build, detect, filter, sort, paginate, serialize) never
/// returns it; only the I/O and configuration surfaces around that pipeline do.
#[derive(Error, Debug)]
pub enum RustyCsvError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // View module errors
    #[error("{0}")]
    ViewError(#[from] crate::view::ViewError),

    // Explorer errors
    #[error("{0}")]
    ExplorerError(#[from] crate::explorer::ExplorerError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyCsvError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyCsvError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_prefix_wraps_message() {
        let result: Result<(), RustyCsvError> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        )
        .into());
        let error = result.with_prefix("Read 'data.csv' failed").unwrap_err();
        assert_eq!(error.to_string(), "Read 'data.csv' failed: missing");
    }

    #[test]
    fn with_prefix_keeps_ok() {
        let result: Result<u8, RustyCsvError> = Ok(7);
        assert_eq!(result.with_prefix("unused").unwrap(), 7);
    }
}
