//! Error conversion helpers for repository operations
//!
//! Provides an extension trait for attaching context to I/O errors.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// self.repo
    ///     .list_by_date(date)
    ///     .with_context(|| format!("list bookings for {date}"))?;
    /// ```
    fn with_context<F>(self, context: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context<F>(self, context: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: context(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_io_error_when_adding_context_then_keeps_source() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_context(|| "read bookings".to_string()).unwrap_err();
        match err {
            ApplicationError::OperationFailed { context, source } => {
                assert_eq!(context, "read bookings");
                assert_eq!(source.to_string(), "gone");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
