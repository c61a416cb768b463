use thiserror::Error;

/// The engine rejected an operation.
///
/// Carries the diagnostic message together with the primary and extended result
/// codes reported by the owning connection at the time of the failure. The primary
/// code is always `extended_code & 0xff`, see <https://www.sqlite.org/rescode.html>.
///
/// It usually travels wrapped in an [`crate::Error`] with some context attached,
/// use `downcast_ref::<EngineError>()` to get it back:
/// ```rust
/// use lode_core::{Context, EngineError, Error};
/// let error = Error::new(EngineError::new("no such table: t", 1, 1)).context("While preparing");
/// let engine = error.downcast_ref::<EngineError>().unwrap();
/// assert_eq!(engine.code(), 1);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (code {code}, extended code {extended_code})")]
pub struct EngineError {
    message: String,
    code: i32,
    extended_code: i32,
}

impl EngineError {
    pub fn new(message: impl Into<String>, code: i32, extended_code: i32) -> Self {
        Self {
            message: message.into(),
            code,
            extended_code,
        }
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn code(&self) -> i32 {
        self.code
    }
    pub fn extended_code(&self) -> i32 {
        self.extended_code
    }
}

/// The caller used the library in a way it does not support.
///
/// Detected locally before the engine is involved and never worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Returns true when `error` (or one of its causes) is an [`EngineError`].
pub fn is_engine_error(error: &crate::Error) -> bool {
    error.downcast_ref::<EngineError>().is_some()
}

/// Returns true when `error` (or one of its causes) is a [`UsageError`].
pub fn is_usage_error(error: &crate::Error) -> bool {
    error.downcast_ref::<UsageError>().is_some()
}

/// Builds a [`UsageError`] wrapped into [`crate::Error`] and logs it.
pub fn usage_error(message: impl Into<String>) -> crate::Error {
    let error = crate::Error::new(UsageError::new(message));
    log::error!("{:#}", error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Error};

    #[test]
    fn engine_error_display() {
        let error = EngineError::new("UNIQUE constraint failed: t.id", 19, 1555);
        assert_eq!(
            error.to_string(),
            "UNIQUE constraint failed: t.id (code 19, extended code 1555)"
        );
        assert_eq!(error.message(), "UNIQUE constraint failed: t.id");
        assert_eq!(error.code(), 19);
        assert_eq!(error.extended_code(), 1555);
    }

    #[test]
    fn downcast_through_context() {
        let error = Error::new(EngineError::new("disk I/O error", 10, 266))
            .context("Cannot step the statement");
        assert!(is_engine_error(&error));
        assert!(!is_usage_error(&error));
        assert_eq!(
            error.downcast_ref::<EngineError>().map(EngineError::extended_code),
            Some(266)
        );
        assert_eq!(format!("{:#}", error), "Cannot step the statement: disk I/O error (code 10, extended code 266)");
    }

    #[test]
    fn usage_error_kind() {
        let error = usage_error("Cannot prepare an empty statement");
        assert!(is_usage_error(&error));
        assert!(!is_engine_error(&error));
        assert_eq!(error.to_string(), "Cannot prepare an empty statement");
    }
}
