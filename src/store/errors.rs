//! Store error types
//!
//! Structured error codes with explicit severity:
//! - REG_STORE_UNKNOWN_COLLECTION (ERROR)
//! - REG_STORE_LOCK_POISONED (FATAL)

use std::fmt;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// Store state is no longer trustworthy, process must terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Named collection does not exist
    RegStoreUnknownCollection,
    /// A panicked writer poisoned the collection lock
    RegStoreLockPoisoned,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::RegStoreUnknownCollection => "REG_STORE_UNKNOWN_COLLECTION",
            StoreErrorCode::RegStoreLockPoisoned => "REG_STORE_LOCK_POISONED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::RegStoreUnknownCollection => Severity::Error,
            StoreErrorCode::RegStoreLockPoisoned => Severity::Fatal,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, message and optional context
#[derive(Debug, Clone)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
}

impl StoreError {
    /// Create an unknown-collection error.
    pub fn unknown_collection(name: &str) -> Self {
        Self {
            code: StoreErrorCode::RegStoreUnknownCollection,
            message: format!("collection does not exist: {}", name),
            details: None,
        }
    }

    /// Create a lock-poisoned error (FATAL).
    pub fn lock_poisoned() -> Self {
        Self {
            code: StoreErrorCode::RegStoreLockPoisoned,
            message: "collection lock poisoned by a panicked writer".to_string(),
            details: None,
        }
    }

    /// Attach context to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this error is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
