//! The module contains the errors the engine and its collaborators can throw.
//!
//! None of these errors reach the user: the refresh coordinator and the scan
//! dispatcher log them and degrade to "no visible change".
//!
//! The errors are:
//!
//! - [`StoreUnavailable`] thrown when the wallet store cannot be reached.
//! - [`Refresh`] thrown when a balance/transaction refresh fails.
//! - [`Scan`] and [`Clipboard`] thrown by the input sources of a scan gesture.
//!
//!  [`StoreUnavailable`]: EngineError::StoreUnavailable
//!  [`Refresh`]: EngineError::Refresh
//!  [`Scan`]: EngineError::Scan
//!  [`Clipboard`]: EngineError::Clipboard
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Refresh failed: {0}")]
    Refresh(String),
    #[error("Scan failed: {0}")]
    Scan(String),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
