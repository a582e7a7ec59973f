// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera coordinator

use crate::backends::camera::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration errors
    Config(String),
    /// The control context is no longer running
    SessionClosed,
}

/// Classified capture failure
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The capture primitive did not complete within the timeout
    Timeout,
    /// The camera stack failed; recovery has been started
    HardwareFault(String),
    /// Any other failure (cancelled, busy, unsupported options, ...)
    Other(String),
}

impl CaptureError {
    /// Sort a backend failure into the capture taxonomy
    pub fn classify(err: &BackendError) -> Self {
        if err.is_hardware_fault() {
            CaptureError::HardwareFault(err.to_string())
        } else {
            CaptureError::Other(err.to_string())
        }
    }

    /// Whether the capture can simply be retried by the user
    ///
    /// Every capture failure is retryable from the user's point of view;
    /// hardware faults become retryable once recovery finishes.
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Whether this failure should trigger hardware recovery
    pub fn needs_recovery(&self) -> bool {
        matches!(self, CaptureError::HardwareFault(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SessionClosed => write!(f, "Camera session closed"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Timeout => write!(f, "Capture timed out"),
            CaptureError::HardwareFault(msg) => write!(f, "Camera hardware fault: {}", msg),
            CaptureError::Other(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_capture_failures() {
        assert_eq!(
            CaptureError::classify(&BackendError::Busy),
            CaptureError::Other("Camera is busy".into())
        );
        let fault = CaptureError::classify(&BackendError::Disconnected);
        assert!(fault.needs_recovery());
        assert!(fault.is_retryable());
        assert!(!CaptureError::Timeout.needs_recovery());
    }
}
