//! Error types for hapticd
//!
//! Every failure surfaced to a caller carries a stable numeric code and a
//! fixed canonical message; callers branch on the code, not the text.

use thiserror::Error;

/// Stable error code for structural/range/type violations.
pub const PARAMETER_ERROR: u32 = 401;
/// Stable error code for a missing vibration-control grant.
pub const PERMISSION_DENIED: u32 = 201;
/// Stable error code for a device/firmware capability gap.
pub const IS_NOT_SUPPORTED: u32 = 801;
/// Stable error code for a transient hardware/transport fault.
pub const DEVICE_OPERATION_FAILED: u32 = 14_600_101;

/// Core error type for hapticd operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HapticError {
    /// Caller's fault, never retried.
    #[error("The parameter invalid. {0}")]
    InvalidParameter(String),

    /// Caller's fault, never retried.
    #[error("Permission denied.")]
    PermissionDenied,

    /// Device/firmware limitation; the same request may succeed elsewhere.
    #[error("Capability not supported. {0}")]
    Unsupported(String),

    /// Transient hardware/transport fault; safe for the caller to retry.
    #[error("Device operation failed. {0}")]
    DeviceOperationFailed(String),
}

impl HapticError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn device(msg: impl Into<String>) -> Self {
        Self::DeviceOperationFailed(msg.into())
    }

    /// Stable numeric code exposed to callers.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidParameter(_) => PARAMETER_ERROR,
            Self::PermissionDenied => PERMISSION_DENIED,
            Self::Unsupported(_) => IS_NOT_SUPPORTED,
            Self::DeviceOperationFailed(_) => DEVICE_OPERATION_FAILED,
        }
    }

    /// Fixed canonical message for the code.
    pub fn canonical_message(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "The parameter invalid.",
            Self::PermissionDenied => "Permission denied.",
            Self::Unsupported(_) => "Capability not supported.",
            Self::DeviceOperationFailed(_) => "Device operation failed.",
        }
    }

    /// Only device faults are worth retrying; the core never retries itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DeviceOperationFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, HapticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(HapticError::invalid_parameter("x").code(), 401);
        assert_eq!(HapticError::PermissionDenied.code(), 201);
        assert_eq!(HapticError::unsupported("x").code(), 801);
        assert_eq!(HapticError::device("x").code(), 14_600_101);
    }

    #[test]
    fn canonical_messages() {
        assert_eq!(
            HapticError::invalid_parameter("duration out of range").canonical_message(),
            "The parameter invalid."
        );
        assert_eq!(
            HapticError::PermissionDenied.canonical_message(),
            "Permission denied."
        );
        assert_eq!(
            HapticError::unsupported("hd haptic").canonical_message(),
            "Capability not supported."
        );
        assert_eq!(
            HapticError::device("transport").canonical_message(),
            "Device operation failed."
        );
    }

    #[test]
    fn display_carries_detail() {
        let err = HapticError::invalid_parameter("duration out of range");
        assert!(err.to_string().starts_with("The parameter invalid."));
        assert!(err.to_string().contains("duration out of range"));
    }

    #[test]
    fn only_device_faults_retryable() {
        assert!(HapticError::device("x").is_retryable());
        assert!(!HapticError::invalid_parameter("x").is_retryable());
        assert!(!HapticError::PermissionDenied.is_retryable());
        assert!(!HapticError::unsupported("x").is_retryable());
    }
}
