//! # Error Module
//!
//! Định nghĩa các domain errors cho Gatelog sử dụng thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi nghiệp vụ cốt lõi, không liên quan đến infrastructure.
/// An unknown ID at request time is not an error here: it resolves to a
/// normal DENY decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Identity errors ===
    #[error("ID cannot be empty")]
    EmptyIdentifier,

    #[error("ID already exists: {0}")]
    DuplicateIdentifier(String),

    // === Policy errors ===
    #[error("Invalid access policy: {0}")]
    InvalidPolicy(String),
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Kiểm tra có phải lỗi đăng ký (empty / duplicate ID) không
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyIdentifier | CoreError::DuplicateIdentifier(_)
        )
    }
}
