//! Shared API models for HomeGuard services
//!
//! This module provides unified API request/response models to ensure
//! consistency across all service endpoints.

use serde::{Deserialize, Serialize};

use errors::ErrorInfo;

// ============================================================================
// Standard API Response Models
// ============================================================================

/// Standard success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// Success indicator (always true)
    #[serde(default = "crate::serde_helpers::bool_true")]
    pub success: bool,
    /// Response data
    pub data: T,
}

impl<T> SuccessResponse<T> {
    /// Create a new success response
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Success indicator (always false for errors)
    #[serde(default = "crate::serde_helpers::bool_false")]
    pub success: bool,
    /// Error information
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: ErrorInfo) -> Self {
        Self {
            success: false,
            error,
        }
    }
}
