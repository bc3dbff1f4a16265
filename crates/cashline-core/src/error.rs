//! # Error Types
//!
//! Domain-specific error types for cashline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── SettingsError    - Settings file could not be read or decoded      │
//! │  └── ValidationError  - Order input failed a boundary check             │
//! │                                                                         │
//! │  calculate_price() itself never fails: bad fixed-amount strings price   │
//! │  as zero and are logged instead.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Top-level error for everything around the pricing engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings could not be loaded.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Order input could not be decoded.
    #[error("Invalid order input: {0}")]
    OrderInput(#[from] serde_json::Error),

    /// Order input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Settings Error
// =============================================================================

/// Failures while loading site-wide pricing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON for [`crate::Settings`].
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting decoded fine but holds an unusable value.
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when order input doesn't meet requirements.
/// Used at the boundary before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Invalid format (e.g., lowercase currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of loading settings.
pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Unit Tests
// =============================================================================
