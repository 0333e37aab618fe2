// In: src/error.rs

//! This module defines the single, unified error type for the entire wordpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordpackError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    #[error("Envelope format error: {0}")]
    FormatError(String),

    #[error("Unsupported configuration: {0}")]
    ConfigError(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === Packing/Unpacking Errors
    // =========================================================================
    #[error("Packing error: value {0} exceeds bit width {1}")]
    WidthOverflow(u64, u32),

    #[error("Index {0} out of bounds for {1} packed values")]
    IndexOutOfBounds(usize, usize),

    #[error("Buffer length mismatch: expected {0}, got {1}")]
    BufferMismatch(usize, usize),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during report serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
