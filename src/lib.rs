//! This file is the root of the `wordpack` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`kernels`,
//!     `artifact`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types that form the public API, so callers
//!     write `wordpack::Packer` instead of spelling out module paths.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod artifact;
pub mod config;
pub mod error;
pub mod format;
pub mod kernels;
pub mod packer;
pub mod scenarios;
pub mod timing;
pub mod traits;
pub mod validate;

#[cfg(test)]
mod codec_tests;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use artifact::PackedData;
pub use config::PackerConfig;
pub use error::WordpackError;
pub use format::Kind;
pub use packer::Packer;
pub use traits::BitPacking;
