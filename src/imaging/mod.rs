//! Image file access for display checks and downloads, in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Re-encode** | `ImageReader::decode` + `DynamicImage::write_to` |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait, shared types, [`ImageError`]
//! - **Rust backend**: [`RustBackend`], the `image` crate implementation

pub mod backend;
pub mod rust_backend;

pub use backend::{Dimensions, Encoded, ImageBackend, ImageError};
pub use rust_backend::RustBackend;
