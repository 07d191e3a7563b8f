//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the presentation
//! layer needs from an image file: identify (read the header) and re-encode
//! (decode fully, then encode into bytes for a download).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the mock in
//! this module to exercise per-item failure handling without real files.

use image::ImageFormat;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Image bytes ready to hand out, with the format they are encoded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl Encoded {
    /// MIME type for the encoded bytes, e.g. `image/png`.
    pub fn mime(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Trait for image backends.
pub trait ImageBackend {
    /// Read dimensions from the file header. Fails when the file cannot be
    /// opened or is not a recognizable image.
    fn identify(&self, path: &Path) -> Result<Dimensions, ImageError>;

    /// Decode the file and encode it again in its detected format, or PNG
    /// when the format is unknown or has no encoder.
    fn reencode(&self, path: &Path) -> Result<Encoded, ImageError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Mock backend that records calls and fails for chosen paths.
    #[derive(Default)]
    pub struct MockBackend {
        /// Path suffixes whose operations fail.
        pub failing: Vec<String>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Reencode(String),
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(suffixes: &[&str]) -> Self {
            Self {
                failing: suffixes.iter().map(|s| s.to_string()).collect(),
                operations: RefCell::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }

        fn fails(&self, path: &str) -> bool {
            self.failing.iter().any(|s| path.ends_with(s.as_str()))
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, ImageError> {
            let p = path.to_string_lossy().to_string();
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(p.clone()));
            if self.fails(&p) {
                return Err(ImageError::Decode(format!("mock failure for {p}")));
            }
            Ok(Dimensions {
                width: 640,
                height: 480,
            })
        }

        fn reencode(&self, path: &Path) -> Result<Encoded, ImageError> {
            let p = path.to_string_lossy().to_string();
            self.operations
                .borrow_mut()
                .push(RecordedOp::Reencode(p.clone()));
            if self.fails(&p) {
                return Err(ImageError::Decode(format!("mock failure for {p}")));
            }
            Ok(Encoded {
                format: ImageFormat::Png,
                bytes: b"png bytes".to_vec(),
            })
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::new();

        let dims = backend.identify(Path::new("/catalog/A/x.png")).unwrap();
        assert_eq!(dims.width, 640);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/catalog/A/x.png"));
    }

    #[test]
    fn mock_fails_on_configured_suffix() {
        let backend = MockBackend::failing_on(&["broken.png"]);

        assert!(backend.identify(Path::new("/c/ok.png")).is_ok());
        assert!(matches!(
            backend.reencode(Path::new("/c/broken.png")),
            Err(ImageError::Decode(_))
        ));
    }

    #[test]
    fn encoded_mime_follows_format() {
        let encoded = Encoded {
            format: ImageFormat::Jpeg,
            bytes: Vec::new(),
        };
        assert_eq!(encoded.mime(), "image/jpeg");
    }
}
