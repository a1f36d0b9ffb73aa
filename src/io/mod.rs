#[cfg(feature = "stl-io")]
pub mod stl;

use crate::errors::ValidationError;
use std::fs;
use std::path::Path;

/// Errors raised while building and persisting parts or diagrams.
///
/// Output features are behind cargo feature-flags. When a feature is
/// disabled the corresponding variant is *not* constructed in user code.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    Validation(ValidationError),

    MalformedPath(String),

    #[cfg(feature = "image-io")]
    /// Error bubbled up from the `image` crate while encoding a raster.
    Image(::image::ImageError),

    #[cfg(feature = "image-io")]
    /// Error bubbled up from plotters while drawing a raster.
    Plot(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            Validation(error) => write!(f, "Invalid geometry: {error}"),

            MalformedPath(msg) => write!(f, "The path is malformed: {msg}"),

            #[cfg(feature = "image-io")]
            Image(error) => write!(f, "Image encoding error: {error}"),
            #[cfg(feature = "image-io")]
            Plot(msg) => write!(f, "Drawing error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<ValidationError> for IoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(feature = "image-io")]
impl From<::image::ImageError> for IoError {
    fn from(value: ::image::ImageError) -> Self {
        Self::Image(value)
    }
}

#[cfg(feature = "image-io")]
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>> for IoError {
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Plot(value.to_string())
    }
}

/// Write `bytes` to `path` through a sibling temporary file.
///
/// The rename is the only step that touches `path`, so the file there is
/// either the complete new content or whatever was there before.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| IoError::MalformedPath(path.display().to_string()))?;
    let temporary = path.with_file_name(format!(".{file_name}.partial"));
    if let Err(error) = fs::write(&temporary, bytes).and_then(|()| fs::rename(&temporary, path)) {
        let _ = fs::remove_file(&temporary);
        return Err(error.into());
    }
    Ok(())
}
