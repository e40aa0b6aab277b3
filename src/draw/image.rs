//! Image handles and the loader seam used by the scene and document codec.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder size used when a document does not record the original size.
pub const DEFAULT_PLACEHOLDER_SIZE: u32 = 2;

/// Placeholder size for an interactive load that could not open its file.
pub const FALLBACK_PLACEHOLDER_SIZE: u32 = 256;

/// Errors raised while resolving an image path.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Decoded image plus its pixel size.
///
/// Placeholders carry a size but no surface; renderers draw them as a
/// checkerboard.
#[derive(Clone)]
pub struct ImageHandle {
    width: u32,
    height: u32,
    surface: Option<cairo::ImageSurface>,
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("placeholder", &self.is_placeholder())
            .finish()
    }
}

impl ImageHandle {
    /// Wraps a decoded surface.
    pub fn from_surface(surface: cairo::ImageSurface) -> Self {
        Self {
            width: surface.width().max(0) as u32,
            height: surface.height().max(0) as u32,
            surface: Some(surface),
        }
    }

    /// Stand-in for an image that could not be loaded. Zero dimensions are
    /// raised to 1 so the sprite stays selectable.
    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            surface: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_placeholder(&self) -> bool {
        self.surface.is_none()
    }

    pub fn surface(&self) -> Option<&cairo::ImageSurface> {
        self.surface.as_ref()
    }
}

/// Resolves an image path into a handle.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<ImageHandle, ImageError>;

    /// Loads `path`, substituting a placeholder of the given size on failure.
    /// The error is returned alongside so callers can report it.
    fn load_or_placeholder(
        &self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> (ImageHandle, Option<ImageError>) {
        match self.load(path) {
            Ok(handle) => (handle, None),
            Err(err) => {
                log::warn!("{err}; using {width}x{height} placeholder");
                (ImageHandle::placeholder(width, height), Some(err))
            }
        }
    }
}

/// PNG decoder backed by cairo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngLoader;

impl ImageLoader for PngLoader {
    fn load(&self, path: &Path) -> Result<ImageHandle, ImageError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ImageError::NotFound(path.to_path_buf()),
            _ => ImageError::Io(err),
        })?;
        let mut reader = BufReader::new(file);
        let surface =
            cairo::ImageSurface::create_from_png(&mut reader).map_err(|err| ImageError::Decode {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        log::debug!(
            "Loaded {} ({}x{})",
            path.display(),
            surface.width(),
            surface.height()
        );
        Ok(ImageHandle::from_surface(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = PngLoader
            .load(Path::new("/definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, ImageError::NotFound(_)));
    }

    #[test]
    fn placeholder_fallback_keeps_requested_size() {
        let (handle, err) = PngLoader.load_or_placeholder(Path::new("missing.png"), 40, 30);
        assert!(err.is_some());
        assert!(handle.is_placeholder());
        assert_eq!((handle.width(), handle.height()), (40, 30));
    }

    #[test]
    fn png_round_trip_through_cairo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 7, 5).unwrap();
        let mut file = File::create(&path).unwrap();
        surface.write_to_png(&mut file).unwrap();
        drop(file);

        let handle = PngLoader.load(&path).unwrap();
        assert_eq!((handle.width(), handle.height()), (7, 5));
        assert!(!handle.is_placeholder());
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(
            PngLoader.load(&path),
            Err(ImageError::Decode { .. })
        ));
    }
}
