//! Seams to the host proxy's text and icon facilities.
//!
//! The responder depends only on the two traits here. Hosts with a real
//! markup engine or image pipeline plug their own implementations in; the
//! defaults cover the standalone binary and tests.

use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ping::response::{Component, Favicon};

/// Required favicon edge length in pixels.
pub const FAVICON_SIZE: u32 = 64;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Converts a raw markup string into a rich-text component.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, raw: &str) -> Component;
}

/// Loads an image file into a favicon.
pub trait IconLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Favicon, IconError>;
}

/// Errors produced while loading a favicon.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to read icon {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("icon {} is not a PNG image", .path.display())]
    NotPng { path: PathBuf },

    #[error("icon {} is {width}x{height}, expected 64x64", .path.display())]
    Dimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Renders markup verbatim as a single literal text component.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MarkupRenderer for PlainTextRenderer {
    fn render(&self, raw: &str) -> Component {
        Component::text(raw)
    }
}

/// Reads a 64x64 PNG from disk and encodes it as a data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngIconLoader;

impl IconLoader for PngIconLoader {
    fn load(&self, path: &Path) -> Result<Favicon, IconError> {
        let bytes = fs::read(path).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = png_dimensions(&bytes).ok_or_else(|| IconError::NotPng {
            path: path.to_path_buf(),
        })?;
        if width != FAVICON_SIZE || height != FAVICON_SIZE {
            return Err(IconError::Dimensions {
                path: path.to_path_buf(),
                width,
                height,
            });
        }

        Ok(Favicon(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&bytes)
        )))
    }
}

/// Width and height from the IHDR chunk, if the buffer is a PNG.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4)
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// PNG header bytes for an image of the given size.
    pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_plain_renderer_keeps_markup_text() {
        let c = PlainTextRenderer.render("<rainbow>Welcome</rainbow>");
        assert_eq!(c.plain(), "<rainbow>Welcome</rainbow>");
    }

    #[test]
    fn test_png_encoded_as_data_uri() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("icon.png");
        let bytes = png_header(64, 64);
        fs::write(&path, &bytes).unwrap();

        let favicon = PngIconLoader.load(&path).unwrap();
        let encoded = favicon
            .as_data_uri()
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        assert_eq!(general_purpose::STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.png");
        fs::write(&path, png_header(128, 64)).unwrap();

        let err = PngIconLoader.load(&path).unwrap_err();
        assert!(matches!(err, IconError::Dimensions { width: 128, height: 64, .. }));
    }

    #[test]
    fn test_non_png_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("icon.png");
        fs::write(&path, b"GIF89a not a png at all, really").unwrap();

        assert!(matches!(PngIconLoader.load(&path), Err(IconError::NotPng { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = PngIconLoader.load(&tmp.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }));
    }
}
