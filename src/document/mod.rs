//! SVG scene documents.
//!
//! A document is a standalone SVG: a ruler drawn from grid steps, one
//! `<image>` per sprite and one private `<sizechart:viewport>` per viewport.
//! Everything needed to rebuild the scene lives in attributes of the
//! `urn:grissess:sizechart` namespace; the SVG attributes are derived
//! decoration so the file also renders in any SVG viewer.
//!
//! Paths ending in `.svgz` are written gzip-compressed. Loading detects
//! compression from the content, not the extension.

mod load;
mod save;

pub use load::{LoadReport, load_from_str};
pub use save::to_svg_string;

use crate::draw::ImageLoader;
use crate::scene::Scene;
use crate::view::Canvas;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const SIZECHART_NS: &str = "urn:grissess:sizechart";

/// Value of the `sizechart:role` attribute on sprite elements.
pub const ROLE_SPRITE: &str = "Sprite";
/// Value of the `sizechart:role` attribute on viewport elements.
pub const ROLE_VIEWPORT: &str = "Viewport";

/// Errors raised while reading or writing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed XML: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("failed to write XML: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected an <svg> root element, found <{0}>")]
    UnexpectedRoot(String),
}

/// Serializes the scene and canvas state to `path`.
///
/// The document is written to a temporary sibling file and renamed over the
/// target, so an interrupted write never leaves a truncated document.
pub fn save_to_path(scene: &mut Scene, canvas: &Canvas, path: &Path) -> Result<(), DocumentError> {
    let svg = to_svg_string(scene, canvas)?;
    let mut bytes = svg.into_bytes();
    let compressed = is_svgz(path);
    if compressed {
        bytes = compress_bytes(&bytes)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        tmp_file.write_all(&bytes)?;
        tmp_file.sync_all()?;
    }
    if let Err(err) = fs::rename(&tmp_path, path) {
        fs::remove_file(&tmp_path).ok();
        return Err(err.into());
    }

    log::info!(
        "Saved {} sprites and {} viewports to {} ({} bytes, compressed={})",
        scene.sprites.len(),
        scene.viewports.len(),
        path.display(),
        bytes.len(),
        compressed
    );
    Ok(())
}

/// Replaces the contents of `scene` (and the canvas pan/zoom) with the
/// document at `path`. Relative image paths that do not resolve from the
/// working directory are retried relative to the document's directory.
pub fn load_from_path(
    path: &Path,
    scene: &mut Scene,
    canvas: &mut Canvas,
    loader: &dyn ImageLoader,
) -> Result<LoadReport, DocumentError> {
    let raw = fs::read(path)?;
    let bytes = if is_gzip(&raw) {
        let mut decoder = GzDecoder::new(&raw[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        out
    } else {
        raw
    };
    let text = String::from_utf8(bytes)?;
    let report = load_from_str(&text, path.parent(), scene, canvas, loader)?;
    log::info!(
        "Loaded {} sprites and {} viewports from {}",
        report.sprites,
        report.viewports,
        path.display()
    );
    Ok(report)
}

fn is_svgz(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svgz"))
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn compress_bytes(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

fn temp_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart".to_string());
    let mut candidate = target.with_file_name(format!(".{file_name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!(".{file_name}.tmp{counter}"));
    }
    candidate
}
