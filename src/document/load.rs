use std::path::{Path, PathBuf};
use std::str::FromStr;

use roxmltree::{Document, Node};

use super::{DocumentError, ROLE_SPRITE, ROLE_VIEWPORT, SIZECHART_NS, XLINK_NS};
use crate::draw::{DEFAULT_PLACEHOLDER_SIZE, ImageLoader};
use crate::geometry::{Rect, Vec2};
use crate::scene::{DEFAULT_OVERLAP, Scene, Sprite, Viewport};
use crate::view::Canvas;

/// What a load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub sprites: usize,
    pub viewports: usize,
    /// Image paths that could not be opened and were replaced by placeholders.
    pub missing_images: Vec<String>,
    /// Elements skipped because they were unusable (e.g. a sprite with no href).
    pub skipped: usize,
}

/// Rebuilds `scene` and the canvas pan/zoom from SVG text.
///
/// Settings missing from the root keep their current values. Sprites and
/// viewports are replaced. Children without a recognised `sizechart:role`
/// are ignored.
pub fn load_from_str(
    text: &str,
    base_dir: Option<&Path>,
    scene: &mut Scene,
    canvas: &mut Canvas,
    loader: &dyn ImageLoader,
) -> Result<LoadReport, DocumentError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(DocumentError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    scene.ppu = positive(root, "ppu", scene.ppu);
    if let Some(unit) = root.attribute((SIZECHART_NS, "unit")) {
        scene.unit = unit.to_string();
    }
    canvas.origin = Vec2::new(
        number(root, "canvasX", canvas.origin.x),
        number(root, "canvasY", canvas.origin.y),
    );
    canvas.scale = positive(root, "canvasScale", canvas.scale);

    scene.sprites.clear();
    scene.viewports.clear();
    let mut report = LoadReport::default();

    for child in root.children().filter(Node::is_element) {
        match child.attribute((SIZECHART_NS, "role")) {
            Some(ROLE_SPRITE) => match read_sprite(child, base_dir, loader, &mut report) {
                Some(sprite) => scene.sprites.push(sprite),
                None => report.skipped += 1,
            },
            Some(ROLE_VIEWPORT) => scene.viewports.push(read_viewport(child)),
            Some(other) => log::debug!("Ignoring element with unknown role {other:?}"),
            None => {}
        }
    }

    report.sprites = scene.sprites.len();
    report.viewports = scene.viewports.len();
    scene.layout();
    Ok(report)
}

fn read_sprite(
    elem: Node<'_, '_>,
    base_dir: Option<&Path>,
    loader: &dyn ImageLoader,
    report: &mut LoadReport,
) -> Option<Sprite> {
    let Some(path) = elem
        .attribute("href")
        .or_else(|| elem.attribute((XLINK_NS, "href")))
    else {
        log::warn!("Skipping sprite element without an href");
        return None;
    };

    let width = parsed(elem, "origWidth", DEFAULT_PLACEHOLDER_SIZE);
    let height = parsed(elem, "origHeight", DEFAULT_PLACEHOLDER_SIZE);
    let (image, error) = loader.load_or_placeholder(&resolve(path, base_dir), width, height);
    if error.is_some() {
        report.missing_images.push(path.to_string());
    }

    let mut sprite = Sprite::new(image, path);
    sprite.display_scale = positive(elem, "scale", 1.0);
    sprite.overlap = number(elem, "overlap", DEFAULT_OVERLAP);
    sprite.y_offset = number(elem, "offsetY", 0.0);
    sprite.reference_y = elem
        .attribute((SIZECHART_NS, "referenceY"))
        .and_then(|raw| match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                log::warn!("Malformed sizechart:referenceY={raw:?}; dropping reference");
                None
            }
        });
    sprite.name = elem
        .attribute((SIZECHART_NS, "name"))
        .unwrap_or_default()
        .to_string();
    Some(sprite)
}

fn read_viewport(elem: Node<'_, '_>) -> Viewport {
    let rect = Rect::new(
        number(elem, "x", 0.0),
        number(elem, "y", 0.0),
        number(elem, "width", 0.0),
        number(elem, "height", 0.0),
    );
    let name = elem.attribute((SIZECHART_NS, "name")).unwrap_or_default();
    let viewport = Viewport::new(name, rect, positive(elem, "renderScale", 1.0));
    if viewport.is_invalid() {
        log::warn!("Viewport {name:?} has zero area and will not be exported");
    }
    viewport
}

/// Image paths are stored as written; a relative path that does not exist
/// from the working directory is tried next to the document.
fn resolve(path: &str, base_dir: Option<&Path>) -> PathBuf {
    let direct = Path::new(path);
    if direct.is_relative() && !direct.exists() {
        if let Some(candidate) = base_dir.map(|dir| dir.join(direct)) {
            if candidate.exists() {
                return candidate;
            }
        }
    }
    direct.to_path_buf()
}

/// Parses a private-namespace attribute, keeping `default` when it is absent
/// or malformed.
fn parsed<T: FromStr + Copy>(elem: Node<'_, '_>, name: &str, default: T) -> T {
    match elem.attribute((SIZECHART_NS, name)) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Malformed sizechart:{name}={raw:?}; using default");
            default
        }),
    }
}

fn number(elem: Node<'_, '_>, name: &str, default: f64) -> f64 {
    let value = parsed(elem, name, default);
    if value.is_finite() {
        value
    } else {
        log::warn!("Non-finite sizechart:{name}; using default");
        default
    }
}

fn positive(elem: Node<'_, '_>, name: &str, default: f64) -> f64 {
    let value = number(elem, name, default);
    if value > 0.0 {
        value
    } else {
        log::warn!("sizechart:{name} must be positive; using default");
        default
    }
}
