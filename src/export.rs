//! PNG output: one image per viewport, or the whole chart.

use crate::config::{ExportConfig, UiConfig};
use crate::draw::{CairoRenderer, SceneView, render_frame};
use crate::geometry::Vec2;
use crate::scene::{Scene, Selection};
use crate::view::Canvas;
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest edge Cairo will allocate for an image surface.
const MAX_SURFACE_EDGE: f64 = 32767.0;

/// Renders every valid viewport into `directory` at its render scale.
///
/// Returns the written paths in viewport order. Viewports with zero or
/// negative area are skipped with a warning.
pub fn export_viewports(
    scene: &Scene,
    directory: &Path,
    config: &ExportConfig,
    ui: &UiConfig,
) -> Result<Vec<PathBuf>> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)
            .with_context(|| format!("failed to create {}", directory.display()))?;
    }

    let prefix = filename_prefix(&config.filename_prefix);
    let mut used = HashSet::new();
    let mut written = Vec::new();

    for (index, viewport) in scene.viewports.iter().enumerate() {
        if viewport.is_invalid() {
            log::warn!(
                "Skipping viewport {} ({:?}): zero area",
                index + 1,
                viewport.name
            );
            continue;
        }

        let stem = unique_stem(&mut used, viewport_stem(&viewport.name, index));
        let path = directory.join(format!("{prefix}{stem}.png"));
        let canvas = Canvas::new(viewport.rect.origin(), viewport.render_scale);
        render_png(scene, &canvas, viewport.render_size(), config.include_grid, ui, &path)?;
        log::info!(
            "Exported viewport {:?} at {}x to {}",
            viewport.name,
            viewport.render_scale,
            path.display()
        );
        written.push(path);
    }

    Ok(written)
}

/// Renders the full scene bounds at one device pixel per world pixel.
pub fn render_chart(scene: &mut Scene, path: &Path, ui: &UiConfig, include_grid: bool) -> Result<()> {
    let bounds = scene.bounds();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let canvas = Canvas::new(bounds.origin(), 1.0);
    render_png(scene, &canvas, bounds.size(), include_grid, ui, path)?;
    log::info!(
        "Rendered {} sprites ({}x{}) to {}",
        scene.sprites.len(),
        bounds.w.ceil(),
        bounds.h.ceil(),
        path.display()
    );
    Ok(())
}

/// Pixel dimensions of an output surface, rounded up and at least 1x1.
pub fn surface_size(size: Vec2) -> Result<(i32, i32)> {
    let width = size.x.ceil().max(1.0);
    let height = size.y.ceil().max(1.0);
    if !width.is_finite() || !height.is_finite() {
        bail!("image size is not finite");
    }
    if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
        bail!(
            "image would be {width}x{height} pixels; the largest supported edge is {MAX_SURFACE_EDGE}"
        );
    }
    Ok((width as i32, height as i32))
}

fn render_png(
    scene: &Scene,
    canvas: &Canvas,
    size: Vec2,
    include_grid: bool,
    ui: &UiConfig,
    path: &Path,
) -> Result<()> {
    let (width, height) = surface_size(size)?;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .context("failed to allocate image surface")?;

    let mut canvas = canvas.clone();
    canvas.resize(width as f64, height as f64);
    let selection = Selection::new();
    let view = SceneView {
        scene,
        canvas: &canvas,
        selection: &selection,
        show_grid: include_grid,
        grid_on_top: false,
        real_units: true,
        show_viewports: false,
        cursor: None,
        hud: &[],
    };

    {
        let ctx = cairo::Context::new(&surface).context("failed to create drawing context")?;
        let mut renderer =
            CairoRenderer::new(&ctx, width as f64, height as f64, &ui.font, ui.font_size);
        render_frame(&mut renderer, &view, &ui.frame_style());
    }
    surface.flush();

    let mut file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    Ok(())
}

fn filename_prefix(template: &str) -> String {
    if template.is_empty() {
        String::new()
    } else {
        Local::now().format(template).to_string()
    }
}

/// File stem for a viewport: its name with path-hostile characters replaced,
/// or `viewport-N` (1-based) when the name is blank.
pub fn viewport_stem(name: &str, index: usize) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').trim();
    if cleaned.is_empty() {
        format!("viewport-{}", index + 1)
    } else {
        cleaned.to_string()
    }
}

fn unique_stem(used: &mut HashSet<String>, stem: String) -> String {
    let mut candidate = stem.clone();
    let mut counter = 1;
    while !used.insert(candidate.clone()) {
        counter += 1;
        candidate = format!("{stem}-{counter}");
    }
    candidate
}
