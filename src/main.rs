use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use sizechart::config::Config;
use sizechart::document;
use sizechart::draw::PngLoader;
use sizechart::export;
use sizechart::input::EditorState;

#[derive(Parser, Debug)]
#[command(name = "sizechart")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIZECHART_GIT_HASH"), ")"),
    about = "Size chart editor: line up sprites, measure them, export viewports"
)]
struct Cli {
    /// Chart document (.svg or .svgz) to open; a missing file starts an empty chart
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// Read configuration from FILE instead of the user config directory
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render every valid viewport to a PNG in DIR
    #[arg(long, value_name = "DIR")]
    export_viewports: Option<PathBuf>,

    /// Render the whole chart to a PNG
    #[arg(long, value_name = "FILE")]
    render: Option<PathBuf>,

    /// Draw the measurement grid into rendered and exported images
    #[arg(long, action = ArgAction::SetTrue)]
    grid: bool,

    /// Save the chart back out as a document (.svgz is compressed)
    #[arg(long, short = 'w', value_name = "FILE")]
    write: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config: {err:#}; using defaults");
            Config::default()
        }),
    };
    if cli.grid {
        config.export.include_grid = true;
    }

    let mut state = EditorState::new(&config, Box::new(PngLoader)).map_err(anyhow::Error::msg)?;
    if let Some(path) = &cli.document {
        open_document(&mut state, path)?;
    }

    let mut acted = false;
    if let Some(dir) = &cli.export_viewports {
        let written = export::export_viewports(&state.scene, dir, &state.export, &state.ui)?;
        for path in &written {
            println!("{}", path.display());
        }
        acted = true;
    }
    if let Some(path) = &cli.render {
        export::render_chart(&mut state.scene, path, &state.ui, state.export.include_grid)?;
        println!("{}", path.display());
        acted = true;
    }
    if let Some(path) = &cli.write {
        document::save_to_path(&mut state.scene, &state.canvas, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{}", path.display());
        acted = true;
    }

    if !acted {
        print_summary(&mut state);
    }
    Ok(())
}

fn open_document(state: &mut EditorState, path: &Path) -> Result<()> {
    if !path.exists() {
        log::warn!("{} does not exist; starting an empty chart", path.display());
        return Ok(());
    }

    let mut scene = state.scene.clone();
    let mut canvas = state.canvas.clone();
    let report = document::load_from_path(path, &mut scene, &mut canvas, state.loader())
        .with_context(|| format!("failed to open {}", path.display()))?;
    for missing in &report.missing_images {
        log::warn!("Image {missing} is missing; drawn as a placeholder");
    }
    if report.skipped > 0 {
        log::warn!("Skipped {} unusable element(s)", report.skipped);
    }

    state.replace_scene(scene);
    state.canvas = canvas;
    Ok(())
}

fn print_summary(state: &mut EditorState) {
    let real_units = state.real_units;
    let scene = &mut state.scene;
    let bounds = scene.bounds();
    let unit = scene.unit_label(real_units).to_string();

    println!(
        "{} sprite(s), {} viewport(s), {} px per {}",
        scene.sprites.len(),
        scene.viewports.len(),
        scene.ppu,
        scene.unit
    );
    println!(
        "Chart: {:.3} x {:.3} {unit}",
        scene.to_display_units(bounds.w, real_units),
        scene.to_display_units(bounds.h, real_units)
    );

    for (index, sprite) in scene.sprites.iter().enumerate() {
        let name = sprite.label();
        let height = sprite.reference_baseline().unwrap_or(sprite.pixel_size().y);
        println!(
            "  {:>3}. {name}: {:.3}{unit}{}",
            index + 1,
            scene.to_display_units(height, real_units),
            if sprite.image.is_placeholder() {
                " (missing image)"
            } else {
                ""
            }
        );
    }
    for viewport in &scene.viewports {
        let size = viewport.render_size();
        println!(
            "  viewport {:?}: {:.0}x{:.0}px{}",
            viewport.name,
            size.x,
            size.y,
            if viewport.is_invalid() { " (invalid)" } else { "" }
        );
    }
}
