use std::fmt::Display;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{DocumentError, ROLE_SPRITE, ROLE_VIEWPORT, SIZECHART_NS, SVG_NS, XLINK_NS};
use crate::draw::color::{RULER, RULER_ZERO};
use crate::geometry::Rect;
use crate::scene::{Scene, Sprite, Viewport};
use crate::view::{Canvas, DEFAULT_BIAS, RULER_BIAS, steps};

/// Stroke width of ruler lines that also fall on the coarse grid.
const MAJOR_STROKE: u32 = 3;
const MINOR_STROKE: u32 = 1;

/// Renders the scene as an SVG document.
///
/// Runs layout. Document coordinates are the scene bounds flipped to y-down
/// with the bounds' top-left corner at the document origin.
pub fn to_svg_string(scene: &mut Scene, canvas: &Canvas) -> Result<String, DocumentError> {
    let bounds = scene.bounds();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("xmlns:xlink", XLINK_NS));
    root.push_attribute(("xmlns:sizechart", SIZECHART_NS));
    attr(&mut root, "width", bounds.w);
    attr(&mut root, "height", bounds.h);
    attr(&mut root, "viewBox", format_args!("0 0 {} {}", bounds.w, bounds.h));
    attr(&mut root, "sizechart:ppu", scene.ppu);
    attr(&mut root, "sizechart:unit", &scene.unit);
    attr(&mut root, "sizechart:canvasX", canvas.origin.x);
    attr(&mut root, "sizechart:canvasY", canvas.origin.y);
    attr(&mut root, "sizechart:canvasScale", canvas.scale);
    writer.write_event(Event::Start(root))?;

    write_ruler(&mut writer, scene, &bounds)?;
    for sprite in &scene.sprites {
        writer.write_event(Event::Empty(sprite_element(sprite, &bounds)))?;
    }
    for viewport in &scene.viewports {
        writer.write_event(Event::Empty(viewport_element(viewport)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn attr(elem: &mut BytesStart<'_>, key: &str, value: impl Display) {
    let value = value.to_string();
    elem.push_attribute((key, value.as_str()));
}

/// One horizontal line and label per ruler step across the full width.
/// Lines that also fall on the coarse grid are drawn thicker; the zero line
/// gets its own color.
fn write_ruler<W: Write>(
    writer: &mut Writer<W>,
    scene: &Scene,
    bounds: &Rect,
) -> Result<(), DocumentError> {
    let ppu = scene.ppu;
    let low = bounds.y / ppu;
    let span = bounds.h / ppu;
    let major: Vec<f64> = steps(low, span, DEFAULT_BIAS).collect();
    let ruler = steps(low, span, RULER_BIAS);
    let step = ruler.step();
    let decimals = (-step.log10().round()).max(0.0) as usize;

    for y in ruler {
        let doc_y = bounds.top() - y * ppu;
        let is_major = major.iter().any(|m| (m - y).abs() < step * 1e-3);
        let stroke = if y.abs() < 0.001 { RULER_ZERO } else { RULER };

        let mut line = BytesStart::new("line");
        line.push_attribute(("x1", "0"));
        attr(&mut line, "x2", bounds.w);
        attr(&mut line, "y1", doc_y);
        attr(&mut line, "y2", doc_y);
        attr(&mut line, "stroke", stroke.to_hex());
        attr(
            &mut line,
            "stroke-width",
            if is_major { MAJOR_STROKE } else { MINOR_STROKE },
        );
        writer.write_event(Event::Empty(line))?;

        let mut text = BytesStart::new("text");
        text.push_attribute(("x", "0"));
        attr(&mut text, "y", doc_y);
        text.push_attribute(("dominant-baseline", "hanging"));
        attr(&mut text, "fill", RULER.to_hex());
        text.push_attribute(("dy", "3"));
        writer.write_event(Event::Start(text))?;
        let label = format!("{y:.decimals$}{}", scene.unit);
        writer.write_event(Event::Text(BytesText::new(&label)))?;
        writer.write_event(Event::End(BytesEnd::new("text")))?;
    }
    Ok(())
}

fn sprite_element<'a>(sprite: &'a Sprite, bounds: &Rect) -> BytesStart<'a> {
    let size = sprite.pixel_size();
    let x = sprite.last_drawn_x.unwrap_or(0.0);

    let mut elem = BytesStart::new("image");
    elem.push_attribute(("href", sprite.image_path.as_str()));
    attr(&mut elem, "x", x - bounds.x);
    attr(&mut elem, "y", bounds.top() - (sprite.base_y() + size.y));
    attr(&mut elem, "width", size.x);
    attr(&mut elem, "height", size.y);
    attr(&mut elem, "sizechart:origWidth", sprite.image.width());
    attr(&mut elem, "sizechart:origHeight", sprite.image.height());
    attr(&mut elem, "sizechart:scale", sprite.display_scale);
    attr(&mut elem, "sizechart:overlap", sprite.overlap);
    attr(&mut elem, "sizechart:offsetY", sprite.y_offset);
    if let Some(reference) = sprite.reference_y {
        attr(&mut elem, "sizechart:referenceY", reference);
    }
    if !sprite.name.is_empty() {
        elem.push_attribute(("sizechart:name", sprite.name.as_str()));
    }
    elem.push_attribute(("sizechart:role", ROLE_SPRITE));
    elem
}

fn viewport_element(viewport: &Viewport) -> BytesStart<'_> {
    let mut elem = BytesStart::new("sizechart:viewport");
    attr(&mut elem, "sizechart:x", viewport.rect.x);
    attr(&mut elem, "sizechart:y", viewport.rect.y);
    attr(&mut elem, "sizechart:width", viewport.rect.w);
    attr(&mut elem, "sizechart:height", viewport.rect.h);
    attr(&mut elem, "sizechart:renderScale", viewport.render_scale);
    elem.push_attribute(("sizechart:name", viewport.name.as_str()));
    elem.push_attribute(("sizechart:role", ROLE_VIEWPORT));
    elem
}
