//! SVG rendering surface for goosempl figures.
//!
//! ```no_run
//! use goosempl::des;
//! use goosempl::style::{Preset, Theme};
//! use goosempl_svg::SaveSvg;
//!
//! let mut fig = des::Figure::new();
//! fig.axes_mut(0, 0)
//!     .plot(des::Line::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());
//! let theme = Theme::from_presets(&[Preset::Goose]);
//! fig.save_svg("line.svg", &theme).unwrap();
//! ```
use std::path::Path;
use std::{fmt, io};

use goosempl::geom::{self, Transform};
use goosempl::render::{self, Surface};
use goosempl::{Drawing, Theme, des};
use svg::Node;
use svg::node::element;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Drawing(goosempl::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<goosempl::Error> for Error {
    fn from(err: goosempl::Error) -> Self {
        Error::Drawing(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Drawing(err) => write!(f, "Drawing error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

/// Save a figure as SVG
pub trait SaveSvg {
    /// Draw the figure with `theme` and write it to `path`
    fn save_svg<P>(&self, path: P, theme: &Theme) -> Result<(), Error>
    where
        P: AsRef<Path>;

    /// Draw the figure with `theme` and return the SVG document
    fn to_svg_string(&self, theme: &Theme) -> Result<String, Error>;
}

impl SaveSvg for des::Figure {
    fn save_svg<P>(&self, path: P, theme: &Theme) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        let surface = draw_svg(self, theme)?;
        surface.save_svg(path)?;
        Ok(())
    }

    fn to_svg_string(&self, theme: &Theme) -> Result<String, Error> {
        let surface = draw_svg(self, theme)?;
        let mut buf = Vec::new();
        surface.write(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}

fn draw_svg(fig: &des::Figure, theme: &Theme) -> Result<SvgSurface, Error> {
    let size = fig.size(theme);
    let mut surface = SvgSurface::new(size.width() as u32, size.height() as u32);
    fig.draw(&mut surface, theme)?;
    Ok(surface)
}

/// A rendering surface producing an SVG document
#[derive(Debug)]
pub struct SvgSurface {
    doc: svg::Document,
    clip_num: u32,
    group_stack: Vec<element::Group>,
}

impl SvgSurface {
    /// Create a surface with the given size in pixels
    pub fn new(width: u32, height: u32) -> Self {
        let doc = svg::Document::new()
            .set("width", width)
            .set("height", height);
        SvgSurface {
            doc,
            clip_num: 0,
            group_stack: vec![],
        }
    }

    /// Write the document to a file
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        self.check_balanced()?;
        svg::save(path, &self.doc)
    }

    /// Write the document to `dest`
    pub fn write<W>(&self, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        self.check_balanced()?;
        svg::write(dest, &self.doc)
    }

    fn check_balanced(&self) -> io::Result<()> {
        if self.group_stack.is_empty() {
            Ok(())
        } else {
            Err(io::Error::other("unbalanced clip stack"))
        }
    }
}

impl Surface for SvgSurface {
    fn prepare(&mut self, size: geom::Size) {
        self.doc
            .assign("viewBox", (0, 0, size.width(), size.height()));
    }

    fn fill(&mut self, fill: render::Paint) {
        let mut node = element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%");
        assign_fill(&mut node, Some(&fill));
        self.append_node(node);
    }

    fn draw_rect(&mut self, rect: &render::Rect) {
        let mut node = rectangle_node(&rect.rect);
        assign_fill(&mut node, rect.fill.as_ref());
        assign_stroke(&mut node, rect.stroke.as_ref());
        assign_transform(&mut node, rect.transform);
        self.append_node(node);
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut node = element::Path::new();
        assign_fill(&mut node, path.fill.as_ref());
        assign_stroke(&mut node, path.stroke.as_ref());
        assign_transform(&mut node, path.transform);
        node.assign("d", path_data(path.path));
        self.append_node(node);
    }

    fn draw_text(&mut self, text: &render::Text) {
        let anchor = match text.anchor {
            render::TextAnchor::Start => "start",
            render::TextAnchor::Middle => "middle",
            render::TextAnchor::End => "end",
        };
        let baseline = match text.baseline {
            render::TextBaseline::Base => "alphabetic",
            render::TextBaseline::Middle => "middle",
            render::TextBaseline::Hanging => "hanging",
        };
        let (x, y) = (text.pos.x, text.pos.y);
        let mut node = element::Text::new(text.text)
            .set("x", x)
            .set("y", y)
            .set("font-family", text.family)
            .set("font-size", text.size)
            .set("text-anchor", anchor)
            .set("dominant-baseline", baseline);
        if text.bold {
            node.assign("font-weight", "bold");
        }
        assign_fill(&mut node, Some(&render::Paint::Solid(text.color)));
        if text.rotation != 0.0 {
            node.assign("transform", format!("rotate({} {} {})", text.rotation, x, y));
        }
        self.append_node(node);
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        let clip_id = self.bump_clip_id();
        let clip_id_url = format!("url(#{})", clip_id);
        let mut rect_node = rectangle_node(clip.rect);
        assign_transform(&mut rect_node, clip.transform);
        let node = element::ClipPath::new()
            .set("id", clip_id)
            .add(rect_node);
        self.append_node(node);
        self.group_stack
            .push(element::Group::new().set("clip-path", clip_id_url));
    }

    fn pop_clip(&mut self) {
        match self.group_stack.pop() {
            Some(g) => self.append_node(g),
            None => log::warn!("pop_clip called without matching push_clip"),
        }
    }
}

impl SvgSurface {
    fn append_node<T>(&mut self, node: T)
    where
        T: Node,
    {
        match self.group_stack.last_mut() {
            Some(group) => group.append(node),
            None => self.doc.append(node),
        }
    }

    fn bump_clip_id(&mut self) -> String {
        self.clip_num += 1;
        format!("goosempl-clip{}", self.clip_num)
    }
}

fn assign_transform<N>(node: &mut N, transform: Option<&geom::Transform>)
where
    N: Node,
{
    if let Some(Transform {
        sx,
        kx,
        ky,
        sy,
        tx,
        ty,
    }) = transform
    {
        node.assign(
            "transform",
            format!("matrix({sx} {ky} {kx} {sy} {tx} {ty})"),
        );
    }
}

fn assign_fill<N>(node: &mut N, fill: Option<&render::Paint>)
where
    N: Node,
{
    if let Some(render::Paint::Solid(color)) = fill {
        node.assign("fill", color.html());
        if let Some(opacity) = color.opacity() {
            node.assign("fill-opacity", opacity);
        }
    } else {
        node.assign("fill", "none");
    }
}

fn assign_stroke<N>(node: &mut N, stroke: Option<&render::Stroke>)
where
    N: Node,
{
    if let Some(stroke) = stroke {
        let w = stroke.width;
        node.assign("stroke", stroke.color.html());
        node.assign("stroke-width", w);
        if let Some(opacity) = stroke.color.opacity() {
            node.assign("stroke-opacity", opacity);
        }
        match stroke.pattern {
            render::LinePattern::Solid => (),
            render::LinePattern::Dash(dash) => {
                let array: Vec<f32> = dash.iter().map(|d| d * w).collect();
                node.assign("stroke-dasharray", array)
            }
        }
    } else {
        node.assign("stroke", "none");
    }
}

fn path_data(path: &geom::Path) -> element::path::Data {
    let mut data = element::path::Data::new();
    for segment in path.segments() {
        match segment {
            geom::PathSegment::MoveTo(p) => {
                data = data.move_to((p.x, p.y));
            }
            geom::PathSegment::LineTo(p) => {
                data = data.line_to((p.x, p.y));
            }
            geom::PathSegment::QuadTo(p1, p2) => {
                data = data.quadratic_curve_to((p1.x, p1.y, p2.x, p2.y));
            }
            geom::PathSegment::CubicTo(p1, p2, p3) => {
                data = data.cubic_curve_to((p1.x, p1.y, p2.x, p2.y, p3.x, p3.y));
            }
            geom::PathSegment::Close => {
                data = data.close();
            }
        }
    }
    data
}

fn rectangle_node(rect: &geom::Rect) -> element::Rectangle {
    element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
}

#[cfg(test)]
mod tests {
    use goosempl::style::Preset;

    use super::*;

    fn figure() -> des::Figure {
        let mut fig = des::Figure::new().with_title("Title");
        let axes = fig.axes_mut(0, 0);
        axes.plot(
            des::Line::new(vec![1.0, 10.0, 100.0], vec![1.0, 100.0, 10000.0])
                .unwrap()
                .with_name("$x^2$"),
        );
        axes.set_xscale(des::Scale::Log);
        axes.set_yscale(des::Scale::Log);
        axes.set_xlabel("$x$");
        axes.set_legend(true);
        fig
    }

    #[test]
    fn svg_document() {
        let theme = Theme::from_presets(&[Preset::Goose]);
        let svg = figure().to_svg_string(&theme).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 800 600\""));
        assert!(svg.contains("goosempl-clip1"));
        // text content is written on its own line
        assert!(svg.contains("\nTitle\n</text>"));
        assert!(svg.contains("\nx²\n</text>"));
        assert!(svg.contains("dominant-baseline=\"hanging\""));
    }

    #[test]
    fn rotated_text() {
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_text(&render::Text {
            text: "y",
            pos: geom::Point::from_xy(10.0, 50.0),
            family: "serif",
            bold: true,
            size: 12.0,
            color: goosempl::color::BLACK,
            anchor: render::TextAnchor::Middle,
            baseline: render::TextBaseline::Base,
            rotation: -90.0,
        });
        let mut buf = Vec::new();
        surface.write(&mut buf).unwrap();
        let svg = String::from_utf8(buf).unwrap();
        assert!(svg.contains("transform=\"rotate(-90 10 50)\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn unbalanced_clip_is_an_error() {
        let mut surface = SvgSurface::new(100, 100);
        let rect = geom::Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        surface.push_clip(&render::Clip {
            rect: &rect,
            transform: None,
        });
        let mut buf = Vec::new();
        assert!(surface.write(&mut buf).is_err());
        surface.pop_clip();
        assert!(surface.write(&mut buf).is_ok());
    }

    #[test]
    fn invalid_figure_is_a_drawing_error() {
        let mut fig = des::Figure::new();
        let axes = fig.axes_mut(0, 0);
        axes.set_yscale(des::Scale::Log);
        axes.set_ylim((-1.0, 1.0));
        let res = fig.to_svg_string(&Theme::default());
        assert!(matches!(res, Err(Error::Drawing(goosempl::Error::NonPositiveData))));
    }
}
