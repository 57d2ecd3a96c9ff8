//! Render module: provides abstraction over rendering surfaces.
//!
//! All rendering surfaces must implement the `Surface` trait.
//! See the `goosempl-svg` crate for an example.

use crate::{ColorU8, geom};

/// Surface trait: defines the rendering surface API
pub trait Surface {
    /// Prepare the surface for drawing, with the given size in figure units
    fn prepare(&mut self, size: geom::Size);

    /// Fill the entire surface with the given fill pattern
    fn fill(&mut self, fill: Paint);

    /// Draw a rectangle
    ///
    /// Default implementation converts the rectangle to a path
    /// and call [`draw_path`](Surface::draw_path).
    /// Empty rectangles are not drawn.
    fn draw_rect(&mut self, rect: &Rect) {
        let Some(path) = rect.rect.to_path() else {
            return;
        };
        let rpath = self::Path {
            path: &path,
            fill: rect.fill,
            stroke: rect.stroke,
            transform: rect.transform,
        };
        self.draw_path(&rpath);
    }

    /// Draw a path
    fn draw_path(&mut self, path: &Path);

    /// Draw a single line of text
    fn draw_text(&mut self, text: &Text);

    /// Push a clipping rect
    /// Subsequent draw operations will be clipped to this rect,
    /// until a matching [`pop_clip`](Surface::pop_clip) is called
    fn push_clip(&mut self, clip: &Clip);

    /// Pop a clipping rect that was pushed previously with [`push_clip`](Surface::push_clip)
    fn pop_clip(&mut self);
}

/// Paint pattern, used for fill operations
#[derive(Debug, Clone, Copy)]
pub enum Paint {
    /// Solid color fill
    Solid(ColorU8),
}

impl From<ColorU8> for Paint {
    fn from(value: ColorU8) -> Self {
        Paint::Solid(value)
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, Default)]
pub enum LinePattern<'a> {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(&'a [f32]),
}

/// Stroke style definition
#[derive(Debug, Clone, Copy)]
pub struct Stroke<'a> {
    /// Line color
    pub color: ColorU8,
    /// Line width in figure units
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern<'a>,
}

/// Rectangle to draw
#[derive(Debug, Clone)]
pub struct Rect<'a> {
    /// Rectangle geometry
    pub rect: geom::Rect,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the rectangle
    pub transform: Option<&'a geom::Transform>,
}

/// Path to draw
#[derive(Debug, Clone)]
pub struct Path<'a> {
    /// Path geometry
    pub path: &'a geom::Path,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the path
    pub transform: Option<&'a geom::Transform>,
}

/// Horizontal alignment of a text relative to its anchor point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// The text starts at the anchor
    #[default]
    Start,
    /// The text is centered on the anchor
    Middle,
    /// The text ends at the anchor
    End,
}

/// Vertical alignment of a text relative to its anchor point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor is on the alphabetic baseline
    #[default]
    Base,
    /// The anchor is at mid-height of the text
    Middle,
    /// The anchor is at the top of the text
    Hanging,
}

/// A single line of text to draw
#[derive(Debug, Clone)]
pub struct Text<'a> {
    /// The text
    pub text: &'a str,
    /// Anchor point
    pub pos: geom::Point,
    /// Comma separated list of font families, by order of preference
    pub family: &'a str,
    /// Bold font weight
    pub bold: bool,
    /// Font size in figure units
    pub size: f32,
    /// Text color
    pub color: ColorU8,
    /// Horizontal alignment
    pub anchor: TextAnchor,
    /// Vertical alignment
    pub baseline: TextBaseline,
    /// Rotation around the anchor point, in degrees, clockwise
    pub rotation: f32,
}

/// Clipping rectangle
#[derive(Debug, Clone)]
pub struct Clip<'a> {
    /// Clipping rectangle
    pub rect: &'a geom::Rect,
    /// Optional transform to apply to the clipping rectangle
    pub transform: Option<&'a geom::Transform>,
}
