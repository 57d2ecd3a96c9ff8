//! Series definitions for axes.
use crate::render::{TextAnchor, TextBaseline};
use crate::style::{self, Colormap};
use crate::{ColorU8, Error};

/// A series drawn in an axes.
#[derive(Debug, Clone)]
pub enum Series {
    /// Polyline through data points
    Line(Line),
    /// Collection of closed polygons
    Patches(Patches),
    /// Text anchored at a data point
    Text(Text),
}

impl Series {
    /// The legend name of the series, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Series::Line(s) => s.name(),
            Series::Patches(s) => s.name(),
            Series::Text(_) => None,
        }
    }

    /// Call `f` on every data point of the series that takes part to autoscaling.
    /// Texts do not take part to autoscaling.
    pub(crate) fn for_each_point<F>(&self, mut f: F)
    where
        F: FnMut(f64, f64),
    {
        match self {
            Series::Line(line) => {
                for (x, y) in line.x.iter().zip(line.y.iter()) {
                    f(*x, *y);
                }
            }
            Series::Patches(patches) => {
                for poly in &patches.polygons {
                    for (x, y) in poly {
                        f(*x, *y);
                    }
                }
            }
            Series::Text(_) => {}
        }
    }
}

impl From<Line> for Series {
    fn from(line: Line) -> Self {
        Series::Line(line)
    }
}

impl From<Patches> for Series {
    fn from(patches: Patches) -> Self {
        Series::Patches(patches)
    }
}

impl From<Text> for Series {
    fn from(text: Text) -> Self {
        Series::Text(text)
    }
}

/// A line series.
///
/// Plots data as a continuous line connecting points in order.
/// Non-finite points break the line.
#[derive(Debug, Clone)]
pub struct Line {
    x: Vec<f64>,
    y: Vec<f64>,

    name: Option<String>,
    line: style::series::Line,
}

impl Line {
    /// Create a new line series.
    /// Fails if `x` and `y` do not have the same length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, Error> {
        crate::error::check_len("y", x.len(), y.len())?;
        Ok(Line {
            x,
            y,
            name: None,
            line: style::series::Line::default(),
        })
    }

    /// Set the name and return self for chaining
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    /// Set the line style and return self for chaining
    pub fn with_line(self, line: impl Into<style::series::Line>) -> Self {
        Self {
            line: line.into(),
            ..self
        }
    }

    /// Get the x data
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Get the y data
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the line style
    pub fn line(&self) -> &style::series::Line {
        &self.line
    }

    pub(crate) fn set_data(&mut self, x: Vec<f64>, y: Vec<f64>) {
        self.x = x;
        self.y = y;
    }
}

/// Face color of patches
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Face {
    /// Patches are not filled
    #[default]
    None,
    /// All patches share the same fill
    Fill(style::series::Fill),
    /// Each patch has a value mapped to a color through a colormap
    Indexed {
        /// One value per patch
        values: Vec<f64>,
        /// Colormap, `None` for the colormap of the theme
        colormap: Option<Colormap>,
        /// Values mapped to both ends of the colormap, `None` for the range of `values`
        clim: Option<(f64, f64)>,
    },
}

/// A collection of closed polygons
#[derive(Debug, Clone)]
pub struct Patches {
    polygons: Vec<Vec<(f64, f64)>>,

    name: Option<String>,
    edge: Option<style::series::Line>,
    face: Face,
}

impl Patches {
    /// Create a new patch collection, edged with the foreground color and not filled
    pub fn new(polygons: Vec<Vec<(f64, f64)>>) -> Self {
        Patches {
            polygons,
            name: None,
            edge: Some(style::series::Line::from(style::series::Color::Fixed(
                crate::color::BLACK,
            ))),
            face: Face::None,
        }
    }

    /// Set the name and return self for chaining
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    /// Set the edge style (`None` for no edge) and return self for chaining
    pub fn with_edge(self, edge: Option<style::series::Line>) -> Self {
        Self { edge, ..self }
    }

    /// Set the face and return self for chaining.
    /// Fails for indexed faces that do not hold one value per polygon.
    pub fn with_face(self, face: Face) -> Result<Self, Error> {
        if let Face::Indexed { values, .. } = &face {
            crate::error::check_len("cindex", self.polygons.len(), values.len())?;
        }
        Ok(Self { face, ..self })
    }

    /// Get the polygons
    pub fn polygons(&self) -> &[Vec<(f64, f64)>] {
        &self.polygons
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the edge style
    pub fn edge(&self) -> Option<&style::series::Line> {
        self.edge.as_ref()
    }

    /// Get the face
    pub fn face(&self) -> &Face {
        &self.face
    }

    /// The color limits of an indexed face: explicit, or the range of the finite values
    pub fn clim(&self) -> Option<(f64, f64)> {
        match &self.face {
            Face::Indexed {
                clim: Some(clim), ..
            } => Some(*clim),
            Face::Indexed { values, .. } => crate::transform::minmax(values).ok(),
            _ => None,
        }
    }
}

/// A text series
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    x: f64,
    y: f64,

    anchor: TextAnchor,
    baseline: TextBaseline,
    font_size: Option<f32>,
    color: Option<ColorU8>,
    rotation: f32,
}

impl Text {
    /// Create a new text, anchored at the start and the baseline of the text
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Text {
            text: text.into(),
            x,
            y,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Base,
            font_size: None,
            color: None,
            rotation: 0.0,
        }
    }

    /// Set the horizontal anchor and return self for chaining
    pub fn with_anchor(self, anchor: TextAnchor) -> Self {
        Self { anchor, ..self }
    }

    /// Set the vertical alignment and return self for chaining
    pub fn with_baseline(self, baseline: TextBaseline) -> Self {
        Self { baseline, ..self }
    }

    /// Set the font size (default: the font size of the theme) and return self for chaining
    pub fn with_font_size(self, font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..self
        }
    }

    /// Set the color (default: the foreground of the theme) and return self for chaining
    pub fn with_color(self, color: ColorU8) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    /// Set the rotation in degrees (counter-clockwise) and return self for chaining
    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    /// Get the text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the position
    pub fn pos(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Get the anchor
    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Get the baseline
    pub fn baseline(&self) -> TextBaseline {
        self.baseline
    }

    /// Get the font size
    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// Get the color
    pub fn color(&self) -> Option<ColorU8> {
        self.color
    }

    /// Get the rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub(crate) fn set_pos(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_length_mismatch() {
        let res = Line::new(vec![1.0, 2.0], vec![1.0]);
        assert_eq!(
            res.unwrap_err(),
            Error::LengthMismatch {
                what: "y",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn patches_clim() {
        let patches = Patches::new(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]; 3])
            .with_face(Face::Indexed {
                values: vec![2.0, f64::NAN, 5.0],
                colormap: None,
                clim: None,
            })
            .unwrap();
        assert_eq!(patches.clim(), Some((2.0, 5.0)));

        let res = Patches::new(vec![vec![(0.0, 0.0)]]).with_face(Face::Indexed {
            values: vec![],
            colormap: None,
            clim: None,
        });
        assert!(res.is_err());
    }

    #[test]
    fn points_skip_text() {
        let s: Series = Text::new("a", 1.0, 2.0).into();
        let mut n = 0;
        s.for_each_point(|_, _| n += 1);
        assert_eq!(n, 0);
    }
}
