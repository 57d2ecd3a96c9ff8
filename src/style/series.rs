/*!
 * This module deals with colors and style of data series.
 *
 * Series colors are resolved against the color cycle of a [`Theme`]
 * together with the index of the series in its axes.
 */
use crate::style::{self, Theme};
use crate::{ColorU8, ResolveColor};

/// A flexible color for data series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Color {
    /// Next color of the theme color cycle, based on the series index
    #[default]
    Auto,
    /// Color of the theme color cycle, by index
    Index(usize),
    /// Fixed RGB color
    Fixed(ColorU8),
}

impl From<ColorU8> for Color {
    fn from(color: ColorU8) -> Self {
        Color::Fixed(color)
    }
}

impl style::Color for Color {}

impl ResolveColor<Color> for (&Theme, usize) {
    fn resolve_color(&self, col: &Color) -> ColorU8 {
        match col {
            Color::Auto => self.0.cycle_color(self.1),
            Color::Index(idx) => self.0.cycle_color(*idx),
            Color::Fixed(c) => *c,
        }
    }
}

/// Line style for data series
pub type Line = style::Line<Color>;

impl Default for Line {
    fn default() -> Self {
        Line {
            color: Color::default(),
            width: None,
            pattern: style::LinePattern::default(),
            opacity: None,
        }
    }
}

impl From<ColorU8> for Line {
    fn from(color: ColorU8) -> Self {
        Line {
            color: color.into(),
            width: None,
            pattern: style::LinePattern::default(),
            opacity: None,
        }
    }
}

/// Fill style for data series
pub type Fill = style::Fill<Color>;

impl From<ColorU8> for Fill {
    fn from(color: ColorU8) -> Self {
        Fill::Solid {
            color: color.into(),
            opacity: None,
        }
    }
}
