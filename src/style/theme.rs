//! Theme definitions and the goose presets
//!
//! A [`Theme`] gathers everything that a plotting session would otherwise
//! read from global configuration: figure size, fonts, ticks, spines and
//! the color cycle of data series.
//! Themes are composed from [`Preset`] overlays, applied in order.
//!
//! ```
//! use goosempl::style::{Preset, Theme, theme::TickDirection};
//!
//! let theme = Theme::from_names(["goose", "goose-tick-in"]).unwrap();
//! assert_eq!(theme.font.size, 16.0);
//! assert_eq!(theme.ticks.direction, TickDirection::In);
//! assert_eq!(theme, Theme::from_presets(&[Preset::Goose, Preset::GooseTickIn]));
//! ```
use std::str::FromStr;

use crate::color::{self, ColorU8};
use crate::style::{Colormap, defaults};
use crate::{Error, geom};

/// Font family
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FontFamily {
    /// Sans-serif font
    #[default]
    SansSerif,
    /// Serif font
    Serif,
    /// Serif font mimicking LaTeX (Computer Modern when available)
    LatexSerif,
    /// Custom font family list, as understood by the rendering surface
    Custom(String),
}

impl FontFamily {
    /// The font family list, by order of preference
    pub fn names(&self) -> &str {
        match self {
            FontFamily::SansSerif => defaults::SANS_SERIF_FAMILY,
            FontFamily::Serif => defaults::SERIF_FAMILY,
            FontFamily::LatexSerif => defaults::LATEX_SERIF_FAMILY,
            FontFamily::Custom(names) => names,
        }
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Font settings
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font family
    pub family: FontFamily,
    /// Base font size in points
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Whether labels are meant to be typeset with LaTeX
    pub usetex: bool,
}

impl Default for Font {
    fn default() -> Self {
        Font {
            family: FontFamily::SansSerif,
            size: defaults::FONT_SIZE,
            weight: FontWeight::Normal,
            usetex: false,
        }
    }
}

/// Direction of the tick marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickDirection {
    /// Ticks point outside the axes
    #[default]
    Out,
    /// Ticks point inside the axes
    In,
}

/// Tick settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    /// Direction of the ticks
    pub direction: TickDirection,
    /// Draw ticks on the top side
    pub top: bool,
    /// Draw ticks on the right side
    pub right: bool,
    /// Length of the major ticks
    pub size: f32,
    /// Font size of tick labels, relative to the base font size
    pub label_scale: f32,
}

impl Default for TickStyle {
    fn default() -> Self {
        TickStyle {
            direction: TickDirection::Out,
            top: false,
            right: false,
            size: defaults::TICK_SIZE,
            label_scale: defaults::FONT_SCALE_MEDIUM,
        }
    }
}

/// Visibility of the top and right spines (bottom and left are always drawn)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spines {
    /// Draw the top spine
    pub top: bool,
    /// Draw the right spine
    pub right: bool,
}

impl Default for Spines {
    fn default() -> Self {
        Spines {
            top: true,
            right: true,
        }
    }
}

/// Legend settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendStyle {
    /// Font size, relative to the base font size
    pub font_scale: f32,
    /// Rounded legend box
    pub fancybox: bool,
    /// Spacing between legend columns, in font-size units
    pub column_spacing: f32,
    /// Spacing between the legend handle and its text, in font-size units
    pub handle_text_pad: f32,
}

impl Default for LegendStyle {
    fn default() -> Self {
        LegendStyle {
            font_scale: defaults::FONT_SCALE_MEDIUM,
            fancybox: true,
            column_spacing: 2.0,
            handle_text_pad: 0.8,
        }
    }
}

/// A theme, for styling figures
///
/// The default theme follows the usual matplotlib defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Size of a single-axes figure, in figure units
    pub fig_size: geom::Size,
    /// Font settings
    pub font: Font,
    /// Axis label font size, relative to the base font size
    pub label_scale: f32,
    /// Title font size, relative to the base font size
    pub title_scale: f32,
    /// Tick settings
    pub ticks: TickStyle,
    /// Spines visibility
    pub spines: Spines,
    /// Colors assigned to successive data series
    pub color_cycle: Vec<ColorU8>,
    /// Default width of data series lines
    pub line_width: f32,
    /// Legend settings
    pub legend: LegendStyle,
    /// Default colormap for color-indexed patches
    pub colormap: Colormap,
    /// Length of error-bar caps
    pub errorbar_capsize: f32,
    /// Foreground color: spines, ticks and texts
    pub foreground: ColorU8,
    /// Background color of the figure, `None` for transparent
    pub background: Option<ColorU8>,
}

const TAB10: &[ColorU8] = &[
    ColorU8::from_html(b"#1f77b4"), // blue
    ColorU8::from_html(b"#ff7f0e"), // orange
    ColorU8::from_html(b"#2ca02c"), // green
    ColorU8::from_html(b"#d62728"), // red
    ColorU8::from_html(b"#9467bd"), // purple
    ColorU8::from_html(b"#8c564b"), // brown
    ColorU8::from_html(b"#e377c2"), // pink
    ColorU8::from_html(b"#7f7f7f"), // gray
    ColorU8::from_html(b"#bcbd22"), // olive
    ColorU8::from_html(b"#17becf"), // cyan
];

const GOOSE_CYCLE: &[&str] = &["k", "r", "g", "b", "y", "c", "m"];

impl Default for Theme {
    fn default() -> Self {
        Theme {
            fig_size: defaults::FIG_SIZE,
            font: Font::default(),
            label_scale: defaults::FONT_SCALE_MEDIUM,
            title_scale: defaults::FONT_SCALE_LARGE,
            ticks: TickStyle::default(),
            spines: Spines::default(),
            color_cycle: TAB10.to_vec(),
            line_width: defaults::LINE_WIDTH,
            legend: LegendStyle::default(),
            colormap: Colormap::default(),
            errorbar_capsize: 0.0,
            foreground: color::BLACK,
            background: Some(color::WHITE),
        }
    }
}

impl Theme {
    /// Build a theme by applying the presets in order on the default theme
    pub fn from_presets(presets: &[Preset]) -> Self {
        let mut theme = Theme::default();
        for preset in presets {
            preset.apply(&mut theme);
        }
        theme
    }

    /// Build a theme from preset names, e.g. `["goose", "goose-latex"]`
    pub fn from_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let presets = names
            .into_iter()
            .map(|n| n.as_ref().parse::<Preset>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Theme::from_presets(&presets))
    }

    /// Apply a preset on top of this theme, returning self for chaining
    pub fn with_preset(mut self, preset: Preset) -> Self {
        preset.apply(&mut self);
        self
    }

    /// Color of the series at `idx` in the color cycle
    pub fn cycle_color(&self, idx: usize) -> ColorU8 {
        if self.color_cycle.is_empty() {
            return self.foreground;
        }
        self.color_cycle[idx % self.color_cycle.len()]
    }

    /// Font size of axis labels
    pub fn label_font_size(&self) -> f32 {
        self.font.size * self.label_scale
    }

    /// Font size of tick labels
    pub fn tick_font_size(&self) -> f32 {
        self.font.size * self.ticks.label_scale
    }

    /// Font size of the axes titles
    pub fn title_font_size(&self) -> f32 {
        self.font.size * self.title_scale
    }

    /// Font size of legend entries
    pub fn legend_font_size(&self) -> f32 {
        self.font.size * self.legend.font_scale
    }
}

/// Named theme presets
///
/// Each preset only overrides the settings it is about,
/// so presets are meant to be combined, starting with [`Preset::Goose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Base goose style: large fonts, ticks on all sides, black-first color cycle
    Goose,
    /// LaTeX-like bold serif fonts
    GooseLatex,
    /// Ticks pointing inwards
    GooseTickIn,
    /// Ticks and spines only on the bottom and left sides
    GooseTickLower,
}

impl Preset {
    /// All presets
    pub const ALL: &[Preset] = &[
        Preset::Goose,
        Preset::GooseLatex,
        Preset::GooseTickIn,
        Preset::GooseTickLower,
    ];

    /// The name of the preset
    pub const fn name(&self) -> &'static str {
        match self {
            Preset::Goose => "goose",
            Preset::GooseLatex => "goose-latex",
            Preset::GooseTickIn => "goose-tick-in",
            Preset::GooseTickLower => "goose-tick-lower",
        }
    }

    /// Apply the preset overrides on a theme
    pub fn apply(&self, theme: &mut Theme) {
        match self {
            Preset::Goose => {
                theme.fig_size = geom::Size::new(8.0 * defaults::DPI, 6.0 * defaults::DPI);
                theme.font.weight = FontWeight::Normal;
                theme.font.size = 16.0;
                theme.label_scale = defaults::FONT_SCALE_MEDIUM;
                theme.title_scale = defaults::FONT_SCALE_MEDIUM;
                theme.ticks.label_scale = defaults::FONT_SCALE_SMALL;
                theme.ticks.top = true;
                theme.ticks.right = true;
                theme.color_cycle = GOOSE_CYCLE
                    .iter()
                    .filter_map(|c| c.parse().ok())
                    .collect();
                theme.legend = LegendStyle {
                    font_scale: defaults::FONT_SCALE_MEDIUM,
                    fancybox: true,
                    column_spacing: 1.0,
                    handle_text_pad: 0.2,
                };
                theme.line_width = 2.0;
                theme.colormap = Colormap::AFMHOT;
                theme.errorbar_capsize = 2.0;
                theme.background = None;
            }
            Preset::GooseLatex => {
                theme.font.family = FontFamily::LatexSerif;
                theme.font.weight = FontWeight::Bold;
                theme.font.size = 18.0;
                theme.font.usetex = true;
            }
            Preset::GooseTickIn => {
                theme.ticks.direction = TickDirection::In;
            }
            Preset::GooseTickLower => {
                theme.ticks.top = false;
                theme.ticks.right = false;
                theme.spines.top = false;
                theme.spines.right = false;
            }
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .find(|p| p.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
