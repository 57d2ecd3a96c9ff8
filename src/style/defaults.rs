use crate::{ColorU8, geom};

/// Figure units per inch
pub const DPI: f32 = 100.0;

pub const FIG_SIZE: geom::Size = geom::Size::new(6.4 * DPI, 4.8 * DPI);
pub const FONT_SIZE: f32 = 10.0;
pub const LINE_WIDTH: f32 = 1.5;
pub const TICK_SIZE: f32 = 3.5;

pub const SANS_SERIF_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
pub const SERIF_FAMILY: &str = "DejaVu Serif, Times New Roman, Times, serif";

/// Font names that mimic LaTeX, by order of preference
pub const LATEX_SERIF_FAMILY: &str =
    "Computer Modern Roman, CMU Serif, Times New Roman, Times, DejaVu Serif, serif";

/// Relative font sizes of the named matplotlib sizes
pub const FONT_SCALE_MEDIUM: f32 = 1.0;
pub const FONT_SCALE_SMALL: f32 = 0.833;
pub const FONT_SCALE_LARGE: f32 = 1.2;

/// Number of samples along a fitted curve
pub const FIT_SAMPLES: usize = 1000;

/// Relative margin added by autoscaling of data limits
pub const AUTO_MARGIN: f64 = 0.05;

/// Relative margin added by autoscaling of patches
pub const PATCH_MARGIN: f64 = 0.1;

/// Legend frame
pub const LEGEND_BORDER: ColorU8 = ColorU8::from_rgb(0xcc, 0xcc, 0xcc);
pub const LEGEND_FILL_OPACITY: f32 = 0.8;
pub const LEGEND_CORNER_RADIUS: f32 = 4.0;
