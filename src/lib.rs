#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
/*!
 * # goosempl
 * _plotting utilities_. Themes, histogram binning, curve fitting and empirical
 * distributions, on top of a small declarative plotting model.
 *
 * The numeric utilities work on plain `f64` slices and return plain vectors.
 * Plotting helpers mutate a caller-supplied [`des::Axes`].
 *
 * ```
 * use goosempl::{des, fit, hist};
 *
 * let x = goosempl::utils::linspace(0.0, 1.0, 1000);
 * let y: Vec<f64> = x.iter().map(|x| 1.2 * x.powf(3.4)).collect();
 *
 * // fit a power-law, and draw the fit on log-log axes
 * let res = fit::fit_powerlaw(&x, &y, &fit::FitParams::default()).unwrap();
 * assert!((res.prefactor().unwrap() - 1.2).abs() < 1e-6);
 *
 * let mut fig = des::Figure::new();
 * let axes = fig.axes_mut(0, 0);
 * axes.set_xscale(des::Scale::Log);
 * axes.set_yscale(des::Scale::Log);
 * res.plot(axes, &fit::FitPlot::default().with_label(fit::Label::auto("x")))
 *     .unwrap();
 *
 * // bin-edges with at least 10 data-points per bin
 * let opts = hist::BinEdges::default().with_min_count(10usize);
 * let edges = hist::histogram_bin_edges(&y, &opts).unwrap();
 * assert!(edges.windows(2).all(|w| w[0] < w[1]));
 * ```
 *
 * ## Notes about the design
 *
 * Figures are described in the [`des`] module, independently of any rendering surface.
 * Themes ([`style::Theme`]) are explicit configuration objects handed to the drawing stage,
 * there is no global style state.
 * The [`drawing`] module bridges a [`des::Figure`] to a [`render::Surface`].
 * The `goosempl-svg` crate provides an SVG surface.
 */

pub mod des;
pub mod dist;
pub mod drawing;
mod error;
pub mod fit;
pub mod hist;
pub mod patch;
pub mod powerlaw;
pub mod render;
pub mod style;
pub mod ticks;
pub mod transform;

pub use drawing::Drawing;
pub use error::Error;
pub use style::Theme;

/// Rexports of [`goosempl_base::color`]` items
pub mod color {
    pub use goosempl_base::color::*;
}
pub use color::{Color, ColorU8, ResolveColor};

/// Rexports of [`goosempl_base::geom`]` items
pub mod geom {
    pub use goosempl_base::geom::*;
}

pub mod utils {
    //! Utility functions for data generation and interpolation

    /// Create a linearly spaced vector of `num` elements between `start` and `end`
    ///
    /// The end point is exactly `end`.
    pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
        match num {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (num as f64 - 1.0);
                let mut res: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
                res[num - 1] = end;
                res
            }
        }
    }

    /// Create a log-spaced vector of `num` elements between `10^start` and `10^end`
    pub fn logspace(start: f64, end: f64, num: usize) -> Vec<f64> {
        linspace(start, end, num)
            .into_iter()
            .map(|e| 10f64.powf(e))
            .collect()
    }

    /// One-dimensional linear interpolation of `x` on the points `(xp, fp)`.
    ///
    /// `xp` must be increasing. Values outside the range of `xp`
    /// are clamped to the first or last value of `fp`.
    pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
        debug_assert_eq!(xp.len(), fp.len());
        let n = xp.len().min(fp.len());
        if n == 0 {
            return f64::NAN;
        }
        if x <= xp[0] {
            return fp[0];
        }
        if x >= xp[n - 1] {
            return fp[n - 1];
        }
        // first index with xp[i] > x, guaranteed in 1..n
        let i = xp[..n].partition_point(|v| *v <= x);
        let (x0, x1) = (xp[i - 1], xp[i]);
        let (f0, f1) = (fp[i - 1], fp[i]);
        if x1 == x0 {
            return f1;
        }
        f0 + (x - x0) * (f1 - f0) / (x1 - x0)
    }
}

/// Module containing missing configuration values
/// Basically we put here all magic values that would require proper parameters
mod missing_params {
    pub const AXES_PADDING_LEFT: f32 = 80.0;
    pub const AXES_PADDING_RIGHT: f32 = 25.0;
    pub const AXES_PADDING_TOP: f32 = 40.0;
    pub const AXES_PADDING_BOTTOM: f32 = 65.0;

    pub const SPINE_WIDTH: f32 = 1.0;
    pub const TICK_LABEL_MARGIN: f32 = 6.0;
    pub const AXIS_LABEL_MARGIN: f32 = 8.0;

    pub const LEGEND_MARGIN: f32 = 12.0;
    pub const LEGEND_PADDING: f32 = 6.0;
    pub const LEGEND_LINE_LENGTH: f32 = 25.0;
    pub const LEGEND_ROW_SPACING: f32 = 1.4;

    pub const FIG_TITLE_MARGIN: f32 = 10.0;
    pub const PATCH_EDGE_WIDTH: f32 = 1.0;
    pub const MINOR_TICK_RATIO: f32 = 0.6;

    /// Average glyph width relative to the font size, to estimate text extents without shaping
    pub const CHAR_WIDTH_RATIO: f32 = 0.55;
}
