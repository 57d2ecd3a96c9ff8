//! Axes: limits, scales, ticks, labels and series
use crate::des::series::{Line, Patches, Series, Text};
use crate::style::defaults;
use crate::{Error, transform};

/// Scale of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Linear scale
    #[default]
    Linear,
    /// Base-10 logarithmic scale
    Log,
}

/// Units in which coordinates are given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Data coordinates
    #[default]
    Absolute,
    /// Fraction of the axis, 0 at the lower limit and 1 at the upper limit,
    /// respecting the scale of the axis
    Relative,
}

/// Explicit tick locations and their labels
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    locs: Vec<f64>,
    labels: Option<Vec<String>>,
}

impl Ticks {
    /// Ticks at `locs`, with labels formatted by the drawing stage
    pub fn new(locs: Vec<f64>) -> Self {
        Ticks { locs, labels: None }
    }

    /// Ticks at `locs` with explicit labels (an empty label hides the tick label).
    /// Fails if the number of labels and locations differ.
    pub fn with_labels(locs: Vec<f64>, labels: Vec<String>) -> Result<Self, Error> {
        crate::error::check_len("labels", locs.len(), labels.len())?;
        Ok(Ticks {
            locs,
            labels: Some(labels),
        })
    }

    pub(crate) fn from_parts(locs: Vec<f64>, labels: Vec<String>) -> Self {
        Ticks {
            locs,
            labels: Some(labels),
        }
    }

    /// Tick locations
    pub fn locs(&self) -> &[f64] {
        &self.locs
    }

    /// Tick labels, if explicit
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }
}

/// One axis (x or y) of an [`Axes`]
#[derive(Debug, Clone, Default)]
pub struct Axis {
    scale: Scale,
    lim: Option<(f64, f64)>,
    label: Option<String>,
    ticks: Option<Ticks>,
    minor_ticks: Option<Ticks>,
}

impl Axis {
    /// The scale of the axis
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// The explicit limits, if set
    pub fn explicit_lim(&self) -> Option<(f64, f64)> {
        self.lim
    }

    /// The axis label
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The explicit major ticks, if set
    pub fn ticks(&self) -> Option<&Ticks> {
        self.ticks.as_ref()
    }

    /// The explicit minor ticks, if set
    pub fn minor_ticks(&self) -> Option<&Ticks> {
        self.minor_ticks.as_ref()
    }
}

/// Handle of a series in its axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub(crate) usize);

impl SeriesId {
    /// Index of the series in [`Axes::series`]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Axes: a plotting area with x and y axes
///
/// Limits are either set explicitly, or autoscaled from the data of
/// lines and patches with a 5% margin.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    x: Axis,
    y: Axis,
    title: Option<String>,
    legend: bool,
    series: Vec<Series>,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    const NAN: Bounds = Bounds {
        lo: f64::NAN,
        hi: f64::NAN,
    };

    fn add(&mut self, v: f64, scale: Scale) {
        if !v.is_finite() || (scale == Scale::Log && v <= 0.0) {
            return;
        }
        // NaN comparisons are false, so the first value always gets in
        if !(self.lo <= v) {
            self.lo = v;
        }
        if !(self.hi >= v) {
            self.hi = v;
        }
    }

    fn is_empty(&self) -> bool {
        self.lo.is_nan()
    }
}

fn autoscale(bounds: Bounds, scale: Scale) -> (f64, f64) {
    if bounds.is_empty() {
        return match scale {
            Scale::Linear => (0.0, 1.0),
            Scale::Log => (1.0, 10.0),
        };
    }
    match scale {
        Scale::Linear => {
            let (lo, hi) = (bounds.lo, bounds.hi);
            if lo == hi {
                let delta = if lo == 0.0 { 0.5 } else { 0.05 * lo.abs() };
                return (lo - delta, hi + delta);
            }
            let margin = defaults::AUTO_MARGIN * (hi - lo);
            (lo - margin, hi + margin)
        }
        Scale::Log => {
            let (lo, hi) = (bounds.lo.log10(), bounds.hi.log10());
            if lo == hi {
                return (10f64.powf(lo - 0.5), 10f64.powf(hi + 0.5));
            }
            let margin = defaults::AUTO_MARGIN * (hi - lo);
            (10f64.powf(lo - margin), 10f64.powf(hi + margin))
        }
    }
}

impl Axes {
    /// Create empty axes, with linear scales and autoscaled limits
    pub fn new() -> Self {
        Axes::default()
    }

    /// The x axis
    pub fn x_axis(&self) -> &Axis {
        &self.x
    }

    /// The y axis
    pub fn y_axis(&self) -> &Axis {
        &self.y
    }

    /// Scale of the x axis
    pub fn xscale(&self) -> Scale {
        self.x.scale
    }

    /// Scale of the y axis
    pub fn yscale(&self) -> Scale {
        self.y.scale
    }

    /// Set the scale of the x axis
    pub fn set_xscale(&mut self, scale: Scale) {
        self.x.scale = scale;
    }

    /// Set the scale of the y axis
    pub fn set_yscale(&mut self, scale: Scale) {
        self.y.scale = scale;
    }

    /// Whether both axes are logarithmic
    pub fn is_loglog(&self) -> bool {
        self.x.scale == Scale::Log && self.y.scale == Scale::Log
    }

    /// Set the limits of the x axis
    pub fn set_xlim(&mut self, lim: (f64, f64)) {
        self.x.lim = Some(lim);
    }

    /// Set the limits of the y axis
    pub fn set_ylim(&mut self, lim: (f64, f64)) {
        self.y.lim = Some(lim);
    }

    /// Return to autoscaled limits for both axes
    pub fn autoscale(&mut self) {
        self.x.lim = None;
        self.y.lim = None;
    }

    /// Current limits of the x axis: explicit, or autoscaled from the data
    pub fn xlim(&self) -> (f64, f64) {
        match self.x.lim {
            Some(lim) => lim,
            None => autoscale(self.data_bounds().0, self.x.scale),
        }
    }

    /// Current limits of the y axis: explicit, or autoscaled from the data
    pub fn ylim(&self) -> (f64, f64) {
        match self.y.lim {
            Some(lim) => lim,
            None => autoscale(self.data_bounds().1, self.y.scale),
        }
    }

    /// Freeze the current limits, such that adding data does not change them anymore
    pub fn fix_lims(&mut self) {
        let (xlim, ylim) = (self.xlim(), self.ylim());
        self.set_xlim(xlim);
        self.set_ylim(ylim);
    }

    fn data_bounds(&self) -> (Bounds, Bounds) {
        let (mut xb, mut yb) = (Bounds::NAN, Bounds::NAN);
        let (xs, ys) = (self.x.scale, self.y.scale);
        for s in &self.series {
            s.for_each_point(|x, y| {
                xb.add(x, xs);
                yb.add(y, ys);
            });
        }
        (xb, yb)
    }

    /// Set the label of the x axis
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.x.label = Some(label.into());
    }

    /// Set the label of the y axis
    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.y.label = Some(label.into());
    }

    /// Set the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// The title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Show or hide the legend of named series
    pub fn set_legend(&mut self, legend: bool) {
        self.legend = legend;
    }

    /// Whether the legend is shown
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Set the major ticks of the x axis
    pub fn set_xticks(&mut self, ticks: Ticks) {
        self.x.ticks = Some(ticks);
    }

    /// Set the major ticks of the y axis
    pub fn set_yticks(&mut self, ticks: Ticks) {
        self.y.ticks = Some(ticks);
    }

    /// Set the minor ticks of the x axis
    pub fn set_minor_xticks(&mut self, ticks: Ticks) {
        self.x.minor_ticks = Some(ticks);
    }

    /// Set the minor ticks of the y axis
    pub fn set_minor_yticks(&mut self, ticks: Ticks) {
        self.y.minor_ticks = Some(ticks);
    }

    /// All series, in drawing order
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Get a series by its handle
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.0)
    }

    fn push(&mut self, series: Series) -> SeriesId {
        self.series.push(series);
        SeriesId(self.series.len() - 1)
    }

    /// Add a line in data coordinates
    pub fn plot(&mut self, line: Line) -> SeriesId {
        self.push(line.into())
    }

    /// Add a line given in `units`.
    ///
    /// With relative units, the limits are fixed first and the
    /// coordinates are converted to data coordinates using the current limits.
    pub fn plot_units(&mut self, mut line: Line, units: Units) -> SeriesId {
        if units == Units::Relative {
            self.fix_lims();
            let x = self.rel2abs_x_slice(line.x());
            let y = self.rel2abs_y_slice(line.y());
            line.set_data(x, y);
        }
        self.push(line.into())
    }

    /// Add a text given in `units`
    pub fn text(&mut self, mut text: Text, units: Units) -> SeriesId {
        if units == Units::Relative {
            self.fix_lims();
            let (x, y) = text.pos();
            text.set_pos(self.rel2abs_x(x), self.rel2abs_y(y));
        }
        self.push(text.into())
    }

    /// Add a collection of patches
    pub fn add_patches(&mut self, patches: Patches) -> SeriesId {
        self.push(patches.into())
    }

    fn rel2abs_x_slice(&self, x: &[f64]) -> Vec<f64> {
        transform::rel2abs_slice(x, self.xlim(), self.xscale())
    }

    fn rel2abs_y_slice(&self, y: &[f64]) -> Vec<f64> {
        transform::rel2abs_slice(y, self.ylim(), self.yscale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn empty_lims() {
        let mut axes = Axes::new();
        assert_eq!(axes.xlim(), (0.0, 1.0));
        axes.set_yscale(Scale::Log);
        assert_eq!(axes.ylim(), (1.0, 10.0));
    }

    #[test]
    fn autoscale_margin() {
        let mut axes = Axes::new();
        axes.plot(Line::new(vec![0.0, 10.0], vec![1.0, 100.0]).unwrap());
        let (lo, hi) = axes.xlim();
        assert_near!(abs, lo, -0.5);
        assert_near!(abs, hi, 10.5);

        axes.set_yscale(Scale::Log);
        let (lo, hi) = axes.ylim();
        assert_near!(rel, lo.log10(), -0.1, 1e-12);
        assert_near!(rel, hi.log10(), 2.1, 1e-12);
    }

    #[test]
    fn log_scale_skips_non_positive() {
        let mut axes = Axes::new();
        axes.set_xscale(Scale::Log);
        axes.plot(Line::new(vec![0.0, 1.0, 100.0], vec![0.0, 1.0, 2.0]).unwrap());
        let (lo, _) = axes.xlim();
        assert!(lo > 0.0);
    }

    #[test]
    fn relative_units() {
        let mut axes = Axes::new();
        axes.set_xlim((0.0, 10.0));
        axes.set_yscale(Scale::Log);
        axes.set_ylim((1.0, 100.0));
        let id = axes.plot_units(
            Line::new(vec![0.0, 0.5], vec![0.0, 0.5]).unwrap(),
            Units::Relative,
        );
        let Some(Series::Line(line)) = axes.get(id) else {
            panic!("expected a line");
        };
        assert_near!(abs, line.x()[1], 5.0);
        assert_near!(abs, line.y()[0], 1.0);
        assert_near!(rel, line.y()[1], 10.0, 1e-12);
    }

    #[test]
    fn relative_units_fix_lims() {
        let mut axes = Axes::new();
        axes.plot(Line::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());
        let before = axes.xlim();
        axes.text(Text::new("a", 0.5, 0.5), Units::Relative);
        axes.plot(Line::new(vec![0.0, 100.0], vec![0.0, 1.0]).unwrap());
        assert_eq!(axes.xlim(), before);
    }
}
