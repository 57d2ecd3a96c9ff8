/*!
 * Least-squares curve fitting.
 *
 * All [`Model`]s are linear in their parameters after a change of variables,
 * e.g. a power-law `y = c x^b` becomes `ln y = ln c + b ln x`.
 * Fits are solved in closed form on the transformed data, optionally weighted
 * by the standard deviations of `y`.
 *
 * ```
 * use goosempl::fit::{self, FitParams, Param};
 *
 * let x = goosempl::utils::linspace(0.0, 1.0, 1000);
 * let y: Vec<f64> = x.iter().map(|x| 1.2 + 3.4 * x).collect();
 *
 * let res = fit::fit_linear(&x, &y, &FitParams::default().with(Param::Offset, 1.2)).unwrap();
 * assert!((res.slope().unwrap() - 3.4).abs() < 1e-9);
 * ```
 */
use std::fmt;

use crate::des::{self, Axes, Scale, SeriesId};
use crate::style::{self, defaults};
use crate::ticks::latex_float;
use crate::{Error, utils};

/// Smallest standard deviation used to compute weights
const SIGMA_EPS: f64 = f64::EPSILON;

/// Fitted relationship between `x` and `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// `y = c x^b`, parameters (prefactor `c`, exponent `b`)
    PowerLaw,
    /// `y = c exp(b x)`, parameters (prefactor `c`, exponent `b`)
    Exp,
    /// `y = a + b ln(x)`, parameters (offset `a`, prefactor `b`)
    Log,
    /// `y = a + b x`, parameters (offset `a`, slope `b`)
    Linear,
}

/// A named parameter, resolved to the first or second parameter of a [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// First parameter, whatever the model
    First,
    /// Second parameter, whatever the model
    Second,
    /// Prefactor of [`Model::PowerLaw`], [`Model::Exp`] and [`Model::Log`]
    Prefactor,
    /// Exponent of [`Model::PowerLaw`] and [`Model::Exp`]
    Exponent,
    /// Offset of [`Model::Log`] and [`Model::Linear`]
    Offset,
    /// Slope of [`Model::Linear`]
    Slope,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Param::First => "first",
            Param::Second => "second",
            Param::Prefactor => "prefactor",
            Param::Exponent => "exponent",
            Param::Offset => "offset",
            Param::Slope => "slope",
        };
        f.write_str(name)
    }
}

impl Model {
    fn log_x(&self) -> bool {
        matches!(self, Model::PowerLaw | Model::Log)
    }

    fn log_y(&self) -> bool {
        matches!(self, Model::PowerLaw | Model::Exp)
    }

    /// Names of the (first, second) parameters
    pub fn param_names(&self) -> (&'static str, &'static str) {
        match self {
            Model::PowerLaw | Model::Exp => ("prefactor", "exponent"),
            Model::Log => ("offset", "prefactor"),
            Model::Linear => ("offset", "slope"),
        }
    }

    /// Index (0 or 1) of a named parameter, `None` if the model has no such parameter
    pub fn slot(&self, param: Param) -> Option<usize> {
        match (self, param) {
            (_, Param::First) => Some(0),
            (_, Param::Second) => Some(1),
            (Model::PowerLaw | Model::Exp, Param::Prefactor) => Some(0),
            (Model::PowerLaw | Model::Exp, Param::Exponent) => Some(1),
            (Model::Log, Param::Offset) => Some(0),
            (Model::Log, Param::Prefactor) => Some(1),
            (Model::Linear, Param::Offset) => Some(0),
            (Model::Linear, Param::Slope) => Some(1),
            _ => None,
        }
    }

    /// Evaluate the model at `x`
    pub fn eval(&self, params: (f64, f64), x: f64) -> f64 {
        let (p0, p1) = params;
        match self {
            Model::PowerLaw => p0 * x.powf(p1),
            Model::Exp => p0 * (p1 * x).exp(),
            Model::Log => p0 + p1 * x.ln(),
            Model::Linear => p0 + p1 * x,
        }
    }

    /// Transformed `(u, v)` coordinates in which the model is a straight line
    fn linearize(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if (self.log_x() && x <= 0.0) || (self.log_y() && y <= 0.0) {
            return None;
        }
        let u = if self.log_x() { x.ln() } else { x };
        let v = if self.log_y() { y.ln() } else { y };
        (u.is_finite() && v.is_finite()).then_some((u, v))
    }

    /// Fit the model on `(x, y)`
    pub fn fit(&self, x: &[f64], y: &[f64], opts: &FitParams) -> Result<FitResult, Error> {
        crate::error::check_len("y", x.len(), y.len())?;
        if let Some(yerr) = &opts.yerr {
            crate::error::check_len("yerr", x.len(), yerr.len())?;
        }
        let (pin0, pin1) = opts.resolve(*self)?;

        // intercept in the linear space
        let pin_a = match pin0 {
            Some(c) if self.log_y() => {
                if c <= 0.0 {
                    return Err(Error::NonPositiveParameter(self.param_names().0));
                }
                Some(c.ln())
            }
            p => p,
        };

        let mut pts = Vec::with_capacity(x.len());
        let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
        for i in 0..x.len() {
            let Some((u, v)) = self.linearize(x[i], y[i]) else {
                continue;
            };
            let w = match &opts.yerr {
                None => 1.0,
                Some(yerr) => {
                    let sigma = if self.log_y() {
                        (yerr[i] / y[i]).abs()
                    } else {
                        yerr[i].abs()
                    };
                    if !sigma.is_finite() {
                        continue;
                    }
                    1.0 / sigma.max(SIGMA_EPS).powi(2)
                }
            };
            x_range = (x_range.0.min(x[i]), x_range.1.max(x[i]));
            pts.push((u, v, w));
        }
        if pts.len() < x.len() {
            log::warn!(
                "{:?} fit: ignoring {} unusable data points out of {}",
                self,
                x.len() - pts.len(),
                x.len()
            );
        }

        let free = pin_a.is_none() as usize + pin1.is_none() as usize;
        let required = free.max(1);
        if pts.len() < required {
            return Err(Error::InsufficientData {
                required,
                available: pts.len(),
            });
        }

        let line = fit_line(&pts, pin_a, pin1)?;
        log::debug!(
            "{:?} fit on {} points: intercept = {}, slope = {}",
            self,
            pts.len(),
            line.a,
            line.b
        );

        let (params, errors) = if self.log_y() {
            let c = line.a.exp();
            ((c, line.b), (c * line.a_err, line.b_err))
        } else {
            ((line.a, line.b), (line.a_err, line.b_err))
        };

        Ok(FitResult {
            model: *self,
            params,
            errors,
            x_range,
            n: pts.len(),
        })
    }
}

struct LineFit {
    a: f64,
    b: f64,
    a_err: f64,
    b_err: f64,
}

/// Weighted least squares fit of `v = a + b u` on `(u, v, w)` points,
/// with `a` and/or `b` optionally pinned.
///
/// Moments are taken around the weighted means, so that a large offset of `u`
/// does not cancel out the slope.
fn fit_line(
    pts: &[(f64, f64, f64)],
    pin_a: Option<f64>,
    pin_b: Option<f64>,
) -> Result<LineFit, Error> {
    let (mut s, mut su, mut sv) = (0.0, 0.0, 0.0);
    for (u, v, w) in pts {
        s += w;
        su += w * u;
        sv += w * v;
    }
    let (um, vm) = (su / s, sv / s);

    // centered moments, and the raw second moment for a pinned intercept
    let (mut cuu, mut cuv, mut suu) = (0.0, 0.0, 0.0);
    for (u, v, w) in pts {
        let (du, dv) = (u - um, v - vm);
        cuu += w * du * du;
        cuv += w * du * dv;
        suu += w * u * u;
    }
    let tol = (pts.len() as f64 * f64::EPSILON * um).powi(2) * s;

    let (a, b) = match (pin_a, pin_b) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(b)) => (vm - b * um, b),
        (Some(a), None) => {
            if !(suu > 0.0) {
                return Err(Error::DegenerateData);
            }
            let suv: f64 = pts.iter().map(|(u, v, w)| w * u * (v - a)).sum();
            (a, suv / suu)
        }
        (None, None) => {
            if !(cuu > tol) {
                return Err(Error::DegenerateData);
            }
            let b = cuv / cuu;
            (vm - b * um, b)
        }
    };

    let free = pin_a.is_none() as usize + pin_b.is_none() as usize;
    if free == 0 {
        return Ok(LineFit {
            a,
            b,
            a_err: 0.0,
            b_err: 0.0,
        });
    }

    let chi2: f64 = pts
        .iter()
        .map(|(u, v, w)| {
            let r = v - a - b * u;
            w * r * r
        })
        .sum();
    let s2 = if pts.len() > free {
        chi2 / (pts.len() - free) as f64
    } else {
        f64::INFINITY
    };

    let (var_a, var_b) = match (pin_a, pin_b) {
        (None, None) => (s2 * (1.0 / s + um * um / cuu), s2 / cuu),
        (None, Some(_)) => (s2 / s, 0.0),
        (Some(_), None) => (0.0, s2 / suu),
        (Some(_), Some(_)) => (0.0, 0.0),
    };

    Ok(LineFit {
        a,
        b,
        a_err: var_a.sqrt(),
        b_err: var_b.sqrt(),
    })
}

/// Options of a fit: pinned parameters and standard deviations of `y`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitParams {
    pins: Vec<(Param, f64)>,
    /// Standard deviation of each `y` value, used to weight the fit
    pub yerr: Option<Vec<f64>>,
}

impl FitParams {
    /// Pin a parameter to a value instead of fitting it, returning self for chaining
    pub fn with(mut self, param: Param, value: f64) -> Self {
        self.pins.push((param, value));
        self
    }

    /// Pin the first parameter, returning self for chaining
    pub fn with_first(self, value: f64) -> Self {
        self.with(Param::First, value)
    }

    /// Pin the second parameter, returning self for chaining
    pub fn with_second(self, value: f64) -> Self {
        self.with(Param::Second, value)
    }

    /// Set the standard deviations of `y`, returning self for chaining
    pub fn with_yerr(self, yerr: Vec<f64>) -> Self {
        FitParams {
            yerr: Some(yerr),
            ..self
        }
    }

    /// Pinned (first, second) parameters for `model`. Later pins override earlier ones.
    fn resolve(&self, model: Model) -> Result<(Option<f64>, Option<f64>), Error> {
        let mut pinned = [None, None];
        for (param, value) in &self.pins {
            let slot = model.slot(*param).ok_or_else(|| {
                Error::InconsistentArgs(format!("{:?} model has no {} parameter", model, param))
            })?;
            pinned[slot] = Some(*value);
        }
        Ok((pinned[0], pinned[1]))
    }
}

/// Result of a fit
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// The fitted model
    pub model: Model,
    /// Fitted (or pinned) parameters, see [`Model`] for their meaning
    pub params: (f64, f64),
    /// Standard errors of the parameters (zero for pinned parameters)
    pub errors: (f64, f64),
    /// Range of `x` of the data points used by the fit
    pub x_range: (f64, f64),
    /// Number of data points used by the fit
    pub n: usize,
}

impl FitResult {
    fn param(&self, param: Param) -> Option<f64> {
        match self.model.slot(param)? {
            0 => Some(self.params.0),
            _ => Some(self.params.1),
        }
    }

    /// The prefactor, for models that have one
    pub fn prefactor(&self) -> Option<f64> {
        self.param(Param::Prefactor)
    }

    /// The exponent, for models that have one
    pub fn exponent(&self) -> Option<f64> {
        self.param(Param::Exponent)
    }

    /// The offset, for models that have one
    pub fn offset(&self) -> Option<f64> {
        self.param(Param::Offset)
    }

    /// The slope, for models that have one
    pub fn slope(&self) -> Option<f64> {
        self.param(Param::Slope)
    }

    /// Evaluate the fitted model at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.model.eval(self.params, x)
    }

    /// `n` points of the fitted curve between `from` and `to`,
    /// log-spaced if the model takes the logarithm of `x`
    fn sample(&self, from: f64, to: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
        let x = if self.model.log_x() {
            utils::logspace(from.log10(), to.log10(), n)
        } else {
            utils::linspace(from, to, n)
        };
        let y = x.iter().map(|x| self.eval(*x)).collect();
        (x, y)
    }

    /// Label of the fitted curve, in LaTeX notation, using `var` as variable name
    pub fn auto_label(&self, var: &str) -> String {
        let (p0, p1) = self.params;
        let (f0, f1) = (latex_float(p0, 3), latex_float(p1, 3));
        match self.model {
            Model::PowerLaw => format!("${} {}^{{{}}}$", f0, var, f1),
            Model::Exp => format!("${} e^{{{} {}}}$", f0, f1, var),
            Model::Log if p1 < 0.0 => {
                format!("${} - {} \\ln({})$", f0, latex_float(-p1, 3), var)
            }
            Model::Log => format!("${} + {} \\ln({})$", f0, f1, var),
            Model::Linear if p1 < 0.0 => {
                format!("${} - {} {}$", f0, latex_float(-p1, 3), var)
            }
            Model::Linear => format!("${} + {} {}$", f0, f1, var),
        }
    }

    /// Plot the fitted curve over the range of the data, and optionally its extrapolation
    /// up to the current limits of the axes.
    ///
    /// Returns the handle of the fitted curve.
    pub fn plot(&self, axes: &mut Axes, opts: &FitPlot) -> Result<SeriesId, Error> {
        let (lo, hi) = self.x_range;
        let (x, y) = self.sample(lo, hi, opts.samples);
        let mut line = des::Line::new(x, y)?.with_line(opts.line.clone());
        if let Some(label) = &opts.label {
            line = line.with_name(label.format(self));
        }

        if !opts.extrapolate {
            return Ok(axes.plot(line));
        }

        // extrapolation reaches the limits as they are before adding the curve
        axes.fix_lims();
        let (xmin, xmax) = axes.xlim();
        let id = axes.plot(line);

        let color = match opts.line.color {
            style::series::Color::Auto => style::series::Color::Index(id.index()),
            c => c,
        };
        let dashed = opts
            .line
            .clone()
            .with_color(color)
            .with_pattern(style::LinePattern::dashed());

        let positive = |v: f64| !self.model.log_x() || v > 0.0;
        if xmin < lo && positive(xmin) {
            let (x, y) = self.sample(xmin, lo, opts.samples);
            axes.plot(des::Line::new(x, y)?.with_line(dashed.clone()));
        }
        if xmax > hi && positive(xmax) {
            let (x, y) = self.sample(hi, xmax, opts.samples);
            axes.plot(des::Line::new(x, y)?.with_line(dashed));
        }
        Ok(id)
    }
}

/// Label of a fitted curve
#[derive(Clone)]
pub enum Label {
    /// Fixed text
    Text(String),
    /// Formula of the fit, using the given variable name (see [`FitResult::auto_label`])
    Auto(String),
    /// Custom formatting
    Custom(fn(&FitResult) -> String),
}

impl Label {
    /// Formula label, using `var` as variable name
    pub fn auto(var: impl Into<String>) -> Self {
        Label::Auto(var.into())
    }

    fn format(&self, res: &FitResult) -> String {
        match self {
            Label::Text(text) => text.clone(),
            Label::Auto(var) => res.auto_label(var),
            Label::Custom(f) => f(res),
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Label::Auto(var) => f.debug_tuple("Auto").field(var).finish(),
            Label::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

/// Options of [`FitResult::plot`]
#[derive(Debug, Clone)]
pub struct FitPlot {
    /// Style of the fitted curve
    pub line: style::series::Line,
    /// Label of the fitted curve
    pub label: Option<Label>,
    /// Draw the (dashed) extrapolation up to the limits of the axes
    pub extrapolate: bool,
    /// Number of points of the fitted curve
    pub samples: usize,
}

impl Default for FitPlot {
    fn default() -> Self {
        FitPlot {
            line: style::series::Line::default(),
            label: None,
            extrapolate: false,
            samples: defaults::FIT_SAMPLES,
        }
    }
}

impl FitPlot {
    /// Set the line style, returning self for chaining
    pub fn with_line(self, line: impl Into<style::series::Line>) -> Self {
        FitPlot {
            line: line.into(),
            ..self
        }
    }

    /// Set the label, returning self for chaining
    pub fn with_label(self, label: impl Into<Label>) -> Self {
        FitPlot {
            label: Some(label.into()),
            ..self
        }
    }

    /// Enable the extrapolation, returning self for chaining
    pub fn with_extrapolate(self, extrapolate: bool) -> Self {
        FitPlot {
            extrapolate,
            ..self
        }
    }
}

/// Fit `y = c x^b`. Points with non-positive `x` or `y` are ignored.
pub fn fit_powerlaw(x: &[f64], y: &[f64], opts: &FitParams) -> Result<FitResult, Error> {
    Model::PowerLaw.fit(x, y, opts)
}

/// Fit `y = c exp(b x)`. Points with non-positive `y` are ignored.
pub fn fit_exp(x: &[f64], y: &[f64], opts: &FitParams) -> Result<FitResult, Error> {
    Model::Exp.fit(x, y, opts)
}

/// Fit `y = a + b ln(x)`. Points with non-positive `x` are ignored.
pub fn fit_log(x: &[f64], y: &[f64], opts: &FitParams) -> Result<FitResult, Error> {
    Model::Log.fit(x, y, opts)
}

/// Fit `y = a + b x`
pub fn fit_linear(x: &[f64], y: &[f64], opts: &FitParams) -> Result<FitResult, Error> {
    Model::Linear.fit(x, y, opts)
}

/// Whether `axes` shows the model as a straight line
pub fn is_straight(model: Model, axes: &Axes) -> bool {
    let log = |s: Scale| s == Scale::Log;
    log(axes.xscale()) == model.log_x() && log(axes.yscale()) == model.log_y()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_distr::Distribution;

    use super::*;
    use crate::des::Series;
    use crate::tests::{Near, assert_near};

    fn data(model: Model, params: (f64, f64)) -> (Vec<f64>, Vec<f64>) {
        let x = utils::linspace(0.0, 1.0, 1000);
        let y = x.iter().map(|x| model.eval(params, *x)).collect();
        (x, y)
    }

    fn check_all_pins(model: Model, params: (f64, f64)) {
        let (x, y) = data(model, params);
        let cases = [
            FitParams::default(),
            FitParams::default().with_first(params.0),
            FitParams::default().with_second(params.1),
        ];
        for opts in cases {
            let res = model.fit(&x, &y, &opts).unwrap();
            assert_near!(rel, res.params.0, params.0, 1e-8);
            assert_near!(rel, res.params.1, params.1, 1e-8);
        }
    }

    #[test]
    fn powerlaw() {
        check_all_pins(Model::PowerLaw, (1.2, 3.4));
        let (x, y) = data(Model::PowerLaw, (1.2, 3.4));
        let res = fit_powerlaw(&x, &y, &FitParams::default()).unwrap();
        assert_eq!(res.n, 999);
        assert_eq!(res.prefactor(), Some(res.params.0));
        assert_eq!(res.slope(), None);
        assert!(res.errors.0 < 1e-8 && res.errors.1 < 1e-8);
    }

    #[test]
    fn exp() {
        check_all_pins(Model::Exp, (1.2, 3.4));
        check_all_pins(Model::Exp, (1.2, -3.4));
    }

    #[test]
    fn log() {
        check_all_pins(Model::Log, (1.2, 3.4));
        check_all_pins(Model::Log, (1.2, -3.4));
        let (x, y) = data(Model::Log, (1.2, 3.4));
        let opts = FitParams::default().with(Param::Prefactor, 3.4);
        let res = fit_log(&x, &y, &opts).unwrap();
        assert_near!(rel, res.offset().unwrap(), 1.2, 1e-8);
    }

    #[test]
    fn linear() {
        check_all_pins(Model::Linear, (1.2, 3.4));
        let (x, y) = data(Model::Linear, (1.2, 3.4));
        let opts = FitParams::default().with(Param::Slope, 3.4);
        let res = fit_linear(&x, &y, &opts).unwrap();
        assert_near!(rel, res.offset().unwrap(), 1.2, 1e-8);
        assert_eq!(res.errors.1, 0.0);
    }

    #[test]
    fn standard_errors_with_noise() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let noise = rand_distr::Normal::new(0.0, 0.1).unwrap();
        let x = utils::linspace(0.0, 10.0, 200);
        let y: Vec<f64> = x
            .iter()
            .map(|x| 1.0 + 2.0 * x + noise.sample(&mut rng))
            .collect();
        let res = fit_linear(&x, &y, &FitParams::default()).unwrap();
        assert_near!(abs, res.params.1, 2.0, 0.01);
        // slope error of a uniform design: sigma * sqrt(12 / (n L^2))
        let expected = 0.1 * (12.0f64 / (200.0 * 100.0)).sqrt();
        assert_near!(rel, res.errors.1, expected, 0.3);

        let yerr = vec![0.1; x.len()];
        let weighted = fit_linear(&x, &y, &FitParams::default().with_yerr(yerr)).unwrap();
        assert_near!(rel, weighted.params.1, res.params.1, 1e-10);
        assert_near!(rel, weighted.errors.1, res.errors.1, 1e-8);
    }

    #[test]
    fn errors() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(
            fit_linear(&x, &y, &FitParams::default()),
            Err(Error::DegenerateData)
        );
        assert_eq!(
            fit_powerlaw(&[1.0], &[1.0], &FitParams::default()),
            Err(Error::InsufficientData {
                required: 2,
                available: 1
            })
        );
        assert_eq!(
            fit_powerlaw(&[1.0, 2.0], &[1.0, 2.0], &FitParams::default().with_first(-1.0)),
            Err(Error::NonPositiveParameter("prefactor"))
        );
        assert!(matches!(
            fit_powerlaw(&[1.0], &[1.0, 2.0], &FitParams::default()),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            fit_exp(&[1.0, 2.0], &[1.0, 2.0], &FitParams::default().with(Param::Slope, 1.0)),
            Err(Error::InconsistentArgs(_))
        ));
    }

    #[test]
    fn linear_with_large_offset() {
        for off in [0.0, 1.7e9, 1e10] {
            let t = utils::linspace(0.0, 3600.0, 1000);
            let x: Vec<f64> = t.iter().map(|t| off + t).collect();
            let y: Vec<f64> = x.iter().map(|x| 1.2 + 3.4 * (x - off)).collect();
            let res = fit_linear(&x, &y, &FitParams::default()).unwrap();
            assert_near!(rel, res.slope().unwrap(), 3.4, 1e-8);
            assert_near!(abs, res.eval(off + 1800.0), 1.2 + 3.4 * 1800.0, 1e-3);
        }
    }

    #[test]
    fn exact_fit_has_infinite_errors() {
        let res = fit_linear(&[0.0, 1.0], &[1.0, 3.0], &FitParams::default()).unwrap();
        assert_near!(abs, res.params.1, 2.0);
        assert!(res.errors.0.is_infinite());
    }

    #[test]
    fn labels() {
        let res = FitResult {
            model: Model::PowerLaw,
            params: (1.2, 3.4),
            errors: (0.0, 0.0),
            x_range: (1.0, 2.0),
            n: 2,
        };
        assert_eq!(res.auto_label("x"), "$1.2 x^{3.4}$");
        let res = FitResult {
            model: Model::Linear,
            params: (1.2, -3.4),
            ..res
        };
        assert_eq!(res.auto_label("t"), "$1.2 - 3.4 t$");
        assert_eq!(Label::Custom(|r| format!("{}", r.n)).format(&res), "2");
    }

    #[test]
    fn plot_with_extrapolation() {
        let x = utils::linspace(1.0, 10.0, 50);
        let y: Vec<f64> = x.iter().map(|x| 2.0 * x.powf(1.5)).collect();
        let res = fit_powerlaw(&x, &y, &FitParams::default()).unwrap();

        let mut axes = Axes::new();
        axes.set_xscale(Scale::Log);
        axes.set_yscale(Scale::Log);
        axes.set_xlim((0.1, 100.0));
        assert!(is_straight(Model::PowerLaw, &axes));

        let opts = FitPlot::default()
            .with_label(Label::auto("x"))
            .with_extrapolate(true);
        let id = res.plot(&mut axes, &opts).unwrap();
        assert_eq!(axes.series().len(), 3);
        let Some(Series::Line(line)) = axes.get(id) else {
            panic!("expected a line");
        };
        assert_eq!(line.x().len(), defaults::FIT_SAMPLES);
        assert_eq!(line.name(), Some("$2 x^{1.5}$"));
        assert_near!(rel, line.x()[0], 1.0, 1e-12);

        let Series::Line(right) = &axes.series()[2] else {
            panic!("expected a line");
        };
        assert_near!(rel, *right.x().last().unwrap(), 100.0, 1e-12);
        assert_eq!(right.line().color, style::series::Color::Index(0));
    }
}
