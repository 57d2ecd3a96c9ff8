//! Coordinate transforms between data coordinates and axis fractions, and limit helpers.
//!
//! Relative coordinates are a fraction of an axis: 0 at the lower limit and 1 at the upper limit.
//! On a logarithmic axis, the fraction is taken in log-space.
use crate::des::{Axes, Scale};
use crate::Error;

/// Convert the data coordinate `value` to a fraction of the axis with limits `lim`
pub fn abs2rel(value: f64, lim: (f64, f64), scale: Scale) -> f64 {
    let (lo, hi) = lim;
    match scale {
        Scale::Linear => (value - lo) / (hi - lo),
        Scale::Log => (value.log10() - lo.log10()) / (hi.log10() - lo.log10()),
    }
}

/// Convert the axis fraction `value` to a data coordinate on the axis with limits `lim`
pub fn rel2abs(value: f64, lim: (f64, f64), scale: Scale) -> f64 {
    let (lo, hi) = lim;
    match scale {
        Scale::Linear => lo + value * (hi - lo),
        Scale::Log => 10f64.powf(lo.log10() + value * (hi.log10() - lo.log10())),
    }
}

/// Elementwise [`abs2rel`]
pub fn abs2rel_slice(values: &[f64], lim: (f64, f64), scale: Scale) -> Vec<f64> {
    values.iter().map(|v| abs2rel(*v, lim, scale)).collect()
}

/// Elementwise [`rel2abs`]
pub fn rel2abs_slice(values: &[f64], lim: (f64, f64), scale: Scale) -> Vec<f64> {
    values.iter().map(|v| rel2abs(*v, lim, scale)).collect()
}

impl Axes {
    /// Convert a data x-coordinate to a fraction of the x axis
    pub fn abs2rel_x(&self, x: f64) -> f64 {
        abs2rel(x, self.xlim(), self.xscale())
    }

    /// Convert a data y-coordinate to a fraction of the y axis
    pub fn abs2rel_y(&self, y: f64) -> f64 {
        abs2rel(y, self.ylim(), self.yscale())
    }

    /// Convert a fraction of the x axis to a data x-coordinate
    pub fn rel2abs_x(&self, x: f64) -> f64 {
        rel2abs(x, self.xlim(), self.xscale())
    }

    /// Convert a fraction of the y axis to a data y-coordinate
    pub fn rel2abs_y(&self, y: f64) -> f64 {
        rel2abs(y, self.ylim(), self.yscale())
    }
}

/// Minimum and maximum of `data`, ignoring NaN
pub fn minmax(data: &[f64]) -> Result<(f64, f64), Error> {
    let mut it = data.iter().copied().filter(|v| !v.is_nan());
    let first = it.next().ok_or(Error::EmptyData)?;
    Ok(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Widen limits symmetrically such that their span is multiplied by `factor`.
///
/// A factor of `1.05` (the usual choice) adds 2.5% on each side.
pub fn scale_lim(lim: (f64, f64), factor: f64) -> (f64, f64) {
    let (lo, hi) = lim;
    let delta = (factor - 1.0) / 2.0 * (hi - lo);
    (lo - delta, hi + delta)
}

/// Direction(s) to which a limit operation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// x axis only
    X,
    /// y axis only
    Y,
    /// Both axes
    #[default]
    Both,
}

impl Direction {
    fn has_x(&self) -> bool {
        matches!(self, Direction::X | Direction::Both)
    }

    fn has_y(&self) -> bool {
        matches!(self, Direction::Y | Direction::Both)
    }
}

fn decade_lim(lim: (f64, f64)) -> Result<(f64, f64), Error> {
    let (lo, hi) = lim;
    if lo <= 0.0 || hi <= 0.0 {
        return Err(Error::NonPositiveData);
    }
    Ok((
        10f64.powf(lo.log10().floor()),
        10f64.powf(hi.log10().ceil()),
    ))
}

/// Round the current limits of `axes` outwards to full decades.
/// Fails if a limit to round is not strictly positive.
pub fn set_decade_lims(axes: &mut Axes, direction: Direction) -> Result<(), Error> {
    if direction.has_x() {
        let lim = decade_lim(axes.xlim())?;
        axes.set_xlim(lim);
    }
    if direction.has_y() {
        let lim = decade_lim(axes.ylim())?;
        axes.set_ylim(lim);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn linear_transforms() {
        assert_near!(abs, abs2rel(5.0, (0.0, 10.0), Scale::Linear), 0.5);
        assert_near!(abs, rel2abs(0.25, (0.0, 10.0), Scale::Linear), 2.5);
        assert_near!(abs, rel2abs(1.5, (0.0, 10.0), Scale::Linear), 15.0);
    }

    #[test]
    fn log_transforms() {
        assert_near!(abs, abs2rel(10.0, (1.0, 100.0), Scale::Log), 0.5);
        assert_near!(rel, rel2abs(0.5, (1.0, 100.0), Scale::Log), 10.0, 1e-12);
        let v = abs2rel_slice(&[1.0, 1000.0], (1.0, 100.0), Scale::Log);
        assert_near!(abs, v, vec![0.0, 1.5]);
    }

    #[test]
    fn axes_transforms_use_own_scale() {
        let mut axes = Axes::new();
        axes.set_xlim((0.0, 10.0));
        axes.set_yscale(Scale::Log);
        axes.set_ylim((1.0, 100.0));
        assert_near!(abs, axes.abs2rel_x(5.0), 0.5);
        assert_near!(abs, axes.abs2rel_y(10.0), 0.5);
        assert_near!(rel, axes.rel2abs_y(1.0), 100.0, 1e-12);
        assert_near!(abs, axes.rel2abs_x(0.1), 1.0);
    }

    #[test]
    fn minmax_and_scale() {
        assert_eq!(minmax(&[3.0, f64::NAN, -1.0, 2.0]), Ok((-1.0, 3.0)));
        assert_eq!(minmax(&[]), Err(Error::EmptyData));
        let (lo, hi) = scale_lim((0.0, 10.0), 1.05);
        assert_near!(abs, lo, -0.25);
        assert_near!(abs, hi, 10.25);
    }

    #[test]
    fn decade_lims() {
        let mut axes = Axes::new();
        axes.set_xlim((2.0, 300.0));
        axes.set_ylim((0.05, 0.5));
        set_decade_lims(&mut axes, Direction::Both).unwrap();
        let (lo, hi) = axes.xlim();
        assert_near!(rel, lo, 1.0, 1e-12);
        assert_near!(rel, hi, 1000.0, 1e-12);
        let (lo, hi) = axes.ylim();
        assert_near!(rel, lo, 0.01, 1e-12);
        assert_near!(rel, hi, 1.0, 1e-12);

        axes.set_xlim((-1.0, 10.0));
        assert_eq!(
            set_decade_lims(&mut axes, Direction::X),
            Err(Error::NonPositiveData)
        );
        set_decade_lims(&mut axes, Direction::Y).unwrap();
    }
}
