//! Tick locations and labels.
//!
//! Decade ticks and minor log ticks with their labels,
//! LaTeX formatting of numbers, and the automatic locators used when drawing
//! axes that have no explicit ticks.
use crate::des::{Axes, Scale, Ticks};
use crate::Error;

const LOG_TOL: f64 = 1e-9;

fn pow10(k: i32) -> f64 {
    // division keeps negative powers exact to the last digit, e.g. 2 / 100 == 0.02
    if k >= 0 {
        10f64.powi(k)
    } else {
        1.0 / 10f64.powi(-k)
    }
}

fn blank_unkept(labels: &mut [String], keep: Option<&[isize]>) {
    let Some(keep) = keep else {
        return;
    };
    let n = labels.len() as isize;
    for (i, label) in labels.iter_mut().enumerate() {
        let i = i as isize;
        if !keep.iter().any(|k| *k == i || *k + n == i) {
            label.clear();
        }
    }
}

/// Decade ticks `10^k` for the exponents `lo..=hi`, with labels `$10^{k}$`.
///
/// With `keep`, only the labels at these indices are kept, the other ones are blank.
/// Negative indices count from the end.
pub fn log_ticks(lim: (i32, i32), keep: Option<&[isize]>) -> (Vec<f64>, Vec<String>) {
    let (lo, hi) = lim;
    let ticks: Vec<f64> = (lo..=hi).map(pow10).collect();
    let mut labels: Vec<String> = (lo..=hi).map(|k| format!("$10^{{{}}}$", k)).collect();
    blank_unkept(&mut labels, keep);
    (ticks, labels)
}

/// Minor log ticks `d·10^k` (`d = 2..9`) lying within the limits `lim`.
///
/// Labels are plain decimal numbers. `keep` acts as for [`log_ticks`].
pub fn log_minorticks(lim: (f64, f64), keep: Option<&[isize]>) -> (Vec<f64>, Vec<String>) {
    let (lo, hi) = lim;
    let kmin = (lo.log10() + LOG_TOL).floor() as i32;
    let kmax = (hi.log10() - LOG_TOL).ceil() as i32 - 1;
    let mut ticks = Vec::new();
    for k in kmin..=kmax {
        for d in 2..=9 {
            let d = d as f64;
            let t = if k >= 0 {
                d * pow10(k)
            } else {
                d / pow10(-k)
            };
            if t >= lo * (1.0 - LOG_TOL) && t <= hi * (1.0 + LOG_TOL) {
                ticks.push(t);
            }
        }
    }
    let mut labels: Vec<String> = ticks.iter().map(|t| format!("{}", t)).collect();
    blank_unkept(&mut labels, keep);
    (ticks, labels)
}

fn decade_exponents(lim: (f64, f64)) -> Result<(i32, i32), Error> {
    let (lo, hi) = (lim.0.min(lim.1), lim.0.max(lim.1));
    if lo <= 0.0 {
        return Err(Error::NonPositiveData);
    }
    Ok((
        (lo.log10() - LOG_TOL).ceil() as i32,
        (hi.log10() + LOG_TOL).floor() as i32,
    ))
}

impl Axes {
    /// Set decade ticks on the x axis, within its current limits
    pub fn log_xticks(&mut self, keep: Option<&[isize]>) -> Result<(Vec<f64>, Vec<String>), Error> {
        let (ticks, labels) = log_ticks(decade_exponents(self.xlim())?, keep);
        self.set_xticks(Ticks::with_labels(ticks.clone(), labels.clone())?);
        Ok((ticks, labels))
    }

    /// Set decade ticks on the y axis, within its current limits
    pub fn log_yticks(&mut self, keep: Option<&[isize]>) -> Result<(Vec<f64>, Vec<String>), Error> {
        let (ticks, labels) = log_ticks(decade_exponents(self.ylim())?, keep);
        self.set_yticks(Ticks::with_labels(ticks.clone(), labels.clone())?);
        Ok((ticks, labels))
    }

    /// Set labelled minor log ticks on the x axis, within its current limits
    pub fn log_minorxticks(
        &mut self,
        keep: Option<&[isize]>,
    ) -> Result<(Vec<f64>, Vec<String>), Error> {
        let lim = self.xlim();
        if lim.0 <= 0.0 {
            return Err(Error::NonPositiveData);
        }
        let (ticks, labels) = log_minorticks(lim, keep);
        self.set_minor_xticks(Ticks::with_labels(ticks.clone(), labels.clone())?);
        Ok((ticks, labels))
    }

    /// Set labelled minor log ticks on the y axis, within its current limits
    pub fn log_minoryticks(
        &mut self,
        keep: Option<&[isize]>,
    ) -> Result<(Vec<f64>, Vec<String>), Error> {
        let lim = self.ylim();
        if lim.0 <= 0.0 {
            return Err(Error::NonPositiveData);
        }
        let (ticks, labels) = log_minorticks(lim, keep);
        self.set_minor_yticks(Ticks::with_labels(ticks.clone(), labels.clone())?);
        Ok((ticks, labels))
    }
}

enum GFormat {
    Fixed(String),
    Sci(String, i32),
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// `%g`-style formatting with `precision` significant digits
fn format_g(number: f64, precision: usize) -> GFormat {
    let precision = precision.max(1);
    if number == 0.0 || !number.is_finite() {
        return GFormat::Fixed(format!("{}", number));
    }
    let sci = format!("{:.*e}", precision - 1, number);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= precision as i32 {
        GFormat::Sci(trim_zeros(mantissa), exp)
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        GFormat::Fixed(trim_zeros(&format!("{:.*}", decimals, number)))
    }
}

/// Format a number in LaTeX notation, with `precision` significant digits.
///
/// Small and large numbers use the `a \times 10^{b}` notation (`10^{b}` if `a` is one).
/// The result is meant to be placed inside a math environment (`$...$`).
///
/// ```
/// use goosempl::ticks::latex_float;
///
/// assert_eq!(latex_float(1.2e5, 2), r"1.2 \times 10^{5}");
/// assert_eq!(latex_float(1e-5, 2), "10^{-5}");
/// assert_eq!(latex_float(3.14159, 3), "3.14");
/// ```
pub fn latex_float(number: f64, precision: usize) -> String {
    match format_g(number, precision) {
        GFormat::Fixed(s) => s,
        GFormat::Sci(m, e) if m == "1" => format!("10^{{{}}}", e),
        GFormat::Sci(m, e) => format!("{} \\times 10^{{{}}}", m, e),
    }
}

const AUTO_BINS: u32 = 8;
const AUTO_STEPS: &[f64] = &[1.0, 2.0, 2.5, 5.0];

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-10
}

/// Upper bound of the number of ticks of a linear locator
const MAX_TICKS: usize = 1000;

/// Locator of at most `bins` intervals on "nice" steps
struct MaxN<'a> {
    bins: u32,
    steps: &'a [f64],
}

impl<'a> MaxN<'a> {
    fn new_auto() -> Self {
        MaxN {
            bins: AUTO_BINS,
            steps: AUTO_STEPS,
        }
    }

    fn step(&self, lim: (f64, f64)) -> f64 {
        let target_step = (lim.1 - lim.0) / self.bins as f64;
        let mut scale = 10f64.powf(target_step.log10().floor());
        let mut idx = 0;
        while self.steps[idx] * scale < target_step * (1.0 - 1e-10) {
            idx += 1;
            if idx == self.steps.len() {
                idx = 0;
                scale *= 10.0;
            }
        }
        self.steps[idx] * scale
    }

    fn ticks(&self, lim: (f64, f64)) -> Vec<f64> {
        let (lo, hi) = (lim.0.min(lim.1), lim.0.max(lim.1));
        if !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
            return vec![lo];
        }
        let step = self.step((lo, hi));
        let first = (lo / step - 1e-10).ceil();
        let last = (hi / step + 1e-10).floor();
        // steps are lost in the precision of `lo`: only the limits can be told apart
        if first + 1.0 == first || !(last >= first) {
            return vec![lo, hi];
        }
        let n = ((last - first) as usize).min(MAX_TICKS);
        (0..=n)
            .map(|i| {
                let t = (first + i as f64) * step;
                if is_close(t / step, 0.0) { 0.0 } else { t }
            })
            .collect()
    }
}

fn linear_labels(ticks: &[f64]) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => ticks.first().map(|t| t.abs()).unwrap_or(1.0),
    };
    let decimals = if step > 0.0 {
        (1 - step.log10().floor() as i32).max(0) as usize
    } else {
        0
    };
    ticks
        .iter()
        .map(|t| trim_zeros(&format!("{:.*}", decimals, t)))
        .collect()
}

/// Labels of ticks given without labels
pub(crate) fn default_labels(locs: &[f64], scale: Scale) -> Vec<String> {
    match scale {
        Scale::Linear => linear_labels(locs),
        Scale::Log => locs
            .iter()
            .map(|v| format!("${}$", latex_float(*v, 6)))
            .collect(),
    }
}

/// Major and minor ticks picked automatically for an axis with limits `lim`.
///
/// Linear axes get "nice" steps. Log axes get decade ticks and unlabelled minor ticks,
/// or linear steps if the range spans less than one decade.
pub(crate) fn auto_ticks(lim: (f64, f64), scale: Scale) -> (Ticks, Option<Ticks>) {
    if scale == Scale::Log {
        match decade_exponents(lim) {
            Ok((lo, hi)) if hi > lo => {
                let (major, labels) = log_ticks((lo, hi), None);
                let lim = (lim.0.min(lim.1), lim.0.max(lim.1));
                let (minor, _) = log_minorticks(lim, None);
                return (Ticks::from_parts(major, labels), Some(Ticks::new(minor)));
            }
            _ => (),
        }
    }
    let ticks = MaxN::new_auto().ticks(lim);
    let labels = linear_labels(&ticks);
    (Ticks::from_parts(ticks, labels), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn decade_ticks() {
        let (ticks, labels) = log_ticks((0, 3), None);
        assert_eq!(ticks, vec![1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(labels, vec!["$10^{0}$", "$10^{1}$", "$10^{2}$", "$10^{3}$"]);

        let (_, labels) = log_ticks((0, 3), Some(&[0, -1]));
        assert_eq!(labels, vec!["$10^{0}$", "", "", "$10^{3}$"]);

        let (ticks, _) = log_ticks((-2, -1), None);
        assert_eq!(ticks, vec![0.01, 0.1]);
    }

    #[test]
    fn labels_of_unlabelled_ticks() {
        assert_eq!(default_labels(&[0.0, 0.5, 1.0], Scale::Linear), vec!["0", "0.5", "1"]);
        assert_eq!(default_labels(&[1e-6, 10.0], Scale::Log), vec!["$10^{-6}$", "$10$"]);
    }

    #[test]
    fn minor_ticks() {
        let (ticks, labels) = log_minorticks((1.0, 10.0), None);
        assert_eq!(ticks, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(labels, vec!["2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn axes_decade_ticks() {
        let mut axes = Axes::new();
        axes.set_xlim((1.0, 1000.0));
        axes.set_ylim((10.0, 1000.0));
        let (ticks, _) = axes.log_xticks(None).unwrap();
        assert_eq!(ticks, vec![1.0, 10.0, 100.0, 1000.0]);
        let (ticks, labels) = axes.log_yticks(None).unwrap();
        assert_eq!(ticks, vec![10.0, 100.0, 1000.0]);
        assert_eq!(labels, vec!["$10^{1}$", "$10^{2}$", "$10^{3}$"]);
        assert_eq!(axes.y_axis().ticks().map(|t| t.locs().len()), Some(3));
    }

    #[test]
    fn axes_minor_ticks() {
        let mut axes = Axes::new();
        axes.set_xlim((0.1, 10.0));
        axes.set_ylim((0.01, 0.7));
        let (ticks, labels) = axes.log_minorxticks(None).unwrap();
        assert_eq!(
            ticks,
            vec![
                0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0
            ]
        );
        assert_eq!(labels[0], "0.2");
        assert_eq!(labels[8], "2");

        let (ticks, labels) = axes.log_minoryticks(None).unwrap();
        let expected = vec![
            0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7,
        ];
        assert_near!(rel, ticks, expected, 1e-12);
        assert_eq!(labels[0], "0.02");
        assert_eq!(labels[13], "0.7");

        axes.set_xlim((-1.0, 1.0));
        assert_eq!(axes.log_minorxticks(None), Err(Error::NonPositiveData));
    }

    #[test]
    fn latex() {
        assert_eq!(latex_float(1.2e5, 2), r"1.2 \times 10^{5}");
        assert_eq!(latex_float(120.0, 2), r"1.2 \times 10^{2}");
        assert_eq!(latex_float(1e-5, 2), "10^{-5}");
        assert_eq!(latex_float(0.5, 2), "0.5");
        assert_eq!(latex_float(3.4, 3), "3.4");
        assert_eq!(latex_float(-0.001234, 2), "-0.0012");
        assert_eq!(latex_float(0.0, 2), "0");
    }

    #[test]
    fn auto_linear_ticks() {
        let (ticks, _) = auto_ticks((-1.0, 1.0), Scale::Linear);
        assert_near!(
            abs,
            ticks.locs().to_vec(),
            vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0]
        );
        let (ticks, minor) = auto_ticks((0.0, 100.0), Scale::Linear);
        assert_eq!(ticks.labels().map(|l| l[1].as_str()), Some("20"));
        assert!(minor.is_none());
    }

    #[test]
    fn narrow_range_at_large_magnitude() {
        let (ticks, _) = auto_ticks((1e18, 1e18 + 256.0), Scale::Linear);
        assert_eq!(ticks.locs(), &[1e18, 1e18 + 256.0]);

        let mut fig = crate::des::Figure::new();
        fig.axes_mut(0, 0)
            .plot(crate::des::Line::new(vec![0.0, 1.0], vec![1e18, 1e18 + 256.0]).unwrap());
        let mut rec = crate::drawing::tests::Recorder::default();
        crate::drawing::draw_figure(&fig, &crate::Theme::default(), &mut rec).unwrap();
    }

    #[test]
    fn auto_log_ticks() {
        let (ticks, minor) = auto_ticks((0.5, 2000.0), Scale::Log);
        assert_eq!(ticks.locs(), &[1.0, 10.0, 100.0, 1000.0]);
        assert!(minor.is_some());
        // less than a decade: linear steps
        let (ticks, _) = auto_ticks((2.0, 8.0), Scale::Log);
        assert!(ticks.locs().len() > 2);
    }
}
