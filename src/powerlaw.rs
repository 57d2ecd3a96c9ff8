/*!
 * Power-law guides on log-log axes: segments, annotations, grids and diagonals.
 *
 * On log-log axes a power-law `y = c x^b` is a straight line.
 * All functions fail with [`Error::NotLogLog`] on other axes.
 */
use crate::des::{self, Axes, Scale, SeriesId, Units};
use crate::style::{self, series};
use crate::ticks::auto_ticks;
use crate::transform::{abs2rel_slice, rel2abs};
use crate::{Error, color, utils};

/// End point of a power-law segment, the other coordinate follows from the power-law
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum End {
    /// End at `x = start.x + width`
    Width(f64),
    /// End at `y = start.y + height` for a positive exponent, `start.y - height` for a negative one
    Height(f64),
    /// End at the given x-coordinate
    X(f64),
    /// End at the given y-coordinate
    Y(f64),
}

/// A power-law segment in data coordinates
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: (f64, f64),
    end: (f64, f64),
    constant: f64,
}

enum EndPoint {
    X(f64),
    Y(f64),
}

fn check_loglog(axes: &Axes) -> Result<(), Error> {
    if axes.is_loglog() {
        Ok(())
    } else {
        Err(Error::NotLogLog)
    }
}

/// Compute the segment of the power-law with exponent `exp` through `start`.
/// The limits of `axes` are fixed first.
fn segment(
    axes: &mut Axes,
    exp: f64,
    start: (f64, f64),
    end: End,
    units: Units,
) -> Result<Segment, Error> {
    check_loglog(axes)?;
    axes.fix_lims();

    let (mut sx, mut sy) = start;
    let mut end = match end {
        End::Width(w) => EndPoint::X(sx + w),
        End::X(x) => EndPoint::X(x),
        End::Height(h) if exp > 0.0 => EndPoint::Y(sy + h),
        End::Height(h) if exp < 0.0 => EndPoint::Y(sy - h),
        End::Height(_) => EndPoint::Y(sy),
        End::Y(y) => EndPoint::Y(y),
    };

    if units == Units::Relative {
        sx = axes.rel2abs_x(sx);
        sy = axes.rel2abs_y(sy);
        end = match end {
            EndPoint::X(x) => EndPoint::X(axes.rel2abs_x(x)),
            EndPoint::Y(y) => EndPoint::Y(axes.rel2abs_y(y)),
        };
    }
    if sx <= 0.0 || sy <= 0.0 {
        return Err(Error::NonPositiveData);
    }

    let constant = sy / sx.powf(exp);
    let end = match end {
        EndPoint::X(ex) => (ex, constant * ex.powf(exp)),
        EndPoint::Y(_) if exp == 0.0 => {
            return Err(Error::InconsistentArgs(
                "the end of a flat power-law cannot be set by its y-coordinate".to_string(),
            ));
        }
        EndPoint::Y(ey) => ((ey / constant).powf(1.0 / exp), ey),
    };
    log::trace!(
        "power-law segment from {:?} to {:?}, constant {}",
        (sx, sy),
        end,
        constant
    );

    Ok(Segment {
        start: (sx, sy),
        end,
        constant,
    })
}

/// Plot the power-law `y = c x^exp` that passes through `start`, up to `end`.
///
/// Relative coordinates are fractions of the current limits of the axes, which are fixed
/// before plotting.
/// Returns the handle of the line, and the parameters `(c, exp)` of the power-law.
///
/// ```
/// use goosempl::des::{Axes, Scale, Units};
/// use goosempl::powerlaw::{End, plot_powerlaw};
///
/// let mut axes = Axes::new();
/// axes.set_xscale(Scale::Log);
/// axes.set_yscale(Scale::Log);
/// axes.set_xlim((1.0, 100.0));
/// axes.set_ylim((1.0, 100.0));
///
/// let line = goosempl::style::series::Line::default();
/// let (_, (c, b)) =
///     plot_powerlaw(&mut axes, 2.0, (1.0, 1.0), End::X(10.0), Units::Absolute, line).unwrap();
/// assert_eq!((c, b), (1.0, 2.0));
/// ```
pub fn plot_powerlaw(
    axes: &mut Axes,
    exp: f64,
    start: (f64, f64),
    end: End,
    units: Units,
    line: impl Into<series::Line>,
) -> Result<(SeriesId, (f64, f64)), Error> {
    let seg = segment(axes, exp, start, end, units)?;
    let line = des::Line::new(vec![seg.start.0, seg.end.0], vec![seg.start.1, seg.end.1])?
        .with_line(line);
    Ok((axes.plot(line), (seg.constant, exp)))
}

/// Add `text` along the power-law segment defined as for [`plot_powerlaw`].
///
/// `rel_pos` is the position of the text as a fraction of the width and the height
/// of the segment, `(0.5, 0.5)` being its middle.
pub fn annotate_powerlaw(
    axes: &mut Axes,
    text: impl Into<String>,
    exp: f64,
    start: (f64, f64),
    end: End,
    rel_pos: (f64, f64),
    units: Units,
) -> Result<SeriesId, Error> {
    let seg = segment(axes, exp, start, end, units)?;
    let (rx, ry) = rel_pos;
    let lerp_log = |a: f64, b: f64, r: f64| 10f64.powf(a.log10() + r * (b.log10() - a.log10()));
    let x = lerp_log(seg.start.0, seg.end.0, rx);
    let y = lerp_log(seg.start.1, seg.end.1, ry);
    Ok(axes.text(des::Text::new(text, x, y), Units::Absolute))
}

/// Options of [`grid_powerlaw`]
#[derive(Debug, Clone)]
pub struct GridPowerlaw {
    /// Number of extra lines inserted between two consecutive lines
    pub insert: usize,
    /// Number of lines skipped at the start
    pub skip: usize,
    /// For a zero exponent: index (exclusive) of the last line, negative values count from the end.
    pub end: isize,
    /// Number of lines skipped between two drawn lines
    pub step: usize,
    /// Line style
    pub line: series::Line,
    /// Legend entry, given to the first line only
    pub name: Option<String>,
}

impl Default for GridPowerlaw {
    fn default() -> Self {
        GridPowerlaw {
            insert: 0,
            skip: 0,
            end: -1,
            step: 0,
            line: series::Line::from(color::BLACK)
                .with_width(1.0)
                .with_pattern(style::LinePattern::dashed()),
            name: None,
        }
    }
}

impl GridPowerlaw {
    /// Set the number of inserted lines, returning self for chaining
    pub fn with_insert(self, insert: usize) -> Self {
        GridPowerlaw { insert, ..self }
    }

    /// Set the number of skipped lines at the start, returning self for chaining
    pub fn with_skip(self, skip: usize) -> Self {
        GridPowerlaw { skip, ..self }
    }

    /// Set the end index for zero exponents, returning self for chaining
    pub fn with_end(self, end: isize) -> Self {
        GridPowerlaw { end, ..self }
    }

    /// Set the number of lines skipped between drawn lines, returning self for chaining
    pub fn with_step(self, step: usize) -> Self {
        GridPowerlaw { step, ..self }
    }

    /// Set the line style, returning self for chaining
    pub fn with_line(self, line: impl Into<series::Line>) -> Self {
        GridPowerlaw {
            line: line.into(),
            ..self
        }
    }

    /// Set the legend entry, returning self for chaining
    pub fn with_name(self, name: impl Into<String>) -> Self {
        GridPowerlaw {
            name: Some(name.into()),
            ..self
        }
    }
}

/// Insert `insert` evenly spaced values between consecutive values of `v`
fn insert_between(v: &[f64], insert: usize) -> Vec<f64> {
    if insert == 0 || v.len() < 2 {
        return v.to_vec();
    }
    let n = v.len();
    let xp = utils::linspace(0.0, 1.0, n);
    utils::linspace(0.0, 1.0, n + (n - 1) * insert)
        .into_iter()
        .map(|x| utils::interp(x, &xp, v))
        .collect()
}

/// `v[start..end]` keeping one value every `step`, `end` negative counting from the end
fn select(v: Vec<f64>, start: usize, end: Option<isize>, step: usize) -> Vec<f64> {
    let n = v.len() as isize;
    let end = match end {
        None => n,
        Some(e) if e < 0 => (n + e).max(0),
        Some(e) => e.min(n),
    } as usize;
    v.into_iter().take(end).skip(start).step_by(step.max(1)).collect()
}

/// Tick locations of an axis: explicit or automatic
fn tick_locs(axis: &des::Axis, lim: (f64, f64)) -> Vec<f64> {
    match axis.ticks() {
        Some(ticks) => ticks.locs().to_vec(),
        None => auto_ticks(lim, axis.scale()).0.locs().to_vec(),
    }
}

/// Draw a grid of power-laws with exponent `exp`, starting from the major ticks of the x axis
/// (or the y axis for a zero exponent).
///
/// The limits of the axes are fixed first.
/// Returns the handles of the lines.
pub fn grid_powerlaw(
    axes: &mut Axes,
    exp: f64,
    opts: &GridPowerlaw,
) -> Result<Vec<SeriesId>, Error> {
    check_loglog(axes)?;
    axes.fix_lims();
    let (xlim, ylim) = (axes.xlim(), axes.ylim());

    // lines in relative coordinates
    let (startx, endx, starty, endy) = if exp == 0.0 {
        let ticks = tick_locs(axes.y_axis(), ylim);
        let starty = abs2rel_slice(&ticks, ylim, Scale::Log);
        let starty = insert_between(&starty, opts.insert);
        let starty = select(starty, opts.skip, Some(opts.end), 1 + opts.step);
        let n = starty.len();
        (vec![0.0; n], vec![1.0; n], starty.clone(), starty)
    } else {
        let dx = xlim.1.log10() - xlim.0.log10();
        let dy = ylim.1.log10() - ylim.0.log10();
        // slope in relative coordinates
        let b = exp.abs() * dx / dy;

        let ticks = tick_locs(axes.x_axis(), xlim);
        let mut startx = abs2rel_slice(&ticks, xlim, Scale::Log);
        if startx.len() < 2 {
            return Err(Error::InsufficientData {
                required: 2,
                available: startx.len(),
            });
        }
        let step = startx[1] - startx[0];
        if !(step > 0.0) {
            return Err(Error::InconsistentArgs(format!(
                "x ticks must be strictly increasing, got a step of {}",
                step
            )));
        }

        // prepend lines starting left of the axes but crossing them
        let mut nneg = (1.0 / (b * step)).floor() as isize - 1;
        if opts.insert > 0 {
            nneg += 1;
        }
        if nneg > 0 {
            let first = startx[0];
            let prepend = (1..=nneg).rev().map(|i| first - i as f64 * step);
            startx = prepend.chain(startx).collect();
        }

        let mut startx = insert_between(&startx, opts.insert);
        if opts.step > 0 {
            startx = select(startx, opts.skip, None, 1 + opts.step);
        }
        let endx: Vec<f64> = startx.iter().map(|x| x + 1.0 / b).collect();
        let n = startx.len();
        let (starty, endy) = if exp > 0.0 {
            (vec![0.0; n], vec![1.0; n])
        } else {
            (vec![1.0; n], vec![0.0; n])
        };
        (startx, endx, starty, endy)
    };
    log::debug!("power-law grid with exponent {}: {} lines", exp, startx.len());

    let mut ids = Vec::with_capacity(startx.len());
    for i in 0..startx.len() {
        let x = vec![
            rel2abs(startx[i], xlim, Scale::Log),
            rel2abs(endx[i], xlim, Scale::Log),
        ];
        let y = vec![
            rel2abs(starty[i], ylim, Scale::Log),
            rel2abs(endy[i], ylim, Scale::Log),
        ];
        let mut line = des::Line::new(x, y)?.with_line(opts.line.clone());
        if let (0, Some(name)) = (i, &opts.name) {
            line = line.with_name(name.clone());
        }
        ids.push(axes.plot(line));
    }
    Ok(ids)
}

/// A corner of the axes, in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Corner {
    /// Lower-left corner
    LowerLeft(f64, f64),
    /// Lower-right corner
    LowerRight(f64, f64),
    /// Top-left corner
    TopLeft(f64, f64),
    /// Top-right corner
    TopRight(f64, f64),
}

/// Extent of the axes, as a ratio between the upper and lower limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Ratio of the x limits
    Width(f64),
    /// Ratio of the y limits
    Height(f64),
}

/// Set log scales and limits on `axes` such that a power-law with exponent `exp`
/// lies on the diagonal.
///
/// The limits start at `corner` and span `extent`, the other extent follows from `exp`.
/// With `plot`, the diagonal is drawn with that line style, and its handle returned.
///
/// ```
/// use goosempl::des::Axes;
/// use goosempl::powerlaw::{Corner, Extent, diagonal_powerlaw};
///
/// let mut axes = Axes::new();
/// let corner = Corner::LowerLeft(1.0, 1.0);
/// diagonal_powerlaw(&mut axes, 2.0, corner, Extent::Width(10.0), None).unwrap();
/// let (lo, hi) = axes.ylim();
/// assert!((lo - 1.0).abs() < 1e-9 && (hi - 100.0).abs() < 1e-9);
/// ```
pub fn diagonal_powerlaw(
    axes: &mut Axes,
    exp: f64,
    corner: Corner,
    extent: Extent,
    plot: Option<series::Line>,
) -> Result<Option<SeriesId>, Error> {
    if exp == 0.0 {
        return Err(Error::InconsistentArgs(
            "a flat power-law cannot lie on the diagonal".to_string(),
        ));
    }
    let (width, height) = match extent {
        Extent::Width(w) if w > 0.0 => (w.ln(), w.ln() * exp.abs()),
        Extent::Height(h) if h > 0.0 => (h.ln() / exp.abs(), h.ln()),
        Extent::Width(_) => return Err(Error::NonPositiveParameter("width")),
        Extent::Height(_) => return Err(Error::NonPositiveParameter("height")),
    };

    // signed extents away from the corner
    let ((cx, cy), sx, sy) = match corner {
        Corner::LowerLeft(x, y) => ((x, y), 1.0, 1.0),
        Corner::LowerRight(x, y) => ((x, y), -1.0, 1.0),
        Corner::TopLeft(x, y) => ((x, y), 1.0, -1.0),
        Corner::TopRight(x, y) => ((x, y), -1.0, -1.0),
    };
    if cx <= 0.0 || cy <= 0.0 {
        return Err(Error::NonPositiveData);
    }
    let sorted = |a: f64, b: f64| (a.min(b), a.max(b));

    axes.set_xscale(Scale::Log);
    axes.set_yscale(Scale::Log);
    axes.set_xlim(sorted(cx, (cx.ln() + sx * width).exp()));
    axes.set_ylim(sorted(cy, (cy.ln() + sy * height).exp()));

    match plot {
        None => Ok(None),
        Some(line) => {
            let start = if exp > 0.0 { (0.0, 0.0) } else { (0.0, 1.0) };
            let (id, _) = plot_powerlaw(axes, exp, start, End::Width(1.0), Units::Relative, line)?;
            Ok(Some(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::Series;
    use crate::tests::{Near, assert_near};

    fn loglog(xlim: (f64, f64), ylim: (f64, f64)) -> Axes {
        let mut axes = Axes::new();
        axes.set_xscale(Scale::Log);
        axes.set_yscale(Scale::Log);
        axes.set_xlim(xlim);
        axes.set_ylim(ylim);
        axes
    }

    fn line_points(axes: &Axes, id: SeriesId) -> (Vec<f64>, Vec<f64>) {
        match axes.get(id) {
            Some(Series::Line(line)) => (line.x().to_vec(), line.y().to_vec()),
            _ => panic!("expected a line"),
        }
    }

    #[test]
    fn requires_loglog() {
        let mut axes = Axes::new();
        let res = plot_powerlaw(
            &mut axes,
            1.0,
            (0.0, 0.0),
            End::Width(1.0),
            Units::Relative,
            series::Line::default(),
        );
        assert_eq!(res, Err(Error::NotLogLog));
        assert_eq!(
            grid_powerlaw(&mut axes, 1.0, &GridPowerlaw::default()),
            Err(Error::NotLogLog)
        );
    }

    #[test]
    fn plot_relative_width() {
        let mut axes = loglog((1.0, 100.0), (1.0, 100.0));
        let (id, (c, b)) = plot_powerlaw(
            &mut axes,
            -1.0,
            (0.0, 1.0),
            End::Width(0.5),
            Units::Relative,
            series::Line::default(),
        )
        .unwrap();
        assert_near!(rel, c, 100.0, 1e-12);
        assert_eq!(b, -1.0);
        let (x, y) = line_points(&axes, id);
        assert_near!(rel, x[1], 10.0, 1e-12);
        assert_near!(rel, y[1], 10.0, 1e-12);
    }

    #[test]
    fn plot_height_follows_sign() {
        let mut axes = loglog((1.0, 100.0), (1.0, 10000.0));
        let line = series::Line::default();
        let (id, _) = plot_powerlaw(
            &mut axes,
            2.0,
            (0.0, 0.0),
            End::Height(0.5),
            Units::Relative,
            line.clone(),
        )
        .unwrap();
        let (x, y) = line_points(&axes, id);
        assert_near!(rel, x[1], 10.0, 1e-12);
        assert_near!(rel, y[1], 100.0, 1e-12);

        let (id, _) =
            plot_powerlaw(&mut axes, -2.0, (1.0, 10000.0), End::Y(100.0), Units::Absolute, line)
                .unwrap();
        let (x, _) = line_points(&axes, id);
        assert_near!(rel, x[1], 10.0, 1e-12);

        let res = plot_powerlaw(
            &mut axes,
            0.0,
            (1.0, 1.0),
            End::Y(2.0),
            Units::Absolute,
            series::Line::default(),
        );
        assert!(matches!(res, Err(Error::InconsistentArgs(_))));
    }

    #[test]
    fn annotation_in_the_middle() {
        let mut axes = loglog((1.0, 100.0), (1.0, 100.0));
        let id = annotate_powerlaw(
            &mut axes,
            "1",
            1.0,
            (0.0, 0.0),
            End::Width(1.0),
            (0.5, 0.5),
            Units::Relative,
        )
        .unwrap();
        let Some(Series::Text(text)) = axes.get(id) else {
            panic!("expected a text");
        };
        let (x, y) = text.pos();
        assert_near!(rel, x, 10.0, 1e-12);
        assert_near!(rel, y, 10.0, 1e-12);
        assert_eq!(text.text(), "1");
    }

    #[test]
    fn select_like_slices() {
        let v = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(select(v.clone(), 0, Some(-1), 1), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(select(v.clone(), 1, None, 2), vec![1.0, 3.0]);
        assert_eq!(select(v, 4, Some(2), 1), Vec::<f64>::new());
        assert_eq!(insert_between(&[0.0, 1.0], 1), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn horizontal_grid() {
        let mut axes = loglog((1.0, 10.0), (1.0, 1000.0));
        let opts = GridPowerlaw::default().with_name("grid");
        let ids = grid_powerlaw(&mut axes, 0.0, &opts).unwrap();
        // 4 decade ticks, the last one is excluded by default
        assert_eq!(ids.len(), 3);
        let (x, y) = line_points(&axes, ids[1]);
        assert_near!(rel, x, vec![1.0, 10.0], 1e-12);
        assert_near!(rel, y, vec![10.0, 10.0], 1e-12);
        assert_eq!(axes.series()[0].name(), Some("grid"));
        assert_eq!(axes.series()[1].name(), None);
    }

    #[test]
    fn sloped_grid() {
        let mut axes = loglog((1.0, 100.0), (1.0, 100.0));
        let ids = grid_powerlaw(&mut axes, 1.0, &GridPowerlaw::default()).unwrap();
        // ticks at relative 0, 0.5 and 1; slope 1 needs one prepended line
        assert_eq!(ids.len(), 4);
        let (x, y) = line_points(&axes, ids[0]);
        assert_near!(rel, x, vec![0.1, 10.0], 1e-12);
        assert_near!(rel, y, vec![1.0, 100.0], 1e-12);
        assert_eq!(axes.xlim(), (1.0, 100.0));

        let mut axes = loglog((1.0, 100.0), (1.0, 100.0));
        let opts = GridPowerlaw::default().with_step(1);
        let ids = grid_powerlaw(&mut axes, -1.0, &opts).unwrap();
        assert_eq!(ids.len(), 2);
        let (_, y) = line_points(&axes, ids[0]);
        assert_near!(rel, y, vec![100.0, 1.0], 1e-12);
    }

    #[test]
    fn sloped_grid_needs_distinct_ticks() {
        let mut axes = loglog((1.0, 100.0), (1.0, 100.0));
        axes.set_xticks(des::Ticks::new(vec![10.0, 10.0, 100.0]));
        let res = grid_powerlaw(&mut axes, 1.0, &GridPowerlaw::default());
        assert!(matches!(res, Err(Error::InconsistentArgs(_))));
        assert!(axes.series().is_empty());
    }

    #[test]
    fn diagonal() {
        let mut axes = Axes::new();
        let id = diagonal_powerlaw(
            &mut axes,
            -0.5,
            Corner::TopRight(100.0, 10.0),
            Extent::Width(100.0),
            Some(series::Line::default()),
        )
        .unwrap()
        .unwrap();
        assert!(axes.is_loglog());
        let (lo, hi) = axes.xlim();
        assert_near!(rel, lo, 1.0, 1e-12);
        assert_near!(rel, hi, 100.0, 1e-12);
        let (lo, hi) = axes.ylim();
        assert_near!(rel, lo, 1.0, 1e-12);
        assert_near!(rel, hi, 10.0, 1e-12);

        let (x, y) = line_points(&axes, id);
        assert_near!(rel, x, vec![1.0, 100.0], 1e-12);
        assert_near!(rel, y, vec![10.0, 1.0], 1e-12);

        let corner = Corner::LowerLeft(1.0, 1.0);
        assert_eq!(
            diagonal_powerlaw(&mut axes, 1.0, corner, Extent::Height(0.0), None),
            Err(Error::NonPositiveParameter("height"))
        );
    }
}
