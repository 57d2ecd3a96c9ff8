/*!
 * Histogram binning.
 *
 * Bin-edges are strictly increasing sequences defining half-open intervals
 * `[e_i, e_{i+1})`, except the last interval which is closed.
 * Values outside of the edges are not counted.
 *
 * [`histogram_bin_edges`] builds edges with one of the [`Mode`]s and then optionally
 * trims empty outer bins, merges bins with too few points ([`histogram_bin_edges_mincount`]),
 * merges too narrow bins ([`histogram_bin_edges_minwidth`]) and aligns bins on integers
 * ([`histogram_bin_edges_integer`]).
 */
use std::str::FromStr;

use crate::error::check_len;
use crate::{Error, utils};

/// Strategy to place the bin-edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Bins of equal width
    #[default]
    Equal,
    /// Bins of equal width in log-space. Data must be strictly positive.
    Log,
    /// Bins holding (approximately) the same number of data points
    Uniform,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Mode::Equal),
            "log" => Ok(Mode::Log),
            "uniform" => Ok(Mode::Uniform),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Number of bins, or explicit bin-edges
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// Number of bins
    Count(usize),
    /// Explicit bin-edges
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Bins::Count(10)
    }
}

impl From<usize> for Bins {
    fn from(count: usize) -> Self {
        Bins::Count(count)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(edges: Vec<f64>) -> Self {
        Bins::Edges(edges)
    }
}

/// Minimum number of data points per bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCount(usize);

impl MinCount {
    /// The minimum count
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for MinCount {
    fn from(count: usize) -> Self {
        MinCount(count)
    }
}

impl TryFrom<f64> for MinCount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Ok(MinCount(value as usize))
        } else {
            Err(Error::NonIntegerMinCount(value))
        }
    }
}

/// Options of [`histogram_bin_edges`]
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    /// Number of bins or explicit edges. Default: 10 bins
    pub bins: Bins,
    /// Placement strategy. Default: [`Mode::Equal`]
    pub mode: Mode,
    /// Merge bins until each holds at least this number of points. Default: none
    pub min_count: Option<MinCount>,
    /// Merge bins until each has at least this width. Default: none
    pub min_width: Option<f64>,
    /// Keep only bins that encompass an integer. Default: false
    pub integer: bool,
    /// Trim leading and trailing empty bins. Default: true
    pub remove_empty_edges: bool,
}

impl Default for BinEdges {
    fn default() -> Self {
        BinEdges {
            bins: Bins::default(),
            mode: Mode::default(),
            min_count: None,
            min_width: None,
            integer: false,
            remove_empty_edges: true,
        }
    }
}

impl BinEdges {
    /// Set the number of bins or the edges, returning self for chaining
    pub fn with_bins(self, bins: impl Into<Bins>) -> Self {
        BinEdges {
            bins: bins.into(),
            ..self
        }
    }

    /// Set the mode, returning self for chaining
    pub fn with_mode(self, mode: Mode) -> Self {
        BinEdges { mode, ..self }
    }

    /// Set the minimum count per bin, returning self for chaining
    pub fn with_min_count(self, min_count: impl Into<MinCount>) -> Self {
        BinEdges {
            min_count: Some(min_count.into()),
            ..self
        }
    }

    /// Set the minimum bin width, returning self for chaining
    pub fn with_min_width(self, min_width: f64) -> Self {
        BinEdges {
            min_width: Some(min_width),
            ..self
        }
    }

    /// Keep only bins that encompass an integer, returning self for chaining
    pub fn with_integer(self, integer: bool) -> Self {
        BinEdges { integer, ..self }
    }

    /// Set whether empty leading and trailing bins are trimmed, returning self for chaining
    pub fn with_remove_empty_edges(self, remove_empty_edges: bool) -> Self {
        BinEdges {
            remove_empty_edges,
            ..self
        }
    }
}

/// Check that `edges` holds at least two strictly increasing finite values
pub fn check_edges(edges: &[f64]) -> Result<(), Error> {
    if edges.len() < 2
        || edges.iter().any(|e| !e.is_finite())
        || edges.windows(2).any(|w| w[0] >= w[1])
    {
        return Err(Error::InvalidEdges);
    }
    Ok(())
}

fn finite_data(data: &[f64]) -> Result<Vec<f64>, Error> {
    let data: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if data.is_empty() {
        return Err(Error::EmptyData);
    }
    Ok(data)
}

/// Compute bin-edges for `data` according to `opts`.
///
/// Non-finite data values are ignored.
pub fn histogram_bin_edges(data: &[f64], opts: &BinEdges) -> Result<Vec<f64>, Error> {
    let data = finite_data(data)?;

    let mut edges = match (&opts.bins, opts.mode) {
        (Bins::Edges(_), Mode::Uniform) => return Err(Error::EdgesWithUniform),
        (Bins::Edges(edges), _) => {
            check_edges(edges)?;
            edges.clone()
        }
        (Bins::Count(0), _) => {
            return Err(Error::InconsistentArgs(
                "the number of bins must be at least one".to_string(),
            ));
        }
        (Bins::Count(bins), Mode::Equal) => equal_edges(&data, *bins),
        (Bins::Count(bins), Mode::Log) => log_edges(&data, *bins)?,
        (Bins::Count(bins), Mode::Uniform) => {
            let bins = match opts.min_count {
                Some(MinCount(mc)) if mc > 0 => (data.len() / mc).max(1),
                _ => *bins,
            };
            uniform_edges(&data, bins)
        }
    };
    log::debug!(
        "{} initial bin-edges in {:?} mode, for {} data points",
        edges.len(),
        opts.mode,
        data.len()
    );

    if opts.remove_empty_edges {
        edges = trim_empty_edges(&data, edges);
    }
    if let Some(MinCount(min_count)) = opts.min_count {
        edges = histogram_bin_edges_mincount(&data, min_count, edges)?;
    }
    if let Some(min_width) = opts.min_width {
        edges = histogram_bin_edges_minwidth(min_width, edges)?;
    }
    if opts.integer {
        edges = histogram_bin_edges_integer(&edges)?;
    }
    Ok(edges)
}

fn equal_edges(data: &[f64], bins: usize) -> Vec<f64> {
    let (lo, hi) = min_max(data);
    if lo == hi {
        log::warn!("All data equal to {}, using a unit-width bin range", lo);
        return utils::linspace(lo - 0.5, hi + 0.5, bins + 1);
    }
    utils::linspace(lo, hi, bins + 1)
}

fn log_edges(data: &[f64], bins: usize) -> Result<Vec<f64>, Error> {
    if data.iter().any(|v| *v <= 0.0) {
        return Err(Error::NonPositiveData);
    }
    let (lo, hi) = min_max(data);
    if lo == hi {
        log::warn!("All data equal to {}, using a one-decade bin range", lo);
        let e = lo.log10();
        return Ok(utils::logspace(e - 0.5, e + 0.5, bins + 1));
    }
    let mut edges = utils::logspace(lo.log10(), hi.log10(), bins + 1);
    edges[0] = lo;
    edges[bins] = hi;
    Ok(edges)
}

fn uniform_edges(data: &[f64], bins: usize) -> Vec<f64> {
    let n = data.len();
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    // points per bin, the remainder spread over the bins
    let mut count = vec![n / bins; bins];
    let remainder = n - (n / bins) * bins;
    for i in utils::linspace(0.0, (bins - 1) as f64, remainder) {
        count[i as usize] += 1;
    }

    let mut idx = Vec::with_capacity(bins + 1);
    idx.push(0);
    let mut cum = 0;
    for c in &count {
        cum += c;
        idx.push(cum);
    }
    idx[bins] = n - 1;

    let mut edges: Vec<f64> = idx.iter().map(|i| sorted[(*i).min(n - 1)]).collect();
    edges.dedup();
    if edges.len() < 2 {
        log::warn!("Too few unique data values, using a unit-width bin range");
        let v = edges[0];
        return vec![v - 0.5, v + 0.5];
    }
    edges
}

fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

fn trim_empty_edges(data: &[f64], edges: Vec<f64>) -> Vec<f64> {
    let counts = histogram_counts(data, &edges);
    let first = counts.iter().position(|c| *c > 0);
    let last = counts.iter().rposition(|c| *c > 0);
    match (first, last) {
        (Some(i), Some(j)) => edges[i..j + 2].to_vec(),
        _ => edges,
    }
}

/// Merge bins until each holds at least `min_count` points.
///
/// The first bin violating the constraint is merged with its right neighbour,
/// the last bin with its left neighbour. Merging stops when a single bin remains.
pub fn histogram_bin_edges_mincount(
    data: &[f64],
    min_count: usize,
    edges: Vec<f64>,
) -> Result<Vec<f64>, Error> {
    check_edges(&edges)?;
    let mut edges = edges;
    loop {
        let counts = histogram_counts(data, &edges);
        let Some(idx) = counts.iter().position(|c| *c < min_count) else {
            break;
        };
        if counts.len() == 1 {
            log::warn!(
                "A single bin with {} points remains, below the minimum count {}",
                counts[0],
                min_count
            );
            break;
        }
        log::trace!("Merging bin {} holding {} points", idx, counts[idx]);
        merge_bin(&mut edges, idx);
    }
    log::debug!("{} bins with at least {} points", edges.len() - 1, min_count);
    Ok(edges)
}

/// Merge bins until each is at least `min_width` wide.
///
/// Follows the merge rules of [`histogram_bin_edges_mincount`].
pub fn histogram_bin_edges_minwidth(min_width: f64, edges: Vec<f64>) -> Result<Vec<f64>, Error> {
    check_edges(&edges)?;
    let mut edges = edges;
    while edges.len() > 2 {
        let Some(idx) = edges.windows(2).position(|w| w[1] - w[0] < min_width) else {
            break;
        };
        log::trace!("Merging bin {} of width {}", idx, edges[idx + 1] - edges[idx]);
        merge_bin(&mut edges, idx);
    }
    log::debug!("{} bins at least {} wide", edges.len() - 1, min_width);
    Ok(edges)
}

/// Merge bin `idx` with its right neighbour, or its left one if it is the last bin
fn merge_bin(edges: &mut Vec<f64>, idx: usize) {
    let bins = edges.len() - 1;
    if idx + 1 == bins {
        edges.remove(idx);
    } else {
        edges.remove(idx + 1);
    }
}

/// Merge bins that do not encompass an integer with their preceding bin.
///
/// For example a bin `[1.1, 1.9]` is merged, but `[0.9, 1.1]` is kept.
/// The first and last edge are always retained.
pub fn histogram_bin_edges_integer(edges: &[f64]) -> Result<Vec<f64>, Error> {
    if edges.len() < 2 {
        return Err(Error::InvalidEdges);
    }
    let mut keep: Vec<usize> = edges
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1].floor() - w[0].floor() >= 1.0)
        .map(|(i, _)| i)
        .collect();
    match keep.first_mut() {
        Some(first) => *first = 0,
        None => keep.push(0),
    }
    keep.push(edges.len() - 1);
    Ok(keep.into_iter().map(|i| edges[i]).collect())
}

/// Index of the bin holding `value`, `None` if outside of the edges or NaN
fn bin_index(value: f64, edges: &[f64]) -> Option<usize> {
    let bins = edges.len() - 1;
    if !(value >= edges[0] && value <= edges[bins]) {
        return None;
    }
    let i = edges.partition_point(|e| *e <= value);
    Some((i - 1).min(bins - 1))
}

/// Number of `data` points in each bin. `edges` is assumed valid (see [`check_edges`]).
pub fn histogram_counts(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; edges.len().saturating_sub(1)];
    if counts.is_empty() {
        return counts;
    }
    for v in data {
        if let Some(i) = bin_index(*v, edges) {
            counts[i] += 1;
        }
    }
    counts
}

/// A histogram: one value per bin, and the bin-edges
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Value of each bin (count, density or cumulative count)
    pub counts: Vec<f64>,
    /// Bin-edges, one more than `counts`
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Midpoint of each bin
    pub fn midpoints(&self) -> Vec<f64> {
        histogram_bin_edges2midpoint(&self.edges)
    }
}

/// Histogram of `data` on `edges`.
///
/// With `density`, the counts are normalized to a probability density
/// (see [`histogram_norm`]).
pub fn histogram(data: &[f64], edges: &[f64], density: bool) -> Result<Histogram, Error> {
    check_edges(edges)?;
    let counts: Vec<f64> = histogram_counts(data, edges)
        .into_iter()
        .map(|c| c as f64)
        .collect();
    let counts = if density {
        histogram_norm(&counts, edges)?
    } else {
        counts
    };
    Ok(Histogram {
        counts,
        edges: edges.to_vec(),
    })
}

/// Cumulative histogram of `data` on `edges`.
///
/// With `normalize`, the last bin equals one.
pub fn histogram_cumulative(
    data: &[f64],
    edges: &[f64],
    normalize: bool,
) -> Result<Histogram, Error> {
    let mut hist = histogram(data, edges, false)?;
    let mut acc = 0.0;
    for c in hist.counts.iter_mut() {
        acc += *c;
        *c = acc;
    }
    if normalize && acc > 0.0 {
        hist.counts.iter_mut().for_each(|c| *c /= acc);
    }
    Ok(hist)
}

/// Normalize counts to a probability density: `count / (total * width)`
pub fn histogram_norm(counts: &[f64], edges: &[f64]) -> Result<Vec<f64>, Error> {
    check_len("counts", edges.len().saturating_sub(1), counts.len())?;
    let total: f64 = counts.iter().sum();
    Ok(counts
        .iter()
        .zip(edges.windows(2))
        .map(|(c, w)| c / (total * (w[1] - w[0])))
        .collect())
}

/// Midpoint of each bin
pub fn histogram_bin_edges2midpoint(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Per-bin aggregates, see [`bin`]
#[derive(Debug, Clone, PartialEq)]
pub struct Binned {
    /// Mean (or median) of the x values in each bin
    pub x: Vec<f64>,
    /// Mean (or median) of the y values in each bin
    pub y: Vec<f64>,
    /// Standard deviation of the x values in each bin
    pub xerr: Vec<f64>,
    /// Standard deviation of the y values in each bin
    pub yerr: Vec<f64>,
    /// Number of points in each bin
    pub n: Vec<usize>,
}

/// Bin `(xdata, ydata)` pairs on the x-values.
///
/// Each bin holds the mean (or median with `use_median`) of x and y,
/// their population standard deviations, and the number of points.
/// Empty bins hold NaN and a count of zero.
pub fn bin(xdata: &[f64], ydata: &[f64], edges: &[f64], use_median: bool) -> Result<Binned, Error> {
    check_len("ydata", xdata.len(), ydata.len())?;
    check_edges(edges)?;

    let bins = edges.len() - 1;
    let mut xs: Vec<Vec<f64>> = vec![Vec::new(); bins];
    let mut ys: Vec<Vec<f64>> = vec![Vec::new(); bins];
    for (x, y) in xdata.iter().zip(ydata) {
        if let Some(i) = bin_index(*x, edges) {
            xs[i].push(*x);
            ys[i].push(*y);
        }
    }

    let center = |v: &mut Vec<f64>| {
        if use_median {
            median(v)
        } else {
            mean(v)
        }
    };

    let mut res = Binned {
        x: Vec::with_capacity(bins),
        y: Vec::with_capacity(bins),
        xerr: Vec::with_capacity(bins),
        yerr: Vec::with_capacity(bins),
        n: Vec::with_capacity(bins),
    };
    for (mut x, mut y) in xs.into_iter().zip(ys) {
        res.n.push(x.len());
        res.xerr.push(std_dev(&x));
        res.yerr.push(std_dev(&y));
        res.x.push(center(&mut x));
        res.y.push(center(&mut y));
    }
    Ok(res)
}

fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

fn std_dev(v: &[f64]) -> f64 {
    let m = mean(v);
    (v.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / v.len() as f64).sqrt()
}

fn median(v: &mut [f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    v.sort_by(f64::total_cmp);
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        0.5 * (v[n / 2 - 1] + v[n / 2])
    }
}
