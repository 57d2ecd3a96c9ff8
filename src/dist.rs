//! Empirical cumulative distributions, and sampling from them.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Error, utils};

/// Sorted finite values of `data`. NaN values are dropped.
fn sorted(data: &[f64]) -> Vec<f64> {
    let mut data: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    data.sort_by(f64::total_cmp);
    data
}

/// Count the values of sorted `data` below each unique value.
///
/// Returns for each unique value `x`: (count of `< x`, count of `<= x`, `x`)
fn unique_counts(data: &[f64]) -> Vec<(usize, usize, f64)> {
    let mut res = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let x = data[start];
        let end = start + data[start..].partition_point(|v| *v <= x);
        res.push((start, end, x));
        start = end;
    }
    res
}

/// Empirical cumulative distribution function of `data`.
///
/// Returns `(p, x)` where `x` are the sorted unique values of `data` and `p[i]` the
/// fraction of data points strictly smaller than `x[i]`, or smaller or equal if `less_equal`.
/// NaN values are ignored.
///
/// ```
/// let (p, x) = goosempl::dist::cdf(&[1.0, 2.0, 2.0, 3.0], false);
/// assert_eq!(x, vec![1.0, 2.0, 3.0]);
/// assert_eq!(p, vec![0.0, 0.25, 0.75]);
/// ```
pub fn cdf(data: &[f64], less_equal: bool) -> (Vec<f64>, Vec<f64>) {
    let data = sorted(data);
    let n = data.len() as f64;
    unique_counts(&data)
        .into_iter()
        .map(|(lt, le, x)| {
            let count = if less_equal { le } else { lt };
            (count as f64 / n, x)
        })
        .unzip()
}

/// Empirical complementary cumulative distribution function of `data`.
///
/// Returns `(p, x)` where `x` are the sorted unique values of `data` and `p[i]` the
/// fraction of data points greater or equal to `x[i]` if `greater_equal`, or strictly
/// greater otherwise.
/// NaN values are ignored.
pub fn ccdf(data: &[f64], greater_equal: bool) -> (Vec<f64>, Vec<f64>) {
    let data = sorted(data);
    let n = data.len();
    unique_counts(&data)
        .into_iter()
        .map(|(lt, le, x)| {
            let count = if greater_equal { n - lt } else { n - le };
            (count as f64 / n as f64, x)
        })
        .unzip()
}

/// Options of [`random_from_cdf`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomFromCdf {
    /// Draw the cumulative probabilities from an evenly spaced sequence
    /// instead of uniformly at random
    pub linspace: bool,
    /// Shuffle the output. Otherwise it is sorted.
    pub shuffle: bool,
}

impl Default for RandomFromCdf {
    fn default() -> Self {
        RandomFromCdf {
            linspace: false,
            shuffle: true,
        }
    }
}

impl RandomFromCdf {
    /// Set whether probabilities are evenly spaced, returning self for chaining
    pub fn with_linspace(self, linspace: bool) -> Self {
        RandomFromCdf { linspace, ..self }
    }

    /// Set whether the output is shuffled, returning self for chaining
    pub fn with_shuffle(self, shuffle: bool) -> Self {
        RandomFromCdf { shuffle, ..self }
    }
}

/// Draw `n` values from the discrete cumulative distribution `(p, x)`
/// by inverse transform sampling.
///
/// `p` must be increasing. Cumulative probabilities are mapped to values by linear interpolation.
pub fn random_from_cdf<R>(
    n: usize,
    p: &[f64],
    x: &[f64],
    opts: &RandomFromCdf,
    rng: &mut R,
) -> Result<Vec<f64>, Error>
where
    R: Rng + ?Sized,
{
    crate::error::check_len("x", p.len(), x.len())?;
    if p.is_empty() {
        return Err(Error::EmptyData);
    }

    let probs = if opts.linspace {
        utils::linspace(0.0, 1.0, n)
    } else {
        let mut probs: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
        probs.sort_by(f64::total_cmp);
        probs
    };

    let mut res: Vec<f64> = probs.iter().map(|q| utils::interp(*q, p, x)).collect();
    if opts.shuffle {
        res.shuffle(rng);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::tests::{Near, assert_near};

    const DATA: &[f64] = &[0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 5.0];

    fn frac(counts: &[usize]) -> Vec<f64> {
        counts.iter().map(|c| *c as f64 / 13.0).collect()
    }

    #[test]
    fn cdf_strict_and_inclusive() {
        let (p, x) = cdf(DATA, false);
        assert_eq!(x, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_near!(abs, p, frac(&[0, 2, 3, 4, 6, 9]));

        let (p, _) = cdf(DATA, true);
        assert_near!(abs, p, frac(&[2, 3, 4, 6, 9, 13]));
    }

    #[test]
    fn ccdf_complements_cdf() {
        let (p, x) = ccdf(DATA, true);
        let (q, y) = cdf(DATA, false);
        assert_eq!(x, y);
        let complement: Vec<f64> = q.iter().map(|q| 1.0 - q).collect();
        assert_near!(abs, p, complement);

        let (p, _) = ccdf(DATA, false);
        assert_near!(abs, p, frac(&[11, 10, 9, 7, 4, 0]));
    }

    #[test]
    fn nan_ignored() {
        let (p, x) = cdf(&[f64::NAN, 2.0, 1.0], false);
        assert_eq!(x, vec![1.0, 2.0]);
        assert_eq!(p, vec![0.0, 0.5]);
        let (p, x) = cdf(&[], false);
        assert!(p.is_empty() && x.is_empty());
    }

    #[test]
    fn random_linspace_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let opts = RandomFromCdf::default()
            .with_linspace(true)
            .with_shuffle(false);
        let res = random_from_cdf(5, &[0.0, 1.0], &[10.0, 20.0], &opts, &mut rng).unwrap();
        assert_near!(abs, res, vec![10.0, 12.5, 15.0, 17.5, 20.0]);
    }

    #[test]
    fn random_draws_follow_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        // uniform on [0, 2]
        let res =
            random_from_cdf(10000, &[0.0, 1.0], &[0.0, 2.0], &RandomFromCdf::default(), &mut rng)
                .unwrap();
        assert_eq!(res.len(), 10000);
        assert!(res.iter().all(|v| (0.0..=2.0).contains(v)));
        let mean = res.iter().sum::<f64>() / res.len() as f64;
        assert_near!(abs, mean, 1.0, 0.05);
        assert!(res.windows(2).any(|w| w[0] > w[1]));

        let opts = RandomFromCdf::default().with_shuffle(false);
        let res = random_from_cdf(100, &[0.0, 1.0], &[0.0, 2.0], &opts, &mut rng).unwrap();
        assert!(res.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn random_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let opts = RandomFromCdf::default();
        assert_eq!(
            random_from_cdf(3, &[], &[], &opts, &mut rng),
            Err(Error::EmptyData)
        );
        assert!(matches!(
            random_from_cdf(3, &[0.0, 1.0], &[1.0], &opts, &mut rng),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
