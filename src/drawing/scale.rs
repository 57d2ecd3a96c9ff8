use crate::Error;
use crate::des::Scale;

/// Maps coordinates from data space to surface space.
/// The surface space starts at zero for the lower limit and goes up for higher data.
pub trait CoordMap: std::fmt::Debug {
    /// Map a data coordinate. `None` for values that cannot be displayed on this scale.
    fn map_coord(&self, v: f64) -> Option<f32>;

    /// The limits of the axis
    fn lim(&self) -> (f64, f64);

    /// Whether `v` lies within the limits
    fn contains(&self, v: f64) -> bool {
        let (lo, hi) = self.lim();
        let tol = 1e-9 * (hi - lo).abs();
        v >= lo.min(hi) - tol && v <= lo.max(hi) + tol
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoordMapXy<'a> {
    pub x: &'a dyn CoordMap,
    pub y: &'a dyn CoordMap,
}

impl<'a> CoordMapXy<'a> {
    pub fn map_coord(&self, dp: (f64, f64)) -> Option<(f32, f32)> {
        self.x
            .map_coord(dp.0)
            .and_then(|x| self.y.map_coord(dp.1).map(|y| (x, y)))
    }
}

pub fn map_scale_coord(
    scale: Scale,
    plot_size: f32,
    lim: (f64, f64),
) -> Result<Box<dyn CoordMap>, Error> {
    if !(lim.0.is_finite() && lim.1.is_finite()) || lim.0 == lim.1 {
        return Err(Error::InconsistentArgs(format!(
            "cannot draw an axis with limits {:?}",
            lim
        )));
    }
    match scale {
        Scale::Linear => Ok(Box::new(LinCoordMap { plot_size, lim })),
        Scale::Log => {
            if lim.0 <= 0.0 || lim.1 <= 0.0 {
                return Err(Error::NonPositiveData);
            }
            Ok(Box::new(LogCoordMap {
                plot_size,
                lim,
                log_lim: (lim.0.log10(), lim.1.log10()),
            }))
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LinCoordMap {
    plot_size: f32,
    lim: (f64, f64),
}

impl CoordMap for LinCoordMap {
    fn map_coord(&self, x: f64) -> Option<f32> {
        if !x.is_finite() {
            return None;
        }
        let ratio = (x - self.lim.0) / (self.lim.1 - self.lim.0);
        Some(ratio as f32 * self.plot_size)
    }

    fn lim(&self) -> (f64, f64) {
        self.lim
    }
}

#[derive(Debug, Clone, Copy)]
struct LogCoordMap {
    plot_size: f32,
    lim: (f64, f64),
    log_lim: (f64, f64),
}

impl CoordMap for LogCoordMap {
    fn map_coord(&self, x: f64) -> Option<f32> {
        if !(x.is_finite() && x > 0.0) {
            return None;
        }
        let (start, end) = self.log_lim;
        let ratio = (x.log10() - start) / (end - start);
        Some(ratio as f32 * self.plot_size)
    }

    fn lim(&self) -> (f64, f64) {
        self.lim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn test_map_scale_coord_linear() {
        let map = map_scale_coord(Scale::Linear, 100.0, (0.0, 10.0)).unwrap();
        assert_near!(abs, map.map_coord(0.0).unwrap(), 0.0f32, 1e-4);
        assert_near!(abs, map.map_coord(5.0).unwrap(), 50.0f32, 1e-4);
        assert_near!(abs, map.map_coord(12.0).unwrap(), 120.0f32, 1e-4);
        assert!(map.map_coord(f64::NAN).is_none());
        assert!(map.contains(10.0));
        assert!(!map.contains(10.5));
    }

    #[test]
    fn test_map_scale_coord_log() {
        let map = map_scale_coord(Scale::Log, 100.0, (1e-5, 1e5)).unwrap();
        assert_near!(abs, map.map_coord(1e-5).unwrap(), 0.0f32, 1e-4);
        assert_near!(abs, map.map_coord(1.0).unwrap(), 50.0f32, 1e-4);
        assert_near!(abs, map.map_coord(1e5).unwrap(), 100.0f32, 1e-4);
        assert!(map.map_coord(0.0).is_none());
        assert!(map.map_coord(-1.0).is_none());
    }

    #[test]
    fn test_map_scale_coord_invalid() {
        assert_eq!(
            map_scale_coord(Scale::Log, 100.0, (0.0, 10.0)).unwrap_err(),
            Error::NonPositiveData
        );
        assert!(matches!(
            map_scale_coord(Scale::Linear, 100.0, (1.0, 1.0)),
            Err(Error::InconsistentArgs(_))
        ));
    }

    #[test]
    fn test_map_xy() {
        let x = map_scale_coord(Scale::Linear, 10.0, (0.0, 1.0)).unwrap();
        let y = map_scale_coord(Scale::Log, 20.0, (1.0, 100.0)).unwrap();
        let xy = CoordMapXy {
            x: x.as_ref(),
            y: y.as_ref(),
        };
        let (px, py) = xy.map_coord((0.5, 10.0)).unwrap();
        assert_near!(abs, px, 5.0f32, 1e-4);
        assert_near!(abs, py, 10.0f32, 1e-4);
        assert!(xy.map_coord((0.5, 0.0)).is_none());
    }
}
