//! Colormaps, mapping scalar values to colors
//!
//! Colormaps are piecewise-linear between color stops.
//! Any colormap can be reversed, and named colormaps parse with an optional `_r` suffix.
use std::fmt;
use std::str::FromStr;

use crate::{ColorU8, Error};

type Stops = &'static [(f32, ColorU8)];

const AFMHOT_STOPS: Stops = &[
    (0.0, ColorU8::from_rgb(0, 0, 0)),
    (0.25, ColorU8::from_rgb(128, 0, 0)),
    (0.5, ColorU8::from_rgb(255, 128, 0)),
    (0.75, ColorU8::from_rgb(255, 255, 128)),
    (1.0, ColorU8::from_rgb(255, 255, 255)),
];

const VIRIDIS_STOPS: Stops = &[
    (0.0, ColorU8::from_html(b"#440154")),
    (0.25, ColorU8::from_html(b"#3b528b")),
    (0.5, ColorU8::from_html(b"#21918c")),
    (0.75, ColorU8::from_html(b"#5ec962")),
    (1.0, ColorU8::from_html(b"#fde725")),
];

const RDBU_STOPS: Stops = &[
    (0.0, ColorU8::from_html(b"#67001f")),
    (0.1, ColorU8::from_html(b"#b2182b")),
    (0.2, ColorU8::from_html(b"#d6604d")),
    (0.3, ColorU8::from_html(b"#f4a582")),
    (0.4, ColorU8::from_html(b"#fddbc7")),
    (0.5, ColorU8::from_html(b"#f7f7f7")),
    (0.6, ColorU8::from_html(b"#d1e5f0")),
    (0.7, ColorU8::from_html(b"#92c5de")),
    (0.8, ColorU8::from_html(b"#4393c3")),
    (0.9, ColorU8::from_html(b"#2166ac")),
    (1.0, ColorU8::from_html(b"#053061")),
];

const YLORRD_STOPS: Stops = &[
    (0.0, ColorU8::from_html(b"#ffffcc")),
    (0.125, ColorU8::from_html(b"#ffeda0")),
    (0.25, ColorU8::from_html(b"#fed976")),
    (0.375, ColorU8::from_html(b"#feb24c")),
    (0.5, ColorU8::from_html(b"#fd8d3c")),
    (0.625, ColorU8::from_html(b"#fc4e2a")),
    (0.75, ColorU8::from_html(b"#e31a1c")),
    (0.875, ColorU8::from_html(b"#bd0026")),
    (1.0, ColorU8::from_html(b"#800026")),
];

const GRAY_STOPS: Stops = &[
    (0.0, ColorU8::from_rgb(0, 0, 0)),
    (1.0, ColorU8::from_rgb(255, 255, 255)),
];

/// A colormap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colormap {
    name: &'static str,
    stops: Stops,
    reversed: bool,
}

impl Colormap {
    /// Black-red-yellow-white "afm hot" colormap
    pub const AFMHOT: Colormap = Colormap::new("afmhot", AFMHOT_STOPS);
    /// Perceptually uniform viridis colormap
    pub const VIRIDIS: Colormap = Colormap::new("viridis", VIRIDIS_STOPS);
    /// Red-white-blue diverging colormap
    pub const RDBU: Colormap = Colormap::new("RdBu", RDBU_STOPS);
    /// Yellow-orange-red sequential colormap
    pub const YLORRD: Colormap = Colormap::new("YlOrRd", YLORRD_STOPS);
    /// Black to white
    pub const GRAY: Colormap = Colormap::new("gray", GRAY_STOPS);

    /// All named colormaps
    pub const ALL: &[Colormap] = &[
        Colormap::AFMHOT,
        Colormap::VIRIDIS,
        Colormap::RDBU,
        Colormap::YLORRD,
        Colormap::GRAY,
    ];

    const fn new(name: &'static str, stops: Stops) -> Self {
        Colormap {
            name,
            stops,
            reversed: false,
        }
    }

    /// The name of the colormap, without the `_r` suffix
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the colormap is reversed
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// The reversed colormap
    pub const fn reversed(self) -> Self {
        Colormap {
            reversed: !self.reversed,
            ..self
        }
    }

    /// Sample the colormap at `t`, clamped to `[0, 1]`.
    /// NaN maps to a fully transparent color.
    pub fn sample(&self, t: f64) -> ColorU8 {
        if t.is_nan() {
            return ColorU8::from_rgba(0, 0, 0, 0);
        }
        let mut t = t.clamp(0.0, 1.0) as f32;
        if self.reversed {
            t = 1.0 - t;
        }
        // first stop strictly beyond t
        let i = self.stops.partition_point(|(s, _)| *s <= t);
        if i == 0 {
            return self.stops[0].1;
        }
        if i == self.stops.len() {
            return self.stops[i - 1].1;
        }
        let (t0, c0) = self.stops[i - 1];
        let (t1, c1) = self.stops[i];
        c0.lerp(&c1, (t - t0) / (t1 - t0))
    }

    /// Map `value` to a color, with `clim` the values mapped to both ends of the colormap
    pub fn map(&self, value: f64, clim: (f64, f64)) -> ColorU8 {
        let (lo, hi) = clim;
        if hi == lo {
            return self.sample(0.5);
        }
        self.sample((value - lo) / (hi - lo))
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap::VIRIDIS
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            write!(f, "{}_r", self.name)
        } else {
            f.write_str(self.name)
        }
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, reversed) = match s.strip_suffix("_r") {
            Some(name) => (name, true),
            None => (s, false),
        };
        let cmap = Colormap::ALL
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownColormap(s.to_string()))?;
        Ok(if reversed { cmap.reversed() } else { *cmap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn sample_ends() {
        assert_eq!(Colormap::AFMHOT.sample(0.0), color::BLACK);
        assert_eq!(Colormap::AFMHOT.sample(1.0), color::WHITE);
        assert_eq!(Colormap::AFMHOT.sample(-3.0), color::BLACK);
        assert_eq!(Colormap::AFMHOT.reversed().sample(0.0), color::WHITE);
        assert_eq!(Colormap::GRAY.sample(0.5), ColorU8::from_rgb(128, 128, 128));
        assert_eq!(Colormap::VIRIDIS.sample(f64::NAN).alpha(), 0);
    }

    #[test]
    fn map_clim() {
        let c = Colormap::GRAY.map(15.0, (10.0, 20.0));
        assert_eq!(c, Colormap::GRAY.sample(0.5));
        assert_eq!(Colormap::GRAY.map(30.0, (10.0, 20.0)), color::WHITE);
    }

    #[test]
    fn parse() {
        assert_eq!("afmhot".parse::<Colormap>(), Ok(Colormap::AFMHOT));
        assert_eq!("RdBu_r".parse::<Colormap>(), Ok(Colormap::RDBU.reversed()));
        assert_eq!(Colormap::RDBU.reversed().to_string(), "RdBu_r");
        assert!(matches!(
            "jet".parse::<Colormap>(),
            Err(Error::UnknownColormap(_))
        ));
    }
}
