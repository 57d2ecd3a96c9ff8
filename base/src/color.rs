use std::str::FromStr;
use std::{error, fmt};

mod named;

pub use named::*;

pub trait ResolveColor<Color> {
    fn resolve_color(&self, color: &Color) -> ColorU8;
}

pub trait Color: Clone + Copy {
    #[inline]
    fn resolve<R>(&self, rc: &R) -> ColorU8
    where
        R: ResolveColor<Self>,
        Self: Sized,
    {
        rc.resolve_color(self)
    }
}

impl Color for ColorU8 {}

impl ResolveColor<ColorU8> for () {
    fn resolve_color(&self, color: &ColorU8) -> ColorU8 {
        *color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl ColorU8 {
    pub const fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        let r = (r.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        let g = (g.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        let b = (b.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        ColorU8 { r, g, b, a: 255 }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// Build a color from a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` literal.
    ///
    /// Panics on malformed input, use `str::parse` for runtime strings.
    pub const fn from_html(hex: &[u8]) -> Self {
        if hex[0] != b'#' {
            panic!("Invalid hex color");
        }
        match hex.len() {
            4 => {
                let r = hex_to_u8(hex[1]);
                let g = hex_to_u8(hex[2]);
                let b = hex_to_u8(hex[3]);
                ColorU8::from_rgb(r << 4 | r, g << 4 | g, b << 4 | b)
            }
            5 => {
                let r = hex_to_u8(hex[1]);
                let g = hex_to_u8(hex[2]);
                let b = hex_to_u8(hex[3]);
                let a = hex_to_u8(hex[4]);
                ColorU8::from_rgba(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)
            }
            7 => {
                let r = hex_to_u8(hex[1]) << 4 | hex_to_u8(hex[2]);
                let g = hex_to_u8(hex[3]) << 4 | hex_to_u8(hex[4]);
                let b = hex_to_u8(hex[5]) << 4 | hex_to_u8(hex[6]);
                ColorU8::from_rgb(r, g, b)
            }
            9 => {
                let r = hex_to_u8(hex[1]) << 4 | hex_to_u8(hex[2]);
                let g = hex_to_u8(hex[3]) << 4 | hex_to_u8(hex[4]);
                let b = hex_to_u8(hex[5]) << 4 | hex_to_u8(hex[6]);
                let a = hex_to_u8(hex[7]) << 4 | hex_to_u8(hex[8]);
                ColorU8::from_rgba(r, g, b, a)
            }
            _ => panic!("Invalid hex color"),
        }
    }

    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// The opacity, or `None` if the color is fully opaque
    pub const fn opacity(&self) -> Option<f32> {
        if self.a == 255 {
            None
        } else {
            Some(self.a as f32 / 255.0)
        }
    }

    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const fn with_opacity(self, opacity: f32) -> Self {
        assert!(0.0 <= opacity && opacity <= 1.0);
        ColorU8 {
            a: (self.a as f32 * opacity) as u8,
            ..self
        }
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1)
    pub fn lerp(&self, other: &ColorU8, t: f32) -> ColorU8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        ColorU8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

const fn hex_to_u8(hex: u8) -> u8 {
    match hex {
        b'0'..=b'9' => hex - b'0',
        b'a'..=b'f' => hex - b'a' + 10,
        b'A'..=b'F' => hex - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

/// Error returned when parsing a [`ColorU8`] from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    InvalidFormat,
    InvalidComponent,
    InvalidHex,
    UnknownName,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "invalid color format"),
            ParseError::InvalidComponent => write!(f, "invalid color component"),
            ParseError::InvalidHex => write!(f, "invalid hex color"),
            ParseError::UnknownName => write!(f, "unknown color name"),
        }
    }
}

impl error::Error for ParseError {}

fn parse_component_0_1(s: &str) -> Result<f32, ParseError> {
    let v: f32 = s.trim().parse().map_err(|_| ParseError::InvalidComponent)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(ParseError::InvalidComponent);
    }
    Ok(v)
}

impl FromStr for ColorU8 {
    type Err = ParseError;

    /// Parses `#hex` literals, `(r, g, b)` float triplets in `[0, 1]`,
    /// matplotlib single-letter codes (`"k"`, `"r"`, ...) and named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseError::InvalidFormat);
        }

        if raw.starts_with('#') {
            let bytes = raw.as_bytes();
            if !bytes[1..].iter().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseError::InvalidHex);
            }
            match bytes.len() {
                4 | 5 | 7 | 9 => Ok(ColorU8::from_html(bytes)),
                _ => Err(ParseError::InvalidHex),
            }
        } else if raw.starts_with('(') && raw.ends_with(')') {
            let parts: Vec<&str> = raw[1..raw.len() - 1].split(',').collect();
            if parts.len() != 3 {
                return Err(ParseError::InvalidFormat);
            }
            let r = parse_component_0_1(parts[0])?;
            let g = parse_component_0_1(parts[1])?;
            let b = parse_component_0_1(parts[2])?;
            Ok(ColorU8::from_rgb_f32(r, g, b))
        } else if let Some(col) = named::lookup_name(raw) {
            Ok(col)
        } else {
            Err(ParseError::UnknownName)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_html_hex() {
        assert_eq!("#ff0000".parse::<ColorU8>().unwrap(), RED);
        assert_eq!("#f00".parse::<ColorU8>().unwrap(), RED);

        let c = "#ff000080".parse::<ColorU8>().unwrap();
        assert_eq!(c.rgba(), [255, 0, 0, 128]);
    }

    #[test]
    fn parse_float_triplet() {
        let c = "(0.2, 0.2, 0.2)".parse::<ColorU8>().unwrap();
        assert_eq!(c.rgba(), [51, 51, 51, 255]);
    }

    #[test]
    fn parse_short_codes_and_names() {
        assert_eq!("k".parse::<ColorU8>().unwrap(), BLACK);
        assert_eq!("r".parse::<ColorU8>().unwrap(), RED);
        assert_eq!("Black".parse::<ColorU8>().unwrap(), BLACK);
        assert_eq!("white".parse::<ColorU8>().unwrap(), WHITE);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<ColorU8>(), Err(ParseError::InvalidFormat));
        assert_eq!("#12345".parse::<ColorU8>(), Err(ParseError::InvalidHex));
        assert_eq!("#zzz".parse::<ColorU8>(), Err(ParseError::InvalidHex));
        assert_eq!(
            "(2.0, 0, 0)".parse::<ColorU8>(),
            Err(ParseError::InvalidComponent)
        );
        assert_eq!("notacolor".parse::<ColorU8>(), Err(ParseError::UnknownName));
    }

    #[test]
    fn lerp_ends() {
        assert_eq!(BLACK.lerp(&WHITE, 0.0), BLACK);
        assert_eq!(BLACK.lerp(&WHITE, 1.0), WHITE);
        assert_eq!(BLACK.lerp(&WHITE, 0.5).rgba(), [128, 128, 128, 255]);
    }
}
