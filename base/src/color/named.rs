use super::ColorU8;

pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);
pub const GREEN: ColorU8 = ColorU8::from_rgb(0, 128, 0);
pub const BLUE: ColorU8 = ColorU8::from_rgb(0, 0, 255);
pub const YELLOW: ColorU8 = ColorU8::from_rgb(255, 255, 0);
pub const CYAN: ColorU8 = ColorU8::from_rgb(0, 255, 255);
pub const MAGENTA: ColorU8 = ColorU8::from_rgb(255, 0, 255);
pub const GRAY: ColorU8 = ColorU8::from_rgb(128, 128, 128);
pub const ORANGE: ColorU8 = ColorU8::from_rgb(255, 165, 0);
pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);

// matplotlib base colors: the one-letter codes map to full-intensity channels,
// except green which is the darker 'g' = (0, 0.5, 0)
const SHORT_CODES: &[(&str, ColorU8)] = &[
    ("k", BLACK),
    ("w", WHITE),
    ("r", RED),
    ("g", GREEN),
    ("b", BLUE),
    ("y", ColorU8::from_rgb(191, 191, 0)),
    ("c", ColorU8::from_rgb(0, 191, 191)),
    ("m", ColorU8::from_rgb(191, 0, 191)),
];

const NAMES: &[(&str, ColorU8)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("cyan", CYAN),
    ("magenta", MAGENTA),
    ("gray", GRAY),
    ("grey", GRAY),
    ("orange", ORANGE),
    ("none", TRANSPARENT),
    ("transparent", TRANSPARENT),
];

pub(super) fn lookup_name(name: &str) -> Option<ColorU8> {
    if let Some((_, c)) = SHORT_CODES.iter().find(|(code, _)| *code == name) {
        return Some(*c);
    }
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}
