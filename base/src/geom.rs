/*!
 * Geometric primitives.
 *
 * Paths and transforms are publicly imported from tiny-skia-path.
 *
 * Y low coordinates are at the top.
 */

use strict_num::{FiniteF32, PositiveF32};
pub use tiny_skia_path::{Path, PathBuilder, PathSegment, Point, Transform};

/// A size in 2D space reprensented by width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    /// Build a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// The width
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height
    pub const fn height(&self) -> f32 {
        self.h
    }

    /// Scale both dimensions
    pub const fn scale(&self, sx: f32, sy: f32) -> Size {
        Size {
            w: self.w * sx,
            h: self.h * sy,
        }
    }
}

/// A rectangle in 2D space reprensented by x, y, width and height
///
/// Negative widths or heights are clamped to zero.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    x: FiniteF32,
    y: FiniteF32,
    w: PositiveF32,
    h: PositiveF32,
}

fn finite(v: f32) -> FiniteF32 {
    FiniteF32::new(v).unwrap_or_default()
}

fn positive(v: f32) -> PositiveF32 {
    PositiveF32::new(v.max(0.0)).unwrap_or_default()
}

impl Rect {
    /// Build a rectangle from x, y, width and height
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect {
            x: finite(x),
            y: finite(y),
            w: positive(w),
            h: positive(h),
        }
    }

    /// Build a rectangle from top, right, bottom and left
    pub fn from_trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Rect::from_xywh(left, top, right - left, bottom - top)
    }

    /// Pad the rectangle, removing padding from 4 sides
    pub fn pad(&self, padding: &Padding) -> Self {
        Rect::from_xywh(
            self.x() + padding.left(),
            self.y() + padding.top(),
            self.width() - padding.sum_hor(),
            self.height() - padding.sum_ver(),
        )
    }

    /// The X coordinate of the left side
    pub fn x(&self) -> f32 {
        self.x.get()
    }

    /// The Y coordinate of the top side
    pub fn y(&self) -> f32 {
        self.y.get()
    }

    /// The width of the rectangle
    pub fn width(&self) -> f32 {
        self.w.get()
    }

    /// The height of the rectangle
    pub fn height(&self) -> f32 {
        self.h.get()
    }

    /// The top Y coordinate
    pub fn top(&self) -> f32 {
        self.y()
    }

    /// The right X coordinate
    pub fn right(&self) -> f32 {
        self.x() + self.width()
    }

    /// The bottom Y coordinate
    pub fn bottom(&self) -> f32 {
        self.y() + self.height()
    }

    /// The left X coordinate
    pub fn left(&self) -> f32 {
        self.x()
    }

    /// The horizontal center X coordinate
    pub fn center_x(&self) -> f32 {
        self.x() + self.width() / 2.0
    }

    /// The vertical center Y coordinate
    pub fn center_y(&self) -> f32 {
        self.y() + self.height() / 2.0
    }

    /// Build a path from the rectangle
    ///
    /// Returns `None` for an empty rectangle.
    pub fn to_path(&self) -> Option<Path> {
        if self.width() == 0.0 || self.height() == 0.0 {
            return None;
        }
        tiny_skia_path::Rect::from_xywh(self.x(), self.y(), self.width(), self.height())
            .map(PathBuilder::from_rect)
    }
}

/// Padding within a graphical element
#[derive(Debug, Clone, Copy)]
pub enum Padding {
    /// Uniform padding in all directions
    Even(f32),
    /// Top, right, bottom and left padding
    Custom {
        /// Top padding
        t: f32,
        /// Right padding
        r: f32,
        /// Bottom padding
        b: f32,
        /// Left padding
        l: f32,
    },
}

impl Padding {
    /// The top padding
    pub const fn top(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Custom { t, .. } => *t,
        }
    }

    /// The right padding
    pub const fn right(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Custom { r, .. } => *r,
        }
    }

    /// The bottom padding
    pub const fn bottom(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Custom { b, .. } => *b,
        }
    }

    /// The left padding
    pub const fn left(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Custom { l, .. } => *l,
        }
    }

    /// The total vertical padding
    pub const fn sum_ver(&self) -> f32 {
        self.top() + self.bottom()
    }

    /// The total horizontal padding
    pub const fn sum_hor(&self) -> f32 {
        self.left() + self.right()
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Padding::Even(value)
    }
}

impl From<(f32, f32, f32, f32)> for Padding {
    fn from((t, r, b, l): (f32, f32, f32, f32)) -> Self {
        Padding::Custom { t, r, b, l }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_sides() {
        let r = Rect::from_trbl(10.0, 110.0, 60.0, 20.0);
        assert_eq!(r.x(), 20.0);
        assert_eq!(r.width(), 90.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center_x(), 65.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn rect_pad_clamps() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let p = r.pad(&Padding::Custom {
            t: 2.0,
            r: 8.0,
            b: 2.0,
            l: 8.0,
        });
        assert_eq!(p.x(), 8.0);
        assert_eq!(p.width(), 0.0);
        assert_eq!(p.height(), 6.0);
        assert!(p.to_path().is_none());
    }
}
