/*!
 * # Declarative design module for goosempl
 *
 * This module contains the data structures describing figures:
 * a [`Figure`] is a grid of [`Axes`], each holding an ordered list of [`Series`].
 * Nothing is drawn here. See the [`drawing`](crate::drawing) module for that.
 */
pub mod axes;
pub mod series;

pub use axes::{Axes, Axis, Scale, SeriesId, Ticks, Units};
pub use series::{Face, Line, Patches, Series, Text};

use crate::{Theme, geom};

/// Index of an axes in a subplot grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesIdx {
    /// Row index of the axes (0-based)
    pub row: u32,
    /// Column index of the axes (0-based)
    pub col: u32,
}

impl AxesIdx {
    /// Create a new AxesIdx from row and column indices
    pub fn new(row: u32, col: u32) -> Self {
        AxesIdx { row, col }
    }

    pub(crate) fn index(&self, cols: u32) -> usize {
        (self.row * cols + self.col) as usize
    }
}

/// Convert a (row, col) tuple into an AxesIdx
impl From<(u32, u32)> for AxesIdx {
    fn from((row, col): (u32, u32)) -> Self {
        AxesIdx { row, col }
    }
}

/// Figure structure. This is the top-level structure representing a figure to be drawn.
#[derive(Debug, Clone)]
pub struct Figure {
    rows: u32,
    cols: u32,
    axes: Vec<Axes>,

    title: Option<String>,
    size: Option<geom::Size>,
}

impl Default for Figure {
    fn default() -> Self {
        Figure::new()
    }
}

impl Figure {
    /// Create a new figure with a single axes
    pub fn new() -> Figure {
        Figure::subplots(1, 1)
    }

    /// Create a new figure with a grid of `rows` x `cols` axes (at least one of each)
    pub fn subplots(rows: u32, cols: u32) -> Figure {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Figure {
            rows,
            cols,
            axes: vec![Axes::default(); (rows * cols) as usize],
            title: None,
            size: None,
        }
    }

    /// Set the title and return self for chaining
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Figure {
            title: Some(title.into()),
            ..self
        }
    }

    /// Set an explicit size and return self for chaining
    pub fn with_size(self, size: geom::Size) -> Self {
        Figure {
            size: Some(size),
            ..self
        }
    }

    /// The title of the figure
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The size of the figure: explicit, or the figure size of the theme scaled by the grid shape
    pub fn size(&self, theme: &Theme) -> geom::Size {
        self.size
            .unwrap_or_else(|| theme.fig_size.scale(self.cols as f32, self.rows as f32))
    }

    /// Number of rows and columns of the grid
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Get the axes at the given grid index
    pub fn axes(&self, idx: impl Into<AxesIdx>) -> Option<&Axes> {
        let idx = idx.into();
        if idx.row >= self.rows || idx.col >= self.cols {
            return None;
        }
        self.axes.get(idx.index(self.cols))
    }

    /// Get the axes at row `row` and column `col`, mutably
    ///
    /// # Panics
    /// Panics if the index is outside of the grid.
    pub fn axes_mut(&mut self, row: u32, col: u32) -> &mut Axes {
        assert!(
            row < self.rows && col < self.cols,
            "axes ({row}, {col}) outside of a {}x{} grid",
            self.rows,
            self.cols
        );
        let idx = AxesIdx::new(row, col).index(self.cols);
        &mut self.axes[idx]
    }

    /// Iterate over all axes with their index, row by row
    pub fn iter(&self) -> impl Iterator<Item = (AxesIdx, &Axes)> + '_ {
        let cols = self.cols;
        self.axes.iter().enumerate().map(move |(i, a)| {
            let i = i as u32;
            (AxesIdx::new(i / cols, i % cols), a)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Preset;

    #[test]
    fn figure_size_follows_grid() {
        let theme = Theme::from_presets(&[Preset::Goose]);
        let fig = Figure::subplots(2, 3);
        assert_eq!(fig.size(&theme), geom::Size::new(2400.0, 1200.0));
        let fig = fig.with_size(geom::Size::new(100.0, 100.0));
        assert_eq!(fig.size(&theme), geom::Size::new(100.0, 100.0));
    }

    #[test]
    fn grid_indexing() {
        let mut fig = Figure::subplots(2, 2);
        fig.axes_mut(1, 0).set_title("bottom-left");
        assert_eq!(fig.axes((1, 0)).and_then(|a| a.title()), Some("bottom-left"));
        assert!(fig.axes((2, 0)).is_none());
        let idx: Vec<_> = fig.iter().map(|(idx, _)| (idx.row, idx.col)).collect();
        assert_eq!(idx, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
