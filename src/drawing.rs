//! Drawing module
//!
//! This module contains all the logic to convert a design figure into rendering commands
//! for a given rendering surface.
//! It is the bridge between the [`des`] module and the [`render`] module.
//!
//! Texts are not shaped: their extents are estimated from the font size,
//! and LaTeX math in labels is converted to unicode.
use crate::style::Theme;
use crate::style::theme::FontWeight;
use crate::{ColorU8, Error, des, geom, missing_params, render};

mod axes;
mod legend;
mod scale;
mod tex;

/// Extension trait to draw a design figure
pub trait Drawing {
    /// Draw the figure on `surface`, with the given theme.
    ///
    /// Fails when the limits of an axes cannot be displayed,
    /// e.g. non-positive limits of a log axis.
    fn draw<S>(&self, surface: &mut S, theme: &Theme) -> Result<(), Error>
    where
        S: render::Surface + ?Sized;
}

impl Drawing for des::Figure {
    fn draw<S>(&self, surface: &mut S, theme: &Theme) -> Result<(), Error>
    where
        S: render::Surface + ?Sized,
    {
        draw_figure(self, theme, surface)
    }
}

/// Draw `fig` on `surface`, with the given theme
pub fn draw_figure<S>(fig: &des::Figure, theme: &Theme, surface: &mut S) -> Result<(), Error>
where
    S: render::Surface + ?Sized,
{
    let size = fig.size(theme);
    log::debug!(
        "drawing figure of {}x{} axes, size {}x{}",
        fig.shape().0,
        fig.shape().1,
        size.width(),
        size.height()
    );
    surface.prepare(size);

    if let Some(background) = theme.background {
        surface.fill(background.into());
    }

    let mut rect = geom::Rect::from_xywh(0.0, 0.0, size.width(), size.height());

    if let Some(title) = fig.title() {
        let font_size = theme.title_font_size();
        let top = missing_params::FIG_TITLE_MARGIN;
        let ctx = Ctx { theme };
        ctx.draw_text(
            surface,
            title,
            geom::Point::from_xy(rect.center_x(), top),
            TextOpts::new(font_size)
                .with_anchor(render::TextAnchor::Middle)
                .with_baseline(render::TextBaseline::Hanging),
        );
        rect = geom::Rect::from_trbl(
            top + font_size + missing_params::FIG_TITLE_MARGIN,
            rect.right(),
            rect.bottom(),
            rect.left(),
        );
    }

    let (rows, cols) = fig.shape();
    let cell_w = rect.width() / cols as f32;
    let cell_h = rect.height() / rows as f32;
    let padding = geom::Padding::Custom {
        t: missing_params::AXES_PADDING_TOP,
        r: missing_params::AXES_PADDING_RIGHT,
        b: missing_params::AXES_PADDING_BOTTOM,
        l: missing_params::AXES_PADDING_LEFT,
    };

    let ctx = Ctx { theme };
    for (idx, axes) in fig.iter() {
        let cell = geom::Rect::from_xywh(
            rect.left() + idx.col as f32 * cell_w,
            rect.top() + idx.row as f32 * cell_h,
            cell_w,
            cell_h,
        );
        let plot_rect = cell.pad(&padding);
        ctx.draw_axes(surface, axes, &plot_rect)?;
    }
    Ok(())
}

/// Drawing context
#[derive(Debug, Clone, Copy)]
struct Ctx<'a> {
    theme: &'a Theme,
}

/// Options of a text to draw
#[derive(Debug, Clone, Copy)]
struct TextOpts {
    size: f32,
    color: Option<ColorU8>,
    anchor: render::TextAnchor,
    baseline: render::TextBaseline,
    rotation: f32,
}

impl TextOpts {
    fn new(size: f32) -> Self {
        TextOpts {
            size,
            color: None,
            anchor: render::TextAnchor::Start,
            baseline: render::TextBaseline::Base,
            rotation: 0.0,
        }
    }

    fn with_anchor(self, anchor: render::TextAnchor) -> Self {
        TextOpts { anchor, ..self }
    }

    fn with_baseline(self, baseline: render::TextBaseline) -> Self {
        TextOpts { baseline, ..self }
    }

    fn with_rotation(self, rotation: f32) -> Self {
        TextOpts { rotation, ..self }
    }

    fn with_color(self, color: Option<ColorU8>) -> Self {
        TextOpts { color, ..self }
    }
}

/// Estimated width of `text` once converted to plain text
fn text_width(text: &str, font_size: f32) -> f32 {
    tex::to_plain(text).chars().count() as f32 * font_size * missing_params::CHAR_WIDTH_RATIO
}

impl Ctx<'_> {
    fn draw_text<S>(&self, surface: &mut S, text: &str, pos: geom::Point, opts: TextOpts)
    where
        S: render::Surface + ?Sized,
    {
        let plain = tex::to_plain(text);
        if plain.is_empty() {
            return;
        }
        let font = &self.theme.font;
        surface.draw_text(&render::Text {
            text: &plain,
            pos,
            family: font.family.names(),
            bold: font.weight == FontWeight::Bold,
            size: opts.size,
            color: opts.color.unwrap_or(self.theme.foreground),
            anchor: opts.anchor,
            baseline: opts.baseline,
            rotation: opts.rotation,
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::des::{Figure, Line, Scale};
    use crate::style::Preset;

    /// A surface that records the drawing operations
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub size: Option<geom::Size>,
        pub fills: usize,
        pub paths: Vec<(Option<render::Paint>, Option<ColorU8>)>,
        pub texts: Vec<String>,
        pub clip_depth: i32,
        pub max_clip_depth: i32,
    }

    impl render::Surface for Recorder {
        fn prepare(&mut self, size: geom::Size) {
            self.size = Some(size);
        }

        fn fill(&mut self, _fill: render::Paint) {
            self.fills += 1;
        }

        fn draw_path(&mut self, path: &render::Path) {
            self.paths.push((path.fill, path.stroke.map(|s| s.color)));
        }

        fn draw_text(&mut self, text: &render::Text) {
            self.texts.push(text.text.to_string());
        }

        fn push_clip(&mut self, _clip: &render::Clip) {
            self.clip_depth += 1;
            self.max_clip_depth = self.max_clip_depth.max(self.clip_depth);
        }

        fn pop_clip(&mut self) {
            self.clip_depth -= 1;
        }
    }

    #[test]
    fn draw_simple_figure() {
        let mut fig = Figure::new().with_title("Title");
        let axes = fig.axes_mut(0, 0);
        axes.plot(Line::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());
        axes.set_xlabel("$x$");
        axes.set_ylabel("$y$");

        let theme = Theme::from_presets(&[Preset::Goose]);
        let mut rec = Recorder::default();
        fig.draw(&mut rec, &theme).unwrap();

        assert_eq!(rec.size, Some(geom::Size::new(800.0, 600.0)));
        // goose theme has no background
        assert_eq!(rec.fills, 0);
        assert_eq!(rec.clip_depth, 0);
        assert_eq!(rec.max_clip_depth, 1);
        assert!(rec.texts.iter().any(|t| t == "Title"));
        assert!(rec.texts.iter().any(|t| t == "x"));
        assert!(rec.texts.iter().any(|t| t == "y"));
        // series line uses the first color of the cycle: black
        assert!(rec.paths.iter().any(|(_, c)| *c == Some(crate::color::BLACK)));
    }

    #[test]
    fn draw_log_axes_labels() {
        let mut fig = Figure::new();
        let axes = fig.axes_mut(0, 0);
        axes.set_xscale(Scale::Log);
        axes.set_xlim((1.0, 1000.0));
        axes.set_ylim((0.0, 1.0));

        let mut rec = Recorder::default();
        draw_figure(&fig, &Theme::default(), &mut rec).unwrap();
        assert_eq!(rec.fills, 1);
        assert!(rec.texts.iter().any(|t| t == "10³"));
        assert!(rec.texts.iter().any(|t| t == "10⁰"));
    }

    #[test]
    fn draw_fails_on_invalid_log_limits() {
        let mut fig = Figure::new();
        let axes = fig.axes_mut(0, 0);
        axes.set_yscale(Scale::Log);
        axes.set_ylim((-1.0, 10.0));
        let mut rec = Recorder::default();
        assert_eq!(
            fig.draw(&mut rec, &Theme::default()),
            Err(Error::NonPositiveData)
        );
    }

    #[test]
    fn text_width_uses_plain_text() {
        assert_eq!(text_width("$10^{2}$", 10.0), text_width("abc", 10.0));
    }
}
