use crate::des::{self, Face, Series};
use crate::drawing::{Ctx, TextOpts, text_width};
use crate::style::defaults;
use crate::{color, geom, missing_params, render};

/// Shape drawn in front of a legend label
#[derive(Debug, Clone, Copy)]
enum Handle<'a> {
    Line(&'a des::Line),
    Patches(&'a des::Patches),
}

/// A legend entry, with the index of its series for color resolution
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    index: usize,
    label: &'a str,
    handle: Handle<'a>,
}

fn entries(axes: &des::Axes) -> Vec<Entry<'_>> {
    axes.series()
        .iter()
        .enumerate()
        .filter_map(|(index, s)| {
            let label = s.name()?;
            let handle = match s {
                Series::Line(line) => Handle::Line(line),
                Series::Patches(patches) => Handle::Patches(patches),
                Series::Text(_) => return None,
            };
            Some(Entry {
                index,
                label,
                handle,
            })
        })
        .collect()
}

/// Rectangle path with rounded corners
fn rounded_rect(rect: &geom::Rect, radius: f32) -> Option<geom::Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let mut pb = geom::PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.quad_to(rt, t, rt, t + r);
    pb.line_to(rt, b - r);
    pb.quad_to(rt, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.quad_to(l, b, l, b - r);
    pb.line_to(l, t + r);
    pb.quad_to(l, t, l + r, t);
    pb.close();
    pb.finish()
}

impl Ctx<'_> {
    /// Draw the legend of the named series of `axes`, in the upper right corner of `rect`
    pub(super) fn draw_legend<S>(&self, surface: &mut S, axes: &des::Axes, rect: &geom::Rect)
    where
        S: render::Surface + ?Sized,
    {
        let entries = entries(axes);
        if entries.is_empty() {
            return;
        }

        let theme = self.theme;
        let font = theme.legend_font_size();
        let row = font * missing_params::LEGEND_ROW_SPACING;
        let pad = missing_params::LEGEND_PADDING;
        let text_pad = theme.legend.handle_text_pad * font;
        let handle_len = missing_params::LEGEND_LINE_LENGTH;

        let label_w = entries
            .iter()
            .map(|e| text_width(e.label, font))
            .fold(0.0f32, f32::max);
        let width = 2.0 * pad + handle_len + text_pad + label_w;
        let height = 2.0 * pad + entries.len() as f32 * row;
        let frame = geom::Rect::from_xywh(
            rect.right() - missing_params::LEGEND_MARGIN - width,
            rect.top() + missing_params::LEGEND_MARGIN,
            width,
            height,
        );

        let background = theme.background.unwrap_or(color::WHITE);
        let frame_path = if theme.legend.fancybox {
            rounded_rect(&frame, defaults::LEGEND_CORNER_RADIUS)
        } else {
            frame.to_path()
        };
        if let Some(path) = frame_path {
            surface.draw_path(&render::Path {
                path: &path,
                fill: Some(render::Paint::Solid(
                    background.with_opacity(defaults::LEGEND_FILL_OPACITY),
                )),
                stroke: Some(render::Stroke {
                    color: defaults::LEGEND_BORDER,
                    width: missing_params::SPINE_WIDTH,
                    pattern: render::LinePattern::Solid,
                }),
                transform: None,
            });
        }

        for (i, entry) in entries.iter().enumerate() {
            let cy = frame.top() + pad + (i as f32 + 0.5) * row;
            let x0 = frame.left() + pad;
            let rc = (theme, entry.index);
            match entry.handle {
                Handle::Line(line) => {
                    let mut pb = geom::PathBuilder::new();
                    pb.move_to(x0, cy);
                    pb.line_to(x0 + handle_len, cy);
                    if let Some(path) = pb.finish() {
                        surface.draw_path(&render::Path {
                            path: &path,
                            fill: None,
                            stroke: Some(line.line().as_stroke(&rc, theme.line_width)),
                            transform: None,
                        });
                    }
                }
                Handle::Patches(patches) => {
                    let fill = match patches.face() {
                        Face::None => None,
                        Face::Fill(fill) => Some(fill.as_paint(&rc)),
                        Face::Indexed { colormap, .. } => Some(render::Paint::Solid(
                            colormap.unwrap_or(theme.colormap).sample(0.5),
                        )),
                    };
                    let swatch =
                        geom::Rect::from_xywh(x0, cy - font / 3.0, handle_len, 2.0 * font / 3.0);
                    surface.draw_rect(&render::Rect {
                        rect: swatch,
                        fill,
                        stroke: patches
                            .edge()
                            .map(|e| e.as_stroke(&rc, missing_params::PATCH_EDGE_WIDTH)),
                        transform: None,
                    });
                }
            }
            let opts = TextOpts::new(font).with_baseline(render::TextBaseline::Middle);
            let pos = geom::Point::from_xy(x0 + handle_len + text_pad, cy);
            self.draw_text(surface, entry.label, pos, opts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::{Axes, Line, Patches};
    use crate::drawing::tests::Recorder;
    use crate::style::Theme;

    #[test]
    fn only_named_series_have_entries() {
        let mut axes = Axes::new();
        axes.plot(Line::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap().with_name("a"));
        axes.plot(Line::new(vec![0.0, 1.0], vec![1.0, 0.0]).unwrap());
        axes.add_patches(Patches::new(vec![]).with_name("b"));
        axes.text(des::Text::new("t", 0.0, 0.0), des::Units::Absolute);

        let entries = entries(&axes);
        let labels: Vec<_> = entries.iter().map(|e| (e.index, e.label)).collect();
        assert_eq!(labels, vec![(0, "a"), (2, "b")]);
    }

    #[test]
    fn legend_draws_labels() {
        let mut axes = Axes::new();
        axes.plot(Line::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap().with_name("$x^2$"));
        axes.set_legend(true);

        let theme = Theme::default();
        let ctx = Ctx { theme: &theme };
        let mut rec = Recorder::default();
        let rect = geom::Rect::from_xywh(0.0, 0.0, 400.0, 300.0);
        ctx.draw_legend(&mut rec, &axes, &rect);
        assert_eq!(rec.texts, vec!["x²".to_string()]);
        // frame and handle
        assert_eq!(rec.paths.len(), 2);
    }

    #[test]
    fn rounded_frame() {
        let rect = geom::Rect::from_xywh(0.0, 0.0, 40.0, 20.0);
        let path = rounded_rect(&rect, 4.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 20.0);
    }
}
