use crate::des::{self, Face, Series};
use crate::drawing::scale::{self, CoordMap, CoordMapXy};
use crate::drawing::{Ctx, TextOpts, text_width};
use crate::style::theme::TickDirection;
use crate::ticks::{auto_ticks, default_labels};
use crate::{Error, geom, missing_params, render};

/// Side of the plot area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Bottom,
    Left,
    Top,
    Right,
}

impl Side {
    fn is_horizontal(&self) -> bool {
        matches!(self, Side::Bottom | Side::Top)
    }

    /// Direction pointing outwards of the plot area
    fn outwards(&self) -> (f32, f32) {
        match self {
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
            Side::Top => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
        }
    }
}

/// Ticks of an axis, resolved to the ones within limits
#[derive(Debug)]
struct AxisTicks {
    major: Vec<(f64, String)>,
    minor: Vec<f64>,
}

impl AxisTicks {
    fn resolve(axis: &des::Axis, cm: &dyn CoordMap) -> Self {
        let (auto_major, auto_minor) = auto_ticks(cm.lim(), axis.scale());
        let major = axis.ticks().unwrap_or(&auto_major);
        let labels = match major.labels() {
            Some(labels) => labels.to_vec(),
            None => default_labels(major.locs(), axis.scale()),
        };
        let major = major
            .locs()
            .iter()
            .copied()
            .zip(labels)
            .filter(|(loc, _)| cm.contains(*loc))
            .collect();
        let minor = axis
            .minor_ticks()
            .or(auto_minor.as_ref())
            .map(|t| t.locs().iter().copied().filter(|l| cm.contains(*l)).collect())
            .unwrap_or_default();
        AxisTicks { major, minor }
    }
}

impl Ctx<'_> {
    pub(super) fn draw_axes<S>(
        &self,
        surface: &mut S,
        axes: &des::Axes,
        rect: &geom::Rect,
    ) -> Result<(), Error>
    where
        S: render::Surface + ?Sized,
    {
        let x = scale::map_scale_coord(axes.xscale(), rect.width(), axes.xlim())?;
        let y = scale::map_scale_coord(axes.yscale(), rect.height(), axes.ylim())?;
        let cm = CoordMapXy {
            x: x.as_ref(),
            y: y.as_ref(),
        };
        let to_fig =
            |(px, py): (f32, f32)| geom::Point::from_xy(rect.left() + px, rect.bottom() - py);

        surface.push_clip(&render::Clip {
            rect,
            transform: None,
        });
        for (idx, series) in axes.series().iter().enumerate() {
            match series {
                Series::Line(line) => self.draw_line(surface, line, idx, &cm, &to_fig),
                Series::Patches(patches) => self.draw_patches(surface, patches, idx, &cm, &to_fig),
                Series::Text(_) => (),
            }
        }
        surface.pop_clip();

        // texts may lie outside of the plot area
        for series in axes.series() {
            if let Series::Text(text) = series {
                let Some(p) = cm.map_coord(text.pos()) else {
                    continue;
                };
                let opts = TextOpts::new(text.font_size().unwrap_or(self.theme.font.size))
                    .with_anchor(text.anchor())
                    .with_baseline(text.baseline())
                    .with_rotation(-text.rotation())
                    .with_color(text.color());
                self.draw_text(surface, text.text(), to_fig(p), opts);
            }
        }

        self.draw_frame(surface, rect);

        let xticks = AxisTicks::resolve(axes.x_axis(), x.as_ref());
        let yticks = AxisTicks::resolve(axes.y_axis(), y.as_ref());
        let ticks_theme = &self.theme.ticks;
        let mut sides = vec![(Side::Bottom, &xticks), (Side::Left, &yticks)];
        if ticks_theme.top {
            sides.push((Side::Top, &xticks));
        }
        if ticks_theme.right {
            sides.push((Side::Right, &yticks));
        }
        for (side, ticks) in sides {
            let cm = if side.is_horizontal() { x.as_ref() } else { y.as_ref() };
            self.draw_ticks(surface, rect, side, ticks, cm);
        }

        let tick_out = match ticks_theme.direction {
            TickDirection::Out => ticks_theme.size,
            TickDirection::In => 0.0,
        };
        let label_offset = tick_out + missing_params::TICK_LABEL_MARGIN;
        let tick_font = self.theme.tick_font_size();

        if let Some(label) = axes.x_axis().label() {
            let pos = geom::Point::from_xy(
                rect.center_x(),
                rect.bottom() + label_offset + tick_font + missing_params::AXIS_LABEL_MARGIN,
            );
            let opts = TextOpts::new(self.theme.label_font_size())
                .with_anchor(render::TextAnchor::Middle)
                .with_baseline(render::TextBaseline::Hanging);
            self.draw_text(surface, label, pos, opts);
        }
        if let Some(label) = axes.y_axis().label() {
            let widest = yticks
                .major
                .iter()
                .map(|(_, l)| text_width(l, tick_font))
                .fold(0.0f32, f32::max);
            let pos = geom::Point::from_xy(
                rect.left() - label_offset - widest - missing_params::AXIS_LABEL_MARGIN,
                rect.center_y(),
            );
            let opts = TextOpts::new(self.theme.label_font_size())
                .with_anchor(render::TextAnchor::Middle)
                .with_rotation(-90.0);
            self.draw_text(surface, label, pos, opts);
        }
        if let Some(title) = axes.title() {
            let pos = geom::Point::from_xy(
                rect.center_x(),
                rect.top() - missing_params::AXIS_LABEL_MARGIN,
            );
            let opts = TextOpts::new(self.theme.title_font_size())
                .with_anchor(render::TextAnchor::Middle);
            self.draw_text(surface, title, pos, opts);
        }

        if axes.has_legend() {
            self.draw_legend(surface, axes, rect);
        }
        Ok(())
    }

    fn draw_line<S, F>(
        &self,
        surface: &mut S,
        line: &des::Line,
        idx: usize,
        cm: &CoordMapXy,
        to_fig: &F,
    )
    where
        S: render::Surface + ?Sized,
        F: Fn((f32, f32)) -> geom::Point,
    {
        // undisplayable points break the line
        let mut pb = geom::PathBuilder::new();
        let mut pen_down = false;
        for (x, y) in line.x().iter().zip(line.y()) {
            match cm.map_coord((*x, *y)) {
                Some(p) => {
                    let p = to_fig(p);
                    if pen_down {
                        pb.line_to(p.x, p.y);
                    } else {
                        pb.move_to(p.x, p.y);
                        pen_down = true;
                    }
                }
                None => pen_down = false,
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let rc = (self.theme, idx);
        let stroke = line.line().as_stroke(&rc, self.theme.line_width);
        surface.draw_path(&render::Path {
            path: &path,
            fill: None,
            stroke: Some(stroke),
            transform: None,
        });
    }

    fn draw_patches<S, F>(
        &self,
        surface: &mut S,
        patches: &des::Patches,
        idx: usize,
        cm: &CoordMapXy,
        to_fig: &F,
    )
    where
        S: render::Surface + ?Sized,
        F: Fn((f32, f32)) -> geom::Point,
    {
        let rc = (self.theme, idx);
        let stroke = patches
            .edge()
            .map(|e| e.as_stroke(&rc, missing_params::PATCH_EDGE_WIDTH));
        let clim = patches.clim();

        for (i, poly) in patches.polygons().iter().enumerate() {
            let mut pb = geom::PathBuilder::new();
            let mut started = false;
            for pt in poly {
                let Some(p) = cm.map_coord(*pt) else {
                    continue;
                };
                let p = to_fig(p);
                if started {
                    pb.line_to(p.x, p.y);
                } else {
                    pb.move_to(p.x, p.y);
                    started = true;
                }
            }
            pb.close();
            let Some(path) = pb.finish() else {
                continue;
            };
            let fill = match patches.face() {
                Face::None => None,
                Face::Fill(fill) => Some(fill.as_paint(&rc)),
                Face::Indexed {
                    values, colormap, ..
                } => {
                    let cmap = colormap.unwrap_or(self.theme.colormap);
                    let color = match clim {
                        Some(clim) => cmap.map(values[i], clim),
                        None => cmap.sample(f64::NAN),
                    };
                    Some(render::Paint::Solid(color))
                }
            };
            surface.draw_path(&render::Path {
                path: &path,
                fill,
                stroke,
                transform: None,
            });
        }
    }

    fn draw_frame<S>(&self, surface: &mut S, rect: &geom::Rect)
    where
        S: render::Surface + ?Sized,
    {
        let spines = &self.theme.spines;
        let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
        let mut pb = geom::PathBuilder::new();
        pb.move_to(l, t);
        pb.line_to(l, b);
        pb.line_to(r, b);
        if spines.right {
            pb.line_to(r, t);
        } else {
            pb.move_to(r, t);
        }
        if spines.top {
            pb.line_to(l, t);
        }
        let Some(path) = pb.finish() else {
            return;
        };
        surface.draw_path(&render::Path {
            path: &path,
            fill: None,
            stroke: Some(self.foreground_stroke(missing_params::SPINE_WIDTH)),
            transform: None,
        });
    }

    fn foreground_stroke(&self, width: f32) -> render::Stroke<'static> {
        render::Stroke {
            color: self.theme.foreground,
            width,
            pattern: render::LinePattern::Solid,
        }
    }

    fn draw_ticks<S>(
        &self,
        surface: &mut S,
        rect: &geom::Rect,
        side: Side,
        ticks: &AxisTicks,
        cm: &dyn CoordMap,
    )
    where
        S: render::Surface + ?Sized,
    {
        let theme = &self.theme.ticks;
        let (ox, oy) = side.outwards();
        // ticks point outwards or inwards
        let dir = match theme.direction {
            TickDirection::Out => 1.0,
            TickDirection::In => -1.0,
        };
        let base = |v: f64| -> Option<geom::Point> {
            let p = cm.map_coord(v)?;
            Some(match side {
                Side::Bottom => geom::Point::from_xy(rect.left() + p, rect.bottom()),
                Side::Top => geom::Point::from_xy(rect.left() + p, rect.top()),
                Side::Left => geom::Point::from_xy(rect.left(), rect.bottom() - p),
                Side::Right => geom::Point::from_xy(rect.right(), rect.bottom() - p),
            })
        };

        let mut pb = geom::PathBuilder::new();
        let mut tick = |p: geom::Point, len: f32| {
            pb.move_to(p.x, p.y);
            pb.line_to(p.x + dir * len * ox, p.y + dir * len * oy);
        };
        for (v, _) in &ticks.major {
            if let Some(p) = base(*v) {
                tick(p, theme.size);
            }
        }
        for v in &ticks.minor {
            if let Some(p) = base(*v) {
                tick(p, theme.size * missing_params::MINOR_TICK_RATIO);
            }
        }
        if let Some(path) = pb.finish() {
            surface.draw_path(&render::Path {
                path: &path,
                fill: None,
                stroke: Some(self.foreground_stroke(missing_params::SPINE_WIDTH)),
                transform: None,
            });
        }

        // labels on the bottom and left sides only
        let (anchor, baseline) = match side {
            Side::Bottom => (render::TextAnchor::Middle, render::TextBaseline::Hanging),
            Side::Left => (render::TextAnchor::End, render::TextBaseline::Middle),
            Side::Top | Side::Right => return,
        };
        let offset = missing_params::TICK_LABEL_MARGIN
            + match theme.direction {
                TickDirection::Out => theme.size,
                TickDirection::In => 0.0,
            };
        let opts = TextOpts::new(self.theme.tick_font_size())
            .with_anchor(anchor)
            .with_baseline(baseline);
        for (v, label) in &ticks.major {
            if let Some(p) = base(*v) {
                let pos = geom::Point::from_xy(p.x + offset * ox, p.y + offset * oy);
                self.draw_text(surface, label, pos, opts);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::{Axes, Line, Patches, Scale, Ticks};
    use crate::drawing::tests::Recorder;
    use crate::style::{Preset, Theme};

    fn rect() -> geom::Rect {
        geom::Rect::from_xywh(0.0, 0.0, 200.0, 100.0)
    }

    #[test]
    fn explicit_ticks_within_limits() {
        let mut axes = Axes::new();
        axes.set_xlim((0.0, 10.0));
        let labels = vec!["a".into(), "b".into(), "c".into()];
        axes.set_xticks(Ticks::with_labels(vec![0.0, 5.0, 20.0], labels).unwrap());
        let x = scale::map_scale_coord(Scale::Linear, 100.0, axes.xlim()).unwrap();
        let ticks = AxisTicks::resolve(axes.x_axis(), x.as_ref());
        assert_eq!(ticks.major, vec![(0.0, "a".to_string()), (5.0, "b".to_string())]);
        assert!(ticks.minor.is_empty());
    }

    #[test]
    fn log_axis_has_minor_ticks() {
        let mut axes = Axes::new();
        axes.set_xscale(Scale::Log);
        axes.set_xlim((1.0, 100.0));
        let x = scale::map_scale_coord(Scale::Log, 100.0, axes.xlim()).unwrap();
        let ticks = AxisTicks::resolve(axes.x_axis(), x.as_ref());
        assert_eq!(ticks.major.len(), 3);
        assert_eq!(ticks.minor.len(), 16);
    }

    #[test]
    fn texts_drawn_outside_of_clip() {
        let mut axes = Axes::new();
        axes.set_xlim((0.0, 1.0));
        axes.set_ylim((0.0, 1.0));
        axes.text(des::Text::new("label", 0.5, 0.5), des::Units::Absolute);
        axes.add_patches(Patches::new(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]]));
        axes.plot(Line::new(vec![0.0, f64::NAN, 1.0], vec![0.0, 0.5, 1.0]).unwrap());

        let theme = Theme::from_presets(&[Preset::Goose]);
        let ctx = Ctx { theme: &theme };
        let mut rec = Recorder::default();
        ctx.draw_axes(&mut rec, &axes, &rect()).unwrap();
        assert!(rec.texts.iter().any(|t| t == "label"));
        assert_eq!(rec.clip_depth, 0);
        // patch edge is black, patch face is not filled
        assert!(rec.paths.iter().any(|(f, c)| f.is_none() && *c == Some(crate::color::BLACK)));
    }

    #[test]
    fn indexed_patches_are_filled() {
        let mut axes = Axes::new();
        let patches = Patches::new(vec![
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        ])
        .with_face(Face::Indexed {
            values: vec![0.0, 1.0],
            colormap: Some(crate::style::Colormap::GRAY),
            clim: None,
        })
        .unwrap();
        axes.add_patches(patches);

        let theme = Theme::default();
        let ctx = Ctx { theme: &theme };
        let mut rec = Recorder::default();
        ctx.draw_axes(&mut rec, &axes, &rect()).unwrap();
        let fills: Vec<_> = rec
            .paths
            .iter()
            .filter_map(|(f, _)| match f {
                Some(render::Paint::Solid(c)) => Some(*c),
                None => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0], crate::style::Colormap::GRAY.sample(0.0));
        assert_eq!(fills[1], crate::style::Colormap::GRAY.sample(1.0));
    }
}
