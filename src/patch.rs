/*!
 * Collections of polygons: meshes and histogram bars.
 *
 * [`patch`] and [`hist`] set explicit limits with a 10% margin around the patches,
 * unless [`PatchStyle::autoscale`] is `false`.
 */
use crate::des::{Axes, Face, Patches, SeriesId};
use crate::style::{Colormap, defaults, series};
use crate::transform::minmax;
use crate::{Error, color};

/// Style options of [`patch`] and [`hist`]
#[derive(Debug, Clone)]
pub struct PatchStyle {
    /// One value per patch, mapped to the face color through the colormap
    pub cindex: Option<Vec<f64>>,
    /// Colormap of `cindex`, `None` for the colormap of the theme
    pub colormap: Option<Colormap>,
    /// Values of `cindex` mapped to both ends of the colormap
    pub clim: Option<(f64, f64)>,
    /// Edge style, `None` for no edges. Black by default.
    pub edge: Option<series::Line>,
    /// Face fill when no `cindex` is given. Transparent by default.
    pub face: Option<series::Fill>,
    /// Set the limits of the axes to the extent of the patches
    pub autoscale: bool,
    /// Legend entry
    pub name: Option<String>,
}

impl Default for PatchStyle {
    fn default() -> Self {
        PatchStyle {
            cindex: None,
            colormap: None,
            clim: None,
            edge: Some(series::Line::from(color::BLACK)),
            face: None,
            autoscale: true,
            name: None,
        }
    }
}

impl PatchStyle {
    /// Color each patch by a value, returning self for chaining
    pub fn with_cindex(self, cindex: Vec<f64>) -> Self {
        PatchStyle {
            cindex: Some(cindex),
            ..self
        }
    }

    /// Set the colormap, returning self for chaining
    pub fn with_colormap(self, colormap: Colormap) -> Self {
        PatchStyle {
            colormap: Some(colormap),
            ..self
        }
    }

    /// Set the color limits, returning self for chaining
    pub fn with_clim(self, clim: (f64, f64)) -> Self {
        PatchStyle {
            clim: Some(clim),
            ..self
        }
    }

    /// Set the edge style, returning self for chaining
    pub fn with_edge(self, edge: Option<series::Line>) -> Self {
        PatchStyle { edge, ..self }
    }

    /// Set the face fill, returning self for chaining
    pub fn with_face(self, face: impl Into<series::Fill>) -> Self {
        PatchStyle {
            face: Some(face.into()),
            ..self
        }
    }

    /// Enable or disable autoscaling, returning self for chaining
    pub fn with_autoscale(self, autoscale: bool) -> Self {
        PatchStyle { autoscale, ..self }
    }

    /// Set the legend entry, returning self for chaining
    pub fn with_name(self, name: impl Into<String>) -> Self {
        PatchStyle {
            name: Some(name.into()),
            ..self
        }
    }

    fn build(&self, polygons: Vec<Vec<(f64, f64)>>) -> Result<Patches, Error> {
        let face = match (&self.cindex, self.face) {
            (Some(values), _) => Face::Indexed {
                values: values.clone(),
                colormap: self.colormap,
                clim: self.clim,
            },
            (None, Some(fill)) => Face::Fill(fill),
            (None, None) => Face::None,
        };
        let mut patches = Patches::new(polygons)
            .with_edge(self.edge.clone())
            .with_face(face)?;
        if let Some(name) = &self.name {
            patches = patches.with_name(name.clone());
        }
        Ok(patches)
    }
}

fn margin_lim(lim: (f64, f64)) -> (f64, f64) {
    if lim.0 == lim.1 {
        let delta = if lim.0 == 0.0 { 0.5 } else { 0.05 * lim.0.abs() };
        return (lim.0 - delta, lim.1 + delta);
    }
    let margin = defaults::PATCH_MARGIN * (lim.1 - lim.0);
    (lim.0 - margin, lim.1 + margin)
}

/// Add a mesh of polygons to `axes`.
///
/// `coor` holds the nodal coordinates, and each row of `conn` the indices in `coor`
/// of the vertices of one polygon.
///
/// ```
/// use goosempl::des::Axes;
/// use goosempl::patch::{PatchStyle, patch};
///
/// let coor = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (2.0, 0.0), (2.0, 1.0)];
/// let conn = [[0usize, 1, 2, 3], [1, 4, 5, 2]];
/// let style = PatchStyle::default().with_cindex(vec![1.0, 2.0]);
///
/// let mut axes = Axes::new();
/// patch(&mut axes, &coor, &conn, &style).unwrap();
/// let (lo, hi) = axes.xlim();
/// assert!((lo + 0.2).abs() < 1e-12 && (hi - 2.2).abs() < 1e-12);
/// ```
pub fn patch<C>(
    axes: &mut Axes,
    coor: &[(f64, f64)],
    conn: &[C],
    style: &PatchStyle,
) -> Result<SeriesId, Error>
where
    C: AsRef<[usize]>,
{
    if coor.is_empty() {
        return Err(Error::EmptyData);
    }
    let polygons = conn
        .iter()
        .map(|row| {
            row.as_ref()
                .iter()
                .map(|&i| {
                    coor.get(i).copied().ok_or_else(|| {
                        Error::InconsistentArgs(format!(
                            "node {} out of range for {} coordinates",
                            i,
                            coor.len()
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let patches = style.build(polygons)?;

    if style.autoscale {
        let x: Vec<f64> = coor.iter().map(|c| c.0).collect();
        let y: Vec<f64> = coor.iter().map(|c| c.1).collect();
        axes.set_xlim(margin_lim(minmax(&x)?));
        axes.set_ylim(margin_lim(minmax(&y)?));
    }

    Ok(axes.add_patches(patches))
}

/// Add histogram bars to `axes`: one rectangle from 0 to `counts[i]` per bin.
///
/// `edges` must hold one more value than `counts`.
pub fn hist(
    axes: &mut Axes,
    counts: &[f64],
    edges: &[f64],
    style: &PatchStyle,
) -> Result<SeriesId, Error> {
    crate::error::check_len("edges", counts.len() + 1, edges.len())?;
    if counts.is_empty() {
        return Err(Error::EmptyData);
    }

    let polygons = counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&c, w)| vec![(w[0], 0.0), (w[1], 0.0), (w[1], c), (w[0], c)])
        .collect();
    let patches = style.build(polygons)?;

    if style.autoscale {
        let (_, max) = minmax(counts)?;
        axes.set_xlim(margin_lim((edges[0], edges[edges.len() - 1])));
        axes.set_ylim(margin_lim((0.0, max)));
    }

    Ok(axes.add_patches(patches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::des::Series;
    use crate::tests::{Near, assert_near};

    #[test]
    fn hist_bars() {
        let mut axes = Axes::new();
        let id = hist(&mut axes, &[1.0, 3.0], &[0.0, 1.0, 2.0], &PatchStyle::default()).unwrap();
        let Some(Series::Patches(patches)) = axes.get(id) else {
            panic!("expected patches");
        };
        assert_eq!(patches.polygons().len(), 2);
        assert_eq!(
            patches.polygons()[1],
            vec![(1.0, 0.0), (2.0, 0.0), (2.0, 3.0), (1.0, 3.0)]
        );
        assert!(matches!(patches.face(), Face::None));
        assert!(patches.edge().is_some());

        let (lo, hi) = axes.xlim();
        assert_near!(abs, lo, -0.2);
        assert_near!(abs, hi, 2.2);
        let (lo, hi) = axes.ylim();
        assert_near!(abs, lo, -0.3);
        assert_near!(abs, hi, 3.3);
    }

    #[test]
    fn hist_length_mismatch() {
        let mut axes = Axes::new();
        assert!(matches!(
            hist(&mut axes, &[1.0, 3.0], &[0.0, 1.0], &PatchStyle::default()),
            Err(Error::LengthMismatch { .. })
        ));
        assert_eq!(
            hist(&mut axes, &[], &[0.0], &PatchStyle::default()),
            Err(Error::EmptyData)
        );
    }

    #[test]
    fn mesh_with_cindex() {
        let coor = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let conn: Vec<Vec<usize>> = vec![vec![0, 1, 2], vec![0, 2, 3]];
        let style = PatchStyle::default()
            .with_cindex(vec![1.0, 3.0])
            .with_colormap(crate::style::Colormap::YLORRD)
            .with_edge(None);

        let mut axes = Axes::new();
        let id = patch(&mut axes, &coor, &conn, &style).unwrap();
        let Some(Series::Patches(patches)) = axes.get(id) else {
            panic!("expected patches");
        };
        assert_eq!(patches.polygons()[1], vec![(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(patches.edge().is_none());
        assert_eq!(patches.clim(), Some((1.0, 3.0)));
        assert_near!(abs, axes.ylim().1, 1.1);
    }

    #[test]
    fn mesh_errors() {
        let coor = [(0.0, 0.0), (1.0, 0.0)];
        let mut axes = Axes::new();
        assert!(matches!(
            patch(&mut axes, &coor, &[[0usize, 5]], &PatchStyle::default()),
            Err(Error::InconsistentArgs(_))
        ));
        let style = PatchStyle::default().with_cindex(vec![1.0, 2.0]);
        assert!(matches!(
            patch(&mut axes, &coor, &[[0usize, 1]], &style),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(axes.series().is_empty());
    }

    #[test]
    fn empty_hist_can_be_drawn() {
        let counts = crate::hist::histogram(&[5.0, 6.0], &[0.0, 1.0, 2.0], false)
            .unwrap()
            .counts;
        assert_eq!(counts, vec![0.0, 0.0]);

        let mut fig = crate::des::Figure::new();
        hist(fig.axes_mut(0, 0), &counts, &[0.0, 1.0, 2.0], &PatchStyle::default()).unwrap();
        assert_eq!(fig.axes_mut(0, 0).ylim(), (-0.5, 0.5));

        let mut rec = crate::drawing::tests::Recorder::default();
        crate::drawing::draw_figure(&fig, &crate::Theme::default(), &mut rec).unwrap();
    }

    #[test]
    fn collinear_mesh_widens_limits() {
        let coor = [(0.0, 2.0), (1.0, 2.0), (2.0, 2.0)];
        let mut axes = Axes::new();
        patch(&mut axes, &coor, &[[0usize, 1, 2]], &PatchStyle::default()).unwrap();
        let (lo, hi) = axes.ylim();
        assert_near!(abs, lo, 1.9);
        assert_near!(abs, hi, 2.1);
    }

    #[test]
    fn no_autoscale_keeps_limits() {
        let mut axes = Axes::new();
        axes.set_xlim((-5.0, 5.0));
        let style = PatchStyle::default()
            .with_autoscale(false)
            .with_face(crate::color::RED);
        hist(&mut axes, &[1.0], &[0.0, 1.0], &style).unwrap();
        assert_eq!(axes.xlim(), (-5.0, 5.0));
    }
}
