/// Frame compositing: walks the ordered faces, fills them and emits pixels
use std::collections::HashSet;

use nalgebra::Point2;

use crate::geometry::{Face, Mesh};
use crate::projection::{isometric_project, RenderContext};
use crate::raster::{fill_triangle, PixelKey};
use crate::transform::{rotate_point, Rotation};
use crate::visibility::{order_faces, Color, OrderedFace};

/// Receives the frame's pixels, one call per pixel
pub trait PixelSink {
    /// Paint the 1×1 pixel at surface coordinates `(x, y)`
    fn put_pixel(&mut self, x: f64, y: f64, color: Color);
}

impl<F> PixelSink for F
where
    F: FnMut(f64, f64, Color),
{
    fn put_pixel(&mut self, x: f64, y: f64, color: Color) {
        self(x, y, color)
    }
}

/// Which face keeps a pixel that several faces cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occlusion {
    /// Faces are composited farthest first and the first claim sticks, so the
    /// farthest face wins
    #[default]
    FarthestWins,
    /// Faces are composited nearest first, so the nearest face wins
    NearestWins,
}

impl Occlusion {
    pub fn toggled(self) -> Self {
        match self {
            Occlusion::FarthestWins => Occlusion::NearestWins,
            Occlusion::NearestWins => Occlusion::FarthestWins,
        }
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_total: usize,
    pub faces_drawn: usize,
    pub faces_culled: usize,
    pub pixels_emitted: usize,
}

/// Rotate and project a face's corners onto the isometric plane
pub fn project_face(face: &Face, rotation: &Rotation) -> [Point2<f64>; 3] {
    face.corners().map(|corner| isometric_project(&rotate_point(&corner, rotation)))
}

/// Visible faces in the order they claim pixels.
///
/// Faces at equal distance keep their mesh order, reversed along with
/// everything else under `NearestWins`.
pub fn composite_order<'o, 'a>(ordered: &'o [OrderedFace<'a>], occlusion: Occlusion) -> Vec<&'o OrderedFace<'a>> {
    let mut visible: Vec<&OrderedFace<'a>> = ordered.iter().filter(|face| face.visible).collect();
    if occlusion == Occlusion::NearestWins {
        visible.reverse();
    }
    visible
}

/// Render one frame of `mesh` into `sink`
pub fn render<S>(mesh: &Mesh, rotation: Rotation, ctx: &RenderContext, sink: &mut S) -> FrameStats
where
    S: PixelSink + ?Sized,
{
    let ordered = order_faces(mesh, &rotation);
    let mut stats = FrameStats {
        faces_total: ordered.len(),
        ..FrameStats::default()
    };

    let visible = composite_order(&ordered, ctx.occlusion);
    stats.faces_culled = stats.faces_total - visible.len();

    let mut claimed: HashSet<PixelKey> = HashSet::new();
    for face in visible {
        let triangle = project_face(face.face, &rotation);
        let color = face.shade.color();

        for point in fill_triangle(&triangle, ctx) {
            if !claimed.insert(PixelKey::of(&point, ctx.canvas_zoom)) {
                continue;
            }
            let (x, y) = ctx.to_pixel(&point);
            sink.put_pixel(x, y, color);
            stats.pixels_emitted += 1;
        }
        stats.faces_drawn += 1;
    }

    log::debug!(
        "frame: {} faces, {} drawn, {} culled, {} pixels",
        stats.faces_total,
        stats.faces_drawn,
        stats.faces_culled,
        stats.pixels_emitted
    );

    stats
}
