/// Isometric projection and the per-frame surface mapping
use nalgebra::{Point2, Point3};

use crate::compositor::Occlusion;

/// Default per-triangle pixel cap for the flood fill
pub const DEFAULT_FILL_CAP: usize = 200_000;

/// Project a rotated point onto the isometric plane
pub fn isometric_project(p: &Point3<f64>) -> Point2<f64> {
    let (sqrt2, sqrt3, sqrt6) = (2f64.sqrt(), 3f64.sqrt(), 6f64.sqrt());
    let x = (1.0 / sqrt6) * (sqrt3 * p.x - sqrt3 * p.y);
    let y = (1.0 / sqrt6) * (sqrt2 * p.x - sqrt2 * p.z + sqrt2 * p.y);
    Point2::new(x, y)
}

/// Surface configuration for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Half of the surface extent, in pixels
    pub canvas_size: f64,
    /// Pixels per model-space unit
    pub canvas_zoom: f64,
    /// Maximum number of points a single triangle fill may accept
    pub fill_cap: usize,
    pub occlusion: Occlusion,
}

impl RenderContext {
    pub fn new(canvas_size: f64, canvas_zoom: f64) -> Self {
        Self {
            canvas_size,
            canvas_zoom,
            fill_cap: DEFAULT_FILL_CAP,
            occlusion: Occlusion::default(),
        }
    }

    /// Fit a mesh of the given extent so that 1.5 × its largest coordinate
    /// spans half the surface
    pub fn for_mesh(canvas_size: f64, max_coordinate: f64) -> Self {
        let extent = (max_coordinate * 1.5).abs();
        let zoom = if extent > 0.0 { canvas_size / extent } else { 1.0 };
        Self::new(canvas_size, zoom)
    }

    pub fn with_fill_cap(mut self, fill_cap: usize) -> Self {
        self.fill_cap = fill_cap;
        self
    }

    pub fn with_occlusion(mut self, occlusion: Occlusion) -> Self {
        self.occlusion = occlusion;
        self
    }

    /// Full surface width (and height) in pixels
    pub fn surface_extent(&self) -> f64 {
        2.0 * self.canvas_size
    }

    /// Map a projected point to surface pixel coordinates
    pub fn to_pixel(&self, point: &Point2<f64>) -> (f64, f64) {
        (
            point.x * self.canvas_zoom + self.canvas_size,
            point.y * self.canvas_zoom + self.canvas_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_axes() {
        let x = isometric_project(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(x.x, 1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(x.y, 1.0 / 3f64.sqrt(), epsilon = 1e-12);

        let z = isometric_project(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(z.x, 0.0);
        assert_relative_eq!(z.y, -1.0 / 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_projection_is_linear() {
        let a = Point3::new(1.25, -3.0, 0.5);
        let b = Point3::new(-0.75, 2.5, 4.0);
        let sum = isometric_project(&Point3::from(a.coords + b.coords));
        let parts = isometric_project(&a).coords + isometric_project(&b).coords;
        assert_relative_eq!(sum.coords, parts, epsilon = 1e-12);

        let scaled = isometric_project(&Point3::from(a.coords * 3.0));
        assert_relative_eq!(scaled.coords, isometric_project(&a).coords * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_view_axis_collapses() {
        // (1, 1, 2) is parallel to the viewing direction
        let p = isometric_project(&Point3::new(1.0, 1.0, 2.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_for_mesh_zoom() {
        let ctx = RenderContext::for_mesh(400.0, 2.0);
        assert_relative_eq!(ctx.canvas_zoom, 400.0 / 3.0);
        assert_eq!(ctx.fill_cap, DEFAULT_FILL_CAP);
        assert_eq!(ctx.occlusion, Occlusion::FarthestWins);

        let flat = RenderContext::for_mesh(400.0, 0.0);
        assert_eq!(flat.canvas_zoom, 1.0);
    }

    #[test]
    fn test_to_pixel() {
        let ctx = RenderContext::new(200.0, 10.0);
        assert_eq!(ctx.to_pixel(&Point2::new(0.0, 0.0)), (200.0, 200.0));
        assert_eq!(ctx.to_pixel(&Point2::new(-1.5, 2.0)), (185.0, 220.0));
        assert_eq!(ctx.surface_extent(), 400.0);
    }
}
