/// Triangle flood-fill rasterizer working in projected model space
use std::collections::HashSet;

use nalgebra::Point2;

use crate::projection::RenderContext;

/// A projected point quantized to the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelKey {
    pub x: i64,
    pub y: i64,
}

impl PixelKey {
    pub fn of(point: &Point2<f64>, zoom: f64) -> Self {
        Self {
            x: (point.x * zoom).floor() as i64,
            y: (point.y * zoom).floor() as i64,
        }
    }
}

/// Edge function values of `p` against v0→v1, v1→v2 and v2→v0
pub fn edge_values(triangle: &[Point2<f64>; 3], p: &Point2<f64>) -> [f64; 3] {
    let edge = |a: &Point2<f64>, b: &Point2<f64>| (a.x - p.x) * (b.y - a.y) - (b.x - a.x) * (a.y - p.y);
    [
        edge(&triangle[0], &triangle[1]),
        edge(&triangle[1], &triangle[2]),
        edge(&triangle[2], &triangle[0]),
    ]
}

/// Inside test for either winding; points on an edge count as inside.
///
/// Outside means one of the last two edge values has the opposite sign to
/// the first one.
pub fn is_inside(triangle: &[Point2<f64>; 3], p: &Point2<f64>) -> bool {
    let [first, rest @ ..] = edge_values(triangle, p);
    !rest
        .iter()
        .any(|&value| (value < 0.0 && first > 0.0) || (value > 0.0 && first < 0.0))
}

/// Arithmetic mean of the three corners
pub fn centroid(triangle: &[Point2<f64>; 3]) -> Point2<f64> {
    let sum = triangle.iter().fold(nalgebra::Vector2::<f64>::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / 3.0)
}

fn out_of_surface(p: &Point2<f64>, ctx: &RenderContext) -> bool {
    let (low, high) = (-ctx.canvas_size, 2.0 * ctx.canvas_size);
    let (x, y) = (p.x * ctx.canvas_zoom, p.y * ctx.canvas_zoom);
    x < low || x > high || y < low || y > high
}

/// Twice the signed area of the triangle
pub fn doubled_area(triangle: &[Point2<f64>; 3]) -> f64 {
    let [a, b, c] = triangle;
    (b - a).perp(&(c - a))
}

/// Flood-fill a projected triangle outward from its centroid.
///
/// Neighbours are one pixel (`1 / zoom`) apart. The result holds at most
/// `ctx.fill_cap` points in model units.
pub fn fill_triangle(triangle: &[Point2<f64>; 3], ctx: &RenderContext) -> Vec<Point2<f64>> {
    let mut points = Vec::new();
    if ctx.fill_cap == 0 {
        return points;
    }

    let seed = centroid(triangle);
    // With a collapsed edge every edge value of the first edge is zero and
    // the inside test would accept the whole surface. Only the seed is kept.
    if doubled_area(triangle) == 0.0 {
        if !out_of_surface(&seed, ctx) {
            points.push(seed);
        }
        return points;
    }

    let step = 1.0 / ctx.canvas_zoom;
    let mut visited: HashSet<PixelKey> = HashSet::new();
    let mut frontier = vec![seed];

    while let Some(point) = frontier.pop() {
        let key = PixelKey::of(&point, ctx.canvas_zoom);
        if visited.contains(&key) || out_of_surface(&point, ctx) || !is_inside(triangle, &point) {
            continue;
        }

        visited.insert(key);
        points.push(point);
        if points.len() >= ctx.fill_cap {
            log::debug!("triangle fill stopped at the cap of {} points", ctx.fill_cap);
            break;
        }

        frontier.extend([
            Point2::new(point.x, point.y - step),
            Point2::new(point.x + step, point.y),
            Point2::new(point.x, point.y + step),
            Point2::new(point.x - step, point.y),
        ]);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equilateral() -> [Point2<f64>; 3] {
        [Point2::new(0.0, 10.0), Point2::new(-8.66, -5.0), Point2::new(8.66, -5.0)]
    }

    #[test]
    fn test_pixel_key_floors() {
        assert_eq!(PixelKey::of(&Point2::new(0.25, -0.25), 2.0), PixelKey { x: 0, y: -1 });
        assert_eq!(PixelKey::of(&Point2::new(1.5, 2.0), 2.0), PixelKey { x: 3, y: 4 });
    }

    #[test]
    fn test_inside_either_winding() {
        let triangle = equilateral();
        let reversed = [triangle[2], triangle[1], triangle[0]];
        let origin = Point2::origin();
        assert!(is_inside(&triangle, &origin));
        assert!(is_inside(&reversed, &origin));
        assert!(!is_inside(&triangle, &Point2::new(0.0, 11.0)));
        assert!(!is_inside(&reversed, &Point2::new(9.0, 0.0)));
    }

    #[test]
    fn test_boundary_is_inside() {
        let triangle = equilateral();
        assert!(is_inside(&triangle, &triangle[0]));
        assert!(is_inside(&triangle, &Point2::new(0.0, -5.0)));
    }

    #[test]
    fn test_fill_stays_inside() {
        let triangle = equilateral();
        let ctx = RenderContext::new(100.0, 1.0);
        let points = fill_triangle(&triangle, &ctx);

        // roughly the triangle's area of ~130 square pixels
        assert!(points.len() > 100 && points.len() < 170, "{}", points.len());

        let winding = edge_values(&triangle, &centroid(&triangle))[0].signum();
        for p in &points {
            assert!(is_inside(&triangle, p));
            for (i, value) in edge_values(&triangle, p).iter().enumerate() {
                let a = triangle[i];
                let b = triangle[(i + 1) % 3];
                let signed_distance = value * winding / (b - a).norm();
                assert!(signed_distance > -1.0, "{:?} is outside edge {}", p, i);
            }
        }
    }

    #[test]
    fn test_fill_has_no_duplicate_pixels() {
        let ctx = RenderContext::new(100.0, 3.0);
        let points = fill_triangle(&equilateral(), &ctx);
        let keys: HashSet<PixelKey> = points.iter().map(|p| PixelKey::of(p, ctx.canvas_zoom)).collect();
        assert_eq!(keys.len(), points.len());
    }

    #[test]
    fn test_zoom_scales_pixel_count() {
        let coarse = fill_triangle(&equilateral(), &RenderContext::new(100.0, 1.0)).len();
        let fine = fill_triangle(&equilateral(), &RenderContext::new(100.0, 2.0)).len();
        assert!(fine > coarse * 3 && fine < coarse * 5);
    }

    #[test]
    fn test_cap_enforced() {
        let huge = [Point2::new(0.0, 900.0), Point2::new(-900.0, -900.0), Point2::new(900.0, -900.0)];
        let ctx = RenderContext::new(1000.0, 1.0);
        assert_eq!(fill_triangle(&huge, &ctx).len(), 200_000);

        let small_cap = ctx.with_fill_cap(50);
        assert_eq!(fill_triangle(&huge, &small_cap).len(), 50);
        assert!(fill_triangle(&huge, &ctx.with_fill_cap(0)).is_empty());
    }

    #[test]
    fn test_surface_bounds() {
        // centroid far outside the [-size, 2 * size] window
        let outside = [Point2::new(500.0, 500.0), Point2::new(510.0, 500.0), Point2::new(500.0, 510.0)];
        assert!(fill_triangle(&outside, &RenderContext::new(100.0, 1.0)).is_empty());

        // clipped to the window on the right and bottom
        let straddling = [Point2::new(150.0, 150.0), Point2::new(250.0, 150.0), Point2::new(150.0, 250.0)];
        let points = fill_triangle(&straddling, &RenderContext::new(100.0, 1.0));
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x <= 200.0 && p.y <= 200.0));
    }

    #[test]
    fn test_degenerate_triangle() {
        let ctx = RenderContext::new(100.0, 10.0);
        let collinear = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        assert_eq!(fill_triangle(&collinear, &ctx), vec![Point2::new(1.0, 1.0)]);

        let point = [Point2::new(1.0, 1.0); 3];
        assert_eq!(fill_triangle(&point, &ctx).len(), 1);

        let collapsed_edge = [Point2::new(0.0, 0.0), Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)];
        assert_eq!(fill_triangle(&collapsed_edge, &ctx).len(), 1);

        let far_away = [Point2::new(90.0, 90.0); 3];
        assert!(fill_triangle(&far_away, &ctx).is_empty());
    }
}
