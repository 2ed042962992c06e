/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A directed edge between two vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Edge {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }
}

/// A triangle face: three edges forming a closed loop, plus a normal
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub edges: [Edge; 3],
    pub normal: Vector3<f64>,
}

impl Face {
    pub fn new(edges: [Edge; 3], normal: Vector3<f64>) -> Self {
        Self { edges, normal }
    }

    /// Build the loop `a → b → c → a`
    pub fn from_vertices(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self::new([Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)], normal)
    }

    /// The loop's corners in traversal order (the start of each edge)
    pub fn corners(&self) -> [Point3<f64>; 3] {
        [self.edges[0].start, self.edges[1].start, self.edges[2].start]
    }

    /// Distinct vertices referenced by the edges, in first-seen order.
    ///
    /// Two vertices are the same only if all coordinates match exactly.
    pub fn vertices(&self) -> Vec<Point3<f64>> {
        let mut unique: Vec<Point3<f64>> = Vec::with_capacity(3);
        for edge in &self.edges {
            for vertex in [edge.start, edge.end] {
                if !unique.contains(&vertex) {
                    unique.push(vertex);
                }
            }
        }
        unique
    }

    /// Geometric normal from the winding of the corners
    pub fn calculate_normal(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.corners();
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub faces: Vec<Face>,
    /// Largest absolute coordinate seen on any vertex
    pub max_coordinate: f64,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
            max_coordinate: 0.0,
        }
    }

    /// Widen the coordinate extent to cover `vertex`
    pub fn include_vertex(&mut self, vertex: &Point3<f64>) {
        for coordinate in vertex.iter() {
            if coordinate.abs() > self.max_coordinate {
                self.max_coordinate = coordinate.abs();
            }
        }
    }

    pub fn add_face(&mut self, face: Face) {
        for edge in &face.edges {
            self.include_vertex(&edge.start);
        }
        self.faces.push(face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Create a simple cube mesh centered on the origin
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);
        let p = |x: f64, y: f64, z: f64| Point3::new(x * h, y * h, z * h);
        let quads = [
            // front, back
            ([p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)], Vector3::z()),
            ([p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.), p(1., -1., -1.)], -Vector3::z()),
            // top, bottom
            ([p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.)], Vector3::y()),
            ([p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.)], -Vector3::y()),
            // right, left
            ([p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.), p(1., -1., 1.)], Vector3::x()),
            ([p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.)], -Vector3::x()),
        ];

        for ([a, b, c, d], normal) in quads {
            mesh.add_face(Face::from_vertices(a, b, c, normal));
            mesh.add_face(Face::from_vertices(a, c, d, normal));
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_loop() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let face = Face::from_vertices(a, b, c, Vector3::z());

        for (i, edge) in face.edges.iter().enumerate() {
            assert_eq!(edge.end, face.edges[(i + 1) % 3].start);
        }
        assert_eq!(face.vertices(), vec![a, b, c]);
        assert_eq!(face.corners(), [a, b, c]);
        assert_eq!(face.calculate_normal(), Vector3::z());
    }

    #[test]
    fn test_vertices_dedup_exact_match_only() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let almost_a = Point3::new(1.0, 1.0, 1.0 + 1e-12);
        let face = Face::from_vertices(a, a, almost_a, Vector3::z());
        assert_eq!(face.vertices(), vec![a, almost_a]);
    }

    #[test]
    fn test_max_coordinate_tracks_absolute_value() {
        let mut mesh = Mesh::new();
        mesh.add_face(Face::from_vertices(
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(-7.5, 0.0, 0.0),
            Point3::new(0.0, 3.0, 4.0),
            Vector3::z(),
        ));
        assert_eq!(mesh.max_coordinate, 7.5);
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.len(), 12);
        assert_eq!(cube.max_coordinate, 1.0);
        for face in &cube.faces {
            // winding agrees with the stored outward normal
            assert!((face.calculate_normal() - face.normal).norm() < 1e-12);
        }
    }
}
