/// Per-axis rotation of points and direction vectors
use nalgebra::{Matrix3, Point3, Vector3};

use crate::linalg::{multiply_matrix, row_times_matrix, transpose};

/// Rotation around three axes (in radians), applied X first, then Y, then Z
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a rotation from angles given in degrees
    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set_angle(&mut self, axis: Axis, angle: f64) {
        match axis {
            Axis::X => self.x = angle,
            Axis::Y => self.y = angle,
            Axis::Z => self.z = angle,
        }
    }

    /// Copy one axis angle back from `initial`
    pub fn reset_axis(&mut self, axis: Axis, initial: &Rotation) {
        self.set_angle(axis, initial.angle(axis));
    }

    /// The X, Y and Z matrices multiplied into one, in application order
    pub fn matrix(&self) -> Matrix3<f64> {
        let rx = axis_rotation(Axis::X, self.x);
        let ry = axis_rotation(Axis::Y, self.y);
        let rz = axis_rotation(Axis::Z, self.z);
        multiply_matrix(&multiply_matrix(&rx, &ry), &rz)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed rotation matrix about `axis`, transposed.
///
/// Points are row vectors multiplied from the left, so the transposed
/// matrix is what gets applied.
#[rustfmt::skip]
pub fn axis_rotation(axis: Axis, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    let conventional = match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        ),
    };
    transpose(&conventional)
}

/// Rotate a point about the origin: `p · Rx · Ry · Rz`
pub fn rotate_point(p: &Point3<f64>, rotation: &Rotation) -> Point3<f64> {
    Point3::from(row_times_matrix(&p.coords, &rotation.matrix()))
}

/// Rotate a direction by rotating `pivot` and `pivot + v` and differencing
pub fn rotate_vector(pivot: &Point3<f64>, v: &Vector3<f64>, rotation: &Rotation) -> Vector3<f64> {
    let start = rotate_point(pivot, rotation);
    let end = rotate_point(&(pivot + v), rotation);
    end - start
}
