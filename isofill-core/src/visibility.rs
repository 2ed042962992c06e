/// Back-face culling, depth ordering and distance shading
use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::geometry::{Face, Mesh};
use crate::linalg::cosine_similarity;
use crate::transform::{rotate_point, rotate_vector, Rotation};

/// Number of steps in the grayscale ramp above black
pub const SHADE_LEVELS: u8 = 10;

/// Fixed camera direction, tuned by eye on a cube
pub fn camera_vector() -> Vector3<f64> {
    let side = 35.2f64.to_radians().tan();
    Vector3::new(side, side, 60f64.to_radians().tan())
}

/// Camera position for a mesh of the given extent, orbiting with the rotation
pub fn camera_position(max_coordinate: f64, rotation: &Rotation) -> Point3<f64> {
    rotate_point(&Point3::from(camera_vector() * max_coordinate), rotation)
}

/// Average of the face's distinct vertices
pub fn face_center(face: &Face) -> Point3<f64> {
    let vertices = face.vertices();
    let sum = vertices.iter().fold(Vector3::<f64>::zeros(), |acc, v| acc + v.coords);
    Point3::from(sum / vertices.len() as f64)
}

/// True when the face's rotated normal does not point away from the camera
pub fn is_front_facing(face: &Face, rotation: &Rotation) -> bool {
    let rotated_normal = rotate_vector(&face_center(face), &face.normal, rotation);
    let similarity = cosine_similarity(&rotated_normal, &camera_vector());
    // a zero normal gives NaN, which is kept
    similarity >= 0.0 || similarity.is_nan()
}

/// Grayscale intensity, 0 (black) to 10
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shade(u8);

impl Shade {
    pub fn new(intensity: u8) -> Self {
        Self(intensity.min(SHADE_LEVELS))
    }

    /// Shade for a face at `distance`, given the frame's distance range
    pub fn for_distance(distance: f64, min: f64, max: f64) -> Self {
        let range = max - min;
        let relative = if range > 0.0 { (distance - min) / range } else { 0.0 };
        let intensity = (relative * SHADE_LEVELS as f64).round().clamp(0.0, SHADE_LEVELS as f64);
        Self(intensity as u8)
    }

    pub fn intensity(&self) -> u8 {
        self.0
    }

    pub fn color(&self) -> Color {
        // one hex digit per channel: 0xa -> 0xaa
        let channel = self.0 * 0x11;
        Color::rgb(channel, channel, channel)
    }
}

/// An 8-bit RGB color, displayed as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A face as seen in one frame
#[derive(Debug, Clone)]
pub struct OrderedFace<'a> {
    pub face: &'a Face,
    /// Center after rotation
    pub center: Point3<f64>,
    /// Distance from the rotated center to the rotated camera
    pub distance: f64,
    pub visible: bool,
    pub shade: Shade,
}

/// All faces of the mesh sorted farthest first, each with its facing
/// verdict and shade.
///
/// Shading uses the distance range of every face, culled ones included.
pub fn order_faces<'a>(mesh: &'a Mesh, rotation: &Rotation) -> Vec<OrderedFace<'a>> {
    let camera = camera_position(mesh.max_coordinate, rotation);

    let mut faces: Vec<OrderedFace<'a>> = mesh
        .faces
        .iter()
        .map(|face| {
            let center = rotate_point(&face_center(face), rotation);
            OrderedFace {
                face,
                center,
                distance: nalgebra::distance(&center, &camera),
                visible: is_front_facing(face, rotation),
                shade: Shade::default(),
            }
        })
        .collect();

    faces.sort_by(|a, b| b.distance.total_cmp(&a.distance));

    let (min, max) = faces.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), f| {
        (min.min(f.distance), max.max(f.distance))
    });
    for face in &mut faces {
        face.shade = Shade::for_distance(face.distance, min, max);
    }

    faces
}
