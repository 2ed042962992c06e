/// isofill core library - isometric software rasterization of triangle meshes
///
/// This library holds the whole rendering pipeline: per-axis rotation,
/// isometric projection, back-face culling and depth ordering, flood-fill
/// rasterization and frame compositing into a pixel sink. Mesh loaders for
/// OBJ and STL live alongside it.

pub mod compositor;
pub mod error;
pub mod geometry;
pub mod linalg;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod stl;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use compositor::{render, FrameStats, Occlusion, PixelSink};
pub use error::MeshError;
pub use geometry::{Edge, Face, Mesh};
pub use projection::{RenderContext, DEFAULT_FILL_CAP};
pub use transform::{Axis, Rotation};
pub use visibility::{Color, Shade};

/// Parse mesh data, picking the format from a file extension
pub fn parse_mesh(extension: &str, data: &[u8]) -> Result<Mesh, MeshError> {
    match extension.to_ascii_lowercase().as_str() {
        "obj" => {
            let text = std::str::from_utf8(data).map_err(|e| MeshError::UnsupportedFormat {
                description: format!("OBJ data is not UTF-8: {}", e),
            })?;
            obj::parse_obj(text)
        }
        "stl" => stl::parse_stl(data),
        other => Err(MeshError::UnsupportedFormat {
            description: format!("unknown extension \"{}\"", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mesh_by_extension() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        assert_eq!(parse_mesh("OBJ", obj).unwrap().len(), 1);
        assert!(matches!(parse_mesh("ply", obj), Err(MeshError::UnsupportedFormat { .. })));
        assert!(matches!(parse_mesh("obj", &[0xff, 0xfe]), Err(MeshError::UnsupportedFormat { .. })));
    }
}
