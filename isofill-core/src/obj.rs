/// Wavefront OBJ parser producing triangle meshes
use nalgebra::{Point3, Vector3};
use nom::{
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Face, Mesh};

/// One `f` record corner: vertex index and optional normal index
#[derive(Debug, Clone, Copy, PartialEq)]
struct Corner {
    vertex: i64,
    normal: Option<i64>,
}

#[derive(Debug, Default)]
struct ObjState {
    vertices: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    mesh: Mesh,
    skipped_faces: usize,
    missing_normals: usize,
}

/// Parse OBJ text into a mesh.
///
/// Polygons are fanned into triangles, every triangle taking the normal of
/// the polygon's first corner. Faces with fewer than three resolvable
/// vertices are skipped.
pub fn parse_obj(input: &str) -> Result<Mesh, MeshError> {
    let mut state = ObjState::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match keyword {
            "v" => {
                let (x, y, z) = parse_triple(rest).map_err(|_| MeshError::VertexError {
                    description: format!("line {}: {}", number + 1, line),
                })?;
                let vertex = Point3::new(x, y, z);
                state.mesh.include_vertex(&vertex);
                state.vertices.push(vertex);
            }
            "vn" => {
                let (dx, dy, dz) = parse_triple(rest).map_err(|_| MeshError::NormalError {
                    description: format!("line {}: {}", number + 1, line),
                })?;
                state.normals.push(Vector3::new(dx, dy, dz));
            }
            "f" => {
                let corners = parse_corners(rest).map_err(|_| MeshError::FaceError {
                    description: format!("line {}: {}", number + 1, line),
                })?;
                state.add_polygon(&corners, number + 1);
            }
            _ => log::trace!("ignoring OBJ record: {}", line),
        }
    }

    if state.skipped_faces > 0 {
        log::warn!("skipped {} faces with fewer than three vertices", state.skipped_faces);
    }
    if state.missing_normals > 0 {
        log::warn!("{} faces had no usable normal, using their winding instead", state.missing_normals);
    }
    log::debug!(
        "loaded OBJ: {} vertices, {} normals, {} triangles",
        state.vertices.len(),
        state.normals.len(),
        state.mesh.len()
    );

    Ok(state.mesh)
}

impl ObjState {
    fn add_polygon(&mut self, corners: &[Corner], line: usize) {
        let vertices: Vec<Point3<f64>> = corners
            .iter()
            .filter_map(|corner| resolve(&self.vertices, corner.vertex).copied())
            .collect();

        if vertices.len() < 3 {
            log::warn!("line {}: face has {} resolvable vertices, skipping", line, vertices.len());
            self.skipped_faces += 1;
            return;
        }

        let normal = corners[0]
            .normal
            .and_then(|i| resolve(&self.normals, i).copied());
        let mut triangles = vec![(vertices[0], vertices[1], vertices[2])];
        for i in 3..vertices.len() {
            triangles.push((vertices[i], vertices[i - 1], vertices[0]));
        }

        for (a, b, c) in triangles {
            let face = match normal {
                Some(normal) => Face::from_vertices(a, b, c, normal),
                None => {
                    self.missing_normals += 1;
                    let mut face = Face::from_vertices(a, b, c, Vector3::zeros());
                    face.normal = face.calculate_normal();
                    face
                }
            };
            self.mesh.add_face(face);
        }
    }
}

/// Look up a 1-based (or negative, relative to the end) OBJ index
fn resolve<T>(items: &[T], i: i64) -> Option<&T> {
    let position = match i {
        i if i > 0 => i - 1,
        i if i < 0 => items.len() as i64 + i,
        _ => return None,
    };
    usize::try_from(position).ok().and_then(|p| items.get(p))
}

fn parse_triple(input: &str) -> Result<(f64, f64, f64), nom::Err<nom::error::Error<&str>>> {
    let (_, triple) = triple(input)?;
    Ok(triple)
}

fn triple(input: &str) -> IResult<&str, (f64, f64, f64)> {
    tuple((
        preceded(space0, double),
        preceded(space1, double),
        preceded(space1, double),
    ))(input)
}

fn corner(input: &str) -> IResult<&str, Corner> {
    let (input, vertex) = index(input)?;
    let (input, _texture) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(index)))(input)?;
    Ok((
        input,
        Corner {
            vertex,
            normal: normal.flatten(),
        },
    ))
}

fn parse_corners(input: &str) -> Result<Vec<Corner>, nom::Err<nom::error::Error<&str>>> {
    let (_, corners) = all_consuming(terminated(
        preceded(space0, separated_list1(space1, corner)),
        space0,
    ))(input)?;
    Ok(corners)
}
