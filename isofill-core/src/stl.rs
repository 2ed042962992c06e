/// STL file parser for binary and ASCII formats
use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::{count, many0},
    number::complete::{double, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Face, Mesh};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Build a face, falling back to the winding when the stored normal is zero
fn facet(normal: Vector3<f64>, a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Face {
    let mut face = Face::from_vertices(a, b, c, normal);
    if normal == Vector3::zeros() {
        face.normal = face.calculate_normal();
    }
    face
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, MeshError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(MeshError::Truncated {
            description: format!("{} bytes is too small to be a binary STL", data.len()),
        });
    }

    let (body, triangle_count) = binary_header(data).map_err(|_| MeshError::Truncated {
        description: "missing triangle count".to_string(),
    })?;
    let triangle_count = triangle_count as usize;
    let needed = triangle_count.checked_mul(FACET_LEN).ok_or_else(|| MeshError::Truncated {
        description: format!("header announces {} triangles", triangle_count),
    })?;
    if body.len() < needed {
        return Err(MeshError::Truncated {
            description: format!(
                "header announces {} triangles but only {} bytes follow",
                triangle_count,
                body.len()
            ),
        });
    }

    let (_, faces) = count(binary_facet, triangle_count)(body).map_err(|_| MeshError::Truncated {
        description: "facet records are incomplete".to_string(),
    })?;

    let mut mesh = Mesh::with_capacity(triangle_count);
    for face in faces {
        mesh.add_face(face);
    }
    Ok(mesh)
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], Vector3<f64>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vector3::new(x as f64, y as f64, z as f64)))
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Face> {
    let (input, normal) = binary_vector(input)?;
    let (input, a) = binary_vector(input)?;
    let (input, b) = binary_vector(input)?;
    let (input, c) = binary_vector(input)?;
    // attribute byte count
    let (input, _) = le_u16(input)?;
    Ok((input, facet(normal, a.into(), b.into(), c.into())))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, MeshError> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(MeshError::UnsupportedFormat {
            description: format!("invalid ASCII STL: {:?}", e),
        }),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, faces) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut mesh = Mesh::with_capacity(faces.len());
    for face in faces {
        mesh.add_face(face);
    }

    Ok((input, mesh))
}

fn parse_facet(input: &str) -> IResult<&str, Face> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = parse_vertex(input)?;
    let (input, b) = parse_vertex(input)?;
    let (input, c) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, facet(normal, a.into(), b.into(), c.into())))
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3<f64>> {
    preceded(preceded(multispace0, tag("vertex")), parse_vector3)(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f64>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh, MeshError> {
    // binary files may also start with "solid", so fall through on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}
