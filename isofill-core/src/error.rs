use custom_error::custom_error;

custom_error! {pub MeshError
    VertexError {description: String} = "Failed to parse vertex: {description}",
    NormalError {description: String} = "Failed to parse vertex normal: {description}",
    FaceError {description: String} = "Failed to parse face: {description}",
    Truncated {description: String} = "Unexpected end of mesh data: {description}",
    UnsupportedFormat {description: String} = "Unsupported mesh format: {description}",
}
