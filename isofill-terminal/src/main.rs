/// isofill terminal viewer
///
/// Renders a mesh with the isometric flood-fill rasterizer.
/// Usage: isofill-terminal [mesh.obj|mesh.stl]
/// Controls:
///   - WASD / Arrow Keys: Rotate around X and Y
///   - E/R: Rotate around Z
///   - X/Y/Z: Reset that axis
///   - N: Toggle farthest-wins / nearest-wins occlusion
///   - Q/ESC: Quit

use env_logger::Env;
use log::info;
use std::env;
use std::io;
use std::path::Path;
use isofill_core::{Mesh, Rotation};
use isofill_terminal::{load_mesh, TerminalApp};

const DEFAULT_LOGGING_LEVEL: &str = "info";

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();

    let (mesh, rotation) = match env::args().nth(1) {
        Some(path) => {
            info!("loading mesh from {}", path);
            // OBJ exports are usually Y-up; stand them on the Z axis
            (load_mesh(Path::new(&path))?, Rotation::from_degrees(90.0, 0.0, 0.0))
        }
        None => {
            info!("no mesh given, using the built-in cube");
            (Mesh::cube(2.0), Rotation::from_degrees(0.0, 0.0, 60.0))
        }
    };
    info!("{} triangles, max coordinate {}", mesh.len(), mesh.max_coordinate);

    let mut app = TerminalApp::new(mesh, rotation)?;
    app.run()?;

    info!("done");
    Ok(())
}
