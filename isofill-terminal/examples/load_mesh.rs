/// Example: Load a mesh and print one frame without taking over the terminal
///
/// Usage: cargo run --example load_mesh -- path/to/file.obj [x y z degrees]

use std::env;
use std::io::{self, stdout, Write};
use std::path::Path;
use isofill_core::{render, Mesh, RenderContext, Rotation};
use isofill_terminal::{load_mesh, CharCanvas};

const WIDTH: usize = 80;
const HEIGHT: usize = 40;

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => load_mesh(Path::new(path))?,
        None => {
            eprintln!("Usage: {} <mesh-file> [x y z]", args[0]);
            eprintln!("\nNo mesh file provided, using default cube...");
            Mesh::cube(2.0)
        }
    };

    let degrees: Vec<f64> = args.iter().skip(2).filter_map(|a| a.parse().ok()).collect();
    let rotation = match degrees.as_slice() {
        [x, y, z] => Rotation::from_degrees(*x, *y, *z),
        _ => Rotation::from_degrees(0.0, 0.0, 60.0),
    };

    let ctx = RenderContext::for_mesh(WIDTH as f64 / 2.0, mesh.max_coordinate);
    let mut canvas = CharCanvas::new(WIDTH, HEIGHT, ctx.surface_extent());
    let stats = render(&mesh, rotation, &ctx, &mut canvas);

    let mut out = stdout();
    canvas.draw(&mut out)?;
    writeln!(
        out,
        "{} of {} faces drawn ({} culled), {} pixels",
        stats.faces_drawn, stats.faces_total, stats.faces_culled, stats.pixels_emitted
    )?;
    Ok(())
}
