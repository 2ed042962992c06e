/// Terminal front end for the isofill rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use isofill_core::{render, Axis, FrameStats, Mesh, Occlusion, RenderContext, Rotation};
use std::fs;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::Duration;

pub mod renderer;

pub use renderer::CharCanvas;

/// Rotation applied per key press (in degrees)
const ROTATION_STEP_DEGREES: f64 = 5.0;

/// Rows kept free for the status line
const STATUS_ROWS: u16 = 1;

/// Read an OBJ or STL file, picking the parser from the extension
pub fn load_mesh(path: &Path) -> io::Result<Mesh> {
    let data = fs::read(path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read {}: {}", path.display(), e)))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    isofill_core::parse_mesh(extension, &data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse {}: {}", path.display(), e)))
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    mesh: Mesh,
    rotation: Rotation,
    initial_rotation: Rotation,
    occlusion: Occlusion,
    canvas: CharCanvas,
    running: bool,
    dirty: bool,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, initial_rotation: Rotation) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(STATUS_ROWS);
        Ok(Self::with_size(mesh, initial_rotation, width as usize, height as usize))
    }

    /// Build an app drawing into a canvas of `width` × `height` cells
    pub fn with_size(mesh: Mesh, initial_rotation: Rotation, width: usize, height: usize) -> Self {
        Self {
            mesh,
            rotation: initial_rotation,
            initial_rotation,
            occlusion: Occlusion::default(),
            canvas: CharCanvas::new(width, height, 0.0),
            running: true,
            dirty: true,
            last_stats: FrameStats::default(),
        }
    }

    pub fn canvas(&self) -> &CharCanvas {
        &self.canvas
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            if event::poll(Duration::from_millis(50))? {
                self.handle_input()?;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let step = ROTATION_STEP_DEGREES.to_radians();
        match event::read()? {
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.rotate(step, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotate(-step, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotate(0.0, -step, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotate(0.0, step, 0.0),
                KeyCode::Char('e') => self.rotate(0.0, 0.0, step),
                KeyCode::Char('r') => self.rotate(0.0, 0.0, -step),
                KeyCode::Char('x') => self.reset_axis(Axis::X),
                KeyCode::Char('y') => self.reset_axis(Axis::Y),
                KeyCode::Char('z') => self.reset_axis(Axis::Z),
                KeyCode::Char('n') => {
                    self.occlusion = self.occlusion.toggled();
                    self.dirty = true;
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                let height = height.saturating_sub(STATUS_ROWS);
                self.canvas = CharCanvas::new(width as usize, height as usize, 0.0);
                self.dirty = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.rotate(dx, dy, dz);
        self.dirty = true;
    }

    fn reset_axis(&mut self, axis: Axis) {
        self.rotation.reset_axis(axis, &self.initial_rotation);
        self.dirty = true;
    }

    /// Render the current rotation into the character canvas
    pub fn render_frame(&mut self) -> FrameStats {
        let canvas_size = self.canvas.width().max(self.canvas.height()) as f64 / 2.0;
        let ctx = RenderContext::for_mesh(canvas_size, self.mesh.max_coordinate).with_occlusion(self.occlusion);

        self.canvas.clear();
        self.canvas.set_extent(ctx.surface_extent());
        self.last_stats = render(&self.mesh, self.rotation, &ctx, &mut self.canvas);
        self.last_stats
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.canvas.draw(&mut stdout)?;

        let stats = self.last_stats;
        queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "x {:.0}° y {:.0}° z {:.0}° | {}/{} faces, {} px | {:?} | WASD/Arrows/E/R=Rotate X/Y/Z=Reset N=Occlusion Q=Quit",
                self.rotation.x.to_degrees(),
                self.rotation.y.to_degrees(),
                self.rotation.z.to_degrees(),
                stats.faces_drawn,
                stats.faces_total,
                stats.pixels_emitted,
                self.occlusion,
            )),
            Clear(ClearType::UntilNewLine),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_frame_paints_cells() {
        let mut app = TerminalApp::with_size(Mesh::cube(2.0), Rotation::from_degrees(0.0, 0.0, 60.0), 40, 20);
        let stats = app.render_frame();
        assert_eq!(stats.faces_drawn, 6);
        assert!(app.canvas().painted_cells() > 0);
    }

    #[test]
    fn test_load_mesh_reports_bad_input() {
        let missing = load_mesh(Path::new("/nonexistent/mesh.obj")).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);

        let path = std::env::temp_dir().join("isofill-terminal-bad-mesh.ply");
        fs::write(&path, b"ply").unwrap();
        let unsupported = load_mesh(&path).unwrap_err();
        assert_eq!(unsupported.kind(), io::ErrorKind::InvalidData);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_reset_axis_restores_initial_angle() {
        let initial = Rotation::from_degrees(90.0, 0.0, 0.0);
        let mut app = TerminalApp::with_size(Mesh::cube(2.0), initial, 10, 10);
        app.rotate(0.2, 0.3, 0.4);
        app.reset_axis(Axis::X);
        assert_eq!(app.rotation.x, initial.x);
        assert_eq!(app.rotation.y, 0.3);
        assert!(app.dirty);
    }
}
