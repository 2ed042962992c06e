/// isofill Web - draws the software rasterizer's output onto an HTML canvas
///
/// Rendering happens entirely in the core crate; the browser only receives
/// 1×1 `fill_rect` calls through a 2D context.

use isofill_core::{obj, render, Axis, Color, Mesh, Occlusion, PixelSink, RenderContext, Rotation};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn warn(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn error(msg: &str);
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

fn max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{} {}] {}", record.level(), record.target(), record.args());
        match record.level() {
            Level::Error => error(&msg),
            Level::Warn => warn(&msg),
            _ => log(&msg),
        }
    }

    fn flush(&self) {}
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    log::set_logger(&LOGGER).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::set_max_level(max_level());
    Ok(())
}

/// Half of the canvas extent in pixels
const TARGET_CANVAS_SIZE: f64 = 400.0;

/// Pixel sink painting into a 2D canvas context
struct CanvasSink<'a> {
    context: &'a CanvasRenderingContext2d,
    fill: Option<Color>,
}

impl<'a> CanvasSink<'a> {
    fn new(context: &'a CanvasRenderingContext2d) -> Self {
        Self { context, fill: None }
    }
}

impl PixelSink for CanvasSink<'_> {
    fn put_pixel(&mut self, x: f64, y: f64, color: Color) {
        // faces arrive as runs of one color, so the style rarely changes
        if self.fill != Some(color) {
            self.context.set_fill_style_str(&color.to_string());
            self.fill = Some(color);
        }
        self.context.fill_rect(x, y, 1.0, 1.0);
    }
}

fn parse_axis(axis: &str) -> Result<Axis, String> {
    match axis {
        "x" | "X" => Ok(Axis::X),
        "y" | "Y" => Ok(Axis::Y),
        "z" | "Z" => Ok(Axis::Z),
        other => Err(format!("unknown rotation axis \"{}\"", other)),
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    mesh: Mesh,
    rotation: Rotation,
    initial_rotation: Rotation,
    occlusion: Occlusion,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas element with the given id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id \"{}\"", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("\"{}\" is not a canvas", canvas_id)))?;

        let extent = (2.0 * TARGET_CANVAS_SIZE) as u32;
        canvas.set_width(extent);
        canvas.set_height(extent);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(WebRenderer {
            canvas,
            context,
            mesh: Mesh::cube(2.0),
            rotation: Rotation::from_degrees(0.0, 0.0, 60.0),
            initial_rotation: Rotation::from_degrees(0.0, 0.0, 60.0),
            occlusion: Occlusion::default(),
        })
    }

    /// Replace the mesh with parsed OBJ text and its initial rotation (degrees)
    pub fn load_obj(&mut self, text: &str, x: f64, y: f64, z: f64) -> Result<usize, JsValue> {
        self.mesh = obj::parse_obj(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.initial_rotation = Rotation::from_degrees(x, y, z);
        self.rotation = self.initial_rotation;
        Ok(self.mesh.len())
    }

    /// Set one axis angle in degrees
    pub fn set_rotation(&mut self, axis: &str, degrees: f64) -> Result<(), JsValue> {
        let axis = parse_axis(axis).map_err(|e| JsValue::from_str(&e))?;
        self.rotation.set_angle(axis, degrees.to_radians());
        Ok(())
    }

    /// Current angle of one axis in degrees
    pub fn rotation(&self, axis: &str) -> Result<f64, JsValue> {
        let axis = parse_axis(axis).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.rotation.angle(axis).to_degrees())
    }

    /// Put one axis back to the mesh's initial rotation
    pub fn reset_axis(&mut self, axis: &str) -> Result<(), JsValue> {
        let axis = parse_axis(axis).map_err(|e| JsValue::from_str(&e))?;
        self.rotation.reset_axis(axis, &self.initial_rotation);
        Ok(())
    }

    pub fn set_nearest_wins(&mut self, nearest_wins: bool) {
        self.occlusion = if nearest_wins {
            Occlusion::NearestWins
        } else {
            Occlusion::FarthestWins
        };
    }

    /// Clear the canvas and render one frame; returns the number of pixels
    pub fn render(&self) -> usize {
        let ctx = RenderContext::for_mesh(TARGET_CANVAS_SIZE, self.mesh.max_coordinate).with_occlusion(self.occlusion);
        self.context
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

        let mut sink = CanvasSink::new(&self.context);
        let stats = render(&self.mesh, self.rotation, &ctx, &mut sink);
        log::debug!("rendered {} of {} faces", stats.faces_drawn, stats.faces_total);
        stats.pixels_emitted
    }
}
