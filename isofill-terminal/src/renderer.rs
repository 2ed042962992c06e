/// Character-cell pixel surface for terminal output
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use isofill_core::{Color as Rgb, PixelSink};
use std::io::Write;

/// Character ramp from least to most ink; darker colors use denser characters
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A `PixelSink` that keeps one color per terminal cell.
///
/// The square surface `[0, extent)` is stretched over the cell grid; pixels
/// outside it are dropped.
pub struct CharCanvas {
    width: usize,
    height: usize,
    extent: f64,
    cells: Vec<Option<Rgb>>,
}

impl CharCanvas {
    pub fn new(width: usize, height: usize, extent: f64) -> Self {
        Self {
            width,
            height,
            extent,
            cells: vec![None; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Change the surface extent the grid represents
    pub fn set_extent(&mut self, extent: f64) {
        self.extent = extent;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Rgb> {
        self.cells.get(row * self.width + column).copied().flatten()
    }

    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !(0.0..self.extent).contains(&x) || !(0.0..self.extent).contains(&y) {
            return None;
        }
        let column = (x / self.extent * self.width as f64) as usize;
        let row = (y / self.extent * self.height as f64) as usize;
        (column < self.width && row < self.height).then(|| row * self.width + column)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let (c, color) = match cell {
                    Some(rgb) => shade_char(rgb),
                    None => (' ', Color::Reset),
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl PixelSink for CharCanvas {
    fn put_pixel(&mut self, x: f64, y: f64, color: Rgb) {
        if let Some(index) = self.cell_index(x, y) {
            self.cells[index] = Some(color);
        }
    }
}

/// Character and terminal color for a painted cell
fn shade_char(rgb: &Rgb) -> (char, Color) {
    let ink = 1.0 - rgb.luminance();
    let index = (ink * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    let index = index.min(LUMINOSITY_RAMP.len() - 1);

    let color = match index {
        0..=2 => Color::DarkGrey,
        3..=5 => Color::Grey,
        _ => Color::White,
    };
    (LUMINOSITY_RAMP[index], color)
}
