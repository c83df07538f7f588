//! Owned drawing surface
//!
//! A [`Canvas`] wraps a [`Frame`] with the per-panel drawing options:
//! mirroring for panels mounted upside down or viewed from behind, and an
//! optional gamma table. Every drawing call funnels through
//! [`Canvas::pixel_set`], so both options apply uniformly.

use core::fmt::{self, Write};

use heapless::String;
use rowscan_core::{Frame, GammaTable};

use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Capacity of the formatting buffer used by [`Canvas::draw_fmt`]
pub const FMT_CAPACITY: usize = 64;

/// Drawing surface for a `W` x `H` panel
#[derive(Debug, Clone)]
pub struct Canvas<const W: usize, const H: usize> {
    frame: Frame<W, H>,
    mirror_x: bool,
    mirror_y: bool,
    gamma: Option<GammaTable>,
}

impl<const W: usize, const H: usize> Default for Canvas<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Canvas<W, H> {
    /// Blank canvas without mirroring or gamma
    pub const fn new() -> Self {
        Self {
            frame: Frame::new(),
            mirror_x: false,
            mirror_y: false,
            gamma: None,
        }
    }

    /// Flip the x and/or y axis for subsequent drawing
    pub fn set_mirroring(&mut self, horizontal: bool, vertical: bool) {
        self.mirror_x = horizontal;
        self.mirror_y = vertical;
    }

    /// Gamma table applied to subsequent drawing, `None` for linear
    pub fn set_gamma(&mut self, gamma: Option<GammaTable>) {
        self.gamma = gamma;
    }

    /// Set one pixel
    ///
    /// Returns false, changing nothing, if `(x, y)` is off the panel.
    pub fn pixel_set(&mut self, x: i32, y: i32, value: u8) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        if x >= W || y >= H {
            return false;
        }

        let x = if self.mirror_x { W - 1 - x } else { x };
        let y = if self.mirror_y { H - 1 - y } else { y };
        let value = self.corrected(value);
        self.frame.set(x, y, value)
    }

    fn corrected(&self, value: u8) -> u8 {
        match &self.gamma {
            Some(table) => table.apply(value),
            None => value,
        }
    }

    /// Set every pixel to zero
    pub fn clear(&mut self) {
        self.frame.fill(0);
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: u8) {
        let value = self.corrected(value);
        self.frame.fill(value);
    }

    /// Draw a full-height column
    pub fn vline(&mut self, x: i32, value: u8) {
        for y in 0..H as i32 {
            self.pixel_set(x, y, value);
        }
    }

    fn draw_column(&mut self, x: i32, y: i32, bits: u8, fg: u8, bg: u8) {
        for row in 0..GLYPH_HEIGHT as i32 {
            let lit = bits & (1 << row) != 0;
            self.pixel_set(x, y + row, if lit { fg } else { bg });
        }
    }

    /// Draw one character with its top row at `y`
    ///
    /// Returns the x position for the next character. Characters without a
    /// glyph draw nothing and return `x`.
    pub fn draw_glyph(&mut self, c: char, x: i32, y: i32, fg: u8, bg: u8) -> i32 {
        let Some(columns) = font::glyph(c) else {
            return x;
        };

        let mut x = x;
        layout(columns, |bits| {
            self.draw_column(x, y, bits, fg, bg);
            x += 1;
        });
        x
    }

    /// Draw text along the top row, returning the x after the last glyph
    pub fn draw_text(&mut self, text: &str, x: i32, fg: u8, bg: u8) -> i32 {
        self.draw_text_at(text, x, 0, fg, bg)
    }

    /// Draw text with its top row at `y`
    pub fn draw_text_at(&mut self, text: &str, x: i32, y: i32, fg: u8, bg: u8) -> i32 {
        text.chars()
            .fold(x, |x, c| self.draw_glyph(c, x, y, fg, bg))
    }

    /// Format and draw text along the top row
    ///
    /// Output longer than [`FMT_CAPACITY`] bytes is an error and draws
    /// nothing.
    pub fn draw_fmt(
        &mut self,
        x: i32,
        fg: u8,
        bg: u8,
        args: fmt::Arguments<'_>,
    ) -> Result<i32, fmt::Error> {
        let mut text: String<FMT_CAPACITY> = String::new();
        text.write_fmt(args)?;
        Ok(self.draw_text(&text, x, fg, bg))
    }

    /// Columns `text` would occupy
    pub fn text_width(text: &str) -> i32 {
        text.chars()
            .filter_map(font::glyph)
            .map(|columns| {
                let mut width = 0;
                layout(columns, |_| width += 1);
                width
            })
            .sum()
    }

    /// The drawn frame, ready for the frame store
    pub fn frame(&self) -> &Frame<W, H> {
        &self.frame
    }

    /// Consume the canvas and keep its pixels
    pub fn into_frame(self) -> Frame<W, H> {
        self.frame
    }
}

/// Emit the columns a glyph occupies in proportional layout
///
/// Leading and repeated empty columns are dropped and a single empty column
/// follows a glyph that ends lit. A blank glyph is two empty columns.
fn layout(columns: &[u8; GLYPH_WIDTH], mut emit: impl FnMut(u8)) {
    if columns.iter().all(|&c| c == 0) {
        emit(0);
        emit(0);
        return;
    }

    let mut last = 0u8;
    for &bits in columns {
        if last == 0 && bits == 0 {
            continue;
        }
        last = bits;
        emit(bits);
    }
    if last != 0 {
        emit(0);
    }
}
