//! Drawing into LED matrix frames
//!
//! Host-side helpers that render into a [`Canvas`], an owned frame that is
//! handed to the driver's frame store once complete:
//!
//! - Pixel plotting with optional mirroring and gamma correction
//! - Proportional 5x7 text
//! - An `embedded-graphics` draw target for lines, shapes and fonts

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod font;
mod graphics;

pub use canvas::Canvas;
pub use font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
