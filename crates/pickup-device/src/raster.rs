//! 1-bpp frame buffer, text rasterization and nearest-neighbor scaling.
//!
//! Frames are row-major with eight pixels per byte, most significant bit
//! leftmost. Text is rasterized at native glyph size (8 px tall) and scaled
//! up to the panel's proportions afterwards.

use crate::font::{self, GLYPH_SIZE};

/// Text is padded to a multiple of this many characters so every raster row
/// stays byte-aligned.
pub const PAD_BLOCK: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RasterError {
    #[error("invalid scale target {0}x{1}")]
    InvalidTarget(usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(8);
        Self {
            width,
            height,
            bits: vec![0; stride * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Pixel value; out-of-bounds reads are off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.bits[y * self.stride() + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let stride = self.stride();
        let mask = 0x80 >> (x % 8);
        let byte = &mut self.bits[y * stride + x / 8];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// True when no pixel is set.
    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }
}

/// Pad with trailing spaces to a multiple of [`PAD_BLOCK`] characters.
pub fn pad_text(text: &str) -> String {
    let len = text.chars().count();
    let rem = len % PAD_BLOCK;
    if rem == 0 && len > 0 {
        return text.to_string();
    }
    let padding = if len == 0 { PAD_BLOCK } else { PAD_BLOCK - rem };
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', padding));
    padded
}

/// Draw text at native glyph size: one row of 8x8 glyphs.
pub fn rasterize(text: &str) -> Frame {
    let chars: Vec<char> = text.chars().collect();
    let mut frame = Frame::new(chars.len() * GLYPH_SIZE, GLYPH_SIZE);

    for (i, &ch) in chars.iter().enumerate() {
        let glyph = font::glyph(ch);
        for (y, &row) in glyph.iter().enumerate() {
            for x in 0..GLYPH_SIZE {
                // Font rows are LSB-leftmost.
                if row & (1 << x) != 0 {
                    frame.set_pixel(i * GLYPH_SIZE + x, y, true);
                }
            }
        }
    }

    frame
}

/// Nearest-neighbor scale: `dst(x, y) = src(x * sw / dw, y * sh / dh)`,
/// flooring the source coordinates.
pub fn scale(src: &Frame, dest_width: usize, dest_height: usize) -> Result<Frame, RasterError> {
    if dest_width == 0 || dest_height == 0 {
        return Err(RasterError::InvalidTarget(dest_width, dest_height));
    }

    let mut dest = Frame::new(dest_width, dest_height);
    let x_ratio = src.width() as f32 / dest_width as f32;
    let y_ratio = src.height() as f32 / dest_height as f32;

    for y in 0..dest_height {
        let sy = (y as f32 * y_ratio) as usize;
        for x in 0..dest_width {
            let sx = (x as f32 * x_ratio) as usize;
            if src.pixel(sx, sy) {
                dest.set_pixel(x, y, true);
            }
        }
    }

    Ok(dest)
}
