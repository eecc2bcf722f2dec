//! Rasterising a symbol to pixels or terminal text.
//!
//! Image sizing reserves an 8-module quiet zone (4 per side) inside the
//! requested pixel size and centres the symbol.

use crate::config::EncoderConfig;
use crate::encoder::Encoder;
use crate::models::QrCode;
use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, ImageResult, Luma};
use std::path::Path;

const QUIET_ZONE_MODULES: usize = 8;
const ASCII_QUIET_ZONE: usize = 2;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Pixels per module for a symbol of `modules` per side in `pixel_size` pixels
pub fn cell_size(modules: usize, pixel_size: u32) -> u32 {
    let cell = pixel_size as usize / (modules + QUIET_ZONE_MODULES);
    cell.max(1) as u32
}

/// Render onto a white square of `pixel_size` pixels (grown if the symbol
/// would not fit at one pixel per module)
pub fn to_image(code: &QrCode, pixel_size: u32) -> GrayImage {
    let n = code.size() as u32;
    let cell = cell_size(code.size(), pixel_size);
    let side = pixel_size.max(cell * n);
    let offset = (side - cell * n) / 2;

    let mut img = GrayImage::from_pixel(side, side, LIGHT);
    for row in 0..n {
        for col in 0..n {
            if !code.get(row as usize, col as usize) {
                continue;
            }
            let px_x = offset + col * cell;
            let px_y = offset + row * cell;
            for dy in 0..cell {
                for dx in 0..cell {
                    img.put_pixel(px_x + dx, px_y + dy, DARK);
                }
            }
        }
    }
    img
}

/// PNG file bytes for the rendered symbol
pub fn to_png_bytes(code: &QrCode, pixel_size: u32) -> ImageResult<Vec<u8>> {
    let img = to_image(code, pixel_size);
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(img.as_raw(), img.width(), img.height(), ColorType::L8)?;
    Ok(buf)
}

/// Write the rendered symbol to `path` as PNG
pub fn save_png<P: AsRef<Path>>(code: &QrCode, pixel_size: u32, path: P) -> ImageResult<()> {
    to_image(code, pixel_size).save_with_format(path, image::ImageFormat::Png)
}

/// Two characters per module with a 2-module quiet zone
pub fn to_ascii(code: &QrCode) -> String {
    let size = code.size();
    let width = size + 2 * ASCII_QUIET_ZONE;
    let blank_line = format!("{}\n", " ".repeat(width * 2));
    let mut result = String::with_capacity(width * (width * 2 * 3 + 1));

    for _ in 0..ASCII_QUIET_ZONE {
        result.push_str(&blank_line);
    }
    for row in 0..size {
        result.push_str(&" ".repeat(ASCII_QUIET_ZONE * 2));
        for col in 0..size {
            result.push_str(if code.get(row, col) { "\u{2588}\u{2588}" } else { "  " });
        }
        result.push_str(&" ".repeat(ASCII_QUIET_ZONE * 2));
        result.push('\n');
    }
    for _ in 0..ASCII_QUIET_ZONE {
        result.push_str(&blank_line);
    }
    result
}

/// What a caller ends up drawing for a piece of text
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    /// The encoded symbol
    Symbol(GrayImage),
    /// Encoding failed; show the text itself in the same area
    Text {
        /// Input text
        text: String,
        /// Area width in pixels
        width: u32,
        /// Area height in pixels
        height: u32,
    },
}

/// Encode and render `text`, or fall back to the plain text when encoding fails
pub fn render_or_fallback(text: &str, pixel_size: u32, config: EncoderConfig) -> Rendering {
    match Encoder::new(config).encode(text) {
        Ok(code) => Rendering::Symbol(to_image(&code, pixel_size)),
        Err(_) => Rendering::Text {
            text: text.to_string(),
            width: pixel_size,
            height: pixel_size,
        },
    }
}
