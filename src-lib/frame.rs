// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Pixel rasters in the packed `0RGB` format the render surface consumes.

use std::io;
use std::path::Path;

use crate::color::RgbColor;

/// A decoded raster: one `u32` per pixel, row-major, `0RGB` packed.
/// Produced either by decoding a still image or by converting a camera
/// frame; immutable once built.
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Frame {
    pub fn from_argb(width: u32, height: u32, data: Vec<u32>) -> Frame {
        debug_assert_eq!(data.len(), width as usize * height as usize, "frame buffer has wrong size");
        Frame { width, height, data }
    }

    /// Decode a still image from disk. Any format the decoder recognizes is
    /// accepted; failures are recoverable and leave caller state unchanged.
    pub fn open(path: &Path) -> io::Result<Frame> {
        let decoded = image::open(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .to_rgb8();
        let (width, height) = decoded.dimensions();
        let data = decoded
            .pixels()
            .map(|pixel| RgbColor::new(pixel[0], pixel[1], pixel[2]).to_argb())
            .collect();
        Ok(Frame { width, height, data })
    }

    /// Convert a tightly-packed BGR camera frame, optionally mirroring it
    /// horizontally for a selfie-style preview.
    pub fn from_bgr(width: u32, height: u32, bgr: &[u8], mirror: bool) -> Frame {
        debug_assert_eq!(bgr.len(), width as usize * height as usize * 3, "BGR buffer has wrong size");

        let width = width as usize;
        let height = height as usize;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let source_x = if mirror { width - 1 - x } else { x };
                let i = (y * width + source_x) * 3;
                data.push(RgbColor::new(bgr[i + 2], bgr[i + 1], bgr[i]).to_argb());
            }
        }

        Frame {
            width: width as u32,
            height: height as u32,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<RgbColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        Some(RgbColor::from_argb(self.data[index]))
    }

    /// the pixel under the camera-mode crosshair
    pub fn center_pixel(&self) -> Option<RgbColor> {
        self.pixel(self.width / 2, self.height / 2)
    }

    /// Nearest-neighbor rescale for display. Each display pixel pulls from
    /// the source index the coordinate mapper would produce for it.
    pub fn scaled(&self, display_width: u32, display_height: u32) -> Vec<u32> {
        let source_width = self.width as usize;
        let source_height = self.height as usize;
        let display_width = display_width as usize;
        let display_height = display_height as usize;

        let mut scaled = Vec::with_capacity(display_width * display_height);
        for display_y in 0..display_height {
            let source_y = (display_y * source_height / display_height).min(source_height - 1);
            let row = source_y * source_width;
            for display_x in 0..display_width {
                let source_x = (display_x * source_width / display_width).min(source_width - 1);
                scaled.push(self.data[row + source_x]);
            }
        }
        scaled
    }
}

#[cfg(test)]
mod test_frame {
    use super::*;

    fn checkerboard() -> Frame {
        // 2x2: red, green / blue, white
        Frame::from_argb(2, 2, vec![0xFF0000, 0x00FF00, 0x0000FF, 0xFFFFFF])
    }

    #[test]
    fn pixel_access() {
        let frame = checkerboard();
        assert_eq!(frame.pixel(0, 0), Some(RgbColor::new(255, 0, 0)));
        assert_eq!(frame.pixel(1, 1), Some(RgbColor::new(255, 255, 255)));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
    }

    #[test]
    fn center_pixel_of_even_frame() {
        // integer division puts the center of a 2x2 at (1,1)
        assert_eq!(checkerboard().center_pixel(), Some(RgbColor::new(255, 255, 255)));
    }

    #[test]
    fn bgr_conversion_swaps_channels() {
        let frame = Frame::from_bgr(2, 1, &[255, 0, 0, 0, 0, 255], false);
        assert_eq!(frame.pixel(0, 0), Some(RgbColor::new(0, 0, 255)));
        assert_eq!(frame.pixel(1, 0), Some(RgbColor::new(255, 0, 0)));
    }

    #[test]
    fn bgr_conversion_can_mirror() {
        let frame = Frame::from_bgr(2, 1, &[255, 0, 0, 0, 0, 255], true);
        assert_eq!(frame.pixel(0, 0), Some(RgbColor::new(255, 0, 0)));
        assert_eq!(frame.pixel(1, 0), Some(RgbColor::new(0, 0, 255)));
    }

    #[test]
    fn scaled_upsample_repeats_pixels() {
        let scaled = checkerboard().scaled(4, 4);
        assert_eq!(scaled.len(), 16);
        assert_eq!(scaled[0], 0xFF0000);
        assert_eq!(scaled[1], 0xFF0000);
        assert_eq!(scaled[2], 0x00FF00);
        assert_eq!(scaled[15], 0xFFFFFF);
    }

    #[test]
    fn scaled_downsample_dimensions() {
        let frame = Frame::from_argb(4, 2, vec![0x123456; 8]);
        assert_eq!(frame.scaled(2, 1).len(), 2);
    }
}
