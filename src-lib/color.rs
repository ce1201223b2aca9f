// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! The RGB value type and its textual/packed representations.

/// An 8-bit-per-channel RGB color. Immutable value type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> RgbColor {
        RgbColor { r, g, b }
    }

    /// unpack from the `0RGB` u32 format used by the render buffer
    pub fn from_argb(argb: u32) -> RgbColor {
        RgbColor {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// pack into the `0RGB` u32 format used by the render buffer
    pub fn to_argb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// `#rrggbb`, lowercase. Display layers uppercase this for presentation.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL as `(hue degrees, saturation %, lightness %)`,
    /// truncated to integers.
    pub fn to_hsl(self) -> (u16, u8, u8) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            // achromatic: hue and saturation are zero by convention
            return (0, 0, (lightness * 100.0) as u8);
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let hue_sixths = if max == r {
            let h = (g - b) / delta;
            if h < 0.0 {
                h + 6.0
            } else {
                h
            }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        let hue = hue_sixths * 60.0;

        (hue as u16, (saturation * 100.0) as u8, (lightness * 100.0) as u8)
    }
}

#[cfg(test)]
mod test_color {
    use super::*;

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(RgbColor::new(255, 127, 80).hex(), "#ff7f50");
    }

    #[test]
    fn argb_round_trip() {
        let color = RgbColor::new(12, 200, 3);
        assert_eq!(RgbColor::from_argb(color.to_argb()), color);
    }

    #[test]
    fn argb_ignores_high_byte() {
        assert_eq!(RgbColor::from_argb(0xFF102030), RgbColor::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(RgbColor::new(255, 0, 0).to_hsl(), (0, 100, 50));
        assert_eq!(RgbColor::new(0, 255, 0).to_hsl(), (120, 100, 50));
        assert_eq!(RgbColor::new(0, 0, 255).to_hsl(), (240, 100, 50));
    }

    #[test]
    fn hsl_achromatic() {
        assert_eq!(RgbColor::new(0, 0, 0).to_hsl(), (0, 0, 0));
        assert_eq!(RgbColor::new(255, 255, 255).to_hsl(), (0, 0, 100));
    }

    #[test]
    fn hsl_gold() {
        // hue 50.58° truncates to 50, matching the integer display format
        assert_eq!(RgbColor::new(255, 215, 0).to_hsl(), (50, 100, 50));
    }
}
