// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Mapping between a source image and its scaled, centered, letterboxed
//! on-screen rendering.

/// maximum size of the rendered image inside the viewport
pub const MAX_DISPLAY_WIDTH: u32 = 630;
pub const MAX_DISPLAY_HEIGHT: u32 = 480;

/// fixed viewport the rendering is centered within
pub const VIEWPORT_WIDTH: u32 = 650;
pub const VIEWPORT_HEIGHT: u32 = 500;

/// Scale relationship between a source raster and its on-screen rendering.
/// Recomputed whenever a new image or frame is loaded; never persisted.
///
/// Invariant: `display_width / display_height` preserves the aspect ratio of
/// `original_width / original_height` within integer truncation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub original_width: u32,
    pub original_height: u32,
    pub display_width: u32,
    pub display_height: u32,
}

impl DisplayGeometry {
    /// Aspect-preserving fit of `original` into `max`, truncating to
    /// integers. Wide sources are width-bound, tall sources height-bound.
    pub fn fit(original_width: u32, original_height: u32, max_width: u32, max_height: u32) -> DisplayGeometry {
        let (display_width, display_height) =
            if original_width as u64 * max_height as u64 > original_height as u64 * max_width as u64 {
                let height = max_width as u64 * original_height as u64 / original_width as u64;
                (max_width, (height as u32).max(1))
            } else {
                let width = max_height as u64 * original_width as u64 / original_height as u64;
                ((width as u32).max(1), max_height)
            };

        DisplayGeometry {
            original_width,
            original_height,
            display_width,
            display_height,
        }
    }

    /// fit into the fixed reference viewport
    pub fn fit_viewport(original_width: u32, original_height: u32) -> DisplayGeometry {
        DisplayGeometry::fit(original_width, original_height, MAX_DISPLAY_WIDTH, MAX_DISPLAY_HEIGHT)
    }

    /// symmetric letterbox margins when centered in the given viewport
    pub fn offsets(&self, viewport_width: u32, viewport_height: u32) -> (f64, f64) {
        (
            (viewport_width as f64 - self.display_width as f64) / 2.0,
            (viewport_height as f64 - self.display_height as f64) / 2.0,
        )
    }

    /// Map a viewport click back to a source pixel coordinate.
    ///
    /// Returns `None` when the click lands in the letterbox margins. That is
    /// a no-op outcome, not an error: the caller simply ignores the click.
    /// In-bounds results are truncated to integers and clamped to the source
    /// dimensions.
    pub fn map_click(
        &self,
        click_x: f64,
        click_y: f64,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<(u32, u32)> {
        let (x_offset, y_offset) = self.offsets(viewport_width, viewport_height);
        let local_x = click_x - x_offset;
        let local_y = click_y - y_offset;

        if local_x < 0.0
            || local_y < 0.0
            || local_x > self.display_width as f64
            || local_y > self.display_height as f64
        {
            return None;
        }

        let source_x = (local_x * self.original_width as f64 / self.display_width as f64) as u32;
        let source_y = (local_y * self.original_height as f64 / self.display_height as f64) as u32;

        Some((
            source_x.min(self.original_width - 1),
            source_y.min(self.original_height - 1),
        ))
    }
}

#[cfg(test)]
mod test_geometry {
    use super::*;

    #[test]
    fn wide_source_is_width_bound() {
        let geometry = DisplayGeometry::fit(1000, 500, 630, 480);
        assert_eq!((geometry.display_width, geometry.display_height), (630, 315));
    }

    #[test]
    fn tall_source_is_height_bound() {
        let geometry = DisplayGeometry::fit(400, 800, 630, 480);
        assert_eq!((geometry.display_width, geometry.display_height), (240, 480));
    }

    #[test]
    fn fit_preserves_aspect_ratio_within_rounding() {
        let geometry = DisplayGeometry::fit(1234, 789, 630, 480);
        let original = 1234.0 / 789.0;
        let displayed = geometry.display_width as f64 / geometry.display_height as f64;
        assert!((original - displayed).abs() < 0.01);
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        let geometry = DisplayGeometry::fit(1, 1000, 630, 480);
        assert_eq!(geometry.display_width, 1);
        assert_eq!(geometry.display_height, 480);
    }

    #[test]
    fn center_click_round_trip() {
        // 1000x500 source displayed at 630x315, centered in a 650x500
        // viewport: the viewport center maps to the source center
        let geometry = DisplayGeometry::fit(1000, 500, 630, 480);
        assert_eq!(geometry.map_click(325.0, 250.0, 650, 500), Some((500, 250)));
    }

    #[test]
    fn corner_click_is_out_of_bounds() {
        let geometry = DisplayGeometry::fit(1000, 500, 630, 480);
        assert_eq!(geometry.map_click(0.0, 0.0, 650, 500), None);
    }

    #[test]
    fn far_edge_click_clamps_to_last_pixel() {
        // the display edge itself is in bounds, and truncation would land
        // one past the last source pixel without the clamp
        let geometry = DisplayGeometry::fit(1000, 500, 630, 480);
        let (x_offset, y_offset) = geometry.offsets(650, 500);
        let mapped = geometry.map_click(x_offset + 630.0, y_offset + 315.0, 650, 500);
        assert_eq!(mapped, Some((999, 499)));
    }

    #[test]
    fn letterbox_margins_are_symmetric() {
        let geometry = DisplayGeometry::fit(1000, 500, 630, 480);
        let (x_offset, y_offset) = geometry.offsets(650, 500);
        assert_eq!(x_offset, 10.0);
        assert_eq!(y_offset, 92.5);
    }
}
