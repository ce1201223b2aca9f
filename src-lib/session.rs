// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Interactive session state: the current frame, the current detected
//! color, and the capture history, held in one explicit object instead of
//! ambient globals so the pure functions can be driven from tests.

use std::sync::Arc;

use crate::color::RgbColor;
use crate::frame::Frame;
use crate::history::{CaptureHistory, CaptureRecord};
use crate::palette;

#[derive(Default)]
pub struct Session {
    frame: Option<Arc<Frame>>,
    current_color: Option<RgbColor>,
    history: CaptureHistory,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// swap in a new frame snapshot; the detected color is kept until the
    /// next sample so a capture between frames still works
    pub fn set_frame(&mut self, frame: Arc<Frame>) {
        self.frame = Some(frame);
    }

    /// drop the frame and the detected color, e.g. when the camera stops
    pub fn clear_frame(&mut self) {
        self.frame = None;
        self.current_color = None;
    }

    pub fn frame(&self) -> Option<&Arc<Frame>> {
        self.frame.as_ref()
    }

    pub fn current_color(&self) -> Option<RgbColor> {
        self.current_color
    }

    /// sample the center pixel (camera-mode crosshair)
    pub fn sample_center(&mut self) -> Option<RgbColor> {
        let color = self.frame.as_ref()?.center_pixel()?;
        self.current_color = Some(color);
        Some(color)
    }

    /// sample a specific source pixel (image-mode click)
    pub fn sample_at(&mut self, x: u32, y: u32) -> Option<RgbColor> {
        let color = self.frame.as_ref()?.pixel(x, y)?;
        self.current_color = Some(color);
        Some(color)
    }

    /// Capture the current detected color into the history. `None` when
    /// nothing has been detected yet.
    pub fn capture(&mut self) -> Option<CaptureRecord> {
        let rgb = self.current_color?;
        let record = CaptureRecord {
            rgb,
            hex: rgb.hex(),
            name: palette::classify(rgb),
        };
        self.history.push(record.clone());
        Some(record)
    }

    pub fn history(&self) -> &CaptureHistory {
        &self.history
    }
}

#[cfg(test)]
mod test_session {
    use super::*;

    fn solid_frame(color: RgbColor) -> Arc<Frame> {
        Arc::new(Frame::from_argb(3, 3, vec![color.to_argb(); 9]))
    }

    #[test]
    fn capture_without_detection_is_a_no_op() {
        let mut session = Session::new();
        assert!(session.capture().is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn sample_then_capture() {
        let mut session = Session::new();
        session.set_frame(solid_frame(RgbColor::new(255, 215, 0)));
        assert_eq!(session.sample_center(), Some(RgbColor::new(255, 215, 0)));

        let record = session.capture().unwrap();
        assert_eq!(record.name, "Gold");
        assert_eq!(record.hex, "#ffd700");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn history_reflects_each_capture_in_order() {
        let mut session = Session::new();
        let colors = [
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 0, 128),
            RgbColor::new(1, 1, 1),
        ];
        for color in colors {
            session.set_frame(solid_frame(color));
            session.sample_center();
            session.capture();
        }

        assert_eq!(session.history().len(), 3);
        let names: Vec<_> = session.history().records().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Red", "Navy", "Black"]);
        for (record, color) in session.history().records().iter().zip(colors) {
            assert_eq!(record.rgb, color);
        }
    }

    #[test]
    fn sample_at_out_of_bounds_keeps_previous_color() {
        let mut session = Session::new();
        session.set_frame(solid_frame(RgbColor::new(0, 0, 255)));
        session.sample_at(1, 1);
        assert_eq!(session.sample_at(10, 10), None);
        assert_eq!(session.current_color(), Some(RgbColor::new(0, 0, 255)));
    }

    #[test]
    fn clearing_the_frame_clears_the_detected_color() {
        let mut session = Session::new();
        session.set_frame(solid_frame(RgbColor::new(0, 255, 255)));
        session.sample_center();
        session.clear_frame();
        assert!(session.current_color().is_none());
        assert!(session.frame().is_none());
    }
}
