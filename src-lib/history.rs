// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! The session capture history: append-only, order-preserving, in-memory.

use crate::color::RgbColor;

/// One "capture current color" action. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureRecord {
    pub rgb: RgbColor,
    /// `#rrggbb`, lowercase
    pub hex: String,
    pub name: &'static str,
}

#[derive(Default)]
pub struct CaptureHistory {
    records: Vec<CaptureRecord>,
}

impl CaptureHistory {
    pub fn push(&mut self, record: CaptureRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }

    /// Plain-text rendering for the history dialog. Hex codes are
    /// uppercased here; the stored form stays lowercase.
    pub fn render_text(&self) -> String {
        if self.records.is_empty() {
            return "Captured colors will appear here...".to_string();
        }

        let mut text = String::from("Captured Colors:\n=========================\n\n");
        for (index, record) in self.records.iter().enumerate() {
            text.push_str(&format!(
                "#{:02} {}\nHEX: {}\nRGB: ({}, {}, {})\n--------------------\n\n",
                index + 1,
                record.name,
                record.hex.to_uppercase(),
                record.rgb.r,
                record.rgb.g,
                record.rgb.b,
            ));
        }
        text
    }
}

#[cfg(test)]
mod test_history {
    use super::*;

    fn record(name: &'static str, rgb: RgbColor) -> CaptureRecord {
        CaptureRecord { rgb, hex: rgb.hex(), name }
    }

    #[test]
    fn appends_preserve_order() {
        let mut history = CaptureHistory::default();
        history.push(record("Red", RgbColor::new(255, 0, 0)));
        history.push(record("Gold", RgbColor::new(255, 215, 0)));
        history.push(record("Navy", RgbColor::new(0, 0, 128)));

        assert_eq!(history.len(), 3);
        assert_eq!(history.records()[0].name, "Red");
        assert_eq!(history.records()[1].name, "Gold");
        assert_eq!(history.records()[2].name, "Navy");
    }

    #[test]
    fn empty_history_renders_placeholder() {
        let history = CaptureHistory::default();
        assert!(history.is_empty());
        assert!(history.render_text().contains("will appear here"));
    }

    #[test]
    fn rendered_text_numbers_entries_and_uppercases_hex() {
        let mut history = CaptureHistory::default();
        history.push(record("Gold", RgbColor::new(255, 215, 0)));
        let text = history.render_text();
        assert!(text.contains("#01 Gold"));
        assert!(text.contains("HEX: #FFD700"));
        assert!(text.contains("RGB: (255, 215, 0)"));
    }
}
