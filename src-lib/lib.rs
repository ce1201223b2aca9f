// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Core logic for the color-lens application. The GUI binary is a thin
//! presentation layer over this crate: everything here can be driven from
//! unit tests without a display or a camera attached.

pub mod capture;
pub mod color;
pub mod frame;
pub mod geometry;
pub mod history;
pub mod latest;
pub mod palette;
pub mod session;
pub mod settings;
pub mod util;
