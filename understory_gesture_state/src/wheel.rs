// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel zoom: delta normalization and the zoom speed curve.
//!
//! Wheel events are stateless. Each one is normalized to pixels and turned
//! into a multiplicative zoom ratio with
//! `ratio = (1 + zoom_speed) ^ (-pixels / 100)`, so repeated ticks compound
//! instead of adding up.
//!
//! ```
//! use understory_gesture_state::wheel::{DeltaMode, WheelNormalization, zoom_ratio};
//!
//! let norm = WheelNormalization::default();
//! let pixels = norm.normalize(3.0, DeltaMode::Line);
//! assert_eq!(pixels, 51.0);
//!
//! assert_eq!(zoom_ratio(1.0, 100.0), 0.5);
//! assert_eq!(zoom_ratio(1.0, -100.0), 2.0);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Delta is already in pixels.
    #[default]
    Pixel,
    /// Delta is in lines.
    Line,
    /// Delta is in pages/screens.
    Page,
}

impl DeltaMode {
    /// Maps a DOM `WheelEvent.deltaMode` value.
    ///
    /// Unknown values are treated as pixels.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Pixel equivalents for line- and page-based wheel deltas.
///
/// Browsers disagree on units: a mouse notch is typically 53 pixels in one
/// and 3 lines in another. The defaults bring both to a similar speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelNormalization {
    /// Pixels per line.
    pub line_pixels: f64,
    /// Pixels per page.
    pub page_pixels: f64,
}

impl Default for WheelNormalization {
    fn default() -> Self {
        Self {
            line_pixels: 17.0,
            page_pixels: 53.0,
        }
    }
}

impl WheelNormalization {
    /// Converts `delta` in `mode` units into pixels.
    pub fn normalize(&self, delta: f64, mode: DeltaMode) -> f64 {
        match mode {
            DeltaMode::Pixel => delta,
            DeltaMode::Line => delta * self.line_pixels,
            DeltaMode::Page => delta * self.page_pixels,
        }
    }
}

/// Zoom ratio for a normalized pixel delta.
///
/// Scrolling down (positive delta) zooms out; `zoom_speed` sets how steep the
/// curve is.
pub fn zoom_ratio(zoom_speed: f64, pixel_delta: f64) -> f64 {
    (1.0 + zoom_speed).powf(-pixel_delta / 100.0)
}
