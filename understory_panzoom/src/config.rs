// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use understory_gesture_state::wheel::WheelNormalization;
use understory_viewbox::Margins;

use crate::error::{Error, Result};
use crate::input::PointerInput;

/// Asynchronous check consulted before a pan is armed.
///
/// The future resolves to `true` to allow the pan. A gate that fails should
/// resolve to `false`.
pub type PanGate = Rc<dyn Fn(&PointerInput) -> LocalBoxFuture<'static, bool>>;

/// How the proxy node is found or created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProxySelection {
    /// No proxy node; the viewbox is the only channel.
    #[default]
    None,
    /// Create a group and move every non-`defs` child into it.
    WrapChildren,
    /// Use the first node matching a selector.
    Selector(String),
}

impl ProxySelection {
    /// Returns `true` unless this is [`ProxySelection::None`].
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Configuration for a [`PanZoom`](crate::PanZoom) controller.
///
/// Immutable once the controller is built.
#[derive(Clone)]
pub struct Config {
    /// Coalesce commits to one per display frame instead of applying them
    /// synchronously.
    pub performance: bool,
    /// Steepness of the wheel response curve.
    pub zoom_speed: f64,
    /// Lowest zoom level.
    pub zoom_min: f64,
    /// Highest zoom level.
    pub zoom_max: f64,
    /// Wheel zoom only reacts while the control key is held.
    pub zoom_on_ctrl: bool,
    /// React to wheel input.
    pub enable_wheel_zoom: bool,
    /// React to two-finger pinches.
    pub enable_pinch_zoom: bool,
    /// React to drags.
    pub enable_panning: bool,
    /// Mouse button that starts a pan.
    pub pan_button: u16,
    /// Pan with a single touch contact, including the one left after a pinch.
    pub one_finger_pan: bool,
    /// How much of the baseline content must stay reachable, if anything.
    pub margins: Option<Margins>,
    /// Pixel equivalents for line and page wheel deltas.
    pub wheel: WheelNormalization,
    /// Proxy node selection.
    pub proxy: ProxySelection,
    /// Keep the proxy matrix authoritative at all times.
    pub proxy_only: bool,
    /// Duration used when an animated commit gives none.
    pub transition: Duration,
    /// Optional pre-pan gate.
    pub pan_gate: Option<PanGate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            performance: true,
            zoom_speed: 2.0,
            zoom_min: f64::MIN_POSITIVE,
            zoom_max: f64::MAX,
            zoom_on_ctrl: true,
            enable_wheel_zoom: true,
            enable_pinch_zoom: true,
            enable_panning: true,
            pan_button: 0,
            one_finger_pan: false,
            margins: None,
            wheel: WheelNormalization::default(),
            proxy: ProxySelection::None,
            proxy_only: false,
            transition: Duration::from_millis(400),
            pan_gate: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("performance", &self.performance)
            .field("zoom_speed", &self.zoom_speed)
            .field("zoom_min", &self.zoom_min)
            .field("zoom_max", &self.zoom_max)
            .field("zoom_on_ctrl", &self.zoom_on_ctrl)
            .field("enable_wheel_zoom", &self.enable_wheel_zoom)
            .field("enable_pinch_zoom", &self.enable_pinch_zoom)
            .field("enable_panning", &self.enable_panning)
            .field("pan_button", &self.pan_button)
            .field("one_finger_pan", &self.one_finger_pan)
            .field("margins", &self.margins)
            .field("wheel", &self.wheel)
            .field("proxy", &self.proxy)
            .field("proxy_only", &self.proxy_only)
            .field("transition", &self.transition)
            .field("pan_gate", &self.pan_gate.is_some())
            .finish()
    }
}

impl Config {
    /// Sets frame coalescing.
    #[must_use]
    pub fn with_performance(mut self, performance: bool) -> Self {
        self.performance = performance;
        self
    }

    /// Sets the wheel zoom speed.
    #[must_use]
    pub fn with_zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    /// Sets the zoom level bounds.
    #[must_use]
    pub fn with_zoom_limits(mut self, min: f64, max: f64) -> Self {
        self.zoom_min = min;
        self.zoom_max = max;
        self
    }

    /// Sets whether the wheel needs the control key.
    #[must_use]
    pub fn with_zoom_on_ctrl(mut self, zoom_on_ctrl: bool) -> Self {
        self.zoom_on_ctrl = zoom_on_ctrl;
        self
    }

    /// Sets the pan button.
    #[must_use]
    pub fn with_pan_button(mut self, button: u16) -> Self {
        self.pan_button = button;
        self
    }

    /// Enables one-finger panning.
    #[must_use]
    pub fn with_one_finger_pan(mut self, enabled: bool) -> Self {
        self.one_finger_pan = enabled;
        self
    }

    /// Sets the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Some(margins);
        self
    }

    /// Selects a proxy node.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxySelection, proxy_only: bool) -> Self {
        self.proxy = proxy;
        self.proxy_only = proxy_only;
        self
    }

    /// Installs a pre-pan gate.
    #[must_use]
    pub fn with_pan_gate(
        mut self,
        gate: impl Fn(&PointerInput) -> LocalBoxFuture<'static, bool> + 'static,
    ) -> Self {
        self.pan_gate = Some(Rc::new(gate));
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| !v.is_nan() && v > 0.0;
        if !positive(self.zoom_min) || !positive(self.zoom_max) {
            return Err(Error::InvalidConfig("zoom bounds must be positive"));
        }
        if self.zoom_min > self.zoom_max {
            return Err(Error::InvalidConfig("zoom_min exceeds zoom_max"));
        }
        if !self.zoom_speed.is_finite() || self.zoom_speed <= -1.0 {
            return Err(Error::InvalidConfig(
                "zoom_speed must be finite and greater than -1",
            ));
        }
        if !self.wheel.line_pixels.is_finite() || !self.wheel.page_pixels.is_finite() {
            return Err(Error::InvalidConfig("wheel deltas must be finite"));
        }
        Ok(())
    }

    pub(crate) fn clamp_level(&self, level: f64) -> f64 {
        level.clamp(self.zoom_min, self.zoom_max)
    }
}
