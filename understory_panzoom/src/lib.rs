// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_panzoom --heading-base-level=0

//! Understory Pan/Zoom: wheel, pinch and drag control for vector surfaces.
//!
//! [`PanZoom`] drives a viewbox-mapped [`Surface`] such as an SVG element.
//! The host forwards its raw input to the `on_*` handlers; the controller
//! turns them into zoom ratios and pan deltas, keeps the view within the
//! configured margins and commits the result back to the surface.
//!
//! The view lives on one of two channels at a time (see
//! [`understory_viewbox::View`]):
//! - the surface's viewbox, or
//! - the transform of a proxy node wrapping the content. Moving a single
//!   group is cheaper than re-laying out every child, so with a proxy
//!   attached the matrix carries the view for the length of a pan or pinch
//!   and is folded back into the viewbox when the gesture ends. In
//!   proxy-only mode the matrix carries it all the time.
//!
//! Commits are coalesced to one per display frame unless
//! [`Config::performance`] is off. Frames and transitions are requested from
//! the surface and reported back through [`PanZoom::on_frame`] and
//! [`PanZoom::on_transition_end`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_panzoom::{
//!     Config, FrameHandle, Listeners, Notification, Outcome, PanZoom, Surface,
//! };
//! use understory_viewbox::PreserveAspectRatio;
//!
//! struct Canvas {
//!     viewbox: Rect,
//! }
//!
//! impl Surface for Canvas {
//!     type Element = str;
//!     fn viewbox(&self) -> Option<Rect> { Some(self.viewbox) }
//!     fn set_viewbox(&mut self, viewbox: Rect) { self.viewbox = viewbox; }
//!     fn content_bbox(&self) -> Rect { self.viewbox }
//!     fn element_bbox(&self, _: &str) -> Option<Rect> { None }
//!     fn client_size(&self) -> Size { Size::new(800.0, 600.0) }
//!     fn preserve_aspect_ratio(&self) -> PreserveAspectRatio { PreserveAspectRatio::default() }
//!     fn client_to_surface(&self, point: Point) -> Point { point }
//!     fn listen(&mut self, _: Listeners, _: bool) {}
//!     fn unlisten(&mut self, _: Listeners) {}
//!     fn dispatch(&mut self, _: &Notification<'_>) -> Outcome { Outcome::Continue }
//!     fn request_frame(&mut self) -> FrameHandle { FrameHandle(0) }
//!     fn cancel_frame(&mut self, _: FrameHandle) {}
//! }
//!
//! let canvas = Canvas { viewbox: Rect::new(0.0, 0.0, 800.0, 600.0) };
//! let config = Config::default().with_performance(false);
//! let mut panzoom = PanZoom::new(canvas, config).unwrap();
//!
//! panzoom.zoom(2.0, Some(Point::new(400.0, 300.0)), false);
//! assert_eq!(panzoom.surface().viewbox, Rect::new(200.0, 150.0, 600.0, 450.0));
//!
//! panzoom.pan(Vec2::new(100.0, 0.0), false);
//! assert_eq!(panzoom.surface().viewbox.x0, 100.0);
//! ```

mod config;
mod engine;
mod error;
mod gestures;
mod input;
mod scheduler;
mod surface;

pub use config::{Config, PanGate, ProxySelection};
pub use engine::{Baseline, PanTarget, PanToZoom, PanZoom, PanZoomBuilder, ZOOM_EPSILON};
pub use error::{Error, Result};
pub use input::{GateVerdict, PanGateTicket, PointerInput, Response, TouchInput, WheelInput};
pub use surface::{
    FrameHandle, Listeners, Notification, Outcome, Surface, TransitionHandle, ZoomRequest,
    ZoomTrigger,
};

pub use understory_gesture_state::wheel::DeltaMode;
