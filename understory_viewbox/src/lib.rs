// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_viewbox --heading-base-level=0

//! Understory Viewbox: geometry for pan/zoom over a viewbox-mapped surface.
//!
//! Vector surfaces such as SVG map their content through a *viewbox*: a
//! rectangle in content coordinates that is fitted to the surface according
//! to a `preserveAspectRatio` policy. This crate provides the small, headless
//! pieces a pan/zoom controller needs on top of that model:
//! - [`View`]: the authoritative view, either a viewbox or a proxy-node
//!   matrix, with explicit reconciliation between the two.
//! - [`constrain_to_margins`]: clamp a candidate viewbox so part of the
//!   original content stays visible.
//! - [`ViewportFit`]: the offsets between a viewbox and the region actually
//!   visible under a `preserveAspectRatio` policy.
//! - [`zoom_level`] and [`view_to_baseline`]: zoom accounting against the
//!   baseline viewbox.
//!
//! It does **not** talk to any host surface; callers feed it rectangles and
//! matrices and apply the results themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect, Size, Vec2};
//! use understory_viewbox::{
//!     Margins, PreserveAspectRatio, View, ViewportFit, constrain_to_margins,
//! };
//!
//! let baseline = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! // Drag on a proxy node, then fold the matrix back into a viewbox.
//! let mut view = View::Viewbox(baseline).with_proxy(Affine::IDENTITY);
//! view.pan(Vec2::new(40.0, 0.0));
//! view.zoom_about(2.0, Point::new(400.0, 300.0));
//! let settled = view.settle().viewbox().unwrap();
//!
//! // Keep at least 50 units of the original content on screen.
//! let fit = ViewportFit::new(PreserveAspectRatio::default(), Size::new(800.0, 600.0));
//! let clamped = constrain_to_margins(settled, baseline, Some(Margins::uniform(50.0)), fit);
//! assert_eq!(clamped.size(), settled.size());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod aspect;
mod margins;
mod view;

pub use aspect::{Align, MeetOrSlice, PreserveAspectRatio, ViewportFit, ViewportOffsets};
pub use margins::{Margins, constrain_to_margins};
pub use view::{Authority, SvgMatrix, View, view_to_baseline, zoom_level};
