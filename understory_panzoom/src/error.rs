// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for pan/zoom construction and `pan_to`.

use kurbo::Rect;
use thiserror::Error;

/// Errors reported by [`PanZoom`](crate::PanZoom).
///
/// Construction errors are returned from
/// [`PanZoomBuilder::build`](crate::PanZoomBuilder::build). The `pan_to`
/// variants never reach the caller: `pan_to` logs them and leaves the view
/// untouched.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// The builder was finished without a surface.
    #[error("no graphics surface was supplied")]
    MissingSurface,

    /// The baseline viewbox is empty or not finite.
    #[error("baseline viewbox {0:?} is empty or not finite")]
    DegenerateBaseline(Rect),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A `pan_to` element has no bounding box.
    #[error("pan target has no bounding box")]
    MissingTarget,

    /// A `pan_to` element's bounding box cannot be centered on.
    #[error("pan target bounding box {0:?} is degenerate")]
    DegenerateTarget(Rect),

    /// A requested zoom level is zero, negative, or not finite.
    #[error("zoom level {0} is not a positive finite number")]
    InvalidZoomLevel(f64),

    /// The computed view is not finite.
    #[error("pan_to produced a non-finite view")]
    NonFinite,
}

/// Result alias for pan/zoom operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
