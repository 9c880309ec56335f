// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

/// Alignment component of a `preserveAspectRatio` policy.
///
/// [`Align::None`] stretches the viewbox to the surface and never produces
/// letterboxing; every other value names where the viewbox sits along each
/// axis when its aspect ratio differs from the surface's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    /// Non-uniform scaling; the viewbox fills the surface exactly.
    None,
    /// `xMinYMin`.
    XMinYMin,
    /// `xMidYMin`.
    XMidYMin,
    /// `xMaxYMin`.
    XMaxYMin,
    /// `xMinYMid`.
    XMinYMid,
    /// `xMidYMid`, the SVG default.
    #[default]
    XMidYMid,
    /// `xMaxYMid`.
    XMaxYMid,
    /// `xMinYMax`.
    XMinYMax,
    /// `xMidYMax`.
    XMidYMax,
    /// `xMaxYMax`.
    XMaxYMax,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisAlign {
    Min,
    Mid,
    Max,
}

impl AxisAlign {
    /// Splits the extra extent along one axis into leading/trailing offsets.
    fn split(self, extra: f64) -> (f64, f64) {
        match self {
            Self::Min => (0.0, extra),
            Self::Mid => (-extra / 2.0, extra / 2.0),
            Self::Max => (-extra, 0.0),
        }
    }
}

impl Align {
    fn axes(self) -> Option<(AxisAlign, AxisAlign)> {
        use AxisAlign::{Max, Mid, Min};
        match self {
            Self::None => None,
            Self::XMinYMin => Some((Min, Min)),
            Self::XMidYMin => Some((Mid, Min)),
            Self::XMaxYMin => Some((Max, Min)),
            Self::XMinYMid => Some((Min, Mid)),
            Self::XMidYMid => Some((Mid, Mid)),
            Self::XMaxYMid => Some((Max, Mid)),
            Self::XMinYMax => Some((Min, Max)),
            Self::XMidYMax => Some((Mid, Max)),
            Self::XMaxYMax => Some((Max, Max)),
        }
    }
}

/// Whether the viewbox is fitted inside the surface or covers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MeetOrSlice {
    /// The whole viewbox is visible; the surface may show extra content.
    #[default]
    Meet,
    /// The viewbox covers the surface; part of it may be cropped.
    Slice,
}

/// A surface's `preserveAspectRatio` policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PreserveAspectRatio {
    /// Alignment of the viewbox inside the surface.
    pub align: Align,
    /// Fit strategy used when aspect ratios differ.
    pub meet_or_slice: MeetOrSlice,
}

/// Distances, in viewbox units, from each side of a viewbox to the matching
/// side of the region actually visible on the surface.
///
/// The visible region spans `x0 + left ..= x1 + right` and
/// `y0 + top ..= y1 + bottom`. Letterboxing (`meet`) yields a negative
/// leading and positive trailing offset; cropping (`slice`) the opposite.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ViewportOffsets {
    /// Offset of the visible left edge from the viewbox's left edge.
    pub left: f64,
    /// Offset of the visible right edge from the viewbox's right edge.
    pub right: f64,
    /// Offset of the visible top edge from the viewbox's top edge.
    pub top: f64,
    /// Offset of the visible bottom edge from the viewbox's bottom edge.
    pub bottom: f64,
}

/// The surface-side inputs needed to tell a viewbox apart from what is shown.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ViewportFit {
    /// The aspect-ratio policy of the surface.
    pub preserve: PreserveAspectRatio,
    /// The surface's size in client pixels.
    pub client_size: Size,
}

impl ViewportFit {
    /// Creates a fit description from a policy and a client size.
    #[must_use]
    pub fn new(preserve: PreserveAspectRatio, client_size: Size) -> Self {
        Self {
            preserve,
            client_size,
        }
    }

    /// Computes how far the visible region extends past (or falls short of)
    /// `viewbox` on each side.
    ///
    /// Returns all-zero offsets when alignment is [`Align::None`], when either
    /// size is empty, or when the aspect ratios already agree.
    #[must_use]
    pub fn offsets(&self, viewbox: Rect) -> ViewportOffsets {
        let Some((x_align, y_align)) = self.preserve.align.axes() else {
            return ViewportOffsets::default();
        };
        let client = self.client_size;
        if client.width <= 0.0 || client.height <= 0.0 {
            return ViewportOffsets::default();
        }
        if viewbox.width() <= 0.0 || viewbox.height() <= 0.0 {
            return ViewportOffsets::default();
        }

        let surface_ratio = client.width / client.height;
        let viewbox_ratio = viewbox.width() / viewbox.height();
        if surface_ratio == viewbox_ratio {
            return ViewportOffsets::default();
        }

        let meet = self.preserve.meet_or_slice == MeetOrSlice::Meet;
        let horizontal = (meet && surface_ratio > viewbox_ratio)
            || (!meet && surface_ratio < viewbox_ratio);

        let mut offsets = ViewportOffsets::default();
        if horizontal {
            let extra = viewbox.height() * surface_ratio - viewbox.width();
            (offsets.left, offsets.right) = x_align.split(extra);
        } else {
            let extra = viewbox.width() / surface_ratio - viewbox.height();
            (offsets.top, offsets.bottom) = y_align.split(extra);
        }
        offsets
    }
}
