// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin constraint: keep part of the original content on screen.
//!
//! A margin names how much of the original viewbox must stay visible at the
//! opposite edge of the surface. For example a `left` margin of 10 lets the
//! view be panned until only the rightmost 10 units of the original content
//! remain, pinned to the left edge of the surface.
//!
//! The limits are computed against the region that is actually *visible*,
//! not the logical viewbox, so letterboxing from the surface's
//! `preserveAspectRatio` policy is accounted for.

use kurbo::{Point, Rect};

use crate::aspect::ViewportFit;

/// Per-side margins, in viewbox units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Margins {
    /// Minimum visible extent below the top edge.
    pub top: f64,
    /// Minimum visible extent past the left edge.
    pub left: f64,
    /// Minimum visible extent above the bottom edge.
    pub bottom: f64,
    /// Minimum visible extent before the right edge.
    pub right: f64,
}

impl Margins {
    /// Creates margins in CSS order: top, right, bottom, left.
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same margin on every side.
    #[must_use]
    pub fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

/// Clamps the origin of `rect` so the configured margins of `original` stay
/// visible.
///
/// Returns `rect` unchanged when `margins` is `None`. The size of `rect` is
/// never changed. Each axis is clamped independently into
/// `[low_limit, high_limit]`; when margins exceed the original extent the
/// low limit passes the high limit and the origin collapses onto the high
/// limit rather than producing inverted bounds.
///
/// The result is idempotent: the limits depend only on the size of `rect`,
/// never on its position.
#[must_use]
pub fn constrain_to_margins(
    rect: Rect,
    original: Rect,
    margins: Option<Margins>,
    fit: ViewportFit,
) -> Rect {
    let Some(margins) = margins else {
        return rect;
    };
    let offsets = fit.offsets(rect);

    // At `left_limit` the visible region's left edge sits `margins.left`
    // units before the original's right edge.
    let left_limit = original.x1 - margins.left - offsets.left;
    // At `right_limit` the visible region's right edge sits `margins.right`
    // units after the original's left edge.
    let right_limit = original.x0 + margins.right - rect.width() - offsets.right;
    let top_limit = original.y1 - margins.top - offsets.top;
    let bottom_limit = original.y0 + margins.bottom - rect.height() - offsets.bottom;

    let x = rect.x0.max(right_limit).min(left_limit);
    let y = rect.y0.max(bottom_limit).min(top_limit);
    Rect::from_origin_size(Point::new(x, y), rect.size())
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{Margins, constrain_to_margins};
    use crate::aspect::{Align, MeetOrSlice, PreserveAspectRatio, ViewportFit};

    const ORIGINAL: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn square_fit() -> ViewportFit {
        ViewportFit::new(PreserveAspectRatio::default(), Size::new(100.0, 100.0))
    }

    #[test]
    fn no_margins_is_identity() {
        let r = Rect::new(-500.0, 900.0, -400.0, 1000.0);
        assert_eq!(constrain_to_margins(r, ORIGINAL, None, square_fit()), r);
    }

    #[test]
    fn rect_inside_limits_is_unchanged() {
        let r = Rect::new(20.0, -30.0, 120.0, 70.0);
        let m = Some(Margins::uniform(10.0));
        assert_eq!(constrain_to_margins(r, ORIGINAL, m, square_fit()), r);
    }

    #[test]
    fn panning_far_right_stops_at_left_limit() {
        let r = Rect::new(500.0, 0.0, 600.0, 100.0);
        let out = constrain_to_margins(r, ORIGINAL, Some(Margins::uniform(10.0)), square_fit());
        assert_eq!(out, Rect::new(90.0, 0.0, 190.0, 100.0));
    }

    #[test]
    fn panning_far_up_left_stops_at_low_limits() {
        let r = Rect::new(-500.0, -700.0, -400.0, -600.0);
        let out = constrain_to_margins(r, ORIGINAL, Some(Margins::uniform(10.0)), square_fit());
        assert_eq!(out, Rect::new(-90.0, -90.0, 10.0, 10.0));
    }

    #[test]
    fn size_is_preserved() {
        let r = Rect::new(1000.0, 1000.0, 1040.0, 1030.0);
        let out = constrain_to_margins(r, ORIGINAL, Some(Margins::uniform(5.0)), square_fit());
        assert_eq!(out.size(), r.size());
    }

    #[test]
    fn clamp_is_idempotent() {
        let m = Some(Margins::new(3.0, 7.0, 11.0, 13.0));
        let f = ViewportFit::new(
            PreserveAspectRatio {
                align: Align::XMaxYMin,
                meet_or_slice: MeetOrSlice::Slice,
            },
            Size::new(300.0, 120.0),
        );
        for r in [
            Rect::new(-400.0, 20.0, -350.0, 60.0),
            Rect::new(250.0, 250.0, 330.0, 290.0),
            Rect::new(10.0, 10.0, 20.0, 20.0),
        ] {
            let once = constrain_to_margins(r, ORIGINAL, m, f);
            let twice = constrain_to_margins(once, ORIGINAL, m, f);
            assert_eq!(once, twice, "clamp must be idempotent for {r:?}");
        }
    }

    #[test]
    fn oversized_margins_collapse_to_a_point() {
        let m = Some(Margins::uniform(500.0));
        let a = constrain_to_margins(Rect::new(-50.0, 0.0, 50.0, 100.0), ORIGINAL, m, square_fit());
        let b = constrain_to_margins(Rect::new(80.0, 0.0, 180.0, 100.0), ORIGINAL, m, square_fit());
        assert_eq!(a.x0, b.x0, "inverted limits pin every rect to one origin");
        assert_eq!(a.x0, 100.0 - 500.0);
    }

    #[test]
    fn letterboxing_widens_the_allowed_range() {
        // A 2:1 surface shows 50 extra units on each side of a square viewbox.
        let f = ViewportFit::new(PreserveAspectRatio::default(), Size::new(200.0, 100.0));
        let r = Rect::new(500.0, 0.0, 600.0, 100.0);
        let out = constrain_to_margins(r, ORIGINAL, Some(Margins::uniform(10.0)), f);
        assert_eq!(out.x0, 140.0);
    }
}
