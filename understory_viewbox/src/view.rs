// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};

/// Which channel currently carries the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    /// The surface's viewbox rectangle.
    Viewbox,
    /// The transform of a proxy grouping node.
    Proxy,
}

/// The authoritative view of a pan/zoom surface.
///
/// Exactly one representation is live at a time:
/// - [`View::Viewbox`]: the surface's coordinate-mapping rectangle.
/// - [`View::Proxy`]: a matrix applied to a proxy node, on top of a fixed
///   `base` viewbox. The visible region is `transform⁻¹(base)`.
///
/// Moving between the two goes through [`View::with_proxy`] and
/// [`View::settle`]; the latter re-expresses the proxy matrix as the
/// equivalent viewbox so the representations never drift apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum View {
    /// The viewbox is authoritative.
    Viewbox(Rect),
    /// The proxy matrix is authoritative.
    Proxy {
        /// Viewbox the surface keeps while the proxy carries the view.
        base: Rect,
        /// Matrix applied to the proxy node.
        transform: Affine,
    },
}

impl View {
    /// Returns which channel carries this view.
    #[must_use]
    pub fn authority(&self) -> Authority {
        match self {
            Self::Viewbox(_) => Authority::Viewbox,
            Self::Proxy { .. } => Authority::Proxy,
        }
    }

    /// Returns the viewbox, if that is the live channel.
    #[must_use]
    pub fn viewbox(&self) -> Option<Rect> {
        match *self {
            Self::Viewbox(rect) => Some(rect),
            Self::Proxy { .. } => None,
        }
    }

    /// Returns the proxy matrix, if that is the live channel.
    #[must_use]
    pub fn transform(&self) -> Option<Affine> {
        match *self {
            Self::Viewbox(_) => None,
            Self::Proxy { transform, .. } => Some(transform),
        }
    }

    /// The viewbox that would show the same region as this view.
    #[must_use]
    pub fn effective_rect(&self) -> Rect {
        match *self {
            Self::Viewbox(rect) => rect,
            Self::Proxy { base, transform } => transform.inverse().transform_rect_bbox(base),
        }
    }

    /// Hands the view to a proxy node starting from `transform`.
    ///
    /// A viewbox view becomes the proxy's base. A proxy view keeps its base
    /// and has its matrix replaced.
    #[must_use]
    pub fn with_proxy(self, transform: Affine) -> Self {
        match self {
            Self::Viewbox(base) | Self::Proxy { base, .. } => Self::Proxy { base, transform },
        }
    }

    /// Folds a proxy matrix back into an equivalent viewbox.
    ///
    /// A viewbox view is returned unchanged.
    #[must_use]
    pub fn settle(self) -> Self {
        Self::Viewbox(self.effective_rect())
    }

    /// Moves the content by `delta` surface units.
    ///
    /// Positive deltas move the content right/down, which shifts the visible
    /// window left/up.
    pub fn pan(&mut self, delta: Vec2) {
        match self {
            Self::Viewbox(rect) => *rect = *rect - delta,
            Self::Proxy { transform, .. } => *transform = transform.then_translate(delta),
        }
    }

    /// Magnifies the content by `ratio` keeping `focus` in place.
    pub fn zoom_about(&mut self, ratio: f64, focus: Point) {
        match self {
            Self::Viewbox(rect) => {
                *rect = Affine::scale_about(1.0 / ratio, focus).transform_rect_bbox(*rect);
            }
            Self::Proxy { transform, .. } => {
                *transform = transform.then_scale_about(ratio, focus);
            }
        }
    }

    /// Applies a pinch step expressed as a viewbox-space transform.
    ///
    /// The viewbox is mapped forward through `step`; the proxy matrix is
    /// composed with its inverse so both channels show the same region.
    pub fn apply_pinch(&mut self, step: Affine) {
        match self {
            Self::Viewbox(rect) => *rect = step.transform_rect_bbox(*rect),
            Self::Proxy { transform, .. } => *transform = step.inverse() * *transform,
        }
    }

    /// Computes the view that centers `target` and magnifies by `zoom_delta`.
    ///
    /// For a proxy view the matrix is translated so `target` lands on the
    /// base center and then scaled about that center. A viewbox keeps its
    /// aspect ratio and is shrunk by `zoom_delta` around `target`.
    ///
    /// Returns `None` for an empty viewbox, a non-positive zoom delta or a
    /// result that is not finite.
    #[must_use]
    pub fn centered_on(&self, target: Point, zoom_delta: f64) -> Option<Self> {
        if !zoom_delta.is_finite() || zoom_delta <= 0.0 {
            return None;
        }
        let next = match *self {
            Self::Proxy { base, transform } => {
                let center = base.center();
                let moved = recenter(transform, target, center, zoom_delta);
                Self::Proxy {
                    base,
                    transform: moved,
                }
            }
            Self::Viewbox(rect) => {
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return None;
                }
                Self::Viewbox(Rect::from_center_size(target, rect.size() / zoom_delta))
            }
        };
        next.is_finite().then_some(next)
    }

    /// Returns `true` if every coordinate of the view is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Viewbox(rect) => rect.is_finite(),
            Self::Proxy { base, transform } => base.is_finite() && transform.is_finite(),
        }
    }
}

fn recenter(transform: Affine, target: Point, center: Point, zoom_delta: f64) -> Affine {
    let real = transform * target;
    transform
        .then_translate(center - real)
        .then_scale_about(zoom_delta, center)
}

/// The uniform scale+translate taking `rect` onto `baseline`.
///
/// Viewboxes produced by zooming keep the baseline aspect ratio, so the
/// horizontal scale is used for both axes.
#[must_use]
pub fn view_to_baseline(rect: Rect, baseline: Rect) -> Affine {
    let scale = baseline.width() / rect.width();
    Affine::translate(-rect.origin().to_vec2())
        .then_scale(scale)
        .then_translate(baseline.origin().to_vec2())
}

/// The zoom level of `rect` relative to `baseline`.
///
/// A level of 2 shows content twice as large as the baseline did.
#[must_use]
pub fn zoom_level(rect: Rect, baseline: Rect) -> f64 {
    (baseline.width() / rect.width()).min(baseline.height() / rect.height())
}

/// Formats an [`Affine`] as an SVG `matrix(a,b,c,d,e,f)` transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgMatrix(pub Affine);

impl fmt::Display for SvgMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0.as_coeffs();
        write!(f, "matrix({a},{b},{c},{d},{e},{g})")
    }
}
