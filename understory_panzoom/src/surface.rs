// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host side of a pan/zoom controller.
//!
//! A [`Surface`] is whatever renders the vector scene: an SVG element in a
//! browser, a retained scene graph, or a recording mock in tests. The
//! controller never touches host APIs directly; it reads geometry through the
//! trait, writes commits back through it, and announces gestures as
//! [`Notification`]s.
//!
//! Frames and transitions are asynchronous on the host. They are requested
//! here and reported back through
//! [`PanZoom::on_frame`](crate::PanZoom::on_frame) and
//! [`PanZoom::on_transition_end`](crate::PanZoom::on_transition_end), so every
//! state change still runs on the host's event loop.

use std::time::Duration;

use bitflags::bitflags;
use kurbo::{Affine, Point, Rect, Size};
use understory_viewbox::{PreserveAspectRatio, View};

use crate::config::ProxySelection;
use crate::input::{TouchInput, WheelInput};

bitflags! {
    /// Groups of host event listeners the controller asks for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Wheel events on the surface.
        const WHEEL = 1 << 0;
        /// Pointer presses on the surface.
        const POINTER_DOWN = 1 << 1;
        /// Touch starts on the surface.
        const TOUCH_START = 1 << 2;
        /// Pointer and touch moves anywhere in the document, while panning.
        const PAN_MOVE = 1 << 3;
        /// Pointer releases and touch ends anywhere, while panning.
        const PAN_END = 1 << 4;
        /// Touch moves anywhere, while pinching.
        const PINCH_MOVE = 1 << 5;
        /// Touch ends anywhere, while pinching.
        const PINCH_END = 1 << 6;
    }
}

/// Host-assigned id of a requested display frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-assigned id of a running transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionHandle(pub u64);

/// Whether a listener asked to cancel a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Carry on.
    #[default]
    Continue,
    /// Cancel the action. Ignored for notifications that are not cancelable.
    PreventDefault,
}

/// What started a zoom request.
#[derive(Clone, Copy, Debug)]
pub enum ZoomTrigger<'a> {
    /// A wheel event.
    Wheel(&'a WheelInput),
    /// A pinch move.
    Pinch(&'a TouchInput),
}

/// Payload of [`Notification::Zoom`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomRequest<'a> {
    /// The input behind the request.
    pub trigger: ZoomTrigger<'a>,
    /// Zoom level the request would produce.
    pub level: f64,
    /// Surface-space focus of the zoom.
    pub focus: Point,
    /// The authoritative view before the request.
    pub view: View,
}

/// Gesture notifications emitted to the host.
#[derive(Clone, Copy, Debug)]
pub enum Notification<'a> {
    /// A wheel or pinch zoom is about to be applied. Cancelable.
    Zoom(ZoomRequest<'a>),
    /// A two-finger pinch is starting. Cancelable.
    PinchStart(&'a TouchInput),
    /// The pinch ended.
    PinchEnd(&'a TouchInput),
    /// The first real movement of a pan; `position` is in client space.
    PanStart {
        /// Pointer position that started the pan.
        position: Point,
    },
    /// A pan step is about to be applied. Cancelable.
    Panning {
        /// Current surface-space pointer position.
        current: Point,
        /// Previous surface-space pointer position.
        last: Point,
    },
    /// A started pan ended.
    PanEnd,
}

impl Notification<'_> {
    /// Whether returning [`Outcome::PreventDefault`] cancels the action.
    pub fn is_cancelable(&self) -> bool {
        matches!(
            self,
            Self::Zoom(_) | Self::PinchStart(_) | Self::Panning { .. }
        )
    }

    /// Event name as the host would dispatch it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zoom(_) => "zoom",
            Self::PinchStart(_) => "pinchZoomStart",
            Self::PinchEnd(_) => "pinchZoomEnd",
            Self::PanStart { .. } => "panStart",
            Self::Panning { .. } => "panning",
            Self::PanEnd => "panEnd",
        }
    }
}

/// A vector surface the controller pans and zooms.
///
/// The proxy and animation methods have defaults for hosts without a proxy
/// node or without transitions: no proxy is attached, and animated commits
/// are applied at once.
pub trait Surface {
    /// An element that [`PanTarget::Element`](crate::PanTarget::Element) can
    /// refer to.
    type Element: ?Sized;

    /// The current viewbox, or `None` if the surface has none.
    fn viewbox(&self) -> Option<Rect>;

    /// Replaces the viewbox.
    fn set_viewbox(&mut self, viewbox: Rect);

    /// Moves the viewbox to `viewbox` over `duration`.
    ///
    /// Returns `None` if the change was applied at once.
    fn animate_viewbox(&mut self, viewbox: Rect, duration: Duration) -> Option<TransitionHandle> {
        let _ = duration;
        self.set_viewbox(viewbox);
        None
    }

    /// Bounding box of all content, in surface space.
    fn content_bbox(&self) -> Rect;

    /// Bounding box of `element`, in surface space.
    fn element_bbox(&self, element: &Self::Element) -> Option<Rect>;

    /// Size of the surface in client pixels.
    fn client_size(&self) -> Size;

    /// The surface's aspect-ratio policy.
    fn preserve_aspect_ratio(&self) -> PreserveAspectRatio;

    /// Maps a client-space point into surface space.
    fn client_to_surface(&self, point: Point) -> Point;

    /// Finds or creates the proxy node. Returns `false` if there is none.
    fn attach_proxy(&mut self, selection: &ProxySelection) -> bool {
        let _ = selection;
        false
    }

    /// Bounding box of the proxy node.
    fn proxy_bbox(&self) -> Option<Rect> {
        None
    }

    /// The proxy node's transform, if it has one.
    fn proxy_transform(&self) -> Option<Affine> {
        None
    }

    /// Sets or, with `None`, clears the proxy node's transform.
    fn set_proxy_transform(&mut self, transform: Option<Affine>) {
        let _ = transform;
    }

    /// Moves the proxy transform to `transform` over `duration`.
    ///
    /// Returns `None` if the change was applied at once.
    fn animate_proxy_transform(
        &mut self,
        transform: Affine,
        duration: Duration,
    ) -> Option<TransitionHandle> {
        let _ = duration;
        self.set_proxy_transform(Some(transform));
        None
    }

    /// Jumps a running transition to its end state.
    fn finish_transition(&mut self, transition: TransitionHandle) {
        let _ = transition;
    }

    /// Starts delivering `listeners`. Passive listeners cannot prevent the
    /// host default.
    fn listen(&mut self, listeners: Listeners, passive: bool);

    /// Stops delivering `listeners`.
    fn unlisten(&mut self, listeners: Listeners);

    /// Delivers a notification to application listeners.
    fn dispatch(&mut self, notification: &Notification<'_>) -> Outcome;

    /// Requests a callback on the next display frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a requested frame that has not fired.
    fn cancel_frame(&mut self, frame: FrameHandle);
}
