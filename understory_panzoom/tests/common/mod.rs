// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording surface shared by the integration tests.

#![allow(
    missing_docs,
    unreachable_pub,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::time::Duration;

use kurbo::{Affine, Point, Rect, Size};
use understory_panzoom::{
    Config, FrameHandle, Listeners, Notification, Outcome, PanZoom, ProxySelection, Surface,
    TransitionHandle,
};
use understory_viewbox::{PreserveAspectRatio, View};

pub const BASELINE: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// Side effects the controller had on the surface, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SetViewbox(Rect),
    AnimateViewbox(Rect, Duration, TransitionHandle),
    SetProxy(Option<Affine>),
    AnimateProxy(Affine, Duration, TransitionHandle),
    FinishTransition(TransitionHandle),
    Listen(Listeners, bool),
    Unlisten(Listeners),
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
}

/// A notification as seen by the application.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub name: &'static str,
    pub level: Option<f64>,
    pub focus: Option<Point>,
    pub view: Option<View>,
}

#[derive(Debug)]
pub struct MockSurface {
    pub viewbox: Option<Rect>,
    pub content: Rect,
    pub client: Size,
    pub preserve: PreserveAspectRatio,
    pub to_surface: Affine,
    pub has_proxy_node: bool,
    pub proxy_transform: Option<Affine>,
    pub elements: Vec<(String, Rect)>,
    pub prevent: Vec<&'static str>,
    pub calls: Vec<Call>,
    pub events: Vec<Event>,
    next_handle: u64,
}

impl MockSurface {
    pub fn new(viewbox: Rect) -> Self {
        Self {
            viewbox: Some(viewbox),
            content: viewbox,
            client: viewbox.size(),
            preserve: PreserveAspectRatio::default(),
            to_surface: Affine::IDENTITY,
            has_proxy_node: false,
            proxy_transform: None,
            elements: Vec::new(),
            prevent: Vec::new(),
            calls: Vec::new(),
            events: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn with_proxy_node(mut self) -> Self {
        self.has_proxy_node = true;
        self
    }

    pub fn with_element(mut self, name: &str, bbox: Rect) -> Self {
        self.elements.push((name.to_owned(), bbox));
        self
    }

    pub fn preventing(mut self, name: &'static str) -> Self {
        self.prevent.push(name);
        self
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.name).collect()
    }

    pub fn viewbox_commits(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetViewbox(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn proxy_commits(&self) -> Vec<Option<Affine>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetProxy(transform) => Some(*transform),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<FrameHandle> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::RequestFrame(frame) => Some(*frame),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.events.clear();
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Surface for MockSurface {
    type Element = str;

    fn viewbox(&self) -> Option<Rect> {
        self.viewbox
    }

    fn set_viewbox(&mut self, viewbox: Rect) {
        self.viewbox = Some(viewbox);
        self.calls.push(Call::SetViewbox(viewbox));
    }

    fn animate_viewbox(&mut self, viewbox: Rect, duration: Duration) -> Option<TransitionHandle> {
        let handle = TransitionHandle(self.next_handle());
        self.viewbox = Some(viewbox);
        self.calls.push(Call::AnimateViewbox(viewbox, duration, handle));
        Some(handle)
    }

    fn content_bbox(&self) -> Rect {
        self.content
    }

    fn element_bbox(&self, element: &str) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, bbox)| *bbox)
    }

    fn client_size(&self) -> Size {
        self.client
    }

    fn preserve_aspect_ratio(&self) -> PreserveAspectRatio {
        self.preserve
    }

    fn client_to_surface(&self, point: Point) -> Point {
        self.to_surface * point
    }

    fn attach_proxy(&mut self, selection: &ProxySelection) -> bool {
        self.has_proxy_node && selection.is_some()
    }

    fn proxy_bbox(&self) -> Option<Rect> {
        self.has_proxy_node.then_some(self.content)
    }

    fn proxy_transform(&self) -> Option<Affine> {
        self.proxy_transform
    }

    fn set_proxy_transform(&mut self, transform: Option<Affine>) {
        self.proxy_transform = transform;
        self.calls.push(Call::SetProxy(transform));
    }

    fn animate_proxy_transform(
        &mut self,
        transform: Affine,
        duration: Duration,
    ) -> Option<TransitionHandle> {
        let handle = TransitionHandle(self.next_handle());
        self.proxy_transform = Some(transform);
        self.calls.push(Call::AnimateProxy(transform, duration, handle));
        Some(handle)
    }

    fn finish_transition(&mut self, transition: TransitionHandle) {
        self.calls.push(Call::FinishTransition(transition));
    }

    fn listen(&mut self, listeners: Listeners, passive: bool) {
        self.calls.push(Call::Listen(listeners, passive));
    }

    fn unlisten(&mut self, listeners: Listeners) {
        self.calls.push(Call::Unlisten(listeners));
    }

    fn dispatch(&mut self, notification: &Notification<'_>) -> Outcome {
        let name = notification.name();
        let (level, focus, view) = match notification {
            Notification::Zoom(request) => {
                (Some(request.level), Some(request.focus), Some(request.view))
            }
            Notification::Panning { current, .. } => (None, Some(*current), None),
            _ => (None, None, None),
        };
        self.events.push(Event {
            name,
            level,
            focus,
            view,
        });
        if self.prevent.contains(&name) {
            Outcome::PreventDefault
        } else {
            Outcome::Continue
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let frame = FrameHandle(self.next_handle());
        self.calls.push(Call::RequestFrame(frame));
        frame
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        self.calls.push(Call::CancelFrame(frame));
    }
}

/// Immediate commits; the coalescing tests opt back in.
pub fn immediate() -> Config {
    Config::default().with_performance(false)
}

/// A controller over an 800x600 baseline with the construction calls cleared.
pub fn controller(surface: MockSurface, config: Config) -> PanZoom<MockSurface> {
    let mut panzoom = PanZoom::new(surface, config).unwrap();
    panzoom.surface_mut().clear();
    panzoom
}

pub fn assert_rect_near(actual: Rect, expected: Rect) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(
        close(actual.x0, expected.x0)
            && close(actual.y0, expected.y0)
            && close(actual.x1, expected.x1)
            && close(actual.y1, expected.y1),
        "expected {expected:?}, got {actual:?}"
    );
}
