// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render scheduler: immediate, frame-coalesced, or animated commits.

use std::time::Duration;

use kurbo::{Affine, Rect};
use tracing::{trace, warn};
use understory_viewbox::{Authority, SvgMatrix};

use crate::surface::{FrameHandle, Surface, TransitionHandle};

/// Below this a timed transition is indistinguishable from a direct commit.
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A value ready to be written to one of the two channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Commit {
    Viewbox(Rect),
    Transform(Affine),
}

impl Commit {
    fn channel(&self) -> Authority {
        match self {
            Self::Viewbox(_) => Authority::Viewbox,
            Self::Transform(_) => Authority::Proxy,
        }
    }

    fn apply<S: Surface>(self, surface: &mut S) {
        match self {
            Self::Viewbox(rect) => {
                trace!(viewbox = ?rect, "commit viewbox");
                surface.set_viewbox(rect);
            }
            Self::Transform(transform) => {
                trace!(transform = %SvgMatrix(transform), "commit proxy transform");
                surface.set_proxy_transform(Some(transform));
            }
        }
    }

    fn animate<S: Surface>(self, surface: &mut S, duration: Duration) -> Option<TransitionHandle> {
        trace!(commit = ?self, ?duration, "animate commit");
        match self {
            Self::Viewbox(rect) => surface.animate_viewbox(rect, duration),
            Self::Transform(transform) => surface.animate_proxy_transform(transform, duration),
        }
    }
}

/// Holds at most one pending frame commit and one transition per channel.
#[derive(Debug)]
pub(crate) struct RenderScheduler {
    coalesce: bool,
    pending: Option<(FrameHandle, Commit)>,
    viewbox_transition: Option<TransitionHandle>,
    proxy_transition: Option<TransitionHandle>,
}

impl RenderScheduler {
    pub(crate) fn new(coalesce: bool) -> Self {
        Self {
            coalesce,
            pending: None,
            viewbox_transition: None,
            proxy_transition: None,
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies `commit` now, or on the next frame when coalescing.
    ///
    /// A newer coalesced commit replaces the pending one.
    pub(crate) fn submit<S: Surface>(&mut self, surface: &mut S, commit: Commit) {
        if !self.coalesce {
            commit.apply(surface);
            return;
        }
        self.cancel_pending(surface);
        let frame = surface.request_frame();
        trace!(?frame, ?commit, "schedule commit");
        self.pending = Some((frame, commit));
    }

    /// Applies `commit` synchronously, dropping any pending frame commit.
    pub(crate) fn apply_now<S: Surface>(&mut self, surface: &mut S, commit: Commit) {
        self.cancel_pending(surface);
        commit.apply(surface);
    }

    /// Runs `commit` as a transition, finishing the one on the same channel.
    pub(crate) fn animate<S: Surface>(&mut self, surface: &mut S, commit: Commit, duration: Duration) {
        self.cancel_pending(surface);
        if let Some(previous) = self.slot(commit.channel()).take() {
            surface.finish_transition(previous);
        }
        let handle = commit.animate(surface, duration);
        *self.slot(commit.channel()) = handle;
    }

    /// Applies the pending commit if `frame` is the one it waits for.
    pub(crate) fn fire<S: Surface>(&mut self, surface: &mut S, frame: FrameHandle) -> bool {
        match self.pending {
            Some((pending, commit)) if pending == frame => {
                self.pending = None;
                commit.apply(surface);
                true
            }
            _ => {
                warn!(?frame, "ignoring frame with no pending commit");
                false
            }
        }
    }

    /// Applies the pending commit now instead of on its frame.
    pub(crate) fn flush<S: Surface>(&mut self, surface: &mut S) {
        if let Some((frame, commit)) = self.pending.take() {
            surface.cancel_frame(frame);
            commit.apply(surface);
        }
    }

    pub(crate) fn cancel_pending<S: Surface>(&mut self, surface: &mut S) {
        if let Some((frame, _)) = self.pending.take() {
            surface.cancel_frame(frame);
        }
    }

    pub(crate) fn transition_ended(&mut self, handle: TransitionHandle) {
        for slot in [&mut self.viewbox_transition, &mut self.proxy_transition] {
            if *slot == Some(handle) {
                *slot = None;
            }
        }
    }

    pub(crate) fn finish_transitions<S: Surface>(&mut self, surface: &mut S) {
        for handle in [self.viewbox_transition.take(), self.proxy_transition.take()]
            .into_iter()
            .flatten()
        {
            surface.finish_transition(handle);
        }
    }

    fn slot(&mut self, channel: Authority) -> &mut Option<TransitionHandle> {
        match channel {
            Authority::Viewbox => &mut self.viewbox_transition,
            Authority::Proxy => &mut self.proxy_transition,
        }
    }
}
