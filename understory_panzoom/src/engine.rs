// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pan/zoom controller and its direct API.

use std::time::Duration;

use kurbo::{Affine, Point, Rect, Vec2};
use tracing::{debug, error, warn};
use understory_gesture_state::pan::PanState;
use understory_gesture_state::pinch::PinchState;
use understory_viewbox::{
    Authority, View, ViewportFit, constrain_to_margins, view_to_baseline, zoom_level,
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scheduler::{Commit, FRAME_INTERVAL, RenderScheduler};
use crate::surface::{FrameHandle, Listeners, Surface, TransitionHandle};

/// Ratios closer to 1 than this are dropped as wheel jitter.
pub const ZOOM_EPSILON: f64 = 0.008;

/// What [`PanZoom::pan_to`] centers on.
#[derive(Debug)]
pub enum PanTarget<'a, E: ?Sized> {
    /// A surface-space point.
    Point(Point),
    /// The center of an element's bounding box.
    Element(&'a E),
    /// The center of the baseline viewbox.
    FitCenter,
}

/// Zoom level for [`PanZoom::pan_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanToZoom {
    /// Keep the current level.
    Current,
    /// Go to this level, clamped to the configured bounds.
    Level(f64),
    /// Size an element so its longer side spans a tenth of the baseline.
    /// Other targets keep the current level.
    Auto,
}

/// State captured at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    /// The viewbox the surface started with.
    pub viewbox: Rect,
    /// The proxy node's starting transform.
    pub proxy_transform: Affine,
    /// The proxy node's starting bounding box.
    pub proxy_bbox: Option<Rect>,
}

#[derive(Debug)]
pub(crate) struct LiveState {
    pub(crate) zoom_level: f64,
    pub(crate) view: View,
    pub(crate) is_zooming: bool,
    pub(crate) pan: PanState,
    pub(crate) pinch: PinchState,
    pub(crate) listeners: Listeners,
    pub(crate) gate_generation: u64,
}

/// Builder for [`PanZoom`].
#[derive(Debug)]
pub struct PanZoomBuilder<S> {
    surface: Option<S>,
    config: Config,
}

impl<S> Default for PanZoomBuilder<S> {
    fn default() -> Self {
        Self {
            surface: None,
            config: Config::default(),
        }
    }
}

impl<S: Surface> PanZoomBuilder<S> {
    /// Creates a builder with the default configuration and no surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the surface to control.
    #[must_use]
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Captures the baseline, attaches the proxy and registers listeners.
    pub fn build(self) -> Result<PanZoom<S>> {
        let Self { surface, config } = self;
        let mut surface = surface.ok_or(Error::MissingSurface)?;
        config.validate()?;

        let viewbox = surface
            .viewbox()
            .unwrap_or_else(|| surface.content_bbox());
        if !viewbox.is_finite() || viewbox.width() <= 0.0 || viewbox.height() <= 0.0 {
            return Err(Error::DegenerateBaseline(viewbox));
        }

        let has_proxy = config.proxy.is_some() && surface.attach_proxy(&config.proxy);
        if config.proxy.is_some() && !has_proxy {
            warn!(proxy = ?config.proxy, "no proxy node found; panning the viewbox");
        }
        let baseline = Baseline {
            viewbox,
            proxy_transform: surface.proxy_transform().unwrap_or(Affine::IDENTITY),
            proxy_bbox: surface.proxy_bbox(),
        };
        let proxy_only = has_proxy && config.proxy_only;
        let view = if proxy_only {
            View::Viewbox(viewbox).with_proxy(baseline.proxy_transform)
        } else {
            View::Viewbox(viewbox)
        };

        let mut engine = PanZoom {
            surface,
            scheduler: RenderScheduler::new(config.performance),
            config,
            baseline,
            has_proxy,
            proxy_only,
            state: LiveState {
                zoom_level: 1.0,
                view,
                is_zooming: false,
                pan: PanState::default(),
                pinch: PinchState::default(),
                listeners: Listeners::empty(),
                gate_generation: 0,
            },
        };

        let mut triggers = Listeners::empty();
        triggers.set(Listeners::WHEEL, engine.config.enable_wheel_zoom);
        triggers.set(Listeners::TOUCH_START, engine.config.enable_pinch_zoom);
        triggers.set(Listeners::POINTER_DOWN, engine.config.enable_panning);
        engine.listen(triggers, false);

        debug!(
            baseline = ?viewbox,
            has_proxy,
            proxy_only,
            "pan/zoom attached"
        );
        Ok(engine)
    }
}

/// Pan/zoom controller for one surface.
///
/// Owns the surface, the baseline captured at construction and the live
/// view. Host events are forwarded to the `on_*` handlers; the direct API
/// (`zoom`, `pan`, `pan_to`, `restore`) can be called at any time between
/// events.
#[derive(Debug)]
pub struct PanZoom<S: Surface> {
    pub(crate) surface: S,
    pub(crate) config: Config,
    pub(crate) baseline: Baseline,
    pub(crate) has_proxy: bool,
    /// Proxy-only mode with a proxy node actually attached.
    pub(crate) proxy_only: bool,
    pub(crate) state: LiveState,
    pub(crate) scheduler: RenderScheduler,
}

impl<S: Surface> PanZoom<S> {
    /// Starts building a controller.
    pub fn builder() -> PanZoomBuilder<S> {
        PanZoomBuilder::new()
    }

    /// Builds a controller for `surface` with `config`.
    pub fn new(surface: S, config: Config) -> Result<Self> {
        PanZoomBuilder::new().surface(surface).config(config).build()
    }

    /// The controlled surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the controlled surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State captured at construction.
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Whether a proxy node is attached.
    pub fn has_proxy(&self) -> bool {
        self.has_proxy
    }

    /// The authoritative view.
    pub fn view(&self) -> View {
        self.state.view
    }

    /// Zoom level relative to the baseline.
    pub fn zoom_level(&self) -> f64 {
        self.state.zoom_level
    }

    /// Client pixels per surface unit.
    pub fn scale(&self) -> f64 {
        match self.state.view {
            View::Proxy { transform, .. } if self.proxy_only => transform.as_coeffs()[0],
            view => {
                let client = self.surface.client_size();
                let rect = view.effective_rect();
                (client.width / rect.width()).min(client.height / rect.height())
            }
        }
    }

    /// Listener groups currently registered with the surface.
    pub fn listeners(&self) -> Listeners {
        self.state.listeners
    }

    /// Magnifies by `ratio` around `focus`, or the baseline center.
    ///
    /// The ratio is cut so the zoom level stays within bounds. Returns
    /// `false` without committing anything if the ratio is invalid or ends up
    /// within [`ZOOM_EPSILON`] of 1.
    pub fn zoom(&mut self, ratio: f64, focus: Option<Point>, animate: bool) -> bool {
        if !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        let level = self.state.zoom_level;
        let target = self.config.clamp_level(level * ratio);
        let ratio = target / level;
        if !ratio.is_finite() || (ratio - 1.0).abs() <= ZOOM_EPSILON {
            return false;
        }
        let focus = focus.unwrap_or_else(|| self.baseline.viewbox.center());
        self.state.view.zoom_about(ratio, focus);
        self.state.zoom_level = target;
        self.update(animate);
        true
    }

    /// Moves the content by `delta` surface units.
    pub fn pan(&mut self, delta: Vec2, animate: bool) {
        if !delta.is_finite() {
            return;
        }
        self.state.view.pan(delta);
        self.update(animate);
    }

    /// Centers `target`, optionally changing the zoom level.
    ///
    /// Durations longer than a frame run as a transition; shorter ones apply
    /// at once. A previous transition is finished first. Failures are logged
    /// and leave the view as it was; the return value says whether the view
    /// moved.
    pub fn pan_to(
        &mut self,
        target: PanTarget<'_, S::Element>,
        zoom: PanToZoom,
        duration: Duration,
    ) -> bool {
        self.scheduler.finish_transitions(&mut self.surface);
        match self.plan_pan_to(target, zoom) {
            Ok((view, level)) => {
                self.state.view = view;
                self.state.zoom_level = level;
                let commit = self.constrained_commit();
                if duration > FRAME_INTERVAL {
                    self.scheduler.animate(&mut self.surface, commit, duration);
                } else {
                    self.scheduler.apply_now(&mut self.surface, commit);
                }
                true
            }
            Err(err) => {
                error!(%err, "pan_to failed");
                false
            }
        }
    }

    /// Zooms to an absolute `level`, centering `focus` or the baseline center.
    pub fn zoom_to(&mut self, level: f64, focus: Option<Point>) -> bool {
        let target = focus.map_or(PanTarget::FitCenter, PanTarget::Point);
        self.pan_to(target, PanToZoom::Level(level), Duration::ZERO)
    }

    /// Returns to the baseline view at zoom level 1.
    pub fn restore(&mut self, animate: bool) {
        let baseline = self.baseline.viewbox;
        self.state.view = match self.state.view {
            View::Viewbox(_) => View::Viewbox(baseline),
            View::Proxy { base, .. } if self.proxy_only => View::Proxy {
                base,
                transform: self.baseline.proxy_transform,
            },
            // A gesture holds the proxy; show the baseline through it.
            View::Proxy { base, .. } => View::Proxy {
                base,
                transform: view_to_baseline(baseline, base),
            },
        };
        self.state.zoom_level = 1.0;
        self.update(animate);
    }

    /// Writes `viewbox` straight to the surface, within the margins.
    ///
    /// Ignored while a proxy node exists.
    pub fn update_by_viewbox(&mut self, viewbox: Rect) {
        if self.has_proxy || !viewbox.is_finite() {
            return;
        }
        let rect = self.constrain(viewbox);
        self.state.view = View::Viewbox(rect);
        self.state.zoom_level = zoom_level(rect, self.baseline.viewbox);
        self.scheduler.apply_now(&mut self.surface, Commit::Viewbox(rect));
    }

    /// Writes `transform` straight to the proxy node.
    ///
    /// Ignored unless the proxy matrix is authoritative.
    pub fn update_by_transform(&mut self, transform: Affine) {
        if !transform.is_finite() {
            return;
        }
        if let View::Proxy { base, .. } = self.state.view {
            self.state.view = View::Proxy { base, transform };
            self.scheduler
                .apply_now(&mut self.surface, Commit::Transform(transform));
        }
    }

    /// Host callback for a frame requested through [`Surface::request_frame`].
    pub fn on_frame(&mut self, frame: FrameHandle) {
        self.scheduler.fire(&mut self.surface, frame);
    }

    /// Host callback for a transition that ran to its end.
    pub fn on_transition_end(&mut self, transition: TransitionHandle) {
        self.scheduler.transition_ended(transition);
    }

    /// Detaches from the surface and hands it back.
    ///
    /// Folds a live proxy gesture back into the viewbox, drops the pending
    /// commit, finishes transitions and unregisters every listener.
    pub fn destroy(mut self) -> S {
        self.settle_proxy();
        self.scheduler.cancel_pending(&mut self.surface);
        self.scheduler.finish_transitions(&mut self.surface);
        let listeners = self.state.listeners;
        self.unlisten(listeners);
        debug!("pan/zoom detached");
        self.surface
    }

    fn plan_pan_to(
        &self,
        target: PanTarget<'_, S::Element>,
        zoom: PanToZoom,
    ) -> Result<(View, f64)> {
        let baseline = self.baseline.viewbox;
        let (point, auto) = match target {
            PanTarget::Point(point) => (point, None),
            PanTarget::FitCenter => (baseline.center(), None),
            PanTarget::Element(element) => {
                let bbox = self
                    .surface
                    .element_bbox(element)
                    .ok_or(Error::MissingTarget)?;
                if !bbox.is_finite() || (bbox.width() <= 0.0 && bbox.height() <= 0.0) {
                    return Err(Error::DegenerateTarget(bbox));
                }
                let share = (bbox.height() / baseline.height()).max(bbox.width() / baseline.width());
                (bbox.center(), Some(0.1 / share))
            }
        };
        let level = match zoom {
            PanToZoom::Current => self.state.zoom_level,
            PanToZoom::Level(level) => level,
            PanToZoom::Auto => auto.unwrap_or(self.state.zoom_level),
        };
        if !level.is_finite() || level <= 0.0 {
            return Err(Error::InvalidZoomLevel(level));
        }
        let level = self.config.clamp_level(level);
        let view = self
            .state
            .view
            .centered_on(point, level / self.state.zoom_level)
            .ok_or(Error::NonFinite)?;
        Ok((view, level))
    }

    /// Commits the authoritative view through the scheduler.
    pub(crate) fn update(&mut self, animate: bool) {
        let commit = self.constrained_commit();
        if animate {
            let duration = self.config.transition;
            self.scheduler.animate(&mut self.surface, commit, duration);
        } else {
            self.scheduler.submit(&mut self.surface, commit);
        }
    }

    /// The commit for the current view. Margins apply to the viewbox channel
    /// and the clamped rectangle becomes the view.
    fn constrained_commit(&mut self) -> Commit {
        match self.state.view {
            View::Proxy { transform, .. } => Commit::Transform(transform),
            View::Viewbox(rect) => {
                let rect = self.constrain(rect);
                self.state.view = View::Viewbox(rect);
                Commit::Viewbox(rect)
            }
        }
    }

    fn constrain(&self, rect: Rect) -> Rect {
        let fit = ViewportFit::new(
            self.surface.preserve_aspect_ratio(),
            self.surface.client_size(),
        );
        constrain_to_margins(rect, self.baseline.viewbox, self.config.margins, fit)
    }

    /// Reloads the viewbox and zoom level from the surface, unless a commit
    /// is still pending or the view lives on the proxy.
    pub(crate) fn resync_from_surface(&mut self) {
        if self.state.view.authority() != Authority::Viewbox || self.scheduler.has_pending() {
            return;
        }
        let Some(live) = self.surface.viewbox() else {
            return;
        };
        if live.is_finite() && live.width() > 0.0 && live.height() > 0.0 {
            self.state.view = View::Viewbox(live);
            self.state.zoom_level = zoom_level(live, self.baseline.viewbox);
        }
    }

    /// Hands the view to the proxy for the length of a gesture.
    pub(crate) fn begin_gesture(&mut self) {
        if self.proxy_only {
            return;
        }
        // A pan still holding the proxy is folded in before a pinch takes over.
        self.settle_proxy();
        self.scheduler.flush(&mut self.surface);
        self.resync_from_surface();
        if self.has_proxy {
            self.state.view = self.state.view.with_proxy(Affine::IDENTITY);
        }
    }

    /// Folds a gesture's proxy matrix back into a margin-respecting viewbox
    /// and clears the proxy node.
    pub(crate) fn settle_proxy(&mut self) {
        if self.proxy_only || self.state.view.authority() != Authority::Proxy {
            return;
        }
        self.scheduler.cancel_pending(&mut self.surface);
        let rect = self.constrain(self.state.view.effective_rect());
        self.state.view = View::Viewbox(rect);
        self.surface.set_proxy_transform(None);
        self.scheduler.apply_now(&mut self.surface, Commit::Viewbox(rect));
    }

    pub(crate) fn is_listening(&self, listeners: Listeners) -> bool {
        self.state.listeners.contains(listeners)
    }

    pub(crate) fn listen(&mut self, listeners: Listeners, passive: bool) {
        let fresh = listeners - self.state.listeners;
        if fresh.is_empty() {
            return;
        }
        self.state.listeners.insert(fresh);
        self.surface.listen(fresh, passive);
    }

    pub(crate) fn unlisten(&mut self, listeners: Listeners) {
        let active = listeners & self.state.listeners;
        if active.is_empty() {
            return;
        }
        self.state.listeners.remove(active);
        self.surface.unlisten(active);
    }
}
