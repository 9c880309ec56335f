// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host event handlers.
//!
//! Each handler checks that its listener group is registered, drives the
//! matching gesture machine and calls back into the direct API. Handlers
//! never fail; an event that does not apply is ignored.

use kurbo::{Point, Vec2};
use tracing::{debug, warn};
use understory_gesture_state::pan::PanPhase;
use understory_gesture_state::pinch::{clamp_pinch_amount, focus_scale};
use understory_gesture_state::wheel::zoom_ratio;

use crate::engine::PanZoom;
use crate::input::{GateVerdict, PanGateTicket, PointerInput, Response, TouchInput, WheelInput};
use crate::surface::{Listeners, Notification, Outcome, Surface, ZoomRequest, ZoomTrigger};

impl<S: Surface> PanZoom<S> {
    /// Handles a wheel event.
    ///
    /// Every wheel event that reaches the surface has its host default
    /// suppressed, including ones ignored for lack of the control key.
    pub fn on_wheel(&mut self, input: &WheelInput) -> Response {
        if !self.is_listening(Listeners::WHEEL) {
            return Response::ignored();
        }
        if self.config.zoom_on_ctrl && !input.ctrl_key {
            return Response::prevent();
        }
        let pixels = self.config.wheel.normalize(input.delta_y, input.delta_mode);
        let ratio = zoom_ratio(self.config.zoom_speed, pixels);
        let focus = self.surface.client_to_surface(input.position);
        if !self.proxy_only {
            self.resync_from_surface();
        }

        let request = Notification::Zoom(ZoomRequest {
            trigger: ZoomTrigger::Wheel(input),
            level: self.state.zoom_level * ratio,
            focus,
            view: self.state.view,
        });
        if self.surface.dispatch(&request) == Outcome::PreventDefault {
            return Response::prevent();
        }
        self.zoom(ratio, Some(focus), false);
        Response::prevent()
    }

    /// Handles a pointer press on the surface.
    ///
    /// Only the configured pan button starts a pan. With a pre-pan gate the
    /// response carries a [`PanGateTicket`].
    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Response {
        if !self.is_listening(Listeners::POINTER_DOWN) {
            return Response::ignored();
        }
        if input.button.is_some_and(|button| button != self.config.pan_button) {
            return Response::ignored();
        }
        self.request_pan(input)
    }

    /// Handles a pointer or single-contact move while a pan is armed.
    pub fn on_pointer_move(&mut self, position: Point) -> Response {
        if !self.is_listening(Listeners::PAN_MOVE) {
            return Response::ignored();
        }
        let Some(last_pos) = self.state.pan.last_pos() else {
            return Response::ignored();
        };
        let last = self.surface.client_to_surface(last_pos);
        let current = self.surface.client_to_surface(position);
        let delta = current - last;
        if delta == Vec2::ZERO || !delta.is_finite() {
            return Response::ignored();
        }

        if self.state.pan.activate() {
            self.begin_gesture();
            self.surface.dispatch(&Notification::PanStart { position });
            debug!(?position, authority = ?self.state.view.authority(), "pan start");
        }
        let step = Notification::Panning { current, last };
        if self.surface.dispatch(&step) == Outcome::PreventDefault {
            return Response::ignored();
        }
        self.state.pan.advance(position);
        self.pan(delta, false);
        Response::ignored()
    }

    /// Handles a pointer release while a pan is armed.
    pub fn on_pointer_up(&mut self) -> Response {
        if self.is_listening(Listeners::PAN_END) {
            self.stop_pan();
        }
        Response::ignored()
    }

    /// Feeds back the verdict of a [`PanGateTicket`].
    ///
    /// A verdict for a gate that was cancelled in the meantime is dropped.
    pub fn complete_pan_gate(&mut self, verdict: GateVerdict) {
        if verdict.generation != self.state.gate_generation
            || self.state.pan.phase() != PanPhase::Gating
        {
            warn!(generation = verdict.generation, "dropping stale pan gate verdict");
            return;
        }
        if verdict.allowed {
            self.start_pan(verdict.position);
        } else {
            self.state.pan.reject_gate();
            self.relisten_pointer_down();
        }
    }

    /// Handles a touch start on the surface.
    ///
    /// Two contacts start a pinch. A single contact starts a pan when
    /// one-finger panning is on and otherwise leaves the host's default
    /// gestures alone.
    pub fn on_touch_start(&mut self, input: &TouchInput) -> Response {
        if !self.is_listening(Listeners::TOUCH_START) {
            return Response::ignored();
        }
        let one_finger_pan = self.one_finger_pan();
        let Some(pair) = input.pair() else {
            self.state.pinch.begin(None);
            return match input.first() {
                Some(first) if one_finger_pan => self.request_pan(&PointerInput::touch(first)),
                _ => Response::ignored(),
            };
        };

        if one_finger_pan {
            self.stop_pan();
        }
        if self.surface.dispatch(&Notification::PinchStart(input)) == Outcome::PreventDefault {
            return Response::prevent();
        }
        self.unlisten(Listeners::TOUCH_START);
        self.state.is_zooming = true;
        self.state.pinch.begin(Some(pair));
        self.begin_gesture();
        self.listen(Listeners::PINCH_MOVE | Listeners::PINCH_END, false);
        debug!(authority = ?self.state.view.authority(), "pinch start");
        Response::prevent()
    }

    /// Handles a touch move for a pinch or a touch pan.
    pub fn on_touch_move(&mut self, input: &TouchInput) -> Response {
        if self.is_listening(Listeners::PINCH_MOVE) {
            return self.pinch_move(input);
        }
        match input.first() {
            Some(first) if self.is_listening(Listeners::PAN_MOVE) => self.on_pointer_move(first),
            _ => Response::ignored(),
        }
    }

    /// Handles contacts lifting.
    ///
    /// A pinch ends once fewer than two contacts remain; with one-finger
    /// panning the remaining contact carries on as a pan.
    pub fn on_touch_end(&mut self, input: &TouchInput) -> Response {
        if self.is_listening(Listeners::PINCH_END) {
            if input.len() > 1 {
                return Response::prevent();
            }
            self.state.pinch.end(input.len());
            self.state.is_zooming = false;
            self.surface.dispatch(&Notification::PinchEnd(input));
            self.unlisten(Listeners::PINCH_MOVE | Listeners::PINCH_END);
            self.listen(Listeners::TOUCH_START, false);
            self.settle_proxy();
            debug!(zoom_level = self.state.zoom_level, "pinch end");

            return match input.first() {
                Some(first) if self.one_finger_pan() => Response {
                    prevent_default: true,
                    ..self.request_pan(&PointerInput::touch(first))
                },
                _ => Response::prevent(),
            };
        }
        if self.is_listening(Listeners::PAN_END) {
            self.stop_pan();
        }
        Response::ignored()
    }

    fn one_finger_pan(&self) -> bool {
        self.config.enable_panning && self.config.one_finger_pan
    }

    fn pinch_move(&mut self, input: &TouchInput) -> Response {
        let Some(step) = input.pair().and_then(|pair| self.state.pinch.update(pair)) else {
            return Response::prevent();
        };
        let level = self.state.zoom_level;
        let amount = clamp_pinch_amount(step.amount, level, self.config.zoom_min, self.config.zoom_max);
        let step = step.with_amount(amount);
        let from = self.surface.client_to_surface(step.anchor());
        let to = self.surface.client_to_surface(step.focus);

        let request = Notification::Zoom(ZoomRequest {
            trigger: ZoomTrigger::Pinch(input),
            level: level / amount,
            focus: from,
            view: self.state.view,
        });
        if self.surface.dispatch(&request) == Outcome::PreventDefault {
            return Response::prevent();
        }
        self.state.view.apply_pinch(focus_scale(from, to, amount));
        self.state.zoom_level = level / amount;
        self.update(false);
        Response::prevent()
    }

    /// Starts a pan now, or hands out a gate ticket first.
    fn request_pan(&mut self, input: &PointerInput) -> Response {
        if self.state.pan.phase() != PanPhase::Idle {
            return Response::ignored();
        }
        let Some(gate) = self.config.pan_gate.clone() else {
            self.start_pan(input.position);
            return Response::ignored();
        };
        self.state.pan.begin_gate();
        self.unlisten(Listeners::POINTER_DOWN);
        self.state.gate_generation += 1;
        let ticket = PanGateTicket::new(gate(input), input.position, self.state.gate_generation);
        Response::gated(ticket)
    }

    fn start_pan(&mut self, position: Point) {
        if self.state.is_zooming {
            self.state.pan.reject_gate();
            self.relisten_pointer_down();
            return;
        }
        self.unlisten(Listeners::POINTER_DOWN);
        self.state.pan.arm(position);
        self.listen(Listeners::PAN_MOVE | Listeners::PAN_END, true);
    }

    fn stop_pan(&mut self) {
        if self.state.pan.phase() == PanPhase::Gating {
            // Outstanding tickets are void from here on.
            self.state.gate_generation += 1;
        }
        if self.state.pan.end() {
            self.surface.dispatch(&Notification::PanEnd);
            self.settle_proxy();
            debug!(view = ?self.state.view, "pan end");
        }
        self.unlisten(Listeners::PAN_MOVE | Listeners::PAN_END);
        self.relisten_pointer_down();
    }

    fn relisten_pointer_down(&mut self) {
        if self.config.enable_panning {
            self.listen(Listeners::POINTER_DOWN, false);
        }
    }
}
