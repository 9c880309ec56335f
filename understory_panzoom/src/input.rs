// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-neutral input records and handler responses.
//!
//! Positions are in the host's client coordinates; the controller maps them
//! into surface space through [`Surface::client_to_surface`](crate::Surface::client_to_surface).

use std::fmt;

use futures::future::LocalBoxFuture;
use kurbo::Point;
use smallvec::SmallVec;
use understory_gesture_state::pinch::TouchPair;
use understory_gesture_state::wheel::DeltaMode;

/// A wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Vertical delta in `delta_mode` units.
    pub delta_y: f64,
    /// Unit of `delta_y`.
    pub delta_mode: DeltaMode,
    /// Pointer position.
    pub position: Point,
    /// Whether the control key is held.
    pub ctrl_key: bool,
}

/// A pointer press or a single touch contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer position.
    pub position: Point,
    /// Mouse button index; `None` for touch.
    pub button: Option<u16>,
}

impl PointerInput {
    /// A mouse press with `button`.
    pub fn mouse(position: Point, button: u16) -> Self {
        Self {
            position,
            button: Some(button),
        }
    }

    /// A touch contact.
    pub fn touch(position: Point) -> Self {
        Self {
            position,
            button: None,
        }
    }
}

/// The contacts currently down during a touch event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchInput {
    /// Contact positions in the order the host reports them.
    pub touches: SmallVec<[Point; 2]>,
}

impl TouchInput {
    /// Collects contact positions.
    pub fn new(touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            touches: touches.into_iter().collect(),
        }
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Returns `true` when no contact is down.
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// The first contact.
    pub fn first(&self) -> Option<Point> {
        self.touches.first().copied()
    }

    /// The first two contacts.
    pub fn pair(&self) -> Option<TouchPair> {
        TouchPair::from_slice(&self.touches)
    }
}

/// What the host should do after forwarding an event.
#[derive(Debug, Default)]
#[must_use]
pub struct Response {
    /// Suppress the host's default handling of the event.
    pub prevent_default: bool,
    /// A pending pre-pan gate. Drive it with [`PanGateTicket::settle`] and
    /// pass the verdict to [`PanZoom::complete_pan_gate`](crate::PanZoom::complete_pan_gate).
    pub gate: Option<PanGateTicket>,
}

impl Response {
    pub(crate) fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn prevent() -> Self {
        Self {
            prevent_default: true,
            gate: None,
        }
    }

    pub(crate) fn gated(ticket: PanGateTicket) -> Self {
        Self {
            prevent_default: false,
            gate: Some(ticket),
        }
    }
}

/// A pre-pan gate awaiting its verdict.
///
/// The controller stays in its gating phase until the verdict is handed back.
/// Dropping the ticket leaves it there; a later pinch or teardown clears it.
pub struct PanGateTicket {
    verdict: LocalBoxFuture<'static, bool>,
    position: Point,
    generation: u64,
}

impl PanGateTicket {
    pub(crate) fn new(verdict: LocalBoxFuture<'static, bool>, position: Point, generation: u64) -> Self {
        Self {
            verdict,
            position,
            generation,
        }
    }

    /// Position of the press that requested the pan.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Waits for the gate.
    pub async fn settle(self) -> GateVerdict {
        let allowed = self.verdict.await;
        GateVerdict {
            allowed,
            position: self.position,
            generation: self.generation,
        }
    }
}

impl fmt::Debug for PanGateTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanGateTicket")
            .field("position", &self.position)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// The settled outcome of a [`PanGateTicket`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateVerdict {
    pub(crate) allowed: bool,
    pub(crate) position: Point,
    pub(crate) generation: u64,
}

impl GateVerdict {
    /// Whether the gate allowed the pan.
    pub fn allowed(&self) -> bool {
        self.allowed
    }
}
