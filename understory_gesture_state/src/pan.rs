// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan state machine: a press arms a pan, the first real movement starts it.
//!
//! ## Usage
//!
//! 1) On a matching pointer press call [`PanState::arm`] with the raw position.
//!    If a pre-pan gate has to be consulted first, call
//!    [`PanState::begin_gate`] and later [`PanState::arm`] or
//!    [`PanState::reject_gate`] once it settles.
//! 2) On each move, read [`PanState::last_pos`], compute the delta in your
//!    surface space, and ignore zero deltas.
//! 3) For a non-zero delta call [`PanState::activate`]; it returns `true`
//!    exactly once per pan, which is when a pan-start should be announced.
//! 4) After the delta has been applied call [`PanState::advance`].
//! 5) On release call [`PanState::end`]; it reports whether the pan had
//!    started so a pan-end can be announced.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture_state::pan::{PanPhase, PanState};
//!
//! let mut pan = PanState::default();
//! assert!(pan.arm(Point::new(10.0, 20.0)));
//! assert_eq!(pan.phase(), PanPhase::Armed);
//!
//! // First movement starts the pan.
//! let next = Point::new(15.0, 25.0);
//! let delta = next - pan.last_pos().unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//! assert!(pan.activate());
//! pan.advance(next);
//!
//! // Releasing reports that a pan really happened.
//! assert!(pan.end());
//! assert_eq!(pan.phase(), PanPhase::Idle);
//! ```

use kurbo::Point;

/// Lifecycle of a pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanPhase {
    /// No pan in progress.
    #[default]
    Idle,
    /// A press was seen and a pre-pan gate is being awaited.
    Gating,
    /// The trigger is held but the pointer has not moved yet.
    Armed,
    /// The pointer moved; pan deltas are being applied.
    Active,
}

/// Tracks pan state across press/move/release events.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanState {
    phase: PanPhase,
    /// Last raw pointer position consumed by the pan.
    last_pos: Option<Point>,
}

impl PanState {
    /// Returns the current phase.
    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    /// Returns `true` once movement has started the pan.
    pub fn is_active(&self) -> bool {
        self.phase == PanPhase::Active
    }

    /// Last raw pointer position, while armed or active.
    pub fn last_pos(&self) -> Option<Point> {
        self.last_pos
    }

    /// Moves `Idle → Gating` while a pre-pan gate is pending.
    ///
    /// Returns `false` (and changes nothing) unless the machine is idle, so a
    /// second press during a pending gate is ignored.
    pub fn begin_gate(&mut self) -> bool {
        if self.phase != PanPhase::Idle {
            return false;
        }
        self.phase = PanPhase::Gating;
        true
    }

    /// Moves `Gating → Idle` after the gate declined.
    pub fn reject_gate(&mut self) {
        if self.phase == PanPhase::Gating {
            self.phase = PanPhase::Idle;
        }
    }

    /// Arms the pan at `pos` from `Idle` or `Gating`.
    ///
    /// Returns `false` if a pan is already armed or active.
    pub fn arm(&mut self, pos: Point) -> bool {
        match self.phase {
            PanPhase::Idle | PanPhase::Gating => {
                self.phase = PanPhase::Armed;
                self.last_pos = Some(pos);
                true
            }
            PanPhase::Armed | PanPhase::Active => false,
        }
    }

    /// Moves `Armed → Active`.
    ///
    /// Returns `true` only on that transition, which is the moment a pan
    /// actually starts. Returns `false` if already active or not armed.
    pub fn activate(&mut self) -> bool {
        if self.phase == PanPhase::Armed {
            self.phase = PanPhase::Active;
            true
        } else {
            false
        }
    }

    /// Records `pos` as the last consumed position.
    pub fn advance(&mut self, pos: Point) {
        if matches!(self.phase, PanPhase::Armed | PanPhase::Active) {
            self.last_pos = Some(pos);
        }
    }

    /// Ends the pan and resets state.
    ///
    /// Returns `true` if the pan had become active, i.e. a pan-start was
    /// announced and a matching pan-end is due.
    pub fn end(&mut self) -> bool {
        let was_active = self.is_active();
        self.phase = PanPhase::Idle;
        self.last_pos = None;
        was_active
    }
}
