// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch state machine and two-contact zoom math.
//!
//! A pinch compares consecutive samples of two contacts. The zoom amount is
//! the ratio of the previous distance to the current one, so spreading the
//! fingers yields an amount below 1 (the viewbox shrinks, content grows).
//! The midpoints of both samples give the focus of the step.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture_state::pinch::{PinchPhase, PinchState, TouchPair};
//!
//! let mut pinch = PinchState::default();
//! let phase = pinch.begin(Some(TouchPair::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))));
//! assert_eq!(phase, PinchPhase::Active);
//!
//! let step = pinch
//!     .update(TouchPair::new(Point::new(0.0, 0.0), Point::new(20.0, 0.0)))
//!     .unwrap();
//! assert_eq!(step.amount, 0.5);
//! assert_eq!(step.last_focus, Point::new(5.0, 0.0));
//! assert_eq!(step.focus, Point::new(10.0, 0.0));
//! ```

use kurbo::{Affine, Point};

/// Positions of the first two contacts of a touch sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPair {
    /// First contact.
    pub first: Point,
    /// Second contact.
    pub second: Point,
}

impl TouchPair {
    /// Creates a pair from two contact positions.
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    /// Builds a pair from the first two entries of `touches`, if present.
    pub fn from_slice(touches: &[Point]) -> Option<Self> {
        match touches {
            [first, second, ..] => Some(Self::new(*first, *second)),
            _ => None,
        }
    }

    /// Euclidean distance between the contacts.
    pub fn distance(&self) -> f64 {
        self.first.distance(self.second)
    }

    /// Point halfway between the contacts.
    pub fn midpoint(&self) -> Point {
        self.first.midpoint(self.second)
    }
}

/// One sample-to-sample pinch step, in the contacts' own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStep {
    /// `previous distance / current distance`.
    pub amount: f64,
    /// Midpoint of the previous sample.
    pub last_focus: Point,
    /// Midpoint of the current sample.
    pub focus: Point,
}

impl PinchStep {
    /// Computes the step between two samples.
    ///
    /// Returns `None` when the amount is not a finite positive number, e.g.
    /// when the current contacts coincide.
    pub fn between(last: TouchPair, current: TouchPair) -> Option<Self> {
        let amount = last.distance() / current.distance();
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        Some(Self {
            amount,
            last_focus: last.midpoint(),
            focus: current.midpoint(),
        })
    }

    /// The point the previous focus is extrapolated to.
    ///
    /// The focus moved from `last_focus` to `focus`; continuing that motion
    /// once more gives the source point of the step transform, so the
    /// midpoint's travel pans the view along with the scale.
    pub fn anchor(&self) -> Point {
        self.focus + (self.focus - self.last_focus)
    }

    /// Replaces the amount, e.g. after clamping against zoom bounds.
    #[must_use]
    pub fn with_amount(self, amount: f64) -> Self {
        Self { amount, ..self }
    }
}

/// The transform that scales by `amount` around `from` and moves `from` to `to`.
pub fn focus_scale(from: Point, to: Point, amount: f64) -> Affine {
    Affine::translate(-from.to_vec2())
        .then_scale(amount)
        .then_translate(to.to_vec2())
}

/// Limits a pinch amount so the zoom level never crosses `[min, max]`.
///
/// The level changes by `1 / amount`. A level that is already outside the
/// range may move back toward it but not further away; a level inside the
/// range is stopped at the bound it would cross.
pub fn clamp_pinch_amount(amount: f64, level: f64, min: f64, max: f64) -> f64 {
    if (level < min && amount > 1.0) || (level > max && amount < 1.0) {
        return 1.0;
    }
    let next = level / amount;
    if next > max && level <= max {
        level / max
    } else if next < min && level >= min {
        level / min
    } else {
        amount
    }
}

/// Lifecycle of a pinch gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PinchPhase {
    /// No contacts tracked.
    #[default]
    Idle,
    /// A single contact is down; the host keeps its default gestures.
    Tracking,
    /// Two contacts are down and steps are being produced.
    Active,
}

/// Tracks the previous two-contact sample of a pinch.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchState {
    phase: PinchPhase,
    last: Option<TouchPair>,
}

impl PinchState {
    /// Returns the current phase.
    pub fn phase(&self) -> PinchPhase {
        self.phase
    }

    /// Returns `true` while two contacts are producing steps.
    pub fn is_active(&self) -> bool {
        self.phase == PinchPhase::Active
    }

    /// Handles a touch start.
    ///
    /// With a pair the pinch becomes [`PinchPhase::Active`]; with fewer than
    /// two contacts it only tracks.
    pub fn begin(&mut self, pair: Option<TouchPair>) -> PinchPhase {
        match pair {
            Some(pair) => {
                self.phase = PinchPhase::Active;
                self.last = Some(pair);
            }
            None => {
                self.phase = PinchPhase::Tracking;
                self.last = None;
            }
        }
        self.phase
    }

    /// Records a new sample and returns the step from the previous one.
    ///
    /// Returns `None` when not active or when the step is degenerate; the
    /// sample is still recorded in the latter case.
    pub fn update(&mut self, current: TouchPair) -> Option<PinchStep> {
        if !self.is_active() {
            return None;
        }
        let last = self.last.replace(current)?;
        PinchStep::between(last, current)
    }

    /// Handles contacts lifting, with `remaining` contacts still down.
    ///
    /// Two or more remaining contacts keep the pinch going and return
    /// `false`. Otherwise the state resets and the return value says whether
    /// an active pinch just ended.
    pub fn end(&mut self, remaining: usize) -> bool {
        if remaining > 1 && self.is_active() {
            return false;
        }
        let was_active = self.is_active();
        self.phase = PinchPhase::Idle;
        self.last = None;
        was_active
    }
}
