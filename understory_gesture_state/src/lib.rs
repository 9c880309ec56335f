// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_state --heading-base-level=0

//! Understory Gesture State: state machines for pan/zoom gestures.
//!
//! This crate provides small, focused state machines and math for the three
//! gestures a pan/zoom surface reacts to. Each module handles one modality:
//!
//! - [`pan`]: press/move/release panning where the first real movement, not
//!   the press, starts the pan
//! - [`pinch`]: two-contact pinch zoom with distance-ratio amounts and
//!   midpoint focus tracking
//! - [`wheel`]: stateless wheel zoom with delta-unit normalization and an
//!   exponential speed curve
//!
//! ## Design Philosophy
//!
//! The machines only track raw input positions and phases. They do not map
//! client coordinates, hold any view state, or emit notifications; a
//! controller such as `understory_panzoom` drives them, maps positions into
//! its surface space, and decides what each transition means.
//!
//! The modalities compose orthogonally: a controller may hold a
//! [`pan::PanState`] and a [`pinch::PinchState`] side by side and hand a
//! remaining single contact from one to the other.
//!
//! ## Pan example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture_state::pan::PanState;
//!
//! let mut pan = PanState::default();
//! pan.arm(Point::new(10.0, 10.0));
//!
//! // A release without movement is not a pan.
//! assert!(!pan.end());
//! ```
//!
//! ## Pinch example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture_state::pinch::{PinchState, TouchPair};
//!
//! let mut pinch = PinchState::default();
//! pinch.begin(Some(TouchPair::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))));
//! let step = pinch
//!     .update(TouchPair::new(Point::new(0.0, 0.0), Point::new(20.0, 0.0)))
//!     .unwrap();
//! assert_eq!(step.amount, 0.5);
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod pan;
pub mod pinch;
pub mod wheel;
