// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cellgrid_widgets --heading-base-level=0

//! Cellgrid Widgets: buttons that react to routed pointer events.
//!
//! A [`Button`] is an entry for [`cellgrid_router::EventRouter`]. It hit-tests presses against
//! its own box, tracks which [`Face`] to show, and queues [`ButtonEvent`]s for the
//! application to drain with [`Button::take_events`].
//!
//! Two behaviors are provided through [`ButtonKind`]:
//!
//! - [`ButtonKind::Push`]: pressed while held. The release is captured by the router, so letting
//!   go outside the button still releases it.
//! - [`ButtonKind::Toggle`]: each press flips a latched state and emits
//!   [`ButtonEvent::Toggled`]. Releases are ignored.
//!
//! Buttons built [`with_hover_face`](Button::with_hover_face) show [`Face::Hover`] while the
//! pointer moves over them and they are not pressed.
//!
//! The state machine lives in [`behavior`] and can be used without a router.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod behavior;
mod button;

pub use behavior::{ButtonEvent, ButtonKind, Face};
pub use button::Button;
