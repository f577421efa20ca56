// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cellgrid_router --heading-base-level=0

//! Cellgrid Router: delivers pointer events to the entries under the pointer.
//!
//! ## Overview
//!
//! [`EventRouter`] sits on top of a [`cellgrid_index::SpatialIndex`]. For each pointer event it
//! picks a set of receivers and notifies each of them through the [`PointerTarget`] capability.
//!
//! ## Positional vs captured events
//!
//! Press, motion, and scroll go to entries whose box strictly contains the pointer right now.
//! Drag and release go to the entries that received the last press, even if the pointer has
//! since moved off them. This is the usual UI capture rule: a button you pressed still hears
//! about the release when the pointer is let go outside it. Release clears the capture
//! unconditionally, so a second release reaches nobody.
//!
//! ## Entries
//!
//! Entries are plain `Rc<T>` values owned by the application. `T` implements:
//!
//! - [`Bounded`]: reports its current box for [`EventRouter::register`] and
//!   [`EventRouter::relocate`].
//! - [`PointerTarget<P>`]: per-class handlers with no-op defaults. `P` is the caller's payload
//!   type, forwarded untouched.
//!
//! The router keeps an [`Interest`] mask per entry and skips classes an entry did not ask for.
//! Dropping the last `Rc` is enough to stop an entry receiving events.
//!
//! ## Failures
//!
//! Handlers return `Result`. A failing receiver does not stop delivery to the others; every
//! error is collected into the [`RouteReport`] returned by [`EventRouter::route`].
//!
//! ## Pointer state
//!
//! Each handler receives a [`PointerInput`] with the movement since the previous event and,
//! while a button is held, the offset from the press position (see [`pointer`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod pointer;
mod router;
mod types;

pub use router::{EventRouter, RouteReport};
pub use types::{
    Bounded, Delivery, DispatchFailure, EventClass, Interest, PointerInput, PointerTarget,
};
