// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: notify a set of receivers with per-receiver failure isolation.
//!
//! Delivery rules:
//!
//! - Every receiver is notified exactly once, in the order given.
//! - A handler error is recorded as a [`DispatchFailure`] and delivery continues.
//! - The return value counts receivers that were notified, whether or not they failed.
//!
//! Target sets are normally built by [`EventRouter::route`](crate::EventRouter::route);
//! [`run`] is public so embedders can fan out their own notifications the same way.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use cellgrid_index::{Aabb, SpatialIndex};
//! use cellgrid_router::dispatcher;
//! use cellgrid_router::{Delivery, EventClass, PointerInput, PointerTarget};
//! use kurbo::{Point, Vec2};
//!
//! struct Counter(Cell<u32>);
//! impl PointerTarget<()> for Counter {
//!     type Error = &'static str;
//!     fn on_press(&self, _: &PointerInput<'_, ()>) -> Result<(), Self::Error> {
//!         self.0.set(self.0.get() + 1);
//!         if self.0.get() > 1 { Err("pressed twice") } else { Ok(()) }
//!     }
//! }
//!
//! let mut index = SpatialIndex::with_cell_size(10.0).unwrap();
//! let a = Rc::new(Counter(Cell::new(1)));
//! let b = Rc::new(Counter(Cell::new(0)));
//! index.insert(&a, Aabb::new(0.0, 0.0, 5.0, 5.0)).unwrap();
//! index.insert(&b, Aabb::new(0.0, 0.0, 5.0, 5.0)).unwrap();
//! let targets = index.query_point(1.0, 1.0);
//!
//! let input = PointerInput {
//!     class: EventClass::Press,
//!     position: Point::new(1.0, 1.0),
//!     delta: Vec2::ZERO,
//!     drag_offset: None,
//!     payload: &(),
//! };
//! let mut failures = Vec::new();
//! let press = Delivery::Event(EventClass::Press);
//! let delivered = dispatcher::run(&targets, press, &input, &mut failures);
//!
//! // `a` failed, `b` was still notified.
//! assert_eq!(delivered, 2);
//! assert_eq!(failures.len(), 1);
//! assert_eq!(b.0.get(), 1);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;

use cellgrid_index::EntryId;

use crate::types::{Delivery, DispatchFailure, EventClass, PointerInput, PointerTarget};

/// Call the handler on `target` that matches `delivery`.
pub fn notify<T, P>(
    target: &T,
    delivery: Delivery,
    input: &PointerInput<'_, P>,
) -> Result<(), T::Error>
where
    T: PointerTarget<P> + ?Sized,
{
    match delivery {
        Delivery::Event(EventClass::Press) => target.on_press(input),
        Delivery::Event(EventClass::Release) => target.on_release(input),
        Delivery::Event(EventClass::Drag) => target.on_drag(input),
        Delivery::Event(EventClass::Motion) => target.on_motion(input),
        Delivery::Event(EventClass::Scroll) => target.on_scroll(input),
        Delivery::Leave => target.on_leave(input),
    }
}

/// Notify every receiver in `targets`, appending handler errors to `failures`.
///
/// Returns the number of receivers notified.
pub fn run<T, P>(
    targets: &[(EntryId, Rc<T>)],
    delivery: Delivery,
    input: &PointerInput<'_, P>,
    failures: &mut Vec<DispatchFailure<T::Error>>,
) -> usize
where
    T: PointerTarget<P>,
{
    for (id, target) in targets {
        if let Err(error) = notify(&**target, delivery, input) {
            tracing::warn!(entry = %id, ?delivery, "receiver failed; continuing delivery");
            failures.push(DispatchFailure {
                entry: *id,
                delivery,
                error,
            });
        }
    }
    targets.len()
}
