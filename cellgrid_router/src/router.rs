// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router: picks receivers for pointer events using the grid and the engaged set.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use cellgrid_index::{Aabb, EntryId, GridConfig, IndexError, SpatialIndex};
use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::dispatcher;
use crate::pointer::PointerTrack;
use crate::types::{
    Bounded, Delivery, DispatchFailure, EventClass, Interest, PointerInput, PointerTarget,
};

type IdSet = SmallVec<[EntryId; 4]>;

/// Result of routing one event.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteReport<E> {
    /// Class that was routed.
    pub class: EventClass,
    /// Receivers notified of the event itself.
    pub delivered: usize,
    /// Receivers notified that the pointer left them (motion only).
    pub left: usize,
    /// Handler errors, one per failing receiver.
    pub failures: Vec<DispatchFailure<E>>,
}

impl<E> RouteReport<E> {
    /// Returns `true` if no handler failed.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Routes pointer events to registered entries.
///
/// The router owns the [`SpatialIndex`] and the per-entry interest table. Entries stay owned
/// by the caller and are held weakly, so dropping an entry is enough to stop it receiving
/// events; [`unregister`](Self::unregister) is the explicit path. Dropped entries are reaped
/// from the cell under the pointer after every routed event and from the whole index as it
/// grows, so recreating entries without unregistering them does not leak.
///
/// ## Routing
///
/// - [`Press`](EventClass::Press), [`Motion`](EventClass::Motion), [`Scroll`](EventClass::Scroll):
///   receivers are the entries whose box strictly contains the pointer.
/// - [`Drag`](EventClass::Drag), [`Release`](EventClass::Release): receivers are the engaged
///   entries, that is, whatever received the last press, wherever the pointer is now.
///
/// Press receivers join the engaged set. Release clears it after dispatch, whether or not the
/// pointer is still over the engaged entries.
///
/// After a motion event, entries hovered by the previous motion that are no longer under the
/// pointer are sent [`on_leave`](PointerTarget::on_leave).
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use cellgrid_index::Aabb;
/// use cellgrid_router::{Bounded, EventClass, EventRouter, PointerInput, PointerTarget};
/// use kurbo::Point;
///
/// struct Knob { drags: Cell<u32> }
/// impl Bounded for Knob {
///     fn aabb(&self) -> Aabb { Aabb::new(0.0, 0.0, 10.0, 10.0) }
/// }
/// impl PointerTarget<()> for Knob {
///     type Error = ();
///     fn on_drag(&self, _: &PointerInput<'_, ()>) -> Result<(), ()> {
///         self.drags.set(self.drags.get() + 1);
///         Ok(())
///     }
/// }
///
/// let mut router = EventRouter::with_cell_size(64.0).unwrap();
/// let knob = Rc::new(Knob { drags: Cell::new(0) });
/// router.register(&knob).unwrap();
///
/// router.route(EventClass::Press, Point::new(5.0, 5.0), &());
/// // Captured: the drag reaches the knob even though the pointer left it.
/// router.route(EventClass::Drag, Point::new(50.0, 50.0), &());
/// assert_eq!(knob.drags.get(), 1);
///
/// let release = router.route(EventClass::Release, Point::new(50.0, 50.0), &());
/// assert_eq!(release.delivered, 1);
/// assert_eq!(router.route(EventClass::Release, Point::new(50.0, 50.0), &()).delivered, 0);
/// ```
pub struct EventRouter<T> {
    index: SpatialIndex<T>,
    interest: HashMap<EntryId, Interest>,
    engaged: IdSet,
    hovered: IdSet,
    pointer: PointerTrack,
}

impl<T> Debug for EventRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("index", &self.index)
            .field("engaged", &self.engaged)
            .field("hovered", &self.hovered)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl<T> Default for EventRouter<T> {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl<T> EventRouter<T> {
    /// Create a router over an empty grid.
    pub fn new(config: GridConfig) -> Self {
        Self {
            index: SpatialIndex::new(config),
            interest: HashMap::new(),
            engaged: IdSet::new(),
            hovered: IdSet::new(),
            pointer: PointerTrack::default(),
        }
    }

    /// Create a router, validating `cell_size`.
    pub fn with_cell_size(cell_size: f64) -> Result<Self, IndexError> {
        GridConfig::new(cell_size).map(Self::new)
    }

    /// The underlying index.
    pub fn index(&self) -> &SpatialIndex<T> {
        &self.index
    }

    /// Unregister `entry`. It is also dropped from the engaged and hovered sets.
    pub fn unregister(&mut self, entry: &Rc<T>) -> Result<(), IndexError> {
        let id = self
            .index
            .id_of(entry)
            .ok_or(IndexError::NotRegistered { id: None })?;
        self.index.remove_id(id)?;
        self.forget(id);
        tracing::debug!(entry = %id, "unregistered");
        Ok(())
    }

    /// Interest mask of a registered entry.
    pub fn interest(&self, entry: &Rc<T>) -> Option<Interest> {
        let id = self.index.id_of(entry)?;
        self.interest.get(&id).copied()
    }

    /// Replace the interest mask of a registered entry.
    pub fn set_interest(&mut self, entry: &Rc<T>, interest: Interest) -> Result<(), IndexError> {
        let id = self
            .index
            .id_of(entry)
            .ok_or(IndexError::NotRegistered { id: None })?;
        self.interest.insert(id, interest);
        Ok(())
    }

    /// Live entries in the cell containing `point`, without testing their boxes.
    pub fn entries_near(&self, point: Point) -> Vec<(EntryId, Rc<T>)> {
        self.index.cells_at(point.x, point.y).collect()
    }

    /// Live entries whose box strictly overlaps `aabb`.
    pub fn entries_overlapping(&self, aabb: Aabb) -> Vec<(EntryId, Rc<T>)> {
        self.index.query(aabb)
    }

    /// Returns `true` if `entry` received the current press and has not been released.
    pub fn is_engaged(&self, entry: &Rc<T>) -> bool {
        self.index
            .id_of(entry)
            .is_some_and(|id| self.engaged.contains(&id))
    }

    /// Ids of the engaged entries.
    pub fn engaged(&self) -> &[EntryId] {
        &self.engaged
    }

    /// Ids of the entries hovered by the last motion event.
    pub fn hovered(&self) -> &[EntryId] {
        &self.hovered
    }

    /// Reap entries whose owners dropped them. Returns how many were reaped.
    pub fn purge(&mut self) -> usize {
        let reaped = self.index.purge();
        if reaped > 0 {
            let index = &self.index;
            self.interest.retain(|id, _| index.get(*id).is_some());
            self.engaged.retain(|id| index.get(*id).is_some());
            self.hovered.retain(|id| index.get(*id).is_some());
        }
        reaped
    }

    fn forget(&mut self, id: EntryId) {
        self.interest.remove(&id);
        self.engaged.retain(|e| *e != id);
        self.hovered.retain(|e| *e != id);
    }

    fn wants(&self, id: EntryId, interest: Interest) -> bool {
        self.interest
            .get(&id)
            .is_some_and(|mask| mask.contains(interest))
    }

    /// Resolve ids to live entries interested in `interest`.
    fn resolve(&self, ids: &[EntryId], interest: Interest) -> Vec<(EntryId, Rc<T>)> {
        ids.iter()
            .filter(|id| self.wants(**id, interest))
            .filter_map(|id| self.index.get(*id).map(|entry| (*id, entry)))
            .collect()
    }
}

impl<T: Bounded> EventRouter<T> {
    /// Register `entry` under its current box, interested in everything.
    pub fn register(&mut self, entry: &Rc<T>) -> Result<EntryId, IndexError> {
        self.register_with(entry, Interest::all())
    }

    /// Register `entry` under its current box with an explicit interest mask.
    ///
    /// Registering an entry again refreshes its box and replaces its mask.
    pub fn register_with(
        &mut self,
        entry: &Rc<T>,
        interest: Interest,
    ) -> Result<EntryId, IndexError> {
        let aabb = entry.aabb();
        let id = self.index.insert(entry, aabb)?;
        self.interest.insert(id, interest);
        // The insert may have purged dropped entries.
        if self.interest.len() > self.index.len() {
            let index = &self.index;
            self.interest.retain(|id, _| index.aabb_of(*id).is_some());
            self.engaged.retain(|id| index.aabb_of(*id).is_some());
            self.hovered.retain(|id| index.aabb_of(*id).is_some());
        }
        tracing::debug!(entry = %id, ?aabb, ?interest, "registered");
        Ok(id)
    }

    /// Re-read the box of a registered entry after it moved or resized.
    pub fn relocate(&mut self, entry: &Rc<T>) -> Result<(), IndexError> {
        self.index.set_aabb(entry, entry.aabb())
    }
}

impl<T> EventRouter<T> {
    /// Route one pointer event and report how delivery went.
    ///
    /// `payload` is forwarded by reference to every receiver. A failing receiver never
    /// prevents delivery to the others; its error is returned in
    /// [`RouteReport::failures`].
    pub fn route<P>(
        &mut self,
        class: EventClass,
        position: Point,
        payload: &P,
    ) -> RouteReport<T::Error>
    where
        T: PointerTarget<P>,
    {
        if class == EventClass::Press {
            self.pointer.press(position);
        }
        let input = PointerInput {
            class,
            position,
            delta: self.pointer.advance(position),
            drag_offset: self.pointer.drag_offset(position),
            payload,
        };

        let targets = if class.is_positional() {
            let hits = self.index.query_point(position.x, position.y);
            hits.into_iter()
                .filter(|(id, _)| self.wants(*id, class.interest()))
                .collect()
        } else {
            self.resolve(&self.engaged, class.interest())
        };
        tracing::debug!(
            ?class,
            x = position.x,
            y = position.y,
            targets = targets.len(),
            "routing"
        );

        let mut failures = Vec::new();
        let delivered = dispatcher::run(&targets, Delivery::Event(class), &input, &mut failures);

        let mut left = 0;
        match class {
            EventClass::Press => {
                for (id, _) in &targets {
                    if !self.engaged.contains(id) {
                        self.engaged.push(*id);
                    }
                }
            }
            EventClass::Release => {
                self.engaged.clear();
                self.pointer.release();
            }
            EventClass::Motion => {
                let gone: IdSet = self
                    .hovered
                    .iter()
                    .copied()
                    .filter(|id| !targets.iter().any(|(t, _)| t == id))
                    .collect();
                let leaving = self.resolve(&gone, Interest::LEAVE);
                left = dispatcher::run(&leaving, Delivery::Leave, &input, &mut failures);
                self.hovered = targets.iter().map(|(id, _)| *id).collect();
            }
            EventClass::Drag | EventClass::Scroll => {}
        }

        let cell = self.index.hasher().cell(position.x, position.y);
        let reaped = self.index.reap_cell(cell);
        for id in &reaped {
            self.forget(*id);
        }
        if !reaped.is_empty() {
            tracing::debug!(%cell, reaped = reaped.len(), "reaped dropped entries under pointer");
        }

        RouteReport {
            class,
            delivered,
            left,
            failures,
        }
    }
}
