// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by index mutations and construction.

use alloc::format;
use alloc::string::String;

use crate::types::{Aabb, EntryId};

/// Error returned by [`SpatialIndex`](crate::SpatialIndex) mutations and
/// [`GridConfig::new`](crate::GridConfig::new).
///
/// None of these are fatal to the index: a failed call leaves it unchanged.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// The box has `left > right`, `bottom > top`, or a NaN edge.
    #[error("invalid geometry {aabb:?}: expected left <= right and bottom <= top")]
    InvalidGeometry {
        /// The rejected box.
        aabb: Aabb,
    },
    /// The entry is not registered, or not present in a bucket it was expected in.
    #[error("entry is not registered{}", last_known(.id))]
    NotRegistered {
        /// Last id the index knew for the entry, if any.
        id: Option<EntryId>,
    },
    /// The cell size is zero, negative, or not finite.
    #[error("invalid cell size {cell_size}: must be finite and > 0")]
    InvalidConfiguration {
        /// The rejected cell size.
        cell_size: f64,
    },
}

fn last_known(id: &Option<EntryId>) -> String {
    id.map(|id| format!(" (last known as {id})"))
        .unwrap_or_default()
}
