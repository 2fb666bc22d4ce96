//! Structural-change events.
//!
//! The store never imports a rendering dependency; instead an external
//! visualization collaborator installs an [`EventHook`] and mirrors the
//! graph from the event stream. Events fire synchronously, in mutation
//! order, and only for mutations that actually changed the graph (no-op
//! duplicate inserts emit nothing).

use crate::store::{Label, VertexId};

/// A single structural change to a [`Graph`](crate::store::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    /// A vertex was inserted for the first time.
    VertexAdded(VertexId),
    /// A directed edge was inserted for the first time.
    EdgeAdded {
        /// Edge source.
        from: VertexId,
        /// Edge target.
        to: VertexId,
    },
    /// A vertex label changed value.
    LabelChanged {
        /// The vertex whose label changed.
        vertex: VertexId,
        /// The new label.
        label: Label,
    },
}

/// Observer callback installed via
/// [`Graph::set_event_hook`](crate::store::Graph::set_event_hook).
pub type EventHook = Box<dyn FnMut(&GraphEvent)>;
