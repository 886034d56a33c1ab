//! SQLite-backed building graph primitives: spatial containment and room
//! connectivity queries over a read-only element/relation store.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod cache;
pub mod errors;
pub mod graph;
pub mod hierarchy;
pub mod loader;
pub mod model;
pub mod query;
pub mod schema;
pub mod stats;
pub mod store;
pub mod wayfinding;

pub use crate::errors::BuildingGraphError;
pub use crate::graph::{BuildingGraph, LoadStats};
pub use crate::hierarchy::DescendantSet;
pub use crate::model::{Element, ElementType, Relation, RelationKind};
pub use crate::query::{QueryEngine, RoomOpenings};
pub use crate::stats::{AreaBasis, CategoryStats, ElementStats, GraphMetadata};
pub use crate::store::GraphStore;
