pub mod graph;
pub mod interaction;
pub mod physics;
pub mod pipeline;
pub mod seed;
pub mod snapshot;
pub mod vec2;

pub use graph::{GraphState, Link, Node};
pub use interaction::Command;
pub use physics::{LayoutConfig, LayoutScratch, step_layout};
pub use pipeline::Pipeline;
pub use snapshot::{Snapshot, SnapshotLink, SnapshotNode};
pub use vec2::{Vec2, vec2};
