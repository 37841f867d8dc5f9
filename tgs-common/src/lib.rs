// tgs-common - Shared types, configuration, and error definitions for the
// temporal graph sketch workspace.

pub mod config;
pub mod dataset;
pub mod edge;
pub mod error;

pub use config::SketchConfig;
pub use dataset::{into_windows, load_edges, TemporalEdge};
pub use edge::{Edge, Timestamp, VertexId, Weight};
pub use error::{TgsError, TgsResult};
